mod common;

use common::{ctx, SimWorld};
use tactical_core::{Bus, Task, TaskStatus, Vec3};
use tactical_tasks::{Attack, GroupConfig};

#[test]
fn distant_target_is_approached_before_any_shot() {
    let mut world = SimWorld::new();
    world.spawn(1, Vec3::ZERO);
    world.spawn_enemy(10, Vec3::new(0.0, 0.0, 20.0));
    let mut bus = Bus::new();
    let mut task = Attack::new(GroupConfig::new(1).with_targets(vec![10]));

    // First update forms the group and issues the approach order; the
    // locomotion step lands on the following update.
    task.on_update(&ctx(1), &mut world, &mut bus);
    task.on_update(&ctx(2), &mut world, &mut bus);
    assert!(world.shots.is_empty());
    assert!(world.entity(1).position.z > 0.0);
}

#[test]
fn agents_converge_stop_and_fire_until_the_target_dies() {
    let mut world = SimWorld::new();
    world.spawn(1, Vec3::ZERO);
    world.spawn_enemy(10, Vec3::new(0.0, 0.0, 20.0));
    let mut bus = Bus::new();
    let mut task = Attack::new(GroupConfig::new(1).with_targets(vec![10]));

    let mut status = TaskStatus::Running;
    for tick in 0..400 {
        status = task.on_update(&ctx(tick), &mut world, &mut bus);
        if !status.is_running() {
            break;
        }
    }
    assert_eq!(status, TaskStatus::Success);
    assert!(!world.shots.is_empty());
    assert!(world.shots.iter().all(|shot| *shot == (1, 10)));
    // The agent held its standoff distance instead of walking onto the
    // target.
    let final_distance = world
        .entity(1)
        .position
        .distance(world.entity(10).position);
    assert!(final_distance > 3.0, "distance was {final_distance}");
}
