mod common;

use common::{ctx, SimWorld};
use tactical_core::{Bus, Task, TaskStatus, Vec3};
use tactical_tasks::{GroupConfig, Retreat, RetreatConfig};

#[test]
fn withdraws_backwards_while_returning_fire_and_succeeds_at_safe_distance() {
    let mut world = SimWorld::new();
    let agent = world.spawn(1, Vec3::new(0.0, 0.0, 4.0));
    agent.attack_distance = 20.0;
    world.spawn_enemy(10, Vec3::new(0.0, 0.0, 10.0));
    let mut bus = Bus::new();
    let mut task = Retreat::new(
        GroupConfig::new(1).with_targets(vec![10]),
        RetreatConfig { safe_distance: 8.0 },
    );

    let mut status = TaskStatus::Running;
    for tick in 1..60 {
        status = task.on_update(&ctx(tick), &mut world, &mut bus);
        if !status.is_running() {
            break;
        }
    }
    assert_eq!(status, TaskStatus::Success);

    // The agent backed away along its formation heading, still facing the
    // pursuer, shooting as it went.
    let position = world.entity(1).position;
    assert!(position.z <= 2.01, "got {position:?}");
    assert!(world.entity(1).yaw.abs() < 0.01, "kept facing the enemy");
    assert!(!world.shots.is_empty());
    assert!(world.shots.iter().all(|shot| *shot == (1, 10)));
}

#[test]
fn unseen_pursuers_let_movement_steer_the_facing_again() {
    let mut world = SimWorld::new();
    let agent = world.spawn(1, Vec3::new(0.0, 0.0, 4.0));
    agent.sight_range = 2.0; // cannot see the enemy at all
    world.spawn_enemy(10, Vec3::new(0.0, 0.0, 10.0));
    let mut bus = Bus::new();
    let mut task = Retreat::new(
        GroupConfig::new(1).with_targets(vec![10]),
        RetreatConfig { safe_distance: 8.0 },
    );

    let mut status = TaskStatus::Running;
    for tick in 1..60 {
        status = task.on_update(&ctx(tick), &mut world, &mut bus);
        if !status.is_running() {
            break;
        }
    }
    assert_eq!(status, TaskStatus::Success);
    assert!(world.shots.is_empty());
    // With no visible threat the agent turned to face its escape route.
    let yaw = world.entity(1).yaw;
    assert!(
        (yaw.abs() - std::f32::consts::PI).abs() < 0.1,
        "expected to face -z, got {yaw}"
    );
}
