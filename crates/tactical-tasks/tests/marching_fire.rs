mod common;

use common::{ctx, SimWorld};
use tactical_core::{Bus, Health, Task, Vec3};
use tactical_tasks::{GroupConfig, MarchingFire, MarchingFireConfig};

#[test]
fn fires_on_the_move_without_breaking_formation() {
    let mut world = SimWorld::new();
    let agent = world.spawn(1, Vec3::ZERO);
    agent.attack_distance = 20.0;
    world.spawn_enemy(10, Vec3::new(0.0, 0.0, 12.0)).health = Some(Health::new(100_000.0));
    let mut bus = Bus::new();
    let mut task = MarchingFire::new(
        GroupConfig::new(1).with_targets(vec![10]),
        MarchingFireConfig::default(),
    );

    // Two assembly ticks, then the grid pushes onto the center.
    task.on_update(&ctx(1), &mut world, &mut bus);
    task.on_update(&ctx(2), &mut world, &mut bus);

    let mut positions_at_shots = Vec::new();
    for tick in 3..20 {
        let before = world.shots.len();
        task.on_update(&ctx(tick), &mut world, &mut bus);
        if world.shots.len() > before {
            positions_at_shots.push(world.entity(1).position);
        }
    }
    assert!(positions_at_shots.len() > 2, "should fire repeatedly on the move");
    // Still marching between shots, not stopped at a standoff.
    let advanced = positions_at_shots.last().unwrap().z - positions_at_shots[0].z;
    assert!(advanced > 1.0, "advanced {advanced}");
    // The slot destination stays the formation slot, not the enemy.
    let destination = task.group().agent(0).locomotion.destination().unwrap();
    assert!(destination.distance(Vec3::new(0.0, 0.0, 12.0)) < 0.01);
    assert!(!task.group().agent(0).attack_position);
}
