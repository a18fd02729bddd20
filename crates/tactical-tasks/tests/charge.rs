mod common;

use common::{ctx, SimWorld};
use tactical_core::{Bus, Message, Task, TaskStatus, Vec3};
use tactical_tasks::{Charge, ChargeConfig, GridSpec, GroupConfig};

#[test]
fn forms_behind_the_anchor_then_pushes_the_grid_onto_the_center() {
    let mut world = SimWorld::new();
    world.spawn(1, Vec3::ZERO);
    world.spawn(2, Vec3::new(0.5, 0.0, 0.0));
    world.spawn_enemy(10, Vec3::new(0.0, 0.0, 30.0));
    let mut bus = Bus::new();
    let mut task = Charge::new(
        GroupConfig::new(1).with_targets(vec![10]),
        ChargeConfig {
            grid: GridSpec::default(),
            break_distance: 2.0,
        },
    );
    task.on_message(
        &ctx(0),
        &mut world,
        &mut bus,
        &Message::StartListeningForOrders {
            leader: 1,
            follower: 2,
        },
    );

    // Assembly: the follower is ordered to the slot beside the anchor, not
    // toward the enemy.
    task.on_update(&ctx(1), &mut world, &mut bus);
    let slot = task
        .group()
        .agent(1)
        .locomotion
        .destination()
        .expect("follower ordered");
    assert!(slot.distance(Vec3::new(2.0, 0.0, 0.0)) < 0.01, "got {slot:?}");

    // Once assembled, the whole grid advances on the target center.
    let mut pushed = false;
    for tick in 2..80 {
        task.on_update(&ctx(tick), &mut world, &mut bus);
        let anchor_dest = task.group().agent(0).locomotion.destination();
        if anchor_dest.is_some_and(|d| d.distance(Vec3::new(0.0, 0.0, 30.0)) < 0.01) {
            pushed = true;
            break;
        }
    }
    assert!(pushed, "grid never advanced on the center");
    assert!(world.shots.is_empty(), "no shots during the approach march");

    // The push carries through to contact and clears the target group.
    let mut status = TaskStatus::Running;
    for tick in 80..600 {
        status = task.on_update(&ctx(tick), &mut world, &mut bus);
        if !status.is_running() {
            break;
        }
    }
    assert_eq!(status, TaskStatus::Success);
    let attackers: std::collections::BTreeSet<u64> =
        world.shots.iter().map(|shot| shot.0).collect();
    assert!(attackers.contains(&1) && attackers.contains(&2));
}

#[test]
fn close_agents_break_formation_and_stay_committed() {
    let mut world = SimWorld::new();
    // Anchor starts already within break distance of its push slot.
    world.spawn(1, Vec3::new(0.0, 0.0, 29.0));
    world.spawn_enemy(10, Vec3::new(0.0, 0.0, 30.0));
    let mut bus = Bus::new();
    let mut task = Charge::new(
        GroupConfig::new(1).with_targets(vec![10]),
        ChargeConfig::default(),
    );

    // Two assembly ticks settle the anchor on its own slot; the push tick
    // then breaks it straight into attack mode.
    task.on_update(&ctx(1), &mut world, &mut bus);
    task.on_update(&ctx(2), &mut world, &mut bus);
    task.on_update(&ctx(3), &mut world, &mut bus);
    assert!(task.group().agent(0).attack_position);
}
