use std::cell::Cell;

use tactical_core::Vec3;
use tactical_nav::{
    DirectNavigator, Locomotion, LocomotionBackend, LocomotionConfig, NavPath, Navigator,
};

fn config() -> LocomotionConfig {
    LocomotionConfig {
        move_speed: 2.0,
        rotation_speed: 10.0,
        radius: 0.5,
        stopping_distance: 0.05,
    }
}

/// Counts planning requests so re-plan behavior is observable.
struct CountingNavigator {
    inner: DirectNavigator,
    plans: Cell<u64>,
}

impl CountingNavigator {
    fn new() -> Self {
        Self {
            inner: DirectNavigator,
            plans: Cell::new(0),
        }
    }
}

impl Navigator for CountingNavigator {
    fn plan(&self, start: Vec3, goal: Vec3) -> Option<NavPath> {
        self.plans.set(self.plans.get() + 1);
        self.inner.plan(start, goal)
    }
}

fn run_to_arrival(locomotion: &mut Locomotion, start: Vec3, navigator: Option<&dyn Navigator>) -> (Vec3, u32) {
    let mut position = start;
    let mut yaw = 0.0;
    let mut ticks = 0;
    while !locomotion.has_arrived(position) && ticks < 1000 {
        let (p, y) = locomotion.advance(0.1, position, yaw, navigator);
        position = p;
        yaw = y;
        ticks += 1;
    }
    (position, ticks)
}

#[test]
fn steering_reaches_destination_at_capped_speed() {
    let mut locomotion = Locomotion::new(LocomotionBackend::Steering, config());
    locomotion.set_destination(Vec3::new(4.0, 0.0, 0.0), Vec3::ZERO);

    let (one_step, _) = locomotion.advance(0.1, Vec3::ZERO, 0.0, None);
    // 2.0 units/s for 0.1 s.
    assert!((one_step.x - 0.2).abs() <= 1e-5);

    let (arrived_at, ticks) = run_to_arrival(&mut locomotion, one_step, None);
    assert!(arrived_at.distance(Vec3::new(4.0, 0.0, 0.0)) <= 0.06);
    // 4 units at 0.2 per tick, minus the step already taken.
    assert!(ticks <= 20);
}

#[test]
fn steering_faces_movement_direction() {
    let mut locomotion = Locomotion::new(LocomotionBackend::Steering, config());
    locomotion.set_destination(Vec3::new(10.0, 0.0, 0.0), Vec3::ZERO);

    let (_, yaw) = locomotion.advance(0.1, Vec3::ZERO, 0.0, None);
    // Destination due +x; rotation cap of 1.0 rad this tick.
    assert!((yaw - 1.0).abs() <= 1e-5);
}

#[test]
fn disabled_rotation_keeps_facing() {
    let mut locomotion = Locomotion::new(LocomotionBackend::Steering, config());
    locomotion.set_update_rotation(false);
    locomotion.set_destination(Vec3::new(0.0, 0.0, -10.0), Vec3::ZERO);

    let (position, yaw) = locomotion.advance(0.1, Vec3::ZERO, 0.0, None);
    assert!(position.z < 0.0);
    assert_eq!(yaw, 0.0);

    // End restores the default.
    locomotion.end();
    assert!(locomotion.update_rotation());
}

#[test]
fn planned_replans_only_when_destination_changes() {
    let navigator = CountingNavigator::new();
    let mut locomotion = Locomotion::new(LocomotionBackend::Planned, config());

    let goal = Vec3::new(3.0, 0.0, 3.0);
    let mut position = Vec3::ZERO;
    let mut yaw = 0.0;
    for _ in 0..5 {
        // Re-issue the same destination every tick, as formations do.
        locomotion.set_destination(goal, position);
        let (p, y) = locomotion.advance(0.1, position, yaw, Some(&navigator));
        position = p;
        yaw = y;
    }
    assert_eq!(navigator.plans.get(), 1);

    locomotion.set_destination(Vec3::new(-3.0, 0.0, 0.0), position);
    locomotion.advance(0.1, position, yaw, Some(&navigator));
    assert_eq!(navigator.plans.get(), 2);
}

#[test]
fn planned_follows_the_corridor() {
    struct Dogleg;
    impl Navigator for Dogleg {
        fn plan(&self, start: Vec3, goal: Vec3) -> Option<NavPath> {
            Some(NavPath::new(vec![start, Vec3::new(2.0, 0.0, 0.0), goal]))
        }
    }

    let mut locomotion = Locomotion::new(LocomotionBackend::Planned, config());
    locomotion.set_destination(Vec3::new(2.0, 0.0, 2.0), Vec3::ZERO);

    let (position, _) = run_to_arrival(&mut locomotion, Vec3::ZERO, Some(&Dogleg));
    assert!(position.distance(Vec3::new(2.0, 0.0, 2.0)) <= 0.06);
}

#[test]
fn planned_without_backend_degrades_to_straight_seek() {
    let mut locomotion = Locomotion::new(LocomotionBackend::Planned, config());
    locomotion.set_destination(Vec3::new(1.0, 0.0, 0.0), Vec3::ZERO);

    let (position, _) = run_to_arrival(&mut locomotion, Vec3::ZERO, None);
    assert!(position.distance(Vec3::new(1.0, 0.0, 0.0)) <= 0.06);
}
