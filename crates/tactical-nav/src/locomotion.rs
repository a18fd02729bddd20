use tactical_core::math::{rotate_yaw_towards, yaw_towards};
use tactical_core::Vec3;

use crate::{NavPath, Navigator};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Arrival checks allow a small slack beyond the stopping distance so an
/// agent that stopped a hair short still counts as arrived.
const ARRIVAL_SLACK: f32 = 0.01;

/// Tolerance below which a re-issued destination is considered unchanged and
/// does not trigger a re-plan.
const DESTINATION_EPSILON: f32 = 1e-3;

/// Movement parameters for one agent.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LocomotionConfig {
    /// Linear speed cap, units per second.
    pub move_speed: f32,
    /// Angular speed cap, radians per second.
    pub rotation_speed: f32,
    /// Physical footprint radius, used for collision-aware detours.
    pub radius: f32,
    /// How close to the destination the agent should stop.
    pub stopping_distance: f32,
}

impl Default for LocomotionConfig {
    fn default() -> Self {
        Self {
            move_speed: 4.0,
            rotation_speed: core::f32::consts::PI,
            radius: 0.5,
            stopping_distance: 0.1,
        }
    }
}

/// Which locomotion variant to instantiate for enrolled agents; selected per
/// deployment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum LocomotionBackend {
    /// Kinematic stepper: straight-line seek, no planning.
    #[default]
    Steering,
    /// Follows corridors from a [`Navigator`] backend.
    Planned,
}

#[derive(Debug, Clone)]
struct Steering {
    destination: Option<Vec3>,
}

#[derive(Debug, Clone)]
struct Planned {
    destination: Option<Vec3>,
    path: Option<NavPath>,
    next_index: usize,
    replans: u64,
}

#[derive(Debug, Clone)]
enum Variant {
    Steering(Steering),
    Planned(Planned),
}

/// Movement/rotation adapter over a concrete locomotion backend.
///
/// Positions and facing live in the world; `advance` is a pure step function
/// `(position, yaw) -> (position, yaw)` so the owner decides where state is
/// stored.
#[derive(Debug, Clone)]
pub struct Locomotion {
    config: LocomotionConfig,
    update_rotation: bool,
    variant: Variant,
}

impl Locomotion {
    pub fn new(backend: LocomotionBackend, config: LocomotionConfig) -> Self {
        let variant = match backend {
            LocomotionBackend::Steering => Variant::Steering(Steering { destination: None }),
            LocomotionBackend::Planned => Variant::Planned(Planned {
                destination: None,
                path: None,
                next_index: 1,
                replans: 0,
            }),
        };
        Self {
            config,
            update_rotation: true,
            variant,
        }
    }

    pub fn config(&self) -> &LocomotionConfig {
        &self.config
    }

    pub fn backend(&self) -> LocomotionBackend {
        match &self.variant {
            Variant::Steering(_) => LocomotionBackend::Steering,
            Variant::Planned(_) => LocomotionBackend::Planned,
        }
    }

    pub fn radius(&self) -> f32 {
        self.config.radius
    }

    pub fn destination(&self) -> Option<Vec3> {
        match &self.variant {
            Variant::Steering(s) => s.destination,
            Variant::Planned(p) => p.destination,
        }
    }

    /// Number of times the planned variant asked its backend for a path.
    pub fn replans(&self) -> u64 {
        match &self.variant {
            Variant::Steering(_) => 0,
            Variant::Planned(p) => p.replans,
        }
    }

    /// Record the desired destination. The vertical coordinate snaps to the
    /// agent's current height to keep it grounded. Re-issuing an unchanged
    /// destination never discards a planned corridor.
    pub fn set_destination(&mut self, destination: Vec3, current: Vec3) {
        let destination = Vec3::new(destination.x, current.y, destination.z);
        match &mut self.variant {
            Variant::Steering(s) => s.destination = Some(destination),
            Variant::Planned(p) => {
                if p.destination
                    .is_some_and(|prev| prev.distance(destination) <= DESTINATION_EPSILON)
                {
                    return;
                }
                p.destination = Some(destination);
                p.path = None;
                p.next_index = 1;
            }
        }
    }

    /// True once within stopping tolerance of the last destination; false if
    /// no destination was ever set.
    pub fn has_arrived(&self, position: Vec3) -> bool {
        self.destination().is_some_and(|destination| {
            position.distance(destination) <= self.config.stopping_distance + ARRIVAL_SLACK
        })
    }

    /// Toggle rotate-to-face-movement (retreating agents disable this so they
    /// can aim behind themselves while backing away).
    pub fn set_update_rotation(&mut self, update: bool) {
        self.update_rotation = update;
    }

    pub fn update_rotation(&self) -> bool {
        self.update_rotation
    }

    /// Cancel any pending destination without changing facing.
    pub fn stop(&mut self) {
        match &mut self.variant {
            Variant::Steering(s) => s.destination = None,
            Variant::Planned(p) => {
                p.destination = None;
                p.path = None;
                p.next_index = 1;
            }
        }
    }

    /// Release locomotion state when the agent leaves a formation.
    pub fn end(&mut self) {
        self.stop();
        self.update_rotation = true;
    }

    /// One tick of movement. Returns the new `(position, yaw)`.
    pub fn advance(
        &mut self,
        dt_seconds: f32,
        position: Vec3,
        yaw: f32,
        navigator: Option<&dyn Navigator>,
    ) -> (Vec3, f32) {
        if self.has_arrived(position) {
            return (position, yaw);
        }
        let dt = dt_seconds.max(0.0);
        let step = self.config.move_speed.max(0.0) * dt;
        let rotation_step = self.config.rotation_speed.max(0.0) * dt;
        let update_rotation = self.update_rotation;

        let new_position = match &mut self.variant {
            Variant::Steering(s) => match s.destination {
                Some(destination) => position.move_towards(destination, step),
                None => position,
            },
            Variant::Planned(p) => {
                let Some(destination) = p.destination else {
                    return (position, yaw);
                };
                if p.path.is_none() {
                    p.path = match navigator {
                        Some(navigator) => navigator.plan(position, destination),
                        // No backend available: degrade to a straight seek.
                        None => Some(NavPath::new(vec![position, destination])),
                    };
                    p.next_index = 1;
                    p.replans += 1;
                }
                match &p.path {
                    Some(path) if path.points.len() >= 2 => {
                        let mut current = position;
                        let mut remaining = step;
                        while p.next_index < path.points.len() && remaining > 0.0 {
                            let waypoint = path.points[p.next_index];
                            let dist = current.distance(waypoint);
                            if dist <= remaining {
                                current = waypoint;
                                p.next_index += 1;
                                remaining -= dist;
                            } else {
                                current = current.move_towards(waypoint, remaining);
                                remaining = 0.0;
                            }
                        }
                        current
                    }
                    // Unreachable goal: hold position, keep reporting
                    // not-arrived.
                    _ => position,
                }
            }
        };

        let new_yaw = if update_rotation {
            let heading = new_position - position;
            if heading.flattened().length_squared() > f32::EPSILON {
                rotate_yaw_towards(yaw, yaw_towards(position, new_position), rotation_step)
            } else {
                yaw
            }
        } else {
            yaw
        };

        (new_position, new_yaw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_destination_means_never_arrived() {
        let locomotion = Locomotion::new(LocomotionBackend::Steering, LocomotionConfig::default());
        assert!(!locomotion.has_arrived(Vec3::ZERO));
    }

    #[test]
    fn destination_snaps_to_current_height() {
        let mut locomotion =
            Locomotion::new(LocomotionBackend::Steering, LocomotionConfig::default());
        locomotion.set_destination(Vec3::new(3.0, 9.0, 4.0), Vec3::new(0.0, 1.5, 0.0));
        assert_eq!(locomotion.destination(), Some(Vec3::new(3.0, 1.5, 4.0)));
    }

    #[test]
    fn stop_cancels_pending_destination() {
        let mut locomotion =
            Locomotion::new(LocomotionBackend::Steering, LocomotionConfig::default());
        locomotion.set_destination(Vec3::new(10.0, 0.0, 0.0), Vec3::ZERO);
        locomotion.stop();
        assert_eq!(locomotion.destination(), None);
        let (position, _) = locomotion.advance(0.1, Vec3::ZERO, 0.0, None);
        assert_eq!(position, Vec3::ZERO);
    }
}
