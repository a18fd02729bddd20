use tactical_core::Vec3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Waypoint corridor returned by a planning backend. `points[0]` is the
/// requested start, `points.last()` the requested goal.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NavPath {
    pub points: Vec<Vec3>,
}

impl NavPath {
    pub fn new(points: Vec<Vec3>) -> Self {
        Self { points }
    }
}

/// Consumed path-planning contract ("seek point, report arrival").
///
/// Backends that cannot reach the goal return `None`; locomotion then stays
/// put rather than failing hard.
pub trait Navigator {
    fn plan(&self, start: Vec3, goal: Vec3) -> Option<NavPath>;
}

/// Trivial reference backend: a straight segment from start to goal. Useful
/// for open terrain, simulations, and tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct DirectNavigator;

impl Navigator for DirectNavigator {
    fn plan(&self, start: Vec3, goal: Vec3) -> Option<NavPath> {
        Some(NavPath::new(vec![start, goal]))
    }
}
