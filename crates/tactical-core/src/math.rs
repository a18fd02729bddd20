use core::ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// 3D vector on the +y-up convention used throughout the crates: +z is
/// "forward", +x is "right", and formations keep their geometry on the
/// horizontal (xz) plane.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const ZERO: Vec3 = Vec3 {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn dot(self, other: Vec3) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    pub fn length_squared(self) -> f32 {
        self.dot(self)
    }

    pub fn length(self) -> f32 {
        self.length_squared().sqrt()
    }

    pub fn distance(self, other: Vec3) -> f32 {
        (self - other).length()
    }

    pub fn distance_squared(self, other: Vec3) -> f32 {
        (self - other).length_squared()
    }

    /// Returns the unit vector, or `Vec3::ZERO` for a (near-)zero input.
    pub fn normalized_or_zero(self) -> Vec3 {
        let len = self.length();
        if len <= f32::EPSILON {
            Vec3::ZERO
        } else {
            self / len
        }
    }

    /// Copy with the vertical component dropped.
    pub fn flattened(self) -> Vec3 {
        Vec3::new(self.x, 0.0, self.z)
    }

    /// Step from `self` towards `target` by at most `max_delta`, without
    /// overshooting.
    pub fn move_towards(self, target: Vec3, max_delta: f32) -> Vec3 {
        let to_target = target - self;
        let dist = to_target.length();
        if dist <= max_delta || dist <= f32::EPSILON {
            target
        } else {
            self + to_target * (max_delta.max(0.0) / dist)
        }
    }
}

impl Add for Vec3 {
    type Output = Vec3;

    fn add(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl AddAssign for Vec3 {
    fn add_assign(&mut self, rhs: Vec3) {
        *self = *self + rhs;
    }
}

impl Sub for Vec3 {
    type Output = Vec3;

    fn sub(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl SubAssign for Vec3 {
    fn sub_assign(&mut self, rhs: Vec3) {
        *self = *self - rhs;
    }
}

impl Mul<f32> for Vec3 {
    type Output = Vec3;

    fn mul(self, rhs: f32) -> Vec3 {
        Vec3::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

impl Div<f32> for Vec3 {
    type Output = Vec3;

    fn div(self, rhs: f32) -> Vec3 {
        Vec3::new(self.x / rhs, self.y / rhs, self.z / rhs)
    }
}

impl Neg for Vec3 {
    type Output = Vec3;

    fn neg(self) -> Vec3 {
        Vec3::new(-self.x, -self.y, -self.z)
    }
}

/// Yaw (radians, rotation about +y) that faces along `direction`, projected
/// onto the horizontal plane. Yaw 0 faces +z; positive yaw turns towards +x.
pub fn yaw_from_direction(direction: Vec3) -> f32 {
    direction.x.atan2(direction.z)
}

/// Yaw that faces from `from` towards `to` on the horizontal plane.
pub fn yaw_towards(from: Vec3, to: Vec3) -> f32 {
    yaw_from_direction(to - from)
}

/// Unit direction vector for a yaw angle.
pub fn direction_from_yaw(yaw: f32) -> Vec3 {
    Vec3::new(yaw.sin(), 0.0, yaw.cos())
}

/// Signed smallest difference `target - current`, wrapped into `[-PI, PI]`.
pub fn angle_difference(current: f32, target: f32) -> f32 {
    use core::f32::consts::{PI, TAU};
    let mut diff = (target - current) % TAU;
    if diff > PI {
        diff -= TAU;
    } else if diff < -PI {
        diff += TAU;
    }
    diff
}

/// Advance `current` towards `target` by at most `max_delta` radians, taking
/// the short way around.
pub fn rotate_yaw_towards(current: f32, target: f32, max_delta: f32) -> f32 {
    let diff = angle_difference(current, target);
    if diff.abs() <= max_delta.max(0.0) {
        target
    } else {
        current + max_delta.copysign(diff)
    }
}

/// Place a local-space `offset` relative to `origin` rotated by `yaw`.
///
/// The local frame is yaw-rotated only: offsets stay level regardless of the
/// origin's pitch, which keeps formations on the horizontal plane.
pub fn transform_point(origin: Vec3, offset: Vec3, yaw: f32) -> Vec3 {
    let (sin, cos) = yaw.sin_cos();
    Vec3::new(
        origin.x + offset.x * cos + offset.z * sin,
        origin.y + offset.y,
        origin.z - offset.x * sin + offset.z * cos,
    )
}

/// Express a world-space `point` in the yaw-rotated local frame at `origin`.
/// Inverse of [`transform_point`].
pub fn inverse_transform_point(point: Vec3, origin: Vec3, yaw: f32) -> Vec3 {
    let delta = point - origin;
    let (sin, cos) = yaw.sin_cos();
    Vec3::new(
        delta.x * cos - delta.z * sin,
        delta.y,
        delta.x * sin + delta.z * cos,
    )
}
