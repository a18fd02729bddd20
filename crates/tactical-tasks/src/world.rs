use tactical_core::{Vec3, WorldMut, WorldView};
use tactical_nav::{LocomotionConfig, Navigator};

/// Read access a tactical group needs on top of the base world contract.
///
/// Positions and yaws are `Option` so a despawned entity degrades to "skip
/// this agent this tick" instead of a panic.
pub trait TacticalWorldView: WorldView {
    fn position(&self, agent: Self::Agent) -> Option<Vec3>;

    /// Facing around the vertical axis, radians.
    fn yaw(&self, agent: Self::Agent) -> Option<f32>;

    /// Whether the entity can take damage at all, dead or alive.
    fn is_damageable(&self, agent: Self::Agent) -> bool;

    fn is_alive(&self, agent: Self::Agent) -> bool;

    /// Unobstructed line of sight from `observer` to `target`.
    fn line_of_sight(&self, observer: Self::Agent, target: Self::Agent) -> bool;

    /// Maximum range of the agent's own weapon.
    fn attack_distance(&self, agent: Self::Agent) -> f32;

    /// Half-angle (radians) within which the agent counts as aimed.
    fn attack_angle(&self, agent: Self::Agent) -> f32;

    fn locomotion_config(&self, agent: Self::Agent) -> LocomotionConfig;

    /// Appends every damageable entity carrying `tag` to `out`.
    fn collect_damageable_with_tag(&self, tag: &str, out: &mut Vec<Self::Agent>);

    /// Planner used by agents running the planned locomotion backend.
    fn navigator(&self) -> Option<&dyn Navigator> {
        None
    }
}

/// Mutable counterpart: movement writes and attack resolution.
pub trait TacticalWorldMut: WorldMut + TacticalWorldView {
    fn set_position(&mut self, agent: Self::Agent, position: Vec3);

    fn set_yaw(&mut self, agent: Self::Agent, yaw: f32);

    /// Attempts one attack. The world decides validity (range, aim,
    /// cooldowns, line of sight) and returns whether a shot landed.
    fn try_attack(&mut self, attacker: Self::Agent, target: Self::Agent) -> bool;
}
