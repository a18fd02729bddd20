use tactical_core::math::{angle_difference, rotate_yaw_towards, yaw_towards};
use tactical_core::{AgentId, TickContext, Vec3};
use tactical_nav::Locomotion;

use crate::world::{TacticalWorldMut, TacticalWorldView};

/// One roster entry of a tactical group.
///
/// Carries the agent's locomotion state, its current attack target, whether
/// it has committed to an attack approach, and the formation slot `S` the
/// owning maneuver assigned to it.
#[derive(Debug)]
pub struct TacticalAgent<A: AgentId, S> {
    pub id: A,
    pub locomotion: Locomotion,
    pub target: Option<A>,
    pub attack_position: bool,
    pub slot: S,
}

impl<A: AgentId, S> TacticalAgent<A, S> {
    pub fn new(id: A, locomotion: Locomotion, slot: S) -> Self {
        Self {
            id,
            locomotion,
            target: None,
            attack_position: false,
            slot,
        }
    }

    pub fn set_destination<W>(&mut self, world: &W, destination: Vec3)
    where
        W: TacticalWorldView<Agent = A>,
    {
        if let Some(position) = world.position(self.id) {
            self.locomotion.set_destination(destination, position);
        }
    }

    pub fn has_arrived<W>(&self, world: &W) -> bool
    where
        W: TacticalWorldView<Agent = A>,
    {
        world
            .position(self.id)
            .is_some_and(|position| self.locomotion.has_arrived(position))
    }

    /// Rotates one step toward `target_yaw`. Returns true once the remaining
    /// error is inside the agent's attack angle.
    pub fn rotate_towards<W>(&mut self, ctx: &TickContext, world: &mut W, target_yaw: f32) -> bool
    where
        W: TacticalWorldMut<Agent = A>,
    {
        let Some(current) = world.yaw(self.id) else {
            return false;
        };
        let step = self.locomotion.config().rotation_speed * ctx.dt_seconds;
        let yaw = rotate_yaw_towards(current, target_yaw, step.max(0.0));
        world.set_yaw(self.id, yaw);
        angle_difference(yaw, target_yaw).abs() < world.attack_angle(self.id)
    }

    /// Rotates one step toward facing `point`. A point on top of the agent
    /// counts as already aimed.
    pub fn rotate_towards_position<W>(
        &mut self,
        ctx: &TickContext,
        world: &mut W,
        point: Vec3,
    ) -> bool
    where
        W: TacticalWorldMut<Agent = A>,
    {
        let Some(position) = world.position(self.id) else {
            return false;
        };
        if point.flattened().distance_squared(position.flattened()) < f32::EPSILON {
            return true;
        }
        self.rotate_towards(ctx, world, yaw_towards(position, point))
    }

    pub fn can_see_target<W>(&self, world: &W) -> bool
    where
        W: TacticalWorldView<Agent = A>,
    {
        self.target
            .is_some_and(|target| world.line_of_sight(self.id, target))
    }

    /// Fires at the current target if the world allows it this tick.
    pub fn try_attack<W>(&mut self, world: &mut W) -> bool
    where
        W: TacticalWorldMut<Agent = A>,
    {
        let Some(target) = self.target else {
            return false;
        };
        world.try_attack(self.id, target)
    }

    pub fn stop(&mut self) {
        self.locomotion.stop();
    }

    /// Moves this tick's locomotion step and writes the result back.
    pub fn advance<W>(&mut self, ctx: &TickContext, world: &mut W)
    where
        W: TacticalWorldMut<Agent = A>,
    {
        let Some(position) = world.position(self.id) else {
            return;
        };
        let yaw = world.yaw(self.id).unwrap_or(0.0);
        let (position, yaw) =
            self.locomotion
                .advance(ctx.dt_seconds, position, yaw, world.navigator());
        world.set_position(self.id, position);
        world.set_yaw(self.id, yaw);
    }

    /// Releases the agent from group control.
    pub fn end(&mut self) {
        self.locomotion.end();
        self.target = None;
        self.attack_position = false;
    }
}
