use tactical_core::{AgentId, Bus, Message, Task, TaskStatus, TickContext};

use crate::group::{GroupConfig, TacticalGroup};
use crate::world::TacticalWorldMut;

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AmbushConfig {
    /// Seconds between the trigger and the group opening fire.
    pub attack_delay: f32,
    /// The ambush only triggers while the target center is closer than
    /// this. Zero disables the distance requirement.
    pub min_ambush_distance: f32,
}

impl Default for AmbushConfig {
    fn default() -> Self {
        Self {
            attack_delay: 0.0,
            min_ambush_distance: 10.0,
        }
    }
}

/// Lie in wait until the target group passes its point of closest approach,
/// then spring. The trigger is the first tick the distance from the owner to
/// the target center grows instead of shrinks, sampled while inside the
/// minimum ambush distance. Arms exactly once per run.
#[derive(Debug)]
pub struct Ambush<A: AgentId> {
    group: TacticalGroup<A, ()>,
    config: AmbushConfig,
    previous_distance: f32,
    arm: Option<f32>,
}

impl<A: AgentId> Ambush<A> {
    pub fn new(group: GroupConfig<A>, config: AmbushConfig) -> Self {
        Self {
            group: TacticalGroup::new(group),
            config,
            previous_distance: f32::MAX,
            arm: None,
        }
    }

    pub fn group(&self) -> &TacticalGroup<A, ()> {
        &self.group
    }
}

impl<W> Task<W> for Ambush<W::Agent>
where
    W: TacticalWorldMut + 'static,
{
    fn on_start(&mut self, _ctx: &TickContext, _world: &mut W, _bus: &mut Bus<W::Agent>) {
        self.arm = None;
    }

    fn on_update(
        &mut self,
        ctx: &TickContext,
        world: &mut W,
        bus: &mut Bus<W::Agent>,
    ) -> TaskStatus {
        let status = self
            .group
            .update_base(ctx, world, bus, &mut |_, _, _| {});
        if !status.is_running() || self.group.is_empty() {
            return status;
        }

        let Some(timer) = &mut self.arm else {
            let center = self.group.center_attack_position(world);
            let Some(owner) = world.position(self.group.owner()) else {
                return TaskStatus::Running;
            };
            let distance = center.distance(owner);
            let in_trigger_zone =
                self.config.min_ambush_distance == 0.0 || distance < self.config.min_ambush_distance;
            if distance > self.previous_distance && in_trigger_zone {
                self.arm = Some(self.config.attack_delay);
            } else {
                self.previous_distance = distance;
            }
            return TaskStatus::Running;
        };
        *timer -= ctx.dt_seconds;
        if *timer > 0.0 {
            return TaskStatus::Running;
        }

        for i in 0..self.group.len() {
            if self.group.move_to_attack_position(ctx, world, i) {
                self.group.try_attack(world, i);
            }
        }
        TaskStatus::Running
    }

    fn on_message(
        &mut self,
        _ctx: &TickContext,
        world: &mut W,
        _bus: &mut Bus<W::Agent>,
        message: &Message<W::Agent>,
    ) {
        self.group.handle_message(world, message, &mut |_, _, _| {});
    }

    fn on_end(&mut self, _ctx: &TickContext, world: &mut W, bus: &mut Bus<W::Agent>) {
        self.group.on_end(world, bus);
        self.previous_distance = f32::MAX;
    }

    fn on_reset(&mut self) {
        self.group.on_reset();
        self.config = AmbushConfig::default();
    }
}
