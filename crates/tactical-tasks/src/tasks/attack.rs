use tactical_core::{AgentId, Bus, Message, Task, TaskStatus, TickContext};

use crate::group::{GroupConfig, TacticalGroup};
use crate::world::TacticalWorldMut;

/// Unstructured assault: every agent independently closes on its nearest
/// target and fires once in position. No formation geometry.
#[derive(Debug)]
pub struct Attack<A: AgentId> {
    group: TacticalGroup<A, ()>,
}

impl<A: AgentId> Attack<A> {
    pub fn new(config: GroupConfig<A>) -> Self {
        Self {
            group: TacticalGroup::new(config),
        }
    }

    pub fn group(&self) -> &TacticalGroup<A, ()> {
        &self.group
    }
}

impl<W> Task<W> for Attack<W::Agent>
where
    W: TacticalWorldMut + 'static,
{
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
    }

    fn on_reset(&mut self) {
        self.group.on_reset();
    }
}
