use tactical_core::{AgentId, Bus, Message, Task, TaskStatus, TickContext, Vec3};

use crate::group::{GroupConfig, TacticalGroup};
use crate::world::TacticalWorldMut;

/// Broadcasts a call for help from `agent`'s current position and succeeds
/// immediately. Pairs with [`ReinforcementsResponse`] on the listening side.
#[derive(Debug)]
pub struct RequestReinforcements<A> {
    agent: A,
}

impl<A: AgentId> RequestReinforcements<A> {
    pub fn new(agent: A) -> Self {
        Self { agent }
    }
}

impl<W> Task<W> for RequestReinforcements<W::Agent>
where
    W: TacticalWorldMut + 'static,
{
    fn on_update(
        &mut self,
        _ctx: &TickContext,
        world: &mut W,
        bus: &mut Bus<W::Agent>,
    ) -> TaskStatus {
        let position = world.position(self.agent).unwrap_or(Vec3::ZERO);
        bus.publish(Message::RequestReinforcements {
            requester: self.agent,
            position,
        });
        TaskStatus::Success
    }
}

/// Waits for a reinforcement call from one of the listed requesters, then
/// converges the whole group on the caller and engages once in weapon range
/// of the rally point.
#[derive(Debug)]
pub struct ReinforcementsResponse<A: AgentId> {
    group: TacticalGroup<A, ()>,
    listen_for: Vec<A>,
    /// Requester and the position it called from, kept as a fallback if the
    /// requester dies before the group arrives.
    request: Option<(A, Vec3)>,
}

impl<A: AgentId> ReinforcementsResponse<A> {
    pub fn new(group: GroupConfig<A>, listen_for: Vec<A>) -> Self {
        Self {
            group: TacticalGroup::new(group),
            listen_for,
            request: None,
        }
    }

    pub fn group(&self) -> &TacticalGroup<A, ()> {
        &self.group
    }
}

impl<W> Task<W> for ReinforcementsResponse<W::Agent>
where
    W: TacticalWorldMut + 'static,
{
    fn on_start(&mut self, _ctx: &TickContext, _world: &mut W, _bus: &mut Bus<W::Agent>) {
        self.request = None;
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
        let Some((requester, called_from)) = self.request else {
            return TaskStatus::Running;
        };
        let rally = world.position(requester).unwrap_or(called_from);
        for i in 0..self.group.len() {
            let id = self.group.agent(i).id;
            let Some(position) = self.group.agent_position(world, i) else {
                continue;
            };
            if self.group.agent(i).attack_position
                || position.distance(rally) <= world.attack_distance(id)
            {
                self.group.agent_mut(i).attack_position = true;
                if self.group.move_to_attack_position(ctx, world, i) {
                    self.group.try_attack(world, i);
                }
            } else {
                self.group.set_destination(world, i, rally);
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
        if let Message::RequestReinforcements { requester, position } = *message {
            if self.listen_for.contains(&requester) {
                tracing::info!(requester = ?requester, "answering reinforcement call");
                self.request = Some((requester, position));
            }
        }
        self.group.handle_message(world, message, &mut |_, _, _| {});
    }

    fn on_end(&mut self, _ctx: &TickContext, world: &mut W, bus: &mut Bus<W::Agent>) {
        self.group.on_end(world, bus);
        self.request = None;
    }

    fn on_reset(&mut self) {
        self.group.on_reset();
        self.listen_for.clear();
    }
}
