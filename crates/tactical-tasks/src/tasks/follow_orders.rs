use tactical_core::{AgentId, Bus, Message, Task, TaskStatus, TickContext};

/// Places `agent` under a leader's command and mirrors the leader's verdict.
///
/// Announces itself on the order bus on the first update, then idles while
/// the leader's group steers the agent. Finishes with whatever outcome the
/// leader reports, and always sends a leave notice on teardown so the
/// leader's roster stays clean even when this task is aborted.
#[derive(Debug)]
pub struct FollowOrders<A> {
    agent: A,
    leader: Option<A>,
    announce_pending: bool,
    status: TaskStatus,
}

impl<A: AgentId> FollowOrders<A> {
    pub fn new(agent: A, leader: A) -> Self {
        Self::with_leader(agent, Some(leader))
    }

    /// `leader: None` is a wiring mistake; the task logs and fails on start.
    pub fn with_leader(agent: A, leader: Option<A>) -> Self {
        Self {
            agent,
            leader,
            announce_pending: false,
            status: TaskStatus::Running,
        }
    }
}

impl<W> Task<W> for FollowOrders<W::Agent>
where
    W: tactical_core::WorldMut + 'static,
{
    fn on_start(&mut self, _ctx: &TickContext, _world: &mut W, _bus: &mut Bus<W::Agent>) {
        if self.leader.is_none() {
            tracing::error!(agent = ?self.agent, "follow orders has no leader configured");
            self.status = TaskStatus::Failure;
            return;
        }
        self.status = TaskStatus::Running;
        self.announce_pending = true;
    }

    fn on_update(
        &mut self,
        _ctx: &TickContext,
        _world: &mut W,
        bus: &mut Bus<W::Agent>,
    ) -> TaskStatus {
        if self.announce_pending {
            if let Some(leader) = self.leader {
                bus.publish(Message::StartListeningForOrders {
                    leader,
                    follower: self.agent,
                });
            }
            self.announce_pending = false;
        }
        self.status
    }

    fn on_message(
        &mut self,
        _ctx: &TickContext,
        _world: &mut W,
        _bus: &mut Bus<W::Agent>,
        message: &Message<W::Agent>,
    ) {
        if let Message::OrdersFinished { follower, outcome } = *message {
            if follower == self.agent {
                self.status = outcome.into();
            }
        }
    }

    fn on_end(&mut self, _ctx: &TickContext, _world: &mut W, bus: &mut Bus<W::Agent>) {
        if let Some(leader) = self.leader {
            bus.publish(Message::StopListeningToOrders {
                leader,
                follower: self.agent,
            });
        }
        self.announce_pending = false;
    }

    fn on_reset(&mut self) {
        self.leader = None;
        self.status = TaskStatus::Running;
    }
}
