use std::collections::VecDeque;

use crate::{task::TaskOutcome, AgentId, Vec3};

/// Cross-tree messages, keyed by enumerated topic instead of strings so the
/// compiler checks payloads.
///
/// `leader`-scoped messages carry the addressee explicitly; receivers filter
/// on it rather than relying on ambient per-owner registration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Message<A: AgentId> {
    /// A follower announces it is ready to take orders from `leader`'s group.
    StartListeningForOrders { leader: A, follower: A },
    /// A follower drops out of `leader`'s group.
    StopListeningToOrders { leader: A, follower: A },
    /// A group reports the final status of a follower's orders.
    OrdersFinished { follower: A, outcome: TaskOutcome },
    /// A one-shot call for reinforcements at the requester's location.
    RequestReinforcements { requester: A, position: Vec3 },
}

/// In-process FIFO message queue.
///
/// Publishing never delivers immediately: the runner drains the queue and
/// hands each message to every live task *between* ticks, so handlers can
/// never observe a roster mid-iteration. Messages published while a batch is
/// being delivered go out with the next batch. No persistence, no ordering
/// guarantee beyond single-threaded FIFO delivery.
#[derive(Debug)]
pub struct Bus<A: AgentId> {
    queue: VecDeque<Message<A>>,
}

impl<A: AgentId> Bus<A> {
    pub fn new() -> Self {
        Self {
            queue: VecDeque::new(),
        }
    }

    pub fn publish(&mut self, message: Message<A>) {
        self.queue.push_back(message);
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Take the current batch, leaving the queue empty for new publishes.
    pub fn drain(&mut self) -> Vec<Message<A>> {
        self.queue.drain(..).collect()
    }
}

impl<A: AgentId> Default for Bus<A> {
    fn default() -> Self {
        Self::new()
    }
}
