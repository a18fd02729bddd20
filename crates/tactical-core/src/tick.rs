use crate::{rng, AgentId, SplitMix64};

/// Per-frame context handed to every task by the host scheduler.
///
/// All timers in the system are cooperative countdowns decremented by
/// `dt_seconds`; nothing reads a wall clock.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickContext {
    pub tick: u64,
    pub dt_seconds: f32,
    pub seed: u64,
}

impl TickContext {
    /// Deterministic per-agent RNG. `stream` separates independent draws made
    /// for the same agent.
    pub fn rng_for_agent<A: AgentId>(&self, agent: A, stream: u64) -> SplitMix64 {
        let seed = rng::derive_seed(self.seed, agent.stable_id(), stream);
        SplitMix64::new(seed)
    }
}
