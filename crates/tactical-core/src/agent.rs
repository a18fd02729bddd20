use core::fmt::Debug;

/// Stable identifier for an entity that can enroll in (or be targeted by) a
/// tactical group.
///
/// Determinism requires stable ordering (`Ord`) and a stable numeric id for
/// seeding and logs.
pub trait AgentId: Copy + Ord + Eq + Debug + 'static {
    fn stable_id(self) -> u64;
}

impl AgentId for u64 {
    fn stable_id(self) -> u64 {
        self
    }
}

impl AgentId for u32 {
    fn stable_id(self) -> u64 {
        self as u64
    }
}

impl AgentId for usize {
    fn stable_id(self) -> u64 {
        self as u64
    }
}
