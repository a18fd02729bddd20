use crate::AgentId;

/// Read-only world access. Carries only the agent handle type; the queries a
/// task actually needs live in extension traits closer to the code that uses
/// them, so hosts implement no more surface than their tasks touch.
pub trait WorldView {
    type Agent: AgentId;
}

/// Write access. Extended the same way as [`WorldView`].
pub trait WorldMut: WorldView {}
