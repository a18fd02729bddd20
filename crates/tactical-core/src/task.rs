use crate::{Bus, Message, TickContext, WorldMut};

/// Tri-state result reported to the host scheduler every tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskStatus {
    Running,
    Success,
    Failure,
}

/// Terminal result of a task run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskOutcome {
    Success,
    Failure,
}

impl From<TaskOutcome> for TaskStatus {
    fn from(value: TaskOutcome) -> Self {
        match value {
            TaskOutcome::Success => TaskStatus::Success,
            TaskOutcome::Failure => TaskStatus::Failure,
        }
    }
}

impl TaskStatus {
    pub fn outcome(self) -> Option<TaskOutcome> {
        match self {
            TaskStatus::Running => None,
            TaskStatus::Success => Some(TaskOutcome::Success),
            TaskStatus::Failure => Some(TaskOutcome::Failure),
        }
    }

    pub fn is_running(self) -> bool {
        self == TaskStatus::Running
    }
}

/// Host-driven task lifecycle.
///
/// The scheduler calls `on_start` once before the first update of a run,
/// `on_update` every tick until it reports a terminal status, and `on_end`
/// exactly once afterwards (also when the run is aborted mid-route).
/// `on_message` is invoked for bus deliveries between ticks; `on_reset`
/// restores configuration defaults so the task can be reused.
///
/// Everything runs to completion synchronously within one tick; the only way
/// to "suspend" is to keep returning [`TaskStatus::Running`].
pub trait Task<W>: 'static
where
    W: WorldMut + 'static,
{
    fn on_start(&mut self, _ctx: &TickContext, _world: &mut W, _bus: &mut Bus<W::Agent>) {}

    fn on_update(&mut self, ctx: &TickContext, world: &mut W, bus: &mut Bus<W::Agent>)
        -> TaskStatus;

    fn on_message(
        &mut self,
        _ctx: &TickContext,
        _world: &mut W,
        _bus: &mut Bus<W::Agent>,
        _message: &Message<W::Agent>,
    ) {
    }

    fn on_end(&mut self, _ctx: &TickContext, _world: &mut W, _bus: &mut Bus<W::Agent>) {}

    fn on_reset(&mut self) {}
}
