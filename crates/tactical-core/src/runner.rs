use crate::{Bus, Task, TaskOutcome, TickContext, WorldMut};

/// Handle to a task registered with a [`Runner`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TaskHandle(usize);

struct Entry<W>
where
    W: WorldMut + 'static,
{
    task: Box<dyn Task<W>>,
    started: bool,
    outcome: Option<TaskOutcome>,
}

impl<W> Entry<W>
where
    W: WorldMut + 'static,
{
    fn is_live(&self) -> bool {
        self.outcome.is_none()
    }
}

/// Minimal single-threaded host scheduler.
///
/// Each tick it first delivers the previous tick's message batch to every
/// live task, then starts/updates tasks in registration order. A terminal
/// update status ends the task (its `on_end` runs in the same tick) and the
/// outcome is recorded on the handle.
pub struct Runner<W>
where
    W: WorldMut + 'static,
{
    entries: Vec<Entry<W>>,
    bus: Bus<W::Agent>,
}

impl<W> Runner<W>
where
    W: WorldMut + 'static,
{
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            bus: Bus::new(),
        }
    }

    pub fn add(&mut self, task: Box<dyn Task<W>>) -> TaskHandle {
        self.entries.push(Entry {
            task,
            started: false,
            outcome: None,
        });
        TaskHandle(self.entries.len() - 1)
    }

    pub fn bus_mut(&mut self) -> &mut Bus<W::Agent> {
        &mut self.bus
    }

    pub fn outcome(&self, handle: TaskHandle) -> Option<TaskOutcome> {
        self.entries.get(handle.0).and_then(|e| e.outcome)
    }

    pub fn is_running(&self, handle: TaskHandle) -> bool {
        self.entries.get(handle.0).is_some_and(Entry::is_live)
    }

    /// Tear a task down mid-run. Its `on_end` runs now; the run is recorded
    /// as failed.
    pub fn abort(&mut self, ctx: &TickContext, world: &mut W, handle: TaskHandle) {
        let Some(entry) = self.entries.get_mut(handle.0) else {
            return;
        };
        if !entry.is_live() {
            return;
        }
        if entry.started {
            entry.task.on_end(ctx, world, &mut self.bus);
        }
        entry.outcome = Some(TaskOutcome::Failure);
    }

    pub fn tick(&mut self, ctx: &TickContext, world: &mut W) {
        // Between-tick delivery: every live task sees the whole batch before
        // anyone updates.
        let batch = self.bus.drain();
        for message in &batch {
            for entry in self.entries.iter_mut().filter(|e| e.is_live()) {
                entry.task.on_message(ctx, world, &mut self.bus, message);
            }
        }

        for entry in self.entries.iter_mut().filter(|e| e.is_live()) {
            if !entry.started {
                entry.started = true;
                entry.task.on_start(ctx, world, &mut self.bus);
            }
            let status = entry.task.on_update(ctx, world, &mut self.bus);
            if let Some(outcome) = status.outcome() {
                entry.task.on_end(ctx, world, &mut self.bus);
                entry.outcome = Some(outcome);
            }
        }
    }
}

impl<W> Default for Runner<W>
where
    W: WorldMut + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}
