use std::cell::RefCell;
use std::rc::Rc;

use tactical_core::{
    Bus, Message, Runner, Task, TaskOutcome, TaskStatus, TickContext, WorldMut, WorldView,
};

#[derive(Default)]
struct World;

impl WorldView for World {
    type Agent = u64;
}

impl WorldMut for World {}

type Log = Rc<RefCell<Vec<String>>>;

struct Probe {
    name: &'static str,
    log: Log,
    /// Status to report, and the tick at which to stop running.
    finish_at: Option<(u64, TaskStatus)>,
    publish_on_start: Option<Message<u64>>,
}

impl Probe {
    fn new(name: &'static str, log: Log) -> Self {
        Self {
            name,
            log,
            finish_at: None,
            publish_on_start: None,
        }
    }

    fn record(&self, event: &str) {
        self.log.borrow_mut().push(format!("{}:{}", self.name, event));
    }
}

impl Task<World> for Probe {
    fn on_start(&mut self, _ctx: &TickContext, _world: &mut World, bus: &mut Bus<u64>) {
        self.record("start");
        if let Some(message) = self.publish_on_start.take() {
            bus.publish(message);
        }
    }

    fn on_update(
        &mut self,
        ctx: &TickContext,
        _world: &mut World,
        _bus: &mut Bus<u64>,
    ) -> TaskStatus {
        self.record("update");
        match self.finish_at {
            Some((tick, status)) if ctx.tick >= tick => status,
            _ => TaskStatus::Running,
        }
    }

    fn on_message(
        &mut self,
        _ctx: &TickContext,
        _world: &mut World,
        _bus: &mut Bus<u64>,
        message: &Message<u64>,
    ) {
        if let Message::OrdersFinished { follower, .. } = message {
            self.record(&format!("orders_finished({follower})"));
        }
    }

    fn on_end(&mut self, _ctx: &TickContext, _world: &mut World, _bus: &mut Bus<u64>) {
        self.record("end");
    }
}

fn ctx(tick: u64) -> TickContext {
    TickContext {
        tick,
        dt_seconds: 0.1,
        seed: 0,
    }
}

#[test]
fn messages_are_delivered_before_updates_on_the_next_tick() {
    let log: Log = Rc::default();

    let mut sender = Probe::new("sender", log.clone());
    sender.publish_on_start = Some(Message::OrdersFinished {
        follower: 7,
        outcome: TaskOutcome::Success,
    });
    let receiver = Probe::new("receiver", log.clone());

    let mut runner: Runner<World> = Runner::new();
    runner.add(Box::new(sender));
    runner.add(Box::new(receiver));

    let mut world = World;
    runner.tick(&ctx(0), &mut world);
    runner.tick(&ctx(1), &mut world);

    // Publishing on tick 0 delivers on tick 1, to every live task (the
    // sender included), before any tick-1 update runs.
    assert_eq!(
        *log.borrow(),
        vec![
            "sender:start".to_string(),
            "sender:update".to_string(),
            "receiver:start".to_string(),
            "receiver:update".to_string(),
            "sender:orders_finished(7)".to_string(),
            "receiver:orders_finished(7)".to_string(),
            "sender:update".to_string(),
            "receiver:update".to_string(),
        ]
    );
}

#[test]
fn terminal_status_runs_on_end_and_records_outcome() {
    let log: Log = Rc::default();
    let mut probe = Probe::new("task", log.clone());
    probe.finish_at = Some((2, TaskStatus::Success));

    let mut runner: Runner<World> = Runner::new();
    let handle = runner.add(Box::new(probe));
    let mut world = World;

    for tick in 0..5 {
        runner.tick(&ctx(tick), &mut world);
    }

    assert_eq!(runner.outcome(handle), Some(TaskOutcome::Success));
    assert!(!runner.is_running(handle));

    let events = log.borrow();
    assert_eq!(events.iter().filter(|e| e.ends_with(":end")).count(), 1);
    // No updates after the terminal tick.
    assert_eq!(events.iter().filter(|e| e.ends_with(":update")).count(), 3);
}

#[test]
fn abort_tears_down_started_tasks() {
    let log: Log = Rc::default();
    let probe = Probe::new("task", log.clone());

    let mut runner: Runner<World> = Runner::new();
    let handle = runner.add(Box::new(probe));
    let mut world = World;

    runner.tick(&ctx(0), &mut world);
    runner.abort(&ctx(1), &mut world, handle);

    assert_eq!(runner.outcome(handle), Some(TaskOutcome::Failure));
    assert!(log.borrow().iter().any(|e| e == "task:end"));

    // Aborting twice is a no-op.
    runner.abort(&ctx(2), &mut world, handle);
    assert_eq!(log.borrow().iter().filter(|e| *e == "task:end").count(), 1);
}

#[test]
fn unstarted_aborted_tasks_skip_on_end() {
    let log: Log = Rc::default();
    let probe = Probe::new("task", log.clone());

    let mut runner: Runner<World> = Runner::new();
    let handle = runner.add(Box::new(probe));
    let mut world = World;

    runner.abort(&ctx(0), &mut world, handle);
    assert_eq!(runner.outcome(handle), Some(TaskOutcome::Failure));
    assert!(log.borrow().is_empty());
}
