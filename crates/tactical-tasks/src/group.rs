use tactical_core::math::yaw_towards;
use tactical_core::{AgentId, Bus, Message, TaskOutcome, TaskStatus, TickContext, Vec3};
use tactical_nav::{Locomotion, LocomotionBackend};

use crate::agent::TacticalAgent;
use crate::world::{TacticalWorldMut, TacticalWorldView};

/// Shared configuration of every group maneuver.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GroupConfig<A> {
    /// Anchor agent. Always roster index 0 once the group forms, and the
    /// leader id followers address their orders to.
    pub owner: A,
    /// Explicit attack targets. Takes precedence over `target_tag`.
    pub targets: Vec<A>,
    /// Tag to discover damageable targets by when `targets` is empty.
    pub target_tag: Option<String>,
    /// Seconds to wait for followers before forming the roster.
    pub wait_time: f32,
    /// An independent group ignores the order bus entirely.
    pub independent: bool,
    pub backend: LocomotionBackend,
}

impl<A> GroupConfig<A> {
    pub fn new(owner: A) -> Self {
        Self {
            owner,
            targets: Vec::new(),
            target_tag: None,
            wait_time: 0.0,
            independent: false,
            backend: LocomotionBackend::default(),
        }
    }

    pub fn with_targets(mut self, targets: Vec<A>) -> Self {
        self.targets = targets;
        self
    }

    pub fn with_target_tag(mut self, tag: impl Into<String>) -> Self {
        self.target_tag = Some(tag.into());
        self
    }

    pub fn with_wait_time(mut self, seconds: f32) -> Self {
        self.wait_time = seconds;
        self
    }

    pub fn with_independent(mut self, independent: bool) -> Self {
        self.independent = independent;
        self
    }

    pub fn with_backend(mut self, backend: LocomotionBackend) -> Self {
        self.backend = backend;
        self
    }

    fn reset(&mut self) {
        self.targets.clear();
        self.target_tag = None;
        self.wait_time = 0.0;
        self.independent = false;
        self.backend = LocomotionBackend::default();
    }
}

/// Hook invoked whenever an agent enters the roster, with the agent's roster
/// index. Maneuvers use it to assign formation slots and per-agent setup.
pub type EnrollHook<'a, W, A, S> = &'a mut dyn FnMut(&W, usize, &mut TacticalAgent<A, S>);

/// Roster and shared machinery underneath every maneuver task.
///
/// Owns the member list, the attack-target list, the pre-formation pending
/// queue, and the formation/completion lifecycle. Maneuvers layer their
/// geometry on top through per-agent slots and the index helpers.
#[derive(Debug)]
pub struct TacticalGroup<A: AgentId, S> {
    config: GroupConfig<A>,
    agents: Vec<TacticalAgent<A, S>>,
    targets: Vec<A>,
    pending: Vec<A>,
    remaining_wait: f32,
    formed: bool,
    completed: bool,
}

impl<A: AgentId, S: Default> TacticalGroup<A, S> {
    pub fn new(config: GroupConfig<A>) -> Self {
        let remaining_wait = config.wait_time;
        Self {
            config,
            agents: Vec::new(),
            targets: Vec::new(),
            pending: Vec::new(),
            remaining_wait,
            formed: false,
            completed: false,
        }
    }

    pub fn config(&self) -> &GroupConfig<A> {
        &self.config
    }

    pub fn owner(&self) -> A {
        self.config.owner
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    pub fn is_formed(&self) -> bool {
        self.formed
    }

    pub fn agent(&self, index: usize) -> &TacticalAgent<A, S> {
        &self.agents[index]
    }

    pub fn agent_mut(&mut self, index: usize) -> &mut TacticalAgent<A, S> {
        &mut self.agents[index]
    }

    pub fn agents(&self) -> &[TacticalAgent<A, S>] {
        &self.agents
    }

    pub fn targets(&self) -> &[A] {
        &self.targets
    }

    pub fn pending(&self) -> &[A] {
        &self.pending
    }

    /// Adds `id` to the roster, assigning its slot through `hook`.
    /// Enrollment is idempotent per id.
    pub fn enroll<W>(&mut self, world: &W, id: A, hook: EnrollHook<'_, W, A, S>) -> bool
    where
        W: TacticalWorldView<Agent = A>,
    {
        if self.agents.iter().any(|agent| agent.id == id) {
            tracing::debug!(agent = ?id, "agent already enrolled, ignoring");
            return false;
        }
        let locomotion = Locomotion::new(self.config.backend, world.locomotion_config(id));
        let mut agent = TacticalAgent::new(id, locomotion, S::default());
        hook(world, self.agents.len(), &mut agent);
        self.agents.push(agent);
        true
    }

    fn form<W>(&mut self, world: &W, hook: EnrollHook<'_, W, A, S>)
    where
        W: TacticalWorldView<Agent = A>,
    {
        self.agents.clear();
        let owner = self.config.owner;
        self.enroll(world, owner, hook);
        let pending = std::mem::take(&mut self.pending);
        for follower in pending {
            self.enroll(world, follower, hook);
        }

        self.targets.clear();
        if !self.config.targets.is_empty() {
            self.targets
                .extend(self.config.targets.iter().copied().filter(|id| world.is_damageable(*id)));
        } else if let Some(tag) = self.config.target_tag.as_deref() {
            world.collect_damageable_with_tag(tag, &mut self.targets);
        }
        if self.targets.is_empty() {
            tracing::error!(
                owner = ?self.config.owner,
                "no attack targets found, group will report success with nothing to do"
            );
        }
        self.formed = true;
    }

    /// Per-tick lifecycle shared by every maneuver: wait, form, prune dead
    /// targets, report success once none remain, and advance locomotion.
    ///
    /// A `Running` result with a formed, non-empty roster means the caller
    /// should run its maneuver logic this tick.
    pub fn update_base<W>(
        &mut self,
        ctx: &TickContext,
        world: &mut W,
        bus: &mut Bus<A>,
        hook: EnrollHook<'_, W, A, S>,
    ) -> TaskStatus
    where
        W: TacticalWorldMut<Agent = A>,
    {
        if !self.formed {
            if self.remaining_wait > 0.0 {
                self.remaining_wait -= ctx.dt_seconds;
                if self.remaining_wait > 0.0 {
                    return TaskStatus::Running;
                }
            }
            self.form(world, hook);
        }
        if self.agents.is_empty() {
            return TaskStatus::Running;
        }

        for i in (0..self.targets.len()).rev() {
            if !world.is_alive(self.targets[i]) {
                self.targets.remove(i);
            }
        }
        if self.targets.is_empty() {
            self.complete(bus);
            return TaskStatus::Success;
        }

        for agent in &mut self.agents {
            agent.advance(ctx, world);
        }
        TaskStatus::Running
    }

    /// Marks the mission accomplished and tells followers their orders
    /// succeeded. Subsequent teardown skips the failure notifications.
    pub fn complete(&mut self, bus: &mut Bus<A>) {
        if self.completed {
            return;
        }
        self.completed = true;
        for agent in self.agents.iter().skip(1) {
            bus.publish(Message::OrdersFinished {
                follower: agent.id,
                outcome: TaskOutcome::Success,
            });
        }
    }

    /// Reacts to order-bus traffic addressed to this group's owner.
    pub fn handle_message<W>(&mut self, world: &W, message: &Message<A>, hook: EnrollHook<'_, W, A, S>)
    where
        W: TacticalWorldView<Agent = A>,
    {
        if self.config.independent {
            return;
        }
        match *message {
            Message::StartListeningForOrders { leader, follower } if leader == self.config.owner => {
                if self.formed {
                    self.enroll(world, follower, hook);
                } else if !self.pending.contains(&follower) {
                    self.pending.push(follower);
                }
            }
            Message::StopListeningToOrders { leader, follower } if leader == self.config.owner => {
                self.dismiss(follower);
            }
            _ => {}
        }
    }

    /// Removes `id` from the pending queue or the roster. Unknown ids are
    /// tolerated. Returns the vacated roster index, if any.
    pub fn dismiss(&mut self, id: A) -> Option<usize> {
        if let Some(i) = self.pending.iter().position(|pending| *pending == id) {
            self.pending.remove(i);
            return None;
        }
        let index = self.agents.iter().position(|agent| agent.id == id)?;
        self.remove_at(index);
        Some(index)
    }

    fn remove_at(&mut self, index: usize) {
        let mut agent = self.agents.remove(index);
        agent.end();
    }

    /// Tears the group down: followers that never reached their posts are
    /// told their orders failed, unless the mission already succeeded.
    pub fn on_end<W>(&mut self, world: &W, bus: &mut Bus<A>)
    where
        W: TacticalWorldView<Agent = A>,
    {
        for index in (0..self.agents.len()).rev() {
            let agent = &self.agents[index];
            if !self.completed && !agent.has_arrived(world) {
                bus.publish(Message::OrdersFinished {
                    follower: agent.id,
                    outcome: TaskOutcome::Failure,
                });
            }
            self.remove_at(index);
        }
        self.pending.clear();
        self.targets.clear();
        self.formed = false;
        self.completed = false;
        self.remaining_wait = self.config.wait_time;
    }

    /// Restores shared configuration to defaults.
    pub fn on_reset(&mut self) {
        self.config.reset();
        self.remaining_wait = 0.0;
    }

    /// Mean position of the live targets.
    pub fn center_attack_position<W>(&self, world: &W) -> Vec3
    where
        W: TacticalWorldView<Agent = A>,
    {
        let mut sum = Vec3::ZERO;
        let mut count = 0u32;
        for &target in &self.targets {
            if let Some(position) = world.position(target) {
                sum += position;
                count += 1;
            }
        }
        debug_assert!(count > 0, "center of an empty target set");
        if count == 0 {
            return Vec3::ZERO;
        }
        sum / count as f32
    }

    /// Yaw of the target center looking back at the owner.
    pub fn center_attack_yaw<W>(&self, world: &W, center: Vec3) -> f32
    where
        W: TacticalWorldView<Agent = A>,
    {
        let owner = world.position(self.config.owner).unwrap_or(Vec3::ZERO);
        yaw_towards(center, owner)
    }

    /// Yaw of the owner looking at the target center.
    pub fn reverse_center_attack_yaw<W>(&self, world: &W, center: Vec3) -> f32
    where
        W: TacticalWorldView<Agent = A>,
    {
        let owner = world.position(self.config.owner).unwrap_or(Vec3::ZERO);
        yaw_towards(owner, center)
    }

    /// Closest live target to `from`, pruning dead targets along the way.
    /// Scans back to front; only a strictly closer candidate overwrites, so
    /// exact ties keep the first candidate found.
    pub fn closest_target<W>(&mut self, world: &W, from: Vec3) -> Option<A>
    where
        W: TacticalWorldView<Agent = A>,
    {
        let mut best = None;
        let mut best_distance = f32::MAX;
        for i in (0..self.targets.len()).rev() {
            let target = self.targets[i];
            if !world.is_alive(target) {
                self.targets.remove(i);
                continue;
            }
            let Some(position) = world.position(target) else {
                continue;
            };
            let distance = position.distance_squared(from);
            if distance < best_distance {
                best_distance = distance;
                best = Some(target);
            }
        }
        best
    }

    pub fn remove_target_at(&mut self, index: usize) {
        self.targets.remove(index);
    }

    /// Assigns the closest live target to agent `index` if it has none or
    /// its current one died.
    pub fn find_attack_target<W>(&mut self, world: &W, index: usize)
    where
        W: TacticalWorldView<Agent = A>,
    {
        let needs_target = match self.agents[index].target {
            None => true,
            Some(target) => !world.is_alive(target),
        };
        if !needs_target {
            return;
        }
        let Some(from) = world.position(self.agents[index].id) else {
            return;
        };
        self.agents[index].target = self.closest_target(world, from);
    }

    /// Closes on agent `index`'s target until it is visible and in weapon
    /// range, then stops and turns to face it. Returns true once the agent
    /// is stopped, in range, and aimed.
    pub fn move_to_attack_position<W>(
        &mut self,
        ctx: &TickContext,
        world: &mut W,
        index: usize,
    ) -> bool
    where
        W: TacticalWorldMut<Agent = A>,
    {
        self.find_attack_target(world, index);
        let Some(target) = self.agents[index].target else {
            return false;
        };
        let Some(target_position) = world.position(target) else {
            return false;
        };
        let id = self.agents[index].id;
        let position = world.position(id).unwrap_or(target_position);
        let in_range = position.distance(target_position) <= world.attack_distance(id);
        if !self.agents[index].can_see_target(world) || !in_range {
            self.agents[index].set_destination(world, target_position);
            self.agents[index].attack_position = true;
            return false;
        }
        self.agents[index].stop();
        self.agents[index].rotate_towards_position(ctx, world, target_position)
    }

    // Index-based conveniences so maneuvers can mix agent calls with roster
    // queries without fighting the borrow of `self`.

    pub fn agent_position<W>(&self, world: &W, index: usize) -> Option<Vec3>
    where
        W: TacticalWorldView<Agent = A>,
    {
        world.position(self.agents[index].id)
    }

    pub fn agent_has_arrived<W>(&self, world: &W, index: usize) -> bool
    where
        W: TacticalWorldView<Agent = A>,
    {
        self.agents[index].has_arrived(world)
    }

    pub fn set_destination<W>(&mut self, world: &W, index: usize, destination: Vec3)
    where
        W: TacticalWorldView<Agent = A>,
    {
        self.agents[index].set_destination(world, destination);
    }

    pub fn rotate_towards<W>(
        &mut self,
        ctx: &TickContext,
        world: &mut W,
        index: usize,
        target_yaw: f32,
    ) -> bool
    where
        W: TacticalWorldMut<Agent = A>,
    {
        self.agents[index].rotate_towards(ctx, world, target_yaw)
    }

    pub fn rotate_towards_position<W>(
        &mut self,
        ctx: &TickContext,
        world: &mut W,
        index: usize,
        point: Vec3,
    ) -> bool
    where
        W: TacticalWorldMut<Agent = A>,
    {
        self.agents[index].rotate_towards_position(ctx, world, point)
    }

    pub fn try_attack<W>(&mut self, world: &mut W, index: usize) -> bool
    where
        W: TacticalWorldMut<Agent = A>,
    {
        self.agents[index].try_attack(world)
    }

    pub fn can_see_target<W>(&self, world: &W, index: usize) -> bool
    where
        W: TacticalWorldView<Agent = A>,
    {
        self.agents[index].can_see_target(world)
    }
}
