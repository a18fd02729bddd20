use tactical_core::math::transform_point;
use tactical_core::{AgentId, Bus, Message, Task, TaskStatus, TickContext, Vec3};

use crate::group::{GroupConfig, TacticalGroup};
use crate::world::TacticalWorldMut;

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RetreatConfig {
    /// The group succeeds once every agent is at least this far from the
    /// target center.
    pub safe_distance: f32,
}

impl Default for RetreatConfig {
    fn default() -> Self {
        Self { safe_distance: 10.0 }
    }
}

/// Fighting withdrawal: agents back away along the heading the owner held
/// when the group formed, firing at pursuers they can see while walking
/// backwards. Succeeds once everyone is beyond the safe distance.
#[derive(Debug)]
pub struct Retreat<A: AgentId> {
    group: TacticalGroup<A, ()>,
    config: RetreatConfig,
    /// Withdrawal heading, captured at formation.
    heading: f32,
}

impl<A: AgentId> Retreat<A> {
    pub fn new(group: GroupConfig<A>, config: RetreatConfig) -> Self {
        Self {
            group: TacticalGroup::new(group),
            config,
            heading: 0.0,
        }
    }

    pub fn group(&self) -> &TacticalGroup<A, ()> {
        &self.group
    }
}

impl<W> Task<W> for Retreat<W::Agent>
where
    W: TacticalWorldMut + 'static,
{
    fn on_update(
        &mut self,
        ctx: &TickContext,
        world: &mut W,
        bus: &mut Bus<W::Agent>,
    ) -> TaskStatus {
        let was_formed = self.group.is_formed();
        // Movement must not yank agents around to face their destination;
        // they keep aiming backwards at pursuers.
        let status = self.group.update_base(ctx, world, bus, &mut |_, _, agent| {
            agent.locomotion.set_update_rotation(false);
        });
        if !status.is_running() || self.group.is_empty() {
            return status;
        }
        if !was_formed {
            self.heading = world.yaw(self.group.owner()).unwrap_or(0.0);
        }

        let center = self.group.center_attack_position(world);
        let fallback_offset = Vec3::new(0.0, 0.0, -self.config.safe_distance);
        let mut all_safe = true;
        for i in 0..self.group.len() {
            self.group.find_attack_target(world, i);
            if self.group.can_see_target(world, i) {
                if let Some(target_position) = self
                    .group
                    .agent(i)
                    .target
                    .and_then(|target| world.position(target))
                {
                    if self.group.rotate_towards_position(ctx, world, i, target_position) {
                        self.group.try_attack(world, i);
                    }
                }
            } else {
                self.group.agent_mut(i).locomotion.set_update_rotation(true);
            }

            let Some(position) = self.group.agent_position(world, i) else {
                continue;
            };
            if position.distance(center) < self.config.safe_distance {
                all_safe = false;
                let destination = transform_point(position, fallback_offset, self.heading);
                self.group.set_destination(world, i, destination);
            } else {
                self.group.agent_mut(i).stop();
            }
        }
        if all_safe {
            self.group.complete(bus);
            TaskStatus::Success
        } else {
            TaskStatus::Running
        }
    }

    fn on_message(
        &mut self,
        _ctx: &TickContext,
        world: &mut W,
        _bus: &mut Bus<W::Agent>,
        message: &Message<W::Agent>,
    ) {
        self.group.handle_message(world, message, &mut |_, _, agent| {
            agent.locomotion.set_update_rotation(false);
        });
    }

    fn on_end(&mut self, _ctx: &TickContext, world: &mut W, bus: &mut Bus<W::Agent>) {
        self.group.on_end(world, bus);
    }

    fn on_reset(&mut self) {
        self.group.on_reset();
        self.config = RetreatConfig::default();
    }
}
