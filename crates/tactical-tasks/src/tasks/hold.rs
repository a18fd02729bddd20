use std::f32::consts::TAU;

use tactical_core::math::{transform_point, yaw_from_direction};
use tactical_core::{AgentId, Bus, Message, Task, TaskStatus, TickContext, Vec3};

use crate::group::{GroupConfig, TacticalGroup};
use crate::world::TacticalWorldMut;

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HoldConfig<A> {
    /// Entity whose position anchors the defensive ring.
    pub defend: A,
    /// Radius of the ring the agents stand on.
    pub radius: f32,
    /// Targets beyond this distance from the defend point are ignored.
    pub defend_radius: f32,
}

impl<A> HoldConfig<A> {
    pub fn new(defend: A) -> Self {
        Self {
            defend,
            radius: 5.0,
            defend_radius: 10.0,
        }
    }
}

/// Perimeter defense: agents man a ring around a defend point, facing
/// outward. Targets that come inside the defend radius are each assigned to
/// the nearest unoccupied agent, who leaves its post to engage and returns
/// once the target dies or withdraws.
#[derive(Debug)]
pub struct Hold<A: AgentId> {
    group: TacticalGroup<A, ()>,
    config: HoldConfig<A>,
}

impl<A: AgentId> Hold<A> {
    pub fn new(group: GroupConfig<A>, config: HoldConfig<A>) -> Self {
        Self {
            group: TacticalGroup::new(group),
            config,
        }
    }

    pub fn group(&self) -> &TacticalGroup<A, ()> {
        &self.group
    }
}

impl<W> Task<W> for Hold<W::Agent>
where
    W: TacticalWorldMut + 'static,
{
    fn on_update(
        &mut self,
        ctx: &TickContext,
        world: &mut W,
        bus: &mut Bus<W::Agent>,
    ) -> TaskStatus {
        let status = self
            .group
            .update_base(ctx, world, bus, &mut |_, _, _| {});
        if !status.is_running() || self.group.is_empty() {
            return status;
        }
        let Some(defend_position) = world.position(self.config.defend) else {
            tracing::warn!(defend = ?self.config.defend, "defend entity has no position");
            return TaskStatus::Running;
        };
        let defend_yaw = world.yaw(self.config.defend).unwrap_or(0.0);

        // Hand each intruding target to the nearest agent not already busy.
        for t in (0..self.group.targets().len()).rev() {
            let target = self.group.targets()[t];
            if !world.is_alive(target) {
                self.group.remove_target_at(t);
                continue;
            }
            let Some(target_position) = world.position(target) else {
                continue;
            };
            if defend_position.distance(target_position) >= self.config.defend_radius {
                continue;
            }
            let already_assigned = self
                .group
                .agents()
                .iter()
                .any(|agent| agent.target == Some(target));
            if already_assigned {
                continue;
            }
            let mut best = None;
            let mut best_distance = f32::MAX;
            for i in 0..self.group.len() {
                let busy = self.group.agent(i).target.is_some_and(|t| world.is_alive(t));
                if busy {
                    continue;
                }
                let Some(position) = self.group.agent_position(world, i) else {
                    continue;
                };
                let distance = position.distance_squared(target_position);
                if distance < best_distance {
                    best_distance = distance;
                    best = Some(i);
                }
            }
            if let Some(i) = best {
                self.group.agent_mut(i).target = Some(target);
            }
        }

        let theta = TAU / self.group.len() as f32;
        for i in 0..self.group.len() {
            self.group.agent_mut(i).attack_position = false;
            if let Some(target) = self.group.agent(i).target {
                let withdrawn = world
                    .position(target)
                    .is_none_or(|p| defend_position.distance(p) > self.config.defend_radius);
                if !world.is_alive(target) || withdrawn {
                    self.group.agent_mut(i).target = None;
                } else {
                    self.group.agent_mut(i).attack_position = true;
                    if self.group.move_to_attack_position(ctx, world, i) {
                        self.group.try_attack(world, i);
                    }
                }
            }
            if !self.group.agent(i).attack_position {
                let angle = theta * i as f32;
                let offset = Vec3::new(
                    self.config.radius * angle.sin(),
                    0.0,
                    self.config.radius * angle.cos(),
                );
                let post = transform_point(defend_position, offset, defend_yaw);
                self.group.set_destination(world, i, post);
                if self.group.agent_has_arrived(world, i) {
                    let outward = (post - defend_position).flattened();
                    self.group
                        .rotate_towards(ctx, world, i, yaw_from_direction(outward));
                }
            }
        }
        TaskStatus::Running
    }

    fn on_message(
        &mut self,
        _ctx: &TickContext,
        world: &mut W,
        _bus: &mut Bus<W::Agent>,
        message: &Message<W::Agent>,
    ) {
        self.group.handle_message(world, message, &mut |_, _, _| {});
    }

    fn on_end(&mut self, _ctx: &TickContext, world: &mut W, bus: &mut Bus<W::Agent>) {
        self.group.on_end(world, bus);
    }

    fn on_reset(&mut self) {
        self.group.on_reset();
        self.config.radius = 5.0;
        self.config.defend_radius = 10.0;
    }
}
