use tactical_core::math::transform_point;
use tactical_core::{AgentId, Bus, Message, Task, TaskStatus, TickContext, Vec3};

use crate::group::{GroupConfig, TacticalGroup};
use crate::tasks::grid::GridSpec;
use crate::world::TacticalWorldMut;

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChargeConfig {
    pub grid: GridSpec,
    /// Distance from the grid destination at which an agent breaks formation
    /// and commits to its own attack approach.
    pub break_distance: f32,
}

impl Default for ChargeConfig {
    fn default() -> Self {
        Self {
            grid: GridSpec::default(),
            break_distance: 2.0,
        }
    }
}

/// Grid advance in two phases: form up behind the anchor facing the target
/// center, then push the whole grid onto the center. Agents hold their fire
/// until they are close enough to break formation, and stay committed once
/// they do.
#[derive(Debug)]
pub struct Charge<A: AgentId> {
    group: TacticalGroup<A, Vec3>,
    config: ChargeConfig,
    in_position: bool,
}

impl<A: AgentId> Charge<A> {
    pub fn new(group: GroupConfig<A>, config: ChargeConfig) -> Self {
        Self {
            group: TacticalGroup::new(group),
            config,
            in_position: false,
        }
    }

    pub fn group(&self) -> &TacticalGroup<A, Vec3> {
        &self.group
    }
}

impl<W> Task<W> for Charge<W::Agent>
where
    W: TacticalWorldMut + 'static,
{
    fn on_start(&mut self, _ctx: &TickContext, _world: &mut W, _bus: &mut Bus<W::Agent>) {
        self.in_position = false;
    }

    fn on_update(
        &mut self,
        ctx: &TickContext,
        world: &mut W,
        bus: &mut Bus<W::Agent>,
    ) -> TaskStatus {
        let grid = self.config.grid;
        let in_position = &mut self.in_position;
        let status = self.group.update_base(ctx, world, bus, &mut |_, index, agent| {
            agent.slot = grid.offset(index);
            *in_position = false;
        });
        if !status.is_running() || self.group.is_empty() {
            return status;
        }

        let center = self.group.center_attack_position(world);
        let yaw = self.group.reverse_center_attack_yaw(world, center);
        if !self.in_position {
            // Phase one: assemble the grid around the anchor, aimed at the
            // slot each agent will eventually push onto.
            self.in_position = true;
            let Some(anchor) = self.group.agent_position(world, 0) else {
                return TaskStatus::Running;
            };
            for i in 0..self.group.len() {
                let offset = self.group.agent(i).slot;
                if self.group.agent_has_arrived(world, i) {
                    let aim = transform_point(center, offset, yaw);
                    if !self.group.rotate_towards_position(ctx, world, i, aim) {
                        self.in_position = false;
                    }
                } else {
                    let destination = transform_point(anchor, offset, yaw);
                    self.group.set_destination(world, i, destination);
                    self.in_position = false;
                }
            }
        } else {
            // Phase two: push onto the center; close agents peel off.
            for i in 0..self.group.len() {
                let offset = self.group.agent(i).slot;
                let destination = transform_point(center, offset, yaw);
                let position = self.group.agent_position(world, i).unwrap_or(destination);
                if self.group.agent(i).attack_position
                    || destination.distance(position) <= self.config.break_distance
                {
                    self.group.agent_mut(i).attack_position = true;
                    if self.group.move_to_attack_position(ctx, world, i) {
                        self.group.try_attack(world, i);
                    }
                } else {
                    self.group.set_destination(world, i, destination);
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
        let grid = self.config.grid;
        let in_position = &mut self.in_position;
        self.group.handle_message(world, message, &mut |_, index, agent| {
            agent.slot = grid.offset(index);
            *in_position = false;
        });
    }

    fn on_end(&mut self, _ctx: &TickContext, world: &mut W, bus: &mut Bus<W::Agent>) {
        self.group.on_end(world, bus);
    }

    fn on_reset(&mut self) {
        self.group.on_reset();
        self.config = ChargeConfig::default();
    }
}
