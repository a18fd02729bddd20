use tactical_core::math::transform_point;
use tactical_core::{AgentId, Bus, Message, Task, TaskStatus, TickContext, Vec3};

use crate::group::{GroupConfig, TacticalGroup};
use crate::tasks::grid::GridSpec;
use crate::world::TacticalWorldMut;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MarchingFireConfig {
    pub grid: GridSpec,
}

/// Grid advance that fires on the move. Same two phases as a charge, but
/// agents never break formation: while the grid pushes onto the target
/// center, any agent with a visible target in weapon range shoots from its
/// slot, turning toward the target between steps.
#[derive(Debug)]
pub struct MarchingFire<A: AgentId> {
    group: TacticalGroup<A, Vec3>,
    config: MarchingFireConfig,
    in_position: bool,
}

impl<A: AgentId> MarchingFire<A> {
    pub fn new(group: GroupConfig<A>, config: MarchingFireConfig) -> Self {
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

impl<W> Task<W> for MarchingFire<W::Agent>
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
            for i in 0..self.group.len() {
                let offset = self.group.agent(i).slot;
                let destination = transform_point(center, offset, yaw);
                self.group.set_destination(world, i, destination);
                self.group.find_attack_target(world, i);
                let Some(target_position) = self
                    .group
                    .agent(i)
                    .target
                    .and_then(|target| world.position(target))
                else {
                    continue;
                };
                let id = self.group.agent(i).id;
                let position = self.group.agent_position(world, i).unwrap_or(destination);
                let in_range = position.distance(target_position) <= world.attack_distance(id);
                if in_range
                    && self.group.can_see_target(world, i)
                    && self.group.rotate_towards_position(ctx, world, i, target_position)
                {
                    self.group.try_attack(world, i);
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
        self.config = MarchingFireConfig::default();
    }
}
