use std::f32::consts::TAU;

use tactical_core::math::{inverse_transform_point, transform_point};
use tactical_core::{AgentId, Bus, Message, Task, TaskStatus, TickContext, Vec3};

use crate::group::{GroupConfig, TacticalGroup};
use crate::world::TacticalWorldMut;

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SurroundConfig {
    /// Ring radius around the target center.
    pub radius: f32,
}

impl Default for SurroundConfig {
    fn default() -> Self {
        Self { radius: 10.0 }
    }
}

/// Ring encirclement: agents spread to evenly spaced points on a circle
/// around the target center and hold fire until the whole ring is manned and
/// aimed, then open fire together. The volley latch never clears, so late
/// joiners do not silence agents already engaged.
#[derive(Debug)]
pub struct Surround<A: AgentId> {
    group: TacticalGroup<A, ()>,
    config: SurroundConfig,
    in_position: bool,
}

impl<A: AgentId> Surround<A> {
    pub fn new(group: GroupConfig<A>, config: SurroundConfig) -> Self {
        Self {
            group: TacticalGroup::new(group),
            config,
            in_position: false,
        }
    }

    pub fn group(&self) -> &TacticalGroup<A, ()> {
        &self.group
    }
}

impl<W> Task<W> for Surround<W::Agent>
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
        let status = self
            .group
            .update_base(ctx, world, bus, &mut |_, _, _| {});
        if !status.is_running() || self.group.is_empty() {
            return status;
        }

        let center = self.group.center_attack_position(world);
        let yaw = self.group.center_attack_yaw(world, center);
        let theta = TAU / self.group.len() as f32;
        let mut all_in_position = true;
        for i in 0..self.group.len() {
            if self.in_position {
                if self.group.move_to_attack_position(ctx, world, i) {
                    self.group.try_attack(world, i);
                }
                continue;
            }

            let angle = theta * i as f32;
            let mut offset = Vec3::new(
                self.config.radius * angle.sin(),
                0.0,
                self.config.radius * angle.cos(),
            );
            let Some(position) = self.group.agent_position(world, i) else {
                all_in_position = false;
                continue;
            };
            let radius = self.group.agent(i).locomotion.radius();
            // An agent headed for the far side of the ring would cut through
            // the target cluster. Route it around the flank first.
            let mut detour = false;
            if offset.z < 0.0 && inverse_transform_point(center, position, yaw).z < -radius {
                offset = Vec3::new((self.config.radius + radius) * angle.sin().signum(), 0.0, 0.0);
                detour = true;
            }
            let destination = transform_point(center, offset, yaw);
            self.group.set_destination(world, i, destination);

            if !detour && self.group.agent_has_arrived(world, i) {
                self.group.find_attack_target(world, i);
                match self
                    .group
                    .agent(i)
                    .target
                    .and_then(|target| world.position(target))
                {
                    Some(target_position) => {
                        if !self.group.rotate_towards_position(ctx, world, i, target_position) {
                            all_in_position = false;
                        }
                    }
                    None => all_in_position = false,
                }
            } else {
                all_in_position = false;
            }
        }
        if all_in_position {
            self.in_position = true;
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
        self.config = SurroundConfig::default();
    }
}
