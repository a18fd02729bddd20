use tactical_core::math::{transform_point, yaw_towards};
use tactical_core::{AgentId, Bus, Message, Task, TaskStatus, TickContext, Vec3};

use crate::group::{GroupConfig, TacticalGroup};
use crate::world::{TacticalWorldMut, TacticalWorldView};

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FlankConfig {
    /// Attack from both sides instead of only the right.
    pub dual_flank: bool,
    /// Seconds the wings wait after the center's first landed shot.
    pub attack_delay: f32,
    /// Extra distance the wings keep beyond their weapon range while
    /// approaching from the side.
    pub approach_distance: f32,
    /// Spacing between members of the same sub-group.
    pub separation: f32,
}

impl Default for FlankConfig {
    fn default() -> Self {
        Self {
            dual_flank: false,
            attack_delay: 0.0,
            approach_distance: 2.0,
            separation: 2.0,
        }
    }
}

/// Pinning attack: a center sub-group engages head on while one or two wing
/// sub-groups swing around the side. Wings hold fire until the center has
/// landed its first shot plus a configurable delay.
#[derive(Debug)]
pub struct Flank<A: AgentId> {
    group: TacticalGroup<A, Vec3>,
    config: FlankConfig,
    /// Countdown started by the center's first landed shot. Wings fire once
    /// it reaches zero.
    wing_gate: Option<f32>,
}

impl<A: AgentId> Flank<A> {
    pub fn new(group: GroupConfig<A>, config: FlankConfig) -> Self {
        Self {
            group: TacticalGroup::new(group),
            config,
            wing_gate: None,
        }
    }

    fn sub_group_count(&self) -> usize {
        if self.config.dual_flank {
            3
        } else {
            2
        }
    }

    pub fn group(&self) -> &TacticalGroup<A, Vec3> {
        &self.group
    }
}

fn slot_for<W>(world: &W, config: FlankConfig, sub_group: usize, id: W::Agent) -> Vec3
where
    W: TacticalWorldView,
{
    let reach = world.attack_distance(id);
    match sub_group {
        0 => Vec3::new(0.0, 0.0, reach),
        1 => Vec3::new(-(reach + config.approach_distance), 0.0, 0.0),
        _ => Vec3::new(reach + config.approach_distance, 0.0, 0.0),
    }
}

impl<W> Task<W> for Flank<W::Agent>
where
    W: TacticalWorldMut + 'static,
{
    fn on_start(&mut self, _ctx: &TickContext, _world: &mut W, _bus: &mut Bus<W::Agent>) {
        self.wing_gate = None;
    }

    fn on_update(
        &mut self,
        ctx: &TickContext,
        world: &mut W,
        bus: &mut Bus<W::Agent>,
    ) -> TaskStatus {
        let config = self.config;
        let sub_groups = self.sub_group_count();
        let status = self.group.update_base(ctx, world, bus, &mut |w, index, agent| {
            agent.slot = slot_for(w, config, index % sub_groups, agent.id);
        });
        if !status.is_running() || self.group.is_empty() {
            return status;
        }

        if let Some(gate) = &mut self.wing_gate {
            *gate -= ctx.dt_seconds;
        }

        let center = self.group.center_attack_position(world);
        let yaw = self.group.center_attack_yaw(world, center);
        let mut all_in_position = true;
        for i in 0..self.group.len() {
            if !self.group.agent(i).attack_position {
                let mut destination = transform_point(center, self.group.agent(i).slot, yaw);
                // Fan later members of a sub-group out sideways so they do
                // not stack on the sub-group's base slot.
                if i + 1 > sub_groups {
                    let wave = i / sub_groups;
                    let side = if wave % 2 == 0 { -1.0 } else { 1.0 };
                    let rank = ((wave - 1) / 2 + 1) as f32;
                    let offset = Vec3::new(config.separation * side * rank, 0.0, 0.0);
                    destination =
                        transform_point(destination, offset, yaw_towards(destination, center));
                }
                self.group.set_destination(world, i, destination);
                if self.group.agent_has_arrived(world, i) {
                    self.group.agent_mut(i).attack_position = true;
                }
                all_in_position = false;
            } else if !self.group.move_to_attack_position(ctx, world, i) {
                all_in_position = false;
            }
        }

        if all_in_position {
            for i in 0..self.group.len() {
                let is_center = i % sub_groups == 0;
                let gate_open = matches!(self.wing_gate, Some(gate) if gate <= 0.0);
                if (is_center || gate_open)
                    && self.group.try_attack(world, i)
                    && is_center
                    && self.wing_gate.is_none()
                {
                    self.wing_gate = Some(config.attack_delay);
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
        let config = self.config;
        let sub_groups = self.sub_group_count();
        self.group.handle_message(world, message, &mut |w, index, agent| {
            agent.slot = slot_for(w, config, index % sub_groups, agent.id);
        });
    }

    fn on_end(&mut self, _ctx: &TickContext, world: &mut W, bus: &mut Bus<W::Agent>) {
        self.group.on_end(world, bus);
    }

    fn on_reset(&mut self) {
        self.group.on_reset();
        self.config = FlankConfig::default();
    }
}
