use tactical_core::math::transform_point;
use tactical_core::{AgentId, Bus, Message, Task, TaskStatus, TickContext, Vec3};

use crate::group::{GroupConfig, TacticalGroup};
use crate::world::TacticalWorldMut;

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LeapfrogConfig {
    /// Spacing between members of the same column.
    pub separation: f32,
    /// Lateral gap between the two columns.
    pub group_separation: f32,
    /// How far a column bounds forward per leap.
    pub leap_distance: f32,
}

impl Default for LeapfrogConfig {
    fn default() -> Self {
        Self {
            separation: 2.0,
            group_separation: 10.0,
            leap_distance: 10.0,
        }
    }
}

/// Bounding overwatch: the roster splits into two columns that advance in
/// alternating leaps along the anchor's heading, one column moving while the
/// other covers. The moment any member sights a target, the whole group
/// abandons the pattern and attacks.
#[derive(Debug)]
pub struct Leapfrog<A: AgentId> {
    group: TacticalGroup<A, Vec3>,
    config: LeapfrogConfig,
    in_position: bool,
    /// Which column is currently holding while the other moves.
    first_column_holds: bool,
    attacking: bool,
}

impl<A: AgentId> Leapfrog<A> {
    pub fn new(group: GroupConfig<A>, config: LeapfrogConfig) -> Self {
        Self {
            group: TacticalGroup::new(group),
            config,
            in_position: false,
            first_column_holds: false,
            attacking: false,
        }
    }

    fn holds(&self, index: usize) -> bool {
        (self.first_column_holds && index % 2 == 0)
            || (!self.first_column_holds && index % 2 == 1)
    }

    pub fn group(&self) -> &TacticalGroup<A, Vec3> {
        &self.group
    }
}

fn column_slot(config: LeapfrogConfig, index: usize) -> Vec3 {
    let column = index % 2;
    let side = if column == 0 { -1.0 } else { 1.0 };
    let mut x = config.separation * side * (index / 2) as f32;
    if column == 1 {
        x += config.group_separation;
    }
    Vec3::new(x, 0.0, 0.0)
}

impl<W> Task<W> for Leapfrog<W::Agent>
where
    W: TacticalWorldMut + 'static,
{
    fn on_start(&mut self, _ctx: &TickContext, _world: &mut W, _bus: &mut Bus<W::Agent>) {
        self.in_position = false;
        self.first_column_holds = false;
        self.attacking = false;
    }

    fn on_update(
        &mut self,
        ctx: &TickContext,
        world: &mut W,
        bus: &mut Bus<W::Agent>,
    ) -> TaskStatus {
        let config = self.config;
        let in_position = &mut self.in_position;
        let status = self.group.update_base(ctx, world, bus, &mut |_, index, agent| {
            agent.slot = column_slot(config, index);
            *in_position = false;
        });
        if !status.is_running() || self.group.is_empty() {
            return status;
        }

        let Some(anchor) = self.group.agent_position(world, 0) else {
            return TaskStatus::Running;
        };
        let heading = world.yaw(self.group.agent(0).id).unwrap_or(0.0);

        if !self.in_position {
            self.in_position = true;
            for i in 0..self.group.len() {
                let destination = transform_point(anchor, self.group.agent(i).slot, heading);
                self.group.set_destination(world, i, destination);
                if self.group.agent_has_arrived(world, i) {
                    if !self.group.rotate_towards(ctx, world, i, heading) {
                        self.in_position = false;
                    }
                } else {
                    self.in_position = false;
                }
            }
            return TaskStatus::Running;
        }

        let mut bounded = true;
        for i in 0..self.group.len() {
            if self.attacking {
                if self.group.move_to_attack_position(ctx, world, i) {
                    self.group.try_attack(world, i);
                }
                continue;
            }
            self.group.find_attack_target(world, i);
            if self.group.can_see_target(world, i) {
                self.attacking = true;
            }
            // Only the moving column gates the next leap.
            if self.holds(i) {
                continue;
            }
            if !self.group.agent_has_arrived(world, i) {
                bounded = false;
            }
        }

        if bounded && !self.attacking {
            self.first_column_holds = !self.first_column_holds;
            let depth = if self.first_column_holds { 1.0 } else { 2.0 };
            let leap = Vec3::new(0.0, 0.0, config.leap_distance * depth);
            for i in 0..self.group.len() {
                if self.holds(i) {
                    continue;
                }
                let slot = self.group.agent(i).slot + leap;
                let destination = transform_point(anchor, slot, heading);
                self.group.set_destination(world, i, destination);
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
        let in_position = &mut self.in_position;
        self.group.handle_message(world, message, &mut |_, index, agent| {
            agent.slot = column_slot(config, index);
            *in_position = false;
        });
    }

    fn on_end(&mut self, _ctx: &TickContext, world: &mut W, bus: &mut Bus<W::Agent>) {
        self.group.on_end(world, bus);
    }

    fn on_reset(&mut self) {
        self.group.on_reset();
        self.config = LeapfrogConfig::default();
    }
}
