use tactical_core::math::{transform_point, yaw_from_direction};
use tactical_core::{AgentId, Bus, DeterministicRng, Message, Task, TaskStatus, TickContext, Vec3};

use crate::group::{GroupConfig, TacticalGroup};
use crate::tasks::grid::GridSpec;
use crate::world::TacticalWorldMut;

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ShootAndScootConfig {
    pub grid: GridSpec,
    /// Seconds the group fires from one position before relocating.
    pub time_stationary: f32,
    /// Bearing change per relocation, radians. Drawn uniformly from the
    /// range, with a random sign.
    pub min_move_angle: f32,
    pub max_move_angle: f32,
    /// Standoff distance from the target center, drawn per relocation.
    pub min_attack_radius: f32,
    pub max_attack_radius: f32,
}

impl Default for ShootAndScootConfig {
    fn default() -> Self {
        Self {
            grid: GridSpec::default(),
            time_stationary: 2.0,
            min_move_angle: 10f32.to_radians(),
            max_move_angle: 20f32.to_radians(),
            min_attack_radius: 5.0,
            max_attack_radius: 10.0,
        }
    }
}

/// Fire, then displace: the grid fires from a standoff position for a dwell
/// period, then shifts its bearing around the target center and re-forms at
/// a freshly drawn radius. Relocation draws come from the tick context's
/// seeded stream, so runs replay identically for a fixed seed.
#[derive(Debug)]
pub struct ShootAndScoot<A: AgentId> {
    group: TacticalGroup<A, Vec3>,
    config: ShootAndScootConfig,
    current_angle: f32,
    attack_radius: f32,
    dwell_remaining: f32,
    in_position: bool,
    draw_pending: bool,
    relocations: u64,
}

impl<A: AgentId> ShootAndScoot<A> {
    pub fn new(group: GroupConfig<A>, config: ShootAndScootConfig) -> Self {
        let attack_radius = config.max_attack_radius;
        Self {
            group: TacticalGroup::new(group),
            config,
            current_angle: 0.0,
            attack_radius,
            dwell_remaining: 0.0,
            in_position: true,
            draw_pending: true,
            relocations: 0,
        }
    }

    pub fn group(&self) -> &TacticalGroup<A, Vec3> {
        &self.group
    }
}

impl<W> Task<W> for ShootAndScoot<W::Agent>
where
    W: TacticalWorldMut + 'static,
{
    fn on_start(&mut self, _ctx: &TickContext, _world: &mut W, _bus: &mut Bus<W::Agent>) {
        // Arranged so the first update relocates immediately.
        self.in_position = true;
        self.dwell_remaining = 0.0;
        self.draw_pending = true;
        self.relocations = 0;
    }

    fn on_update(
        &mut self,
        ctx: &TickContext,
        world: &mut W,
        bus: &mut Bus<W::Agent>,
    ) -> TaskStatus {
        let grid = self.config.grid;
        let was_formed = self.group.is_formed();
        let status = self.group.update_base(ctx, world, bus, &mut |_, index, agent| {
            agent.slot = grid.offset(index);
        });
        if !status.is_running() || self.group.is_empty() {
            return status;
        }
        if !was_formed && !self.group.targets().is_empty() {
            // Start from the bearing the owner already holds relative to
            // the target center.
            let center = self.group.center_attack_position(world);
            let owner = world.position(self.group.owner()).unwrap_or(center);
            self.current_angle = yaw_from_direction((owner - center).flattened());
        }

        if !self.in_position || self.dwell_remaining <= 0.0 {
            let center = self.group.center_attack_position(world);
            let yaw = self.group.reverse_center_attack_yaw(world, center);
            if self.draw_pending {
                self.relocations += 1;
                let mut rng = ctx.rng_for_agent(self.group.owner(), self.relocations);
                let delta = rng.next_f32_range(self.config.min_move_angle, self.config.max_move_angle);
                let sign = if rng.next_bool() { 1.0 } else { -1.0 };
                self.current_angle += delta * sign;
                self.attack_radius =
                    rng.next_f32_range(self.config.min_attack_radius, self.config.max_attack_radius);
                self.draw_pending = false;
            }
            let standoff = center
                + Vec3::new(
                    self.current_angle.sin() * self.attack_radius,
                    0.0,
                    self.current_angle.cos() * self.attack_radius,
                );
            self.in_position = true;
            for i in 0..self.group.len() {
                let offset = self.group.agent(i).slot;
                let destination = transform_point(standoff, offset, yaw);
                self.group.set_destination(world, i, destination);
                if self.group.agent_has_arrived(world, i) {
                    self.group.find_attack_target(world, i);
                    match self
                        .group
                        .agent(i)
                        .target
                        .and_then(|target| world.position(target))
                    {
                        Some(target_position) => {
                            if !self.group.rotate_towards_position(ctx, world, i, target_position) {
                                self.in_position = false;
                            }
                        }
                        None => self.in_position = false,
                    }
                } else {
                    self.in_position = false;
                }
            }
            if self.in_position {
                self.dwell_remaining = self.config.time_stationary;
                self.draw_pending = true;
            }
        } else {
            self.dwell_remaining -= ctx.dt_seconds;
            for i in 0..self.group.len() {
                self.group.try_attack(world, i);
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
        self.config = ShootAndScootConfig::default();
    }
}
