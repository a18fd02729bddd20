#![allow(dead_code)]

use std::collections::BTreeMap;

use tactical_core::math::{angle_difference, yaw_towards};
use tactical_core::{Damageable, Health, TickContext, Vec3, WorldMut, WorldView};
use tactical_nav::LocomotionConfig;
use tactical_tasks::{TacticalWorldMut, TacticalWorldView};

/// One simulated entity. Agents and targets use the same record; anything
/// with health is damageable.
#[derive(Debug, Clone)]
pub struct Entity {
    pub position: Vec3,
    pub yaw: f32,
    pub health: Option<Health>,
    pub tag: &'static str,
    pub attack_distance: f32,
    pub attack_angle: f32,
    pub attack_damage: f32,
    pub sight_range: f32,
    pub locomotion: LocomotionConfig,
}

impl Default for Entity {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            yaw: 0.0,
            health: Some(Health::new(100.0)),
            tag: "",
            attack_distance: 5.0,
            attack_angle: 0.5,
            attack_damage: 10.0,
            sight_range: 50.0,
            locomotion: LocomotionConfig::default(),
        }
    }
}

/// Deterministic flat-world test double. Attacks land when the attacker is
/// in range, the target is visible, and the attacker is aimed; every landed
/// shot is recorded in `shots`.
#[derive(Debug, Default)]
pub struct SimWorld {
    entities: BTreeMap<u64, Entity>,
    pub shots: Vec<(u64, u64)>,
}

impl SimWorld {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spawn(&mut self, id: u64, position: Vec3) -> &mut Entity {
        self.entities.entry(id).or_insert_with(|| Entity {
            position,
            ..Entity::default()
        })
    }

    pub fn spawn_enemy(&mut self, id: u64, position: Vec3) -> &mut Entity {
        let entity = self.spawn(id, position);
        entity.tag = "enemy";
        entity
    }

    pub fn entity(&self, id: u64) -> &Entity {
        &self.entities[&id]
    }

    pub fn entity_mut(&mut self, id: u64) -> &mut Entity {
        self.entities.get_mut(&id).expect("unknown entity")
    }

    pub fn kill(&mut self, id: u64) {
        if let Some(health) = &mut self.entity_mut(id).health {
            health.kill();
        }
    }
}

impl WorldView for SimWorld {
    type Agent = u64;
}

impl WorldMut for SimWorld {}

impl TacticalWorldView for SimWorld {
    fn position(&self, agent: u64) -> Option<Vec3> {
        self.entities.get(&agent).map(|e| e.position)
    }

    fn yaw(&self, agent: u64) -> Option<f32> {
        self.entities.get(&agent).map(|e| e.yaw)
    }

    fn is_damageable(&self, agent: u64) -> bool {
        self.entities.get(&agent).is_some_and(|e| e.health.is_some())
    }

    fn is_alive(&self, agent: u64) -> bool {
        self.entities
            .get(&agent)
            .and_then(|e| e.health)
            .is_some_and(|h| h.is_alive())
    }

    fn line_of_sight(&self, observer: u64, target: u64) -> bool {
        let (Some(from), Some(to)) = (self.entities.get(&observer), self.entities.get(&target))
        else {
            return false;
        };
        from.position.distance(to.position) <= from.sight_range
    }

    fn attack_distance(&self, agent: u64) -> f32 {
        self.entities.get(&agent).map_or(0.0, |e| e.attack_distance)
    }

    fn attack_angle(&self, agent: u64) -> f32 {
        self.entities.get(&agent).map_or(0.0, |e| e.attack_angle)
    }

    fn locomotion_config(&self, agent: u64) -> LocomotionConfig {
        self.entities
            .get(&agent)
            .map(|e| e.locomotion)
            .unwrap_or_default()
    }

    fn collect_damageable_with_tag(&self, tag: &str, out: &mut Vec<u64>) {
        for (id, entity) in &self.entities {
            if entity.tag == tag && entity.health.is_some() {
                out.push(*id);
            }
        }
    }
}

impl TacticalWorldMut for SimWorld {
    fn set_position(&mut self, agent: u64, position: Vec3) {
        if let Some(entity) = self.entities.get_mut(&agent) {
            entity.position = position;
        }
    }

    fn set_yaw(&mut self, agent: u64, yaw: f32) {
        if let Some(entity) = self.entities.get_mut(&agent) {
            entity.yaw = yaw;
        }
    }

    fn try_attack(&mut self, attacker: u64, target: u64) -> bool {
        let Some(shooter) = self.entities.get(&attacker).cloned() else {
            return false;
        };
        if !self.is_alive(target) || !self.line_of_sight(attacker, target) {
            return false;
        }
        let target_position = self.entities[&target].position;
        if shooter.position.distance(target_position) > shooter.attack_distance {
            return false;
        }
        let aim_error =
            angle_difference(shooter.yaw, yaw_towards(shooter.position, target_position)).abs();
        if aim_error > shooter.attack_angle {
            return false;
        }
        if let Some(health) = &mut self.entities.get_mut(&target).unwrap().health {
            health.damage(shooter.attack_damage);
        }
        self.shots.push((attacker, target));
        true
    }
}

pub fn ctx(tick: u64) -> TickContext {
    TickContext {
        tick,
        dt_seconds: 0.1,
        seed: 7,
    }
}
