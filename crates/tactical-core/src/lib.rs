//! Deterministic, engine-agnostic tactical AI kernel primitives.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod agent;
pub mod bus;
pub mod damage;
pub mod math;
pub mod rng;
pub mod runner;
pub mod task;
pub mod tick;
pub mod world;

pub use agent::AgentId;
pub use bus::{Bus, Message};
pub use damage::{Damageable, Health};
pub use math::Vec3;
pub use rng::{DeterministicRng, SplitMix64};
pub use runner::{Runner, TaskHandle};
pub use task::{Task, TaskOutcome, TaskStatus};
pub use tick::TickContext;
pub use world::{WorldMut, WorldView};
