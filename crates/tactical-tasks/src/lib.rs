//! Tactical group coordination on top of the `tactical-core` task kernel.
//!
//! A [`TacticalGroup`] is a roster of agents under one owner, assembled over
//! the order bus and steered by a maneuver task: direct [`Attack`],
//! [`Charge`], [`MarchingFire`], [`Flank`], [`Surround`], [`Hold`],
//! [`Ambush`], [`Leapfrog`], [`ShootAndScoot`], [`Retreat`], or the
//! reinforcement pair. Followers run [`FollowOrders`] and are driven
//! entirely by the leader's group until it reports their orders finished.
//!
//! The host supplies the world through [`TacticalWorldView`] and
//! [`TacticalWorldMut`]; everything here is engine-agnostic and
//! deterministic for a fixed seed.

#![forbid(unsafe_code)]

pub mod agent;
pub mod group;
pub mod tasks;
pub mod world;

pub use agent::TacticalAgent;
pub use group::{GroupConfig, TacticalGroup};
pub use tasks::{
    Ambush, AmbushConfig, Attack, Charge, ChargeConfig, Flank, FlankConfig, FollowOrders,
    GridSpec, Hold, HoldConfig, Leapfrog, LeapfrogConfig, MarchingFire, MarchingFireConfig,
    ReinforcementsResponse, RequestReinforcements, Retreat, RetreatConfig, ShootAndScoot,
    ShootAndScootConfig, Surround, SurroundConfig,
};
pub use world::{TacticalWorldMut, TacticalWorldView};
