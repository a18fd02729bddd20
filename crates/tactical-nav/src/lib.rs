//! Locomotion backends and the path-planning contract for tactical agents.
//!
//! Path planning itself is an external collaborator: hosts hand in whatever
//! implements [`Navigator`] (a navmesh, a grid, a crowd system). This crate
//! only knows how to seek a point, report arrival, and keep facing sane.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod locomotion;
pub mod navigator;

pub use locomotion::{Locomotion, LocomotionBackend, LocomotionConfig};
pub use navigator::{DirectNavigator, NavPath, Navigator};
