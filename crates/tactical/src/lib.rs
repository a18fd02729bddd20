//! Umbrella crate that re-exports the `tactical-*` building blocks.
//!
//! This crate is intended as a convenient entrypoint: the task kernel and
//! deterministic primitives live in [`core`], locomotion and path planning
//! in [`nav`], and the group maneuvers in [`tasks`].

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

#[cfg(feature = "core")]
#[cfg_attr(docsrs, doc(cfg(feature = "core")))]
pub use tactical_core as core;

#[cfg(feature = "nav")]
#[cfg_attr(docsrs, doc(cfg(feature = "nav")))]
pub use tactical_nav as nav;

#[cfg(feature = "tasks")]
#[cfg_attr(docsrs, doc(cfg(feature = "tasks")))]
pub use tactical_tasks as tasks;
