//! Workspace placeholder crate.
//!
//! This crate exists to expose shared feature flags that map to the individual
//! workspace crates (`bridge-traits`, `core-queue`, `core-metadata`). Host
//! applications can depend on `lmm-workspace` and enable the documented
//! features without needing to wire each crate individually.

#[cfg(feature = "metadata")]
pub use bridge_traits;
#[cfg(feature = "metadata")]
pub use core_metadata;
#[cfg(feature = "metadata")]
pub use core_queue;
