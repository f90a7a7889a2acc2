//! Layout manager orchestrator.
//!
//! Consumers import the manager from here while the registry and dispatch
//! logic live in the private `core` module.

mod core;

pub use core::{LayoutManager, ListenerId, SharedLayoutManager};
