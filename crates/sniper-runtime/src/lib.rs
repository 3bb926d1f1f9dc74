//! Runtime orchestration layer for VT Sniper.
//!
//! Owns the monitor loop: resolves the configured CRNs, polls them on an
//! interval, and reports events and progress to whoever is watching.

pub mod events;
pub mod orchestrator;
pub mod state;

pub use sniper_core as core;
pub use sniper_data as data;
