//! Terminal front end for VT Sniper.
//!
//! Provides the Virginia Tech theme, line components (banner, config box,
//! event lines, live status row) and the inline-viewport console app that
//! mirrors a running monitor.

pub mod app;
pub mod components;
pub mod themes;

pub use sniper_runtime as runtime;
