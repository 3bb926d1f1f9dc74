//! Core types for VT Sniper.
//!
//! Error taxonomy, CLI settings and the JSON config file, the tracked-course
//! model, the notifier capability and small formatting helpers shared by the
//! data, runtime and UI crates.

pub mod error;
pub mod formatting;
pub mod models;
pub mod notifications;
pub mod settings;
