//! Timetable access for VT Sniper.
//!
//! Builds timetable search requests, extracts the results table from the
//! returned HTML, and answers the two questions the monitor asks: what is
//! this CRN called, and does it have an open seat.

pub mod availability;
pub mod client;
pub mod query;
pub mod resolver;
pub mod table;

pub use sniper_core as core;
