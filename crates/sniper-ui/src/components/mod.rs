//! Line-producing building blocks; none of them touch the terminal.

pub mod event_lines;
pub mod header;
pub mod status_line;
