//! Taskboard TUI - Terminal driver for the task dashboard
//!
//! Reads task snapshots from a scheduler's state file and redraws the
//! dashboard on the terminal at a fixed interval.
//!
//! # Architecture
//!
//! - **App**: refresh loop, shutdown and completion handling
//! - **Source**: where snapshots come from (state file)
//! - **Terminal**: crossterm implementation of the core's display sink
//! - **Theme**: tone tags to terminal colors

pub mod app;
pub mod source;
pub mod terminal;
pub mod theme;

#[cfg(test)]
pub mod test_utils;

pub use app::{App, Tick};
pub use source::{SnapshotSource, SourceError, StateFileSource};
pub use terminal::TerminalSink;
pub use theme::AnsiPainter;
