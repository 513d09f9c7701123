//! Taskboard Core - Headless Task Dashboard Rendering
//!
//! This crate turns point-in-time snapshots of concurrently running tasks
//! into a status table, completely independent of any terminal library. A
//! driver (the TUI crate, a test, a log writer) hands it a fresh snapshot on
//! every refresh tick and a [`DisplaySink`] to draw into.
//!
//! # Architecture
//!
//! ```text
//!  scheduler ──► TaskSnapshots ──► Dashboard::render ──► DisplaySink
//!                                     │
//!               ┌──────────┬──────────┼───────────┬──────────────┐
//!               │          │          │           │              │
//!           classify    present   accumulate   progress     format_duration
//!          (groups)   (glyph/tone)  (totals)    (bar)        (time/counts)
//! ```
//!
//! # Quick Start
//!
//! ```
//! use taskboard_core::{Dashboard, MemorySink, TaskSnapshot, TaskSnapshots};
//!
//! let snapshots: TaskSnapshots = vec![
//!     TaskSnapshot::queued("users").with_waiting_on(["groups"]),
//!     TaskSnapshot::running("groups").with_total_count(10).with_progress(40.0),
//! ]
//! .into();
//!
//! let mut sink = MemorySink::new();
//! let dashboard = Dashboard::new();
//! dashboard.start(&mut sink).unwrap();
//! dashboard.render(&mut sink, &snapshots, 12.0).unwrap();
//! dashboard.finish(&mut sink).unwrap();
//!
//! assert_eq!(sink.clear_count(), 1);
//! ```
//!
//! # Module Overview
//!
//! - [`snapshot`]: task snapshot types
//! - [`classify`]: grouping by lifecycle state
//! - [`presenter`]: title glyphs and color tones
//! - [`totals`]: aggregate counters
//! - [`progress`]: text progress bar
//! - [`time`] and [`format`]: duration, clock and count formatting
//! - [`table`]: box-drawing table
//! - [`sink`]: display sink abstraction
//! - [`dashboard`]: the renderer tying it together
//! - [`config`]: TOML/env configuration
//!
//! # No Terminal Dependencies
//!
//! This crate has **zero** dependencies on crossterm or any other terminal
//! library. Colors are tags, painted by whatever sink draws the table.

#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod classify;
pub mod config;
pub mod dashboard;
pub mod format;
pub mod presenter;
pub mod progress;
pub mod sink;
pub mod snapshot;
pub mod table;
pub mod time;
pub mod totals;

// Re-exports for convenience
pub use classify::{classify, Partition};
pub use config::{
    default_config_path, load_config, load_config_from_path, BoardConfig, BoardToml,
    ConfigError, ConfigOverrides, ConfigSource,
};
pub use dashboard::{Dashboard, HEADERS};
pub use format::{format_count, format_percent};
pub use presenter::{present, Glyph, GlyphSet, StyledTitle, Tone};
pub use sink::{DisplaySink, MemorySink, PlainPainter, SinkEvent, TagPainter, TonePainter};
pub use snapshot::{Counters, CounterValue, LifecycleState, TaskSnapshot, TaskSnapshots};
pub use table::{Cell, Row, Table};
pub use time::{format_clock, format_duration};
pub use totals::DashboardTotals;
