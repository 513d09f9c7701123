//! Refresh Loop
//!
//! The App drives the dashboard on a fixed interval:
//! - prints the start banner
//! - on every tick takes a snapshot and redraws the whole table
//! - stops once every task has finished, or on Ctrl-C
//! - prints the finish line
//!
//! A snapshot that cannot be read is logged and the last good one is drawn
//! again, so a scheduler caught mid-write does not blank the screen. Sink
//! failures end the loop.

use std::future::Future;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use taskboard_core::{BoardConfig, Dashboard, DisplaySink, TaskSnapshots};

use crate::source::SnapshotSource;

/// Result of one refresh tick
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tick {
    /// Keep refreshing
    Continue,
    /// Every task has finished
    Done,
}

/// Main application state
pub struct App<S, D> {
    dashboard: Dashboard,
    source: S,
    sink: D,
    interval: Duration,
    exit_when_done: bool,
    /// Last snapshot that was read successfully
    last_good: TaskSnapshots,
    started: Instant,
    ticks: u64,
}

impl<S, D> App<S, D>
where
    S: SnapshotSource,
    D: DisplaySink,
    D::Error: std::error::Error + Send + Sync + 'static,
{
    /// Create an app from loaded configuration
    pub fn new(config: &BoardConfig, source: S, sink: D) -> Self {
        Self {
            dashboard: Dashboard::from_config(config),
            source,
            sink,
            interval: config.refresh_interval,
            exit_when_done: config.exit_when_done,
            last_good: TaskSnapshots::new(),
            started: Instant::now(),
            ticks: 0,
        }
    }

    /// The display sink
    pub fn sink(&self) -> &D {
        &self.sink
    }

    /// Consume the app, returning the sink
    pub fn into_sink(self) -> D {
        self.sink
    }

    /// Number of refresh ticks so far
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Run until done or Ctrl-C
    ///
    /// # Errors
    ///
    /// Returns an error if the display cannot be written.
    pub async fn run(&mut self) -> Result<()> {
        self.run_until(ctrl_c()).await
    }

    /// Run until done or until `shutdown` resolves
    ///
    /// # Errors
    ///
    /// Returns an error if the display cannot be written.
    pub async fn run_until(&mut self, shutdown: impl Future<Output = ()>) -> Result<()> {
        tokio::pin!(shutdown);

        self.dashboard
            .start(&mut self.sink)
            .context("Failed to write start banner")?;

        self.started = Instant::now();
        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        info!(
            interval_ms = self.interval.as_millis(),
            exit_when_done = self.exit_when_done,
            "Dashboard started"
        );

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    if self.refresh()? == Tick::Done {
                        info!(ticks = self.ticks, "All tasks finished");
                        break;
                    }
                }
                () = &mut shutdown => {
                    info!(ticks = self.ticks, "Interrupted, stopping dashboard");
                    break;
                }
            }
        }

        self.dashboard
            .finish(&mut self.sink)
            .context("Failed to write finish line")
    }

    /// Take one snapshot and redraw
    ///
    /// # Errors
    ///
    /// Returns an error if the display cannot be written.
    pub fn refresh(&mut self) -> Result<Tick> {
        self.ticks += 1;

        match self.source.snapshot() {
            Ok(snapshots) => self.last_good = snapshots,
            Err(e) => warn!(error = %e, "Snapshot failed, redrawing last good state"),
        }

        let elapsed = self.started.elapsed().as_secs_f64();
        debug!(
            tick = self.ticks,
            tasks = self.last_good.len(),
            elapsed,
            "Refreshing dashboard"
        );

        self.dashboard
            .render(&mut self.sink, &self.last_good, elapsed)
            .context("Failed to draw dashboard")?;

        if self.exit_when_done && self.last_good.all_finished() {
            Ok(Tick::Done)
        } else {
            Ok(Tick::Continue)
        }
    }
}

/// Resolves on Ctrl-C; never resolves if the handler cannot be installed
async fn ctrl_c() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
}
