//! Taskboard Entry Point
//!
//! Watches a scheduler's state file and draws the task dashboard.
//!
//! # Usage
//!
//! ```bash
//! # Watch a state file
//! taskboard --state-file /var/run/import/state.json
//!
//! # ASCII glyphs, no colors, faster refresh
//! taskboard --state-file state.json --ascii --no-color -i 200
//!
//! # Keep the table on screen after everything finished
//! taskboard --state-file state.json --keep-open
//!
//! # Verbose logging to a file (stdout carries the dashboard)
//! taskboard --state-file state.json -l debug --log-file taskboard.log
//! ```

use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, info};

use taskboard_core::{
    default_config_path, load_config_from_path, BoardConfig, ConfigOverrides, GlyphSet,
};
use taskboard_tui::{App, StateFileSource, TerminalSink};

/// Taskboard - live status table for a batch of running tasks
#[derive(Parser, Debug)]
#[command(name = "taskboard")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// JSON state file written by the scheduler
    #[arg(long, env = "TASKBOARD_STATE_FILE", value_name = "PATH")]
    state_file: Option<PathBuf>,

    /// Configuration file path
    #[arg(short = 'c', long, env = "TASKBOARD_CONFIG", value_name = "FILE")]
    config: Option<PathBuf>,

    /// Refresh interval in milliseconds
    #[arg(short = 'i', long, value_name = "MS")]
    interval_ms: Option<u64>,

    /// Number of progress bar cells
    #[arg(long, value_name = "N")]
    bar_width: Option<usize>,

    /// Use ASCII glyphs instead of Unicode symbols
    #[arg(long)]
    ascii: bool,

    /// Disable colored titles
    #[arg(long)]
    no_color: bool,

    /// Keep refreshing after every task has finished
    #[arg(long)]
    keep_open: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short = 'l', long, env = "TASKBOARD_LOG_LEVEL", default_value = "warn")]
    log_level: String,

    /// Write logs to this file instead of stderr
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,
}

impl Args {
    /// CLI values that override file and environment configuration
    fn overrides(&self) -> ConfigOverrides {
        let mut overrides = ConfigOverrides::new();
        if let Some(path) = &self.state_file {
            overrides = overrides.with_state_file(path.clone());
        }
        if let Some(ms) = self.interval_ms {
            overrides = overrides.with_refresh_interval_ms(ms);
        }
        if let Some(width) = self.bar_width {
            overrides = overrides.with_bar_width(width);
        }
        if self.ascii {
            overrides = overrides.with_glyphs(GlyphSet::Ascii);
        }
        if self.no_color {
            overrides = overrides.with_color(false);
        }
        if self.keep_open {
            overrides = overrides.with_exit_when_done(false);
        }
        overrides
    }
}

/// Initialize logging with the specified level
///
/// Stdout carries the dashboard, so logs go to stderr or a file.
fn init_logging(level: &str, log_file: Option<&PathBuf>) -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        tracing_subscriber::EnvFilter::new(format!("taskboard_tui={level},taskboard_core={level}"))
    });

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);

    match log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file: {}", path.display()))?;
            builder
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        None => builder.with_writer(std::io::stderr).init(),
    }

    Ok(())
}

/// Load config file and environment, then apply CLI overrides
fn resolve_config(args: &Args) -> Result<BoardConfig> {
    let path = args.config.clone().or_else(default_config_path);
    let mut config = load_config_from_path(path).context("Failed to load config")?;
    args.overrides().apply(&mut config);
    config.validate().context("Invalid configuration")?;

    debug!(
        source = ?config.source(),
        config_file = ?config.config_file_path,
        bar_width = config.bar_width,
        glyphs = %config.glyphs,
        color = config.color,
        "Configuration resolved"
    );
    Ok(config)
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging first
    init_logging(&args.log_level, args.log_file.as_ref())?;

    info!("Taskboard starting");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));

    let config = resolve_config(&args)?;
    let state_file = config
        .state_file
        .clone()
        .context("No state file given (use --state-file or [source] state_file)")?;

    info!(state_file = %state_file.display(), "Watching state file");

    let source = StateFileSource::new(state_file);
    let sink = TerminalSink::stdout(config.color);
    let mut app = App::new(&config, source, sink);

    app.run().await
}
