//! TOML Configuration File Support
//!
//! Centralized configuration loading for the dashboard, with an optional
//! TOML file at `~/.config/taskboard/taskboard.toml`.
//!
//! # Configuration Priority
//!
//! Values are resolved with the following priority (highest first):
//! 1. CLI arguments (applied by the caller through [`ConfigOverrides`])
//! 2. Environment variables
//! 3. TOML configuration file
//! 4. Default values
//!
//! # Example Configuration
//!
//! ```toml
//! [display]
//! bar_width = 20
//! glyphs = "unicode"
//! color = true
//! start_banner = "Starting import ..."
//!
//! [refresh]
//! interval_ms = 500
//! exit_when_done = true
//!
//! [source]
//! state_file = "/tmp/import/state.json"
//! ```

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::dashboard::DEFAULT_START_BANNER;
use crate::presenter::GlyphSet;
use crate::progress::DEFAULT_WIDTH;

/// Widest progress bar accepted
pub const MAX_BAR_WIDTH: usize = 200;

// =============================================================================
// Error Types
// =============================================================================

/// Errors that can occur when loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read config file
    #[error("Failed to read config file at {path}: {source}")]
    ReadError {
        /// The path that was attempted
        path: PathBuf,
        /// The underlying IO error
        source: std::io::Error,
    },

    /// Failed to parse TOML
    #[error("Failed to parse TOML config: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Invalid configuration value
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

// =============================================================================
// Configuration Source Tracking
// =============================================================================

/// Tracks where the configuration came from
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConfigSource {
    /// Value from command-line argument
    Cli,
    /// Value from environment variable
    Env,
    /// Value from TOML configuration file
    File,
    /// Default value
    Default,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Cli => write!(f, "CLI"),
            Self::Env => write!(f, "environment"),
            Self::File => write!(f, "config file"),
            Self::Default => write!(f, "default"),
        }
    }
}

// =============================================================================
// TOML Configuration Structures
// =============================================================================

/// Display section of the TOML configuration
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayToml {
    /// Number of progress bar cells
    pub bar_width: Option<usize>,
    /// Glyph set: "unicode" or "ascii"
    pub glyphs: Option<GlyphSet>,
    /// Whether to color task titles
    pub color: Option<bool>,
    /// Line printed before the first frame
    pub start_banner: Option<String>,
}

/// Refresh section of the TOML configuration
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RefreshToml {
    /// Refresh interval in milliseconds
    pub interval_ms: Option<u64>,
    /// Stop once every task has finished
    pub exit_when_done: Option<bool>,
}

/// Snapshot source section of the TOML configuration
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceToml {
    /// JSON state file rewritten by the scheduler
    pub state_file: Option<PathBuf>,
}

/// Root of the TOML configuration file
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardToml {
    /// `[display]`
    pub display: DisplayToml,
    /// `[refresh]`
    pub refresh: RefreshToml,
    /// `[source]`
    pub source: SourceToml,
}

// =============================================================================
// Resolved Configuration
// =============================================================================

/// Fully resolved dashboard configuration
#[derive(Clone, Debug)]
pub struct BoardConfig {
    /// Number of progress bar cells
    pub bar_width: usize,
    /// Glyph set for titles and bars
    pub glyphs: GlyphSet,
    /// Whether toned titles are colored
    pub color: bool,
    /// Line printed before the first frame
    pub start_banner: String,
    /// Time between redraws
    pub refresh_interval: Duration,
    /// Stop once every task has finished
    pub exit_when_done: bool,
    /// JSON state file to read snapshots from
    pub state_file: Option<PathBuf>,
    /// Path to the config file that was loaded (if any)
    pub config_file_path: Option<PathBuf>,
    /// Source of configuration values
    source: ConfigSource,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            bar_width: DEFAULT_WIDTH,
            glyphs: GlyphSet::Unicode,
            color: true,
            start_banner: DEFAULT_START_BANNER.to_string(),
            refresh_interval: Duration::from_millis(500),
            exit_when_done: true,
            state_file: None,
            config_file_path: None,
            source: ConfigSource::Default,
        }
    }
}

impl BoardConfig {
    /// Create a new configuration with default values
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the primary source of this configuration
    #[must_use]
    pub fn source(&self) -> ConfigSource {
        self.source
    }

    /// Check value ranges
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ValidationError`] for a bar width outside
    /// `1..=200` or a zero refresh interval.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.bar_width == 0 || self.bar_width > MAX_BAR_WIDTH {
            return Err(ConfigError::ValidationError(format!(
                "bar_width must be between 1 and {MAX_BAR_WIDTH}, got {}",
                self.bar_width
            )));
        }
        if self.refresh_interval.is_zero() {
            return Err(ConfigError::ValidationError(
                "refresh interval must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

// =============================================================================
// Configuration Loading
// =============================================================================

/// Get the default configuration file path
///
/// Returns `$XDG_CONFIG_HOME/taskboard/taskboard.toml` or
/// `~/.config/taskboard/taskboard.toml` if `XDG_CONFIG_HOME` is not set.
#[must_use]
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("taskboard").join("taskboard.toml"))
}

/// Load configuration from the default path, environment and defaults
///
/// # Errors
///
/// Returns an error if the config file exists but cannot be parsed.
/// A missing config file is not an error (defaults are used).
pub fn load_config() -> Result<BoardConfig, ConfigError> {
    load_config_from_path(default_config_path())
}

/// Load configuration from a specific path
///
/// # Arguments
///
/// * `path` - Optional path to the configuration file. If `None`, only defaults
///   and environment variables are used.
///
/// # Errors
///
/// Returns an error if the specified config file cannot be read or parsed.
pub fn load_config_from_path(path: Option<PathBuf>) -> Result<BoardConfig, ConfigError> {
    let mut config = BoardConfig::default();

    if let Some(ref config_path) = path {
        if config_path.exists() {
            let toml_content =
                std::fs::read_to_string(config_path).map_err(|e| ConfigError::ReadError {
                    path: config_path.clone(),
                    source: e,
                })?;

            let toml_config: BoardToml = toml::from_str(&toml_content)?;
            apply_toml_config(&mut config, &toml_config);
            config.config_file_path = Some(config_path.clone());
            config.source = ConfigSource::File;

            tracing::info!(
                path = %config_path.display(),
                "Loaded configuration from file"
            );
        } else {
            tracing::debug!(
                path = %config_path.display(),
                "Config file not found, using defaults"
            );
        }
    }

    apply_env_config(&mut config);

    Ok(config)
}

/// Apply TOML configuration values to the config struct
fn apply_toml_config(config: &mut BoardConfig, toml: &BoardToml) {
    if let Some(width) = toml.display.bar_width {
        config.bar_width = width;
    }
    if let Some(glyphs) = toml.display.glyphs {
        config.glyphs = glyphs;
    }
    if let Some(color) = toml.display.color {
        config.color = color;
    }
    if let Some(ref banner) = toml.display.start_banner {
        config.start_banner = banner.clone();
    }

    if let Some(ms) = toml.refresh.interval_ms {
        config.refresh_interval = Duration::from_millis(ms);
    }
    if let Some(exit) = toml.refresh.exit_when_done {
        config.exit_when_done = exit;
    }

    if toml.source.state_file.is_some() {
        config.state_file = toml.source.state_file.clone();
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Apply environment variable overrides to the config
fn apply_env_config(config: &mut BoardConfig) {
    if let Ok(width) = std::env::var("TASKBOARD_BAR_WIDTH") {
        if let Ok(width) = width.trim().parse::<usize>() {
            config.bar_width = width;
            config.source = ConfigSource::Env;
        }
    }
    if let Ok(glyphs) = std::env::var("TASKBOARD_GLYPHS") {
        if let Some(glyphs) = GlyphSet::parse(&glyphs) {
            config.glyphs = glyphs;
            config.source = ConfigSource::Env;
        } else {
            tracing::warn!(value = %glyphs, "Ignoring unknown TASKBOARD_GLYPHS value");
        }
    }
    if let Ok(color) = std::env::var("TASKBOARD_COLOR") {
        if let Some(color) = parse_bool(&color) {
            config.color = color;
            config.source = ConfigSource::Env;
        }
    }
    // https://no-color.org: any non-empty value disables color
    if std::env::var("NO_COLOR").is_ok_and(|v| !v.is_empty()) {
        config.color = false;
        config.source = ConfigSource::Env;
    }
    if let Ok(interval) = std::env::var("TASKBOARD_REFRESH_MS") {
        if let Ok(ms) = interval.trim().parse::<u64>() {
            config.refresh_interval = Duration::from_millis(ms);
            config.source = ConfigSource::Env;
        }
    }
    if let Ok(path) = std::env::var("TASKBOARD_STATE_FILE") {
        if !path.is_empty() {
            config.state_file = Some(PathBuf::from(path));
            config.source = ConfigSource::Env;
        }
    }
}

// =============================================================================
// CLI Overrides
// =============================================================================

/// Values supplied on the command line, applied last
#[derive(Clone, Debug, Default)]
pub struct ConfigOverrides {
    /// Progress bar width override
    pub bar_width: Option<usize>,
    /// Glyph set override
    pub glyphs: Option<GlyphSet>,
    /// Color override
    pub color: Option<bool>,
    /// Refresh interval override in milliseconds
    pub refresh_interval_ms: Option<u64>,
    /// Exit-when-done override
    pub exit_when_done: Option<bool>,
    /// State file override
    pub state_file: Option<PathBuf>,
}

impl ConfigOverrides {
    /// Create a new empty set of overrides
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set bar width override
    #[must_use]
    pub fn with_bar_width(mut self, width: usize) -> Self {
        self.bar_width = Some(width);
        self
    }

    /// Set glyph set override
    #[must_use]
    pub fn with_glyphs(mut self, glyphs: GlyphSet) -> Self {
        self.glyphs = Some(glyphs);
        self
    }

    /// Set color override
    #[must_use]
    pub fn with_color(mut self, color: bool) -> Self {
        self.color = Some(color);
        self
    }

    /// Set refresh interval override
    #[must_use]
    pub fn with_refresh_interval_ms(mut self, ms: u64) -> Self {
        self.refresh_interval_ms = Some(ms);
        self
    }

    /// Set exit-when-done override
    #[must_use]
    pub fn with_exit_when_done(mut self, exit: bool) -> Self {
        self.exit_when_done = Some(exit);
        self
    }

    /// Set state file override
    #[must_use]
    pub fn with_state_file(mut self, path: PathBuf) -> Self {
        self.state_file = Some(path);
        self
    }

    fn is_empty(&self) -> bool {
        self.bar_width.is_none()
            && self.glyphs.is_none()
            && self.color.is_none()
            && self.refresh_interval_ms.is_none()
            && self.exit_when_done.is_none()
            && self.state_file.is_none()
    }

    /// Apply overrides to a configuration
    pub fn apply(&self, config: &mut BoardConfig) {
        if !self.is_empty() {
            config.source = ConfigSource::Cli;
        }

        if let Some(width) = self.bar_width {
            config.bar_width = width;
        }
        if let Some(glyphs) = self.glyphs {
            config.glyphs = glyphs;
        }
        if let Some(color) = self.color {
            config.color = color;
        }
        if let Some(ms) = self.refresh_interval_ms {
            config.refresh_interval = Duration::from_millis(ms);
        }
        if let Some(exit) = self.exit_when_done {
            config.exit_when_done = exit;
        }
        if let Some(ref path) = self.state_file {
            config.state_file = Some(path.clone());
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
