//! Snapshot Sources
//!
//! Where the driver gets a fresh [`TaskSnapshots`] on each refresh tick.
//!
//! The scheduler that runs the tasks is a separate process. It rewrites a
//! JSON state file as tasks progress; [`StateFileSource`] re-reads that file
//! on every tick:
//!
//! ```json
//! [
//!   {"title": "users", "state": "queued", "waiting_on": ["groups"]},
//!   {"title": "groups", "state": "running", "total_count": 10,
//!    "counters": {"success": 4}, "progress_percent": 40.0}
//! ]
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::trace;

use taskboard_core::TaskSnapshots;

/// Failure to obtain a snapshot
#[derive(Debug, Error)]
pub enum SourceError {
    /// The state file exists but could not be read
    #[error("Failed to read state file {path}: {source}")]
    Read {
        /// State file path
        path: PathBuf,
        /// Underlying IO error
        #[source]
        source: io::Error,
    },

    /// The state file is not a valid snapshot array
    #[error("Failed to parse state file {path}: {source}")]
    Parse {
        /// State file path
        path: PathBuf,
        /// Underlying JSON error
        #[source]
        source: serde_json::Error,
    },
}

/// Anything that can produce the current set of task snapshots
pub trait SnapshotSource {
    /// Take a consistent snapshot of every task
    ///
    /// # Errors
    ///
    /// Returns a [`SourceError`] if the snapshot cannot be obtained.
    fn snapshot(&mut self) -> Result<TaskSnapshots, SourceError>;
}

/// Reads snapshots from a JSON state file
#[derive(Clone, Debug)]
pub struct StateFileSource {
    path: PathBuf,
}

impl StateFileSource {
    /// Create a source for the given state file
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// State file path
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SnapshotSource for StateFileSource {
    fn snapshot(&mut self) -> Result<TaskSnapshots, SourceError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            // The scheduler may not have written anything yet
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                trace!(path = %self.path.display(), "State file not present yet");
                return Ok(TaskSnapshots::new());
            }
            Err(source) => {
                return Err(SourceError::Read {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        if content.trim().is_empty() {
            return Ok(TaskSnapshots::new());
        }

        let snapshots: TaskSnapshots =
            serde_json::from_str(&content).map_err(|source| SourceError::Parse {
                path: self.path.clone(),
                source,
            })?;

        trace!(
            path = %self.path.display(),
            tasks = snapshots.len(),
            "Read state file"
        );
        Ok(snapshots)
    }
}
