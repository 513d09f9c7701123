//! Test Utilities
//!
//! Snapshot sources for driving the refresh loop in unit tests without a
//! scheduler. Only compiled for tests.

use std::io;
use std::path::PathBuf;

use taskboard_core::TaskSnapshots;

use crate::source::{SnapshotSource, SourceError};

/// Source replaying a fixed sequence of results, then repeating the last
#[derive(Debug, Default)]
pub struct ScriptedSource {
    steps: Vec<Result<TaskSnapshots, String>>,
    next: usize,
}

impl ScriptedSource {
    /// Create an empty script (every call yields an empty snapshot set)
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a successful snapshot
    #[must_use]
    pub fn then(mut self, snapshots: impl Into<TaskSnapshots>) -> Self {
        self.steps.push(Ok(snapshots.into()));
        self
    }

    /// Append a failing read
    #[must_use]
    pub fn then_fail(mut self, reason: impl Into<String>) -> Self {
        self.steps.push(Err(reason.into()));
        self
    }

    /// Number of snapshots taken so far
    pub fn calls(&self) -> usize {
        self.next
    }
}

impl SnapshotSource for ScriptedSource {
    fn snapshot(&mut self) -> Result<TaskSnapshots, SourceError> {
        let step = self
            .steps
            .get(self.next)
            .or_else(|| self.steps.last())
            .cloned()
            .unwrap_or_else(|| Ok(TaskSnapshots::new()));
        self.next += 1;

        step.map_err(|reason| SourceError::Read {
            path: PathBuf::from("<scripted>"),
            source: io::Error::new(io::ErrorKind::Other, reason),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use taskboard_core::TaskSnapshot;

    #[test]
    fn test_scripted_source_repeats_last_step() {
        let mut source = ScriptedSource::new()
            .then_fail("boom")
            .then(vec![TaskSnapshot::finished("a")]);

        assert!(source.snapshot().is_err());
        assert_eq!(source.snapshot().unwrap().len(), 1);
        assert_eq!(source.snapshot().unwrap().len(), 1);
        assert_eq!(source.calls(), 3);
    }

    #[test]
    fn test_empty_script_yields_empty_snapshots() {
        let mut source = ScriptedSource::new();
        assert!(source.snapshot().unwrap().is_empty());
    }
}
