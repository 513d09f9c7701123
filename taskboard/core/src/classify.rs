//! Task Classification
//!
//! Splits one refresh worth of snapshots into the queued, running and
//! finished groups, keeping the source order inside each group.

use crate::snapshot::{LifecycleState, TaskSnapshot, TaskSnapshots};

/// Snapshots grouped by lifecycle state
#[derive(Clone, Debug, Default)]
pub struct Partition<'a> {
    /// Not started yet
    pub queued: Vec<&'a TaskSnapshot>,
    /// In progress
    pub running: Vec<&'a TaskSnapshot>,
    /// Done
    pub finished: Vec<&'a TaskSnapshot>,
}

impl Partition<'_> {
    /// Total number of classified tasks
    #[must_use]
    pub fn len(&self) -> usize {
        self.queued.len() + self.running.len() + self.finished.len()
    }

    /// Whether no task was classified
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Partition snapshots by lifecycle state
#[must_use]
pub fn classify(snapshots: &TaskSnapshots) -> Partition<'_> {
    let mut partition = Partition::default();
    for task in snapshots {
        match task.state {
            LifecycleState::Queued => partition.queued.push(task),
            LifecycleState::Running => partition.running.push(task),
            LifecycleState::Finished => partition.finished.push(task),
        }
    }
    partition
}
