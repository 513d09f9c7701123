//! Dashboard Totals
//!
//! Aggregate counters across the running and finished tasks of one refresh.
//! Recomputed from scratch every frame; nothing is carried between frames.

use crate::snapshot::TaskSnapshot;

/// Sums across all started tasks
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct DashboardTotals {
    /// Sum of `total_count`
    pub count: i64,
    /// Sum of `success` counters
    pub success: i64,
    /// Sum of `skip` counters
    pub skip: i64,
    /// Sum of `error` counters
    pub error: i64,
    /// Sum of code errors
    pub code_errors: i64,
    /// Sum of task durations in seconds
    pub duration_seconds: f64,
}

impl DashboardTotals {
    /// Create zeroed totals
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one task into the totals
    ///
    /// Only called for running and finished tasks; queued tasks have not
    /// started and contribute nothing.
    #[must_use]
    pub fn accumulate(self, task: &TaskSnapshot) -> Self {
        Self {
            count: self.count.saturating_add(task.total_count),
            success: self.success.saturating_add(task.success()),
            skip: self.skip.saturating_add(task.skip()),
            error: self.error.saturating_add(task.error()),
            code_errors: self.code_errors.saturating_add(task.code_error_count),
            duration_seconds: self.duration_seconds + task.duration_seconds,
        }
    }

    /// Time saved by running tasks in parallel: summed task time minus the
    /// whole seconds of wall time
    #[must_use]
    pub fn saved_seconds(&self, elapsed_seconds: f64) -> f64 {
        self.duration_seconds - elapsed_seconds.floor()
    }
}
