//! Task Snapshot Types
//!
//! Read-only, point-in-time views of the tasks an external scheduler is
//! running. A fresh [`TaskSnapshots`] set is handed to the dashboard on every
//! refresh tick and discarded once the frame is drawn.
//!
//! # Design Philosophy
//!
//! The scheduler owns task state; the dashboard just renders what it is
//! given. Nothing in this module mutates scheduler state, and nothing here
//! validates the numbers: negative counts or out-of-range percentages flow
//! through to the formatters, which degrade gracefully.

use std::collections::HashMap;

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// Counter key for successfully processed items
pub const SUCCESS: &str = "success";
/// Counter key for skipped items
pub const SKIP: &str = "skip";
/// Counter key for items that failed
pub const ERROR: &str = "error";
/// Counter key for the free-form status message of a running task
pub const MESSAGE: &str = "message";

/// Lifecycle state of a task
///
/// Closed set: classification and styling match on it exhaustively, so a new
/// state is a compile error everywhere it matters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LifecycleState {
    /// Not started yet, possibly waiting on other tasks
    #[serde(alias = "stacked", alias = "pending")]
    Queued,
    /// In progress
    Running,
    /// Terminal
    #[serde(alias = "done")]
    Finished,
}

impl LifecycleState {
    /// Human-readable label
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Queued => "Queued",
            Self::Running => "Running",
            Self::Finished => "Finished",
        }
    }
}

impl std::fmt::Display for LifecycleState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// A single counter value reported by a task
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CounterValue {
    /// Whole-number counter
    Integer(i64),
    /// Fractional counter
    Float(f64),
    /// Free-form text (e.g. the running status message)
    Text(String),
}

impl CounterValue {
    /// Read the value as a number, rounding fractions to the nearest whole
    /// number; text that does not parse reads as 0
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn as_number(&self) -> i64 {
        match self {
            Self::Integer(n) => *n,
            Self::Float(f) if f.is_finite() => f.round() as i64,
            Self::Float(_) => 0,
            Self::Text(s) => s.trim().parse().unwrap_or(0),
        }
    }

    /// Read the value as display text
    #[must_use]
    pub fn as_text(&self) -> String {
        match self {
            Self::Integer(n) => n.to_string(),
            Self::Float(f) => f.to_string(),
            Self::Text(s) => s.clone(),
        }
    }
}

impl From<i64> for CounterValue {
    fn from(n: i64) -> Self {
        Self::Integer(n)
    }
}

impl From<i32> for CounterValue {
    fn from(n: i32) -> Self {
        Self::Integer(n.into())
    }
}

impl From<f64> for CounterValue {
    fn from(f: f64) -> Self {
        Self::Float(f)
    }
}

impl From<&str> for CounterValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for CounterValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

/// Outcome counters keyed by name (`success`, `skip`, `error`, `message`, ...)
///
/// Missing keys read as `0` or the empty string.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Counters(HashMap<String, CounterValue>);

impl Counters {
    /// Create an empty counter set
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a counter, replacing any previous value
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<CounterValue>) {
        self.0.insert(key.into(), value.into());
    }

    /// Raw value for a key
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&CounterValue> {
        self.0.get(key)
    }

    /// Numeric value for a key, 0 when missing
    #[must_use]
    pub fn number(&self, key: &str) -> i64 {
        self.0.get(key).map_or(0, CounterValue::as_number)
    }

    /// Text value for a key, empty when missing
    #[must_use]
    pub fn text(&self, key: &str) -> String {
        self.0.get(key).map(CounterValue::as_text).unwrap_or_default()
    }
}

/// Point-in-time view of one task
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TaskSnapshot {
    /// Unique title among the tasks of one refresh
    pub title: String,
    /// Current lifecycle state
    pub state: LifecycleState,
    /// Titles this task is blocked on (only meaningful while queued)
    #[serde(default)]
    pub waiting_on: Vec<String>,
    /// Total units of work (0 = unknown)
    #[serde(default)]
    pub total_count: i64,
    /// Outcome counters
    #[serde(default)]
    pub counters: Counters,
    /// Internal failures, distinct from per-item `error` outcomes
    #[serde(default)]
    pub code_error_count: i64,
    /// Completion percentage, nominally 0-100
    #[serde(default)]
    pub progress_percent: f64,
    /// Elapsed wall time in seconds
    #[serde(default)]
    pub duration_seconds: f64,
    /// Projected total duration in seconds
    #[serde(default)]
    pub estimated_total_seconds: f64,
    /// When the task finished (only set once finished)
    #[serde(default)]
    pub finished_at: Option<DateTime<Local>>,
}

impl TaskSnapshot {
    /// Create an empty snapshot in the given state
    pub fn new(title: impl Into<String>, state: LifecycleState) -> Self {
        Self {
            title: title.into(),
            state,
            waiting_on: Vec::new(),
            total_count: 0,
            counters: Counters::new(),
            code_error_count: 0,
            progress_percent: 0.0,
            duration_seconds: 0.0,
            estimated_total_seconds: 0.0,
            finished_at: None,
        }
    }

    /// Create a queued snapshot
    pub fn queued(title: impl Into<String>) -> Self {
        Self::new(title, LifecycleState::Queued)
    }

    /// Create a running snapshot
    pub fn running(title: impl Into<String>) -> Self {
        Self::new(title, LifecycleState::Running)
    }

    /// Create a finished snapshot
    pub fn finished(title: impl Into<String>) -> Self {
        Self::new(title, LifecycleState::Finished)
    }

    /// Set the titles this task waits on
    #[must_use]
    pub fn with_waiting_on<I, S>(mut self, titles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.waiting_on = titles.into_iter().map(Into::into).collect();
        self
    }

    /// Set the total unit count
    #[must_use]
    pub fn with_total_count(mut self, count: i64) -> Self {
        self.total_count = count;
        self
    }

    /// Set one outcome counter
    #[must_use]
    pub fn with_counter(mut self, key: &str, value: impl Into<CounterValue>) -> Self {
        self.counters.set(key, value);
        self
    }

    /// Set the code error count
    #[must_use]
    pub fn with_code_errors(mut self, count: i64) -> Self {
        self.code_error_count = count;
        self
    }

    /// Set the completion percentage
    #[must_use]
    pub fn with_progress(mut self, percent: f64) -> Self {
        self.progress_percent = percent;
        self
    }

    /// Set the elapsed duration
    #[must_use]
    pub fn with_duration(mut self, seconds: f64) -> Self {
        self.duration_seconds = seconds;
        self
    }

    /// Set the projected total duration
    #[must_use]
    pub fn with_estimated(mut self, seconds: f64) -> Self {
        self.estimated_total_seconds = seconds;
        self
    }

    /// Set the finish timestamp
    #[must_use]
    pub fn with_finished_at(mut self, at: DateTime<Local>) -> Self {
        self.finished_at = Some(at);
        self
    }

    /// Successfully processed items
    #[must_use]
    pub fn success(&self) -> i64 {
        self.counters.number(SUCCESS)
    }

    /// Skipped items
    #[must_use]
    pub fn skip(&self) -> i64 {
        self.counters.number(SKIP)
    }

    /// Failed items
    #[must_use]
    pub fn error(&self) -> i64 {
        self.counters.number(ERROR)
    }

    /// Running status message
    #[must_use]
    pub fn message(&self) -> String {
        self.counters.text(MESSAGE)
    }

    /// Whether the task has reached its terminal state
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.state == LifecycleState::Finished
    }
}

/// Ordered set of snapshots for one refresh, keyed by title
///
/// Iteration follows insertion order. Re-inserting a title replaces the
/// snapshot in place without moving it.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<TaskSnapshot>", into = "Vec<TaskSnapshot>")]
pub struct TaskSnapshots {
    tasks: Vec<TaskSnapshot>,
    index: HashMap<String, usize>,
}

impl TaskSnapshots {
    /// Create an empty set
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a snapshot, replacing an existing one with the same title
    pub fn insert(&mut self, snapshot: TaskSnapshot) {
        if let Some(&pos) = self.index.get(&snapshot.title) {
            self.tasks[pos] = snapshot;
        } else {
            self.index.insert(snapshot.title.clone(), self.tasks.len());
            self.tasks.push(snapshot);
        }
    }

    /// Look up a snapshot by title
    #[must_use]
    pub fn get(&self, title: &str) -> Option<&TaskSnapshot> {
        self.index.get(title).map(|&pos| &self.tasks[pos])
    }

    /// Snapshots in insertion order
    pub fn iter(&self) -> std::slice::Iter<'_, TaskSnapshot> {
        self.tasks.iter()
    }

    /// Number of tasks
    #[must_use]
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Whether the set is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Whether there is at least one task and every task has finished
    #[must_use]
    pub fn all_finished(&self) -> bool {
        !self.tasks.is_empty() && self.tasks.iter().all(TaskSnapshot::is_finished)
    }
}

impl From<Vec<TaskSnapshot>> for TaskSnapshots {
    fn from(tasks: Vec<TaskSnapshot>) -> Self {
        tasks.into_iter().collect()
    }
}

impl From<TaskSnapshots> for Vec<TaskSnapshot> {
    fn from(snapshots: TaskSnapshots) -> Self {
        snapshots.tasks
    }
}

impl FromIterator<TaskSnapshot> for TaskSnapshots {
    fn from_iter<I: IntoIterator<Item = TaskSnapshot>>(iter: I) -> Self {
        let mut snapshots = Self::new();
        for snapshot in iter {
            snapshots.insert(snapshot);
        }
        snapshots
    }
}

impl<'a> IntoIterator for &'a TaskSnapshots {
    type Item = &'a TaskSnapshot;
    type IntoIter = std::slice::Iter<'a, TaskSnapshot>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
