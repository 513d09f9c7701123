//! Dashboard Renderer
//!
//! Turns one refresh worth of task snapshots into a table and redraws it on
//! a [`DisplaySink`].
//!
//! Row groups always appear in the same order:
//!
//! 1. queued tasks, with what they are waiting for
//! 2. finished tasks, with their finish time
//! 3. running tasks, with their status message
//! 4. the total row
//!
//! The renderer keeps no state between frames. Every call works from the
//! snapshot it is handed and nothing else.

use tracing::trace;

use crate::classify::classify;
use crate::config::BoardConfig;
use crate::format::format_count;
use crate::presenter::{present, GlyphSet};
use crate::progress;
use crate::sink::DisplaySink;
use crate::snapshot::{TaskSnapshot, TaskSnapshots};
use crate::table::{Cell, Table};
use crate::time::{format_clock, format_duration};
use crate::totals::DashboardTotals;

/// Column headers, left to right
pub const HEADERS: [&str; 10] = [
    "Title",
    "Total",
    "Success",
    "Skipped",
    "Error",
    "Warnings",
    "Progress",
    "Duration",
    "Estimated",
    "Message",
];

/// Banner printed before the first frame
pub const DEFAULT_START_BANNER: &str = "Starting import ...";

/// Label of the aggregate row
pub const TOTAL_LABEL: &str = "Total";

/// Renders task snapshots as a status table
#[derive(Clone, Debug)]
pub struct Dashboard {
    bar_width: usize,
    glyphs: GlyphSet,
    start_banner: String,
}

impl Default for Dashboard {
    fn default() -> Self {
        Self {
            bar_width: progress::DEFAULT_WIDTH,
            glyphs: GlyphSet::default(),
            start_banner: DEFAULT_START_BANNER.to_string(),
        }
    }
}

impl Dashboard {
    /// Create a dashboard with default settings
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a dashboard from loaded configuration
    #[must_use]
    pub fn from_config(config: &BoardConfig) -> Self {
        Self {
            bar_width: config.bar_width,
            glyphs: config.glyphs,
            start_banner: config.start_banner.clone(),
        }
    }

    /// Set the number of progress bar cells
    #[must_use]
    pub fn with_bar_width(mut self, width: usize) -> Self {
        self.bar_width = width;
        self
    }

    /// Set the glyph set
    #[must_use]
    pub fn with_glyphs(mut self, glyphs: GlyphSet) -> Self {
        self.glyphs = glyphs;
        self
    }

    /// Set the start banner
    #[must_use]
    pub fn with_start_banner(mut self, banner: impl Into<String>) -> Self {
        self.start_banner = banner.into();
        self
    }

    /// Write the start banner
    ///
    /// # Errors
    ///
    /// Returns the sink error if writing fails.
    pub fn start<S: DisplaySink>(&self, sink: &mut S) -> Result<(), S::Error> {
        sink.write_line(&self.start_banner)
    }

    /// Write the trailing blank line after the last frame
    ///
    /// # Errors
    ///
    /// Returns the sink error if writing fails.
    pub fn finish<S: DisplaySink>(&self, sink: &mut S) -> Result<(), S::Error> {
        sink.write_line("")
    }

    /// Clear the sink and redraw the dashboard for this snapshot
    ///
    /// # Errors
    ///
    /// Returns the first sink error (clear or write) unchanged.
    pub fn render<S: DisplaySink>(
        &self,
        sink: &mut S,
        snapshots: &TaskSnapshots,
        elapsed_seconds: f64,
    ) -> Result<(), S::Error> {
        sink.clear()?;

        let table = self.build_table(snapshots, elapsed_seconds);
        let lines = table.render(sink.painter());

        trace!(
            tasks = snapshots.len(),
            lines = lines.len(),
            elapsed_seconds,
            "Rendering dashboard frame"
        );

        sink.write_frame(&lines)
    }

    /// Build the dashboard table without drawing it
    #[must_use]
    pub fn build_table(&self, snapshots: &TaskSnapshots, elapsed_seconds: f64) -> Table {
        let groups = classify(snapshots);
        let mut table = Table::new(HEADERS);

        for task in &groups.queued {
            table.add_row(self.queued_row(task));
        }
        if !groups.queued.is_empty() {
            table.add_separator();
        }

        let mut totals = DashboardTotals::new();

        for task in &groups.finished {
            let message = task
                .finished_at
                .as_ref()
                .map(|at| format!("Finished at: {}", format_clock(at)))
                .unwrap_or_default();
            table.add_row(self.stats_row(task, message));
            totals = totals.accumulate(task);
        }
        if !groups.finished.is_empty() {
            table.add_separator();
        }

        for task in &groups.running {
            table.add_row(self.stats_row(task, task.message()));
            totals = totals.accumulate(task);
        }
        if !groups.running.is_empty() {
            table.add_separator();
        }

        table.add_row(total_row(&totals, elapsed_seconds));
        table
    }

    fn title_cell(&self, task: &TaskSnapshot) -> Cell {
        let styled = present(task);
        Cell::new(styled.text(self.glyphs)).with_tone(styled.tone)
    }

    fn queued_row(&self, task: &TaskSnapshot) -> Vec<Cell> {
        let waiting = if task.waiting_on.is_empty() {
            String::new()
        } else {
            format!("Waiting for: {}", task.waiting_on.join(", "))
        };

        vec![
            self.title_cell(task),
            Cell::new(waiting).with_colspan(HEADERS.len() - 1),
        ]
    }

    fn stats_row(&self, task: &TaskSnapshot, message: String) -> Vec<Cell> {
        vec![
            self.title_cell(task),
            Cell::new(format_count(task.total_count)),
            Cell::new(format_count(task.success())),
            Cell::new(format_count(task.skip())),
            Cell::new(format_count(task.error())),
            Cell::new(format_count(task.code_error_count)),
            Cell::new(progress::render(
                task.progress_percent,
                self.bar_width,
                self.glyphs,
            )),
            Cell::new(format_duration(task.duration_seconds)),
            Cell::new(format_duration(task.estimated_total_seconds)),
            Cell::new(message),
        ]
    }
}

fn total_row(totals: &DashboardTotals, elapsed_seconds: f64) -> Vec<Cell> {
    vec![
        Cell::new(TOTAL_LABEL),
        Cell::new(format_count(totals.count)),
        Cell::new(format_count(totals.success)),
        Cell::new(format_count(totals.skip)),
        Cell::new(format_count(totals.error)),
        Cell::new(format_count(totals.code_errors)),
        Cell::new(format!(
            "Saved time: {}",
            format_duration(totals.saved_seconds(elapsed_seconds))
        )),
        Cell::new(format_duration(elapsed_seconds)),
        Cell::blank(),
        Cell::blank(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::{MESSAGE, SUCCESS};
    use crate::table::Row;

    fn cell_texts(cells: &[Cell]) -> Vec<&str> {
        cells.iter().map(Cell::text).collect()
    }

    #[test]
    fn test_group_order_and_separators() {
        let snapshots: TaskSnapshots = vec![
            TaskSnapshot::running("r"),
            TaskSnapshot::finished("f"),
            TaskSnapshot::queued("q"),
        ]
        .into();

        let table = Dashboard::new()
            .with_glyphs(GlyphSet::Ascii)
            .build_table(&snapshots, 0.0);

        let layout: Vec<String> = table
            .rows()
            .iter()
            .map(|row| match row {
                Row::Cells(cells) => cells[0].text().to_string(),
                Row::Separator => "--".to_string(),
            })
            .collect();

        assert_eq!(
            layout,
            vec!["... q", "--", "[+] f", "--", "... r", "--", "Total"]
        );
    }

    #[test]
    fn test_empty_groups_have_no_separator() {
        let table = Dashboard::new().build_table(&TaskSnapshots::new(), 3.0);
        assert_eq!(table.rows().len(), 1);

        let total = table.cell_rows().next().unwrap();
        assert_eq!(
            cell_texts(total),
            vec!["Total", "0", "0", "0", "0", "0", "Saved time: -3s", "3s", "", ""]
        );
    }

    #[test]
    fn test_queued_row_spans_remaining_columns() {
        let snapshots: TaskSnapshots = vec![
            TaskSnapshot::queued("users").with_waiting_on(["groups", "roles"]),
            TaskSnapshot::queued("free"),
        ]
        .into();

        let table = Dashboard::new().build_table(&snapshots, 0.0);
        let mut rows = table.cell_rows();

        let users = rows.next().unwrap();
        assert_eq!(users.len(), 2);
        assert_eq!(users[1].text(), "Waiting for: groups, roles");
        assert_eq!(users[1].colspan(), 9);

        let free = rows.next().unwrap();
        assert_eq!(free[1].text(), "");
    }

    #[test]
    fn test_running_row_shows_message() {
        let snapshots: TaskSnapshots = vec![TaskSnapshot::running("sync")
            .with_total_count(1200)
            .with_counter(SUCCESS, 1100)
            .with_counter(MESSAGE, "page 12")
            .with_progress(91.6)
            .with_duration(62.0)
            .with_estimated(68.0)]
        .into();

        let table = Dashboard::new()
            .with_glyphs(GlyphSet::Ascii)
            .with_bar_width(10)
            .build_table(&snapshots, 62.0);
        let row = table.cell_rows().next().unwrap();

        assert_eq!(
            cell_texts(row),
            vec![
                "... sync",
                "1,200",
                "1,100",
                "0",
                "0",
                "0",
                "=========> 92%",
                "1m 02s",
                "1m 08s",
                "page 12"
            ]
        );
    }

    #[test]
    fn test_queued_tasks_do_not_count_towards_totals() {
        let snapshots: TaskSnapshots = vec![
            TaskSnapshot::queued("q").with_total_count(100),
            TaskSnapshot::running("r").with_total_count(7),
        ]
        .into();

        let table = Dashboard::new().build_table(&snapshots, 0.0);
        let total = table.cell_rows().last().unwrap();
        assert_eq!(total[1].text(), "7");
    }
}
