//! Text Table
//!
//! Minimal box-drawing table: a header row, body rows of cells (a cell may
//! span several columns), and separators between row groups.
//!
//! ```text
//! ┌───────┬───────┐
//! │ Title │ Total │
//! ├───────┼───────┤
//! │ a     │ 1     │
//! └───────┴───────┘
//! ```
//!
//! Widths are measured in terminal columns before any tone is painted, so
//! escape sequences never skew the alignment.

use unicode_width::UnicodeWidthStr;

use crate::presenter::Tone;
use crate::sink::TonePainter;

/// One table cell
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Cell {
    text: String,
    tone: Option<Tone>,
    colspan: usize,
}

impl Cell {
    /// Plain single-column cell
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            tone: None,
            colspan: 1,
        }
    }

    /// Empty single-column cell
    #[must_use]
    pub fn blank() -> Self {
        Self::new("")
    }

    /// Set the cell's tone
    #[must_use]
    pub fn with_tone(mut self, tone: Option<Tone>) -> Self {
        self.tone = tone;
        self
    }

    /// Span this cell across `colspan` columns (at least one)
    #[must_use]
    pub fn with_colspan(mut self, colspan: usize) -> Self {
        self.colspan = colspan.max(1);
        self
    }

    /// Cell text
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Cell tone
    #[must_use]
    pub fn tone(&self) -> Option<Tone> {
        self.tone
    }

    /// Number of columns the cell covers
    #[must_use]
    pub fn colspan(&self) -> usize {
        self.colspan
    }

    fn width(&self) -> usize {
        self.text.width()
    }
}

impl From<&str> for Cell {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl From<String> for Cell {
    fn from(text: String) -> Self {
        Self::new(text)
    }
}

/// A body row
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Row {
    /// Regular row of cells
    Cells(Vec<Cell>),
    /// Horizontal rule between row groups
    Separator,
}

/// A table ready to be drawn
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Table {
    headers: Vec<Cell>,
    rows: Vec<Row>,
}

/// Border characters as (left, middle, right) for one horizontal rule
type Rule = (char, char, char);

const TOP: Rule = ('┌', '┬', '┐');
const MIDDLE: Rule = ('├', '┼', '┤');
const BOTTOM: Rule = ('└', '┴', '┘');
const HORIZONTAL: char = '─';
const VERTICAL: char = '│';

impl Table {
    /// Create a table with the given header cells
    pub fn new<I, C>(headers: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<Cell>,
    {
        Self {
            headers: headers.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Append a row of cells
    pub fn add_row(&mut self, cells: Vec<Cell>) {
        self.rows.push(Row::Cells(cells));
    }

    /// Append a separator
    pub fn add_separator(&mut self) {
        self.rows.push(Row::Separator);
    }

    /// Header cells
    #[must_use]
    pub fn headers(&self) -> &[Cell] {
        &self.headers
    }

    /// Body rows, separators included
    #[must_use]
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Body rows that hold cells
    pub fn cell_rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.rows.iter().filter_map(|row| match row {
            Row::Cells(cells) => Some(cells.as_slice()),
            Row::Separator => None,
        })
    }

    /// Number of columns
    #[must_use]
    pub fn column_count(&self) -> usize {
        let span = |cells: &[Cell]| cells.iter().map(Cell::colspan).sum::<usize>();
        self.cell_rows()
            .map(span)
            .chain(std::iter::once(span(&self.headers)))
            .max()
            .unwrap_or(0)
    }

    /// Draw the table into lines, styling toned cells with `painter`
    #[must_use]
    pub fn render(&self, painter: &dyn TonePainter) -> Vec<String> {
        let columns = self.column_count();
        if columns == 0 {
            return Vec::new();
        }

        let header = layout_row(&self.headers, columns);
        let body: Vec<Option<Vec<Slot<'_>>>> = self
            .rows
            .iter()
            .map(|row| match row {
                Row::Cells(cells) => Some(layout_row(cells, columns)),
                Row::Separator => None,
            })
            .collect();

        let widths = column_widths(
            columns,
            std::iter::once(&header).chain(body.iter().flatten()),
        );

        let mut lines = Vec::with_capacity(body.len() + 4);
        lines.push(rule(&widths, TOP));
        lines.push(draw_row(&header, &widths, painter));

        let mut body = body.as_slice();
        while let [rest @ .., None] = body {
            body = rest;
        }
        if !body.is_empty() {
            lines.push(rule(&widths, MIDDLE));
        }
        for row in body {
            match row {
                Some(slots) => lines.push(draw_row(slots, &widths, painter)),
                None => lines.push(rule(&widths, MIDDLE)),
            }
        }

        lines.push(rule(&widths, BOTTOM));
        lines
    }
}

/// A cell placed at a column position
struct Slot<'a> {
    start: usize,
    span: usize,
    cell: Option<&'a Cell>,
}

impl Slot<'_> {
    fn width(&self) -> usize {
        self.cell.map_or(0, Cell::width)
    }
}

/// Place cells on columns, clamping spans and padding short rows
fn layout_row(cells: &[Cell], columns: usize) -> Vec<Slot<'_>> {
    let mut slots = Vec::with_capacity(columns);
    let mut column = 0;

    for cell in cells {
        if column >= columns {
            break;
        }
        let span = cell.colspan().min(columns - column);
        slots.push(Slot {
            start: column,
            span,
            cell: Some(cell),
        });
        column += span;
    }
    while column < columns {
        slots.push(Slot {
            start: column,
            span: 1,
            cell: None,
        });
        column += 1;
    }
    slots
}

/// Display width of `span` columns starting at `start`, inner padding included
fn slot_width(widths: &[usize], start: usize, span: usize) -> usize {
    widths[start..start + span].iter().sum::<usize>() + 3 * (span - 1)
}

fn column_widths<'a, 'b: 'a>(
    columns: usize,
    rows: impl Iterator<Item = &'a Vec<Slot<'b>>> + Clone,
) -> Vec<usize> {
    let mut widths = vec![0; columns];

    for slot in rows.clone().flatten().filter(|s| s.span == 1) {
        widths[slot.start] = widths[slot.start].max(slot.width());
    }

    // Spanning cells only widen their last column when they do not fit
    for slot in rows.flatten().filter(|s| s.span > 1) {
        let available = slot_width(&widths, slot.start, slot.span);
        if slot.width() > available {
            widths[slot.start + slot.span - 1] += slot.width() - available;
        }
    }

    widths
}

fn rule(widths: &[usize], (left, middle, right): Rule) -> String {
    let mut line = String::new();
    line.push(left);
    for (i, width) in widths.iter().enumerate() {
        if i > 0 {
            line.push(middle);
        }
        line.extend(std::iter::repeat(HORIZONTAL).take(width + 2));
    }
    line.push(right);
    line
}

fn draw_row(slots: &[Slot<'_>], widths: &[usize], painter: &dyn TonePainter) -> String {
    let mut line = String::new();
    line.push(VERTICAL);

    for slot in slots {
        let room = slot_width(widths, slot.start, slot.span);
        let padding = room.saturating_sub(slot.width());

        line.push(' ');
        if let Some(cell) = slot.cell {
            match cell.tone() {
                Some(tone) if !cell.text().is_empty() => {
                    line.push_str(&painter.paint(tone, cell.text()));
                }
                _ => line.push_str(cell.text()),
            }
        }
        line.extend(std::iter::repeat(' ').take(padding + 1));
        line.push(VERTICAL);
    }

    line
}
