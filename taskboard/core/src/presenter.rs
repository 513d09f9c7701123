//! Status Presentation
//!
//! Picks the glyph and color tone for a task's title from its outcome.
//!
//! Tones are plain tags. Nothing here knows about terminals: a
//! [`TonePainter`](crate::sink::TonePainter) turns a tone into whatever the
//! display needs when the table is drawn.

use serde::{Deserialize, Serialize};

use crate::snapshot::{LifecycleState, TaskSnapshot};

/// Color tag for a styled cell
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    /// Task finished with item errors
    Red,
    /// Task finished with internal code errors
    Yellow,
    /// Task finished with every item accounted for
    Green,
}

/// Title glyph
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Glyph {
    /// Not finished yet
    Pending,
    /// Finished with item errors
    Blocked,
    /// Finished with code errors
    Warning,
    /// Finished cleanly
    Success,
}

/// Which characters to draw glyphs and progress bars with
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GlyphSet {
    /// Emoji/symbol glyphs and block-character bars
    #[default]
    Unicode,
    /// Plain ASCII for terminals without good font coverage
    Ascii,
}

impl GlyphSet {
    /// Parse from a config or environment string
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "unicode" | "utf8" | "utf-8" => Some(Self::Unicode),
            "ascii" | "plain" => Some(Self::Ascii),
            _ => None,
        }
    }

    /// Characters for a title glyph
    #[must_use]
    pub fn glyph(&self, glyph: Glyph) -> &'static str {
        match (self, glyph) {
            (Self::Unicode, Glyph::Pending) => "\u{1f552}", // clock face three o'clock
            (Self::Unicode, Glyph::Blocked) => "\u{1f5f4}", // ballot script x
            (Self::Unicode, Glyph::Warning) => "\u{1f5f2}", // lightning mood
            (Self::Unicode, Glyph::Success) => "\u{1f5f8}", // light check mark
            (Self::Ascii, Glyph::Pending) => "...",
            (Self::Ascii, Glyph::Blocked) => "[x]",
            (Self::Ascii, Glyph::Warning) => "[!]",
            (Self::Ascii, Glyph::Success) => "[+]",
        }
    }

    /// Progress bar marks as (filled, cursor, empty)
    #[must_use]
    pub fn bar_marks(&self) -> (char, char, char) {
        match self {
            Self::Unicode => ('\u{2588}', '\u{25b6}', '\u{2591}'),
            Self::Ascii => ('=', '>', '-'),
        }
    }
}

impl std::fmt::Display for GlyphSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unicode => write!(f, "unicode"),
            Self::Ascii => write!(f, "ascii"),
        }
    }
}

/// A title with its selected glyph and tone
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StyledTitle {
    /// Glyph prefix, if any
    pub glyph: Option<Glyph>,
    /// Color tone, if any
    pub tone: Option<Tone>,
    /// The task title
    pub title: String,
}

impl StyledTitle {
    /// Title text with its glyph prefix
    #[must_use]
    pub fn text(&self, glyphs: GlyphSet) -> String {
        match self.glyph {
            Some(glyph) => format!("{} {}", glyphs.glyph(glyph), self.title),
            None => self.title.clone(),
        }
    }
}

/// Select glyph and tone for a task title
///
/// First match wins:
/// 1. not finished: pending glyph, no tone
/// 2. item errors: red
/// 3. code errors: yellow
/// 4. every item succeeded or was skipped: green
/// 5. otherwise the bare title
#[must_use]
pub fn present(task: &TaskSnapshot) -> StyledTitle {
    let (glyph, tone) = match task.state {
        LifecycleState::Queued | LifecycleState::Running => (Some(Glyph::Pending), None),
        LifecycleState::Finished => finished_style(task),
    };

    StyledTitle {
        glyph,
        tone,
        title: task.title.clone(),
    }
}

fn finished_style(task: &TaskSnapshot) -> (Option<Glyph>, Option<Tone>) {
    if task.error() != 0 {
        (Some(Glyph::Blocked), Some(Tone::Red))
    } else if task.code_error_count != 0 {
        (Some(Glyph::Warning), Some(Tone::Yellow))
    } else if task.success().checked_add(task.skip()) == Some(task.total_count) {
        (Some(Glyph::Success), Some(Tone::Green))
    } else {
        (None, None)
    }
}
