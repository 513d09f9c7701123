//! Theme and Colors
//!
//! Terminal colors for the dashboard's tone tags. The core only hands out
//! [`Tone`] values; this is the one place they become escape sequences.

use crossterm::style::{Color, Stylize};

use taskboard_core::{Tone, TonePainter};

// ============================================================================
// Tone Colors
// ============================================================================

/// Finished with item errors
pub const ERROR_RED: Color = Color::Red;

/// Finished with internal code errors
pub const WARNING_YELLOW: Color = Color::Yellow;

/// Finished cleanly
pub const SUCCESS_GREEN: Color = Color::Green;

/// Terminal color for a tone
#[must_use]
pub fn tone_color(tone: Tone) -> Color {
    match tone {
        Tone::Red => ERROR_RED,
        Tone::Yellow => WARNING_YELLOW,
        Tone::Green => SUCCESS_GREEN,
    }
}

/// Painter emitting ANSI foreground colors
#[derive(Clone, Copy, Debug, Default)]
pub struct AnsiPainter;

impl TonePainter for AnsiPainter {
    fn paint(&self, tone: Tone, text: &str) -> String {
        text.with(tone_color(tone)).to_string()
    }
}
