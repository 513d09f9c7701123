//! Display Sink
//!
//! The dashboard draws into a [`DisplaySink`]: something that can be cleared
//! and then given a whole frame of lines at once. The terminal implementation
//! lives in the TUI crate; [`MemorySink`] records output for headless runs
//! and tests.

use std::convert::Infallible;

use crate::presenter::Tone;

/// Applies a tone to cell text when a table is drawn
pub trait TonePainter {
    /// Return `text` styled with `tone`
    fn paint(&self, tone: Tone, text: &str) -> String;
}

/// Painter that leaves text unstyled
#[derive(Clone, Copy, Debug, Default)]
pub struct PlainPainter;

impl TonePainter for PlainPainter {
    fn paint(&self, _tone: Tone, text: &str) -> String {
        text.to_string()
    }
}

/// Painter that wraps text in `<red>..</red>` style tags
///
/// Handy for asserting on tones without decoding escape sequences.
#[derive(Clone, Copy, Debug, Default)]
pub struct TagPainter;

impl TonePainter for TagPainter {
    fn paint(&self, tone: Tone, text: &str) -> String {
        let tag = match tone {
            Tone::Red => "red",
            Tone::Yellow => "yellow",
            Tone::Green => "green",
        };
        format!("<{tag}>{text}</{tag}>")
    }
}

/// Output surface for the dashboard
///
/// Failures are returned unchanged to the caller; the dashboard neither
/// retries nor swallows them.
pub trait DisplaySink {
    /// Error raised by the underlying surface
    type Error;

    /// Remove previously drawn content before a redraw
    ///
    /// # Errors
    ///
    /// Returns the surface error if clearing fails.
    fn clear(&mut self) -> Result<(), Self::Error>;

    /// Draw a complete frame in a single pass
    ///
    /// # Errors
    ///
    /// Returns the surface error if writing fails.
    fn write_frame(&mut self, lines: &[String]) -> Result<(), Self::Error>;

    /// Write one standalone line (start banner, trailing blank line)
    ///
    /// # Errors
    ///
    /// Returns the surface error if writing fails.
    fn write_line(&mut self, line: &str) -> Result<(), Self::Error>;

    /// Painter used to style toned cells for this surface
    fn painter(&self) -> &dyn TonePainter {
        &PlainPainter
    }
}

/// One recorded sink call
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SinkEvent {
    /// `clear()` was called
    Clear,
    /// `write_frame()` was called with these lines
    Frame(Vec<String>),
    /// `write_line()` was called with this line
    Line(String),
}

/// In-memory sink that records every call
#[derive(Clone, Debug, Default)]
pub struct MemorySink {
    events: Vec<SinkEvent>,
    tagged: bool,
}

impl MemorySink {
    /// Create a sink that records plain text
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a sink that records tones as `<tag>` markup
    #[must_use]
    pub fn tagged() -> Self {
        Self {
            events: Vec::new(),
            tagged: true,
        }
    }

    /// All recorded calls in order
    #[must_use]
    pub fn events(&self) -> &[SinkEvent] {
        &self.events
    }

    /// Number of `clear()` calls
    #[must_use]
    pub fn clear_count(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, SinkEvent::Clear))
            .count()
    }

    /// All frames written so far
    pub fn frames(&self) -> impl Iterator<Item = &[String]> {
        self.events.iter().filter_map(|e| match e {
            SinkEvent::Frame(lines) => Some(lines.as_slice()),
            _ => None,
        })
    }

    /// The most recent frame
    #[must_use]
    pub fn last_frame(&self) -> Option<&[String]> {
        self.frames().last()
    }

    /// Standalone lines written so far
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.events.iter().filter_map(|e| match e {
            SinkEvent::Line(line) => Some(line.as_str()),
            _ => None,
        })
    }
}

impl DisplaySink for MemorySink {
    type Error = Infallible;

    fn clear(&mut self) -> Result<(), Self::Error> {
        self.events.push(SinkEvent::Clear);
        Ok(())
    }

    fn write_frame(&mut self, lines: &[String]) -> Result<(), Self::Error> {
        self.events.push(SinkEvent::Frame(lines.to_vec()));
        Ok(())
    }

    fn write_line(&mut self, line: &str) -> Result<(), Self::Error> {
        self.events.push(SinkEvent::Line(line.to_string()));
        Ok(())
    }

    fn painter(&self) -> &dyn TonePainter {
        if self.tagged {
            &TagPainter
        } else {
            &PlainPainter
        }
    }
}
