//! Terminal Sink
//!
//! [`DisplaySink`] over any [`Write`] using crossterm commands. Each redraw
//! clears the screen, homes the cursor and writes the whole frame with a
//! single flush, so the terminal never shows half a table.

use std::io::{self, Write};

use crossterm::cursor::MoveTo;
use crossterm::queue;
use crossterm::style::Print;
use crossterm::terminal::{Clear, ClearType};

use taskboard_core::{DisplaySink, PlainPainter, TonePainter};

use crate::theme::AnsiPainter;

/// Dashboard output on a terminal
pub struct TerminalSink<W: Write> {
    out: W,
    color: bool,
}

impl TerminalSink<io::Stdout> {
    /// Sink on standard output
    #[must_use]
    pub fn stdout(color: bool) -> Self {
        Self::new(io::stdout(), color)
    }
}

impl<W: Write> TerminalSink<W> {
    /// Wrap a writer
    pub fn new(out: W, color: bool) -> Self {
        Self { out, color }
    }

    /// Whether tones are painted
    pub fn color(&self) -> bool {
        self.color
    }

    /// Consume the sink, returning the writer
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> DisplaySink for TerminalSink<W> {
    type Error = io::Error;

    fn clear(&mut self) -> io::Result<()> {
        queue!(self.out, Clear(ClearType::All), MoveTo(0, 0))?;
        self.out.flush()
    }

    fn write_frame(&mut self, lines: &[String]) -> io::Result<()> {
        for line in lines {
            queue!(self.out, Print(line), Print('\n'))?;
        }
        self.out.flush()
    }

    fn write_line(&mut self, line: &str) -> io::Result<()> {
        queue!(self.out, Print(line), Print('\n'))?;
        self.out.flush()
    }

    fn painter(&self) -> &dyn TonePainter {
        if self.color {
            &AnsiPainter
        } else {
            &PlainPainter
        }
    }
}
