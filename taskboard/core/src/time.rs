//! Time Formatting
//!
//! Durations are shown in whole seconds: `25s`, `1m 02s`, `1h 02m 03s`.

use chrono::{DateTime, TimeZone};

/// Format a duration given in (possibly fractional) seconds
///
/// The fractional part is truncated. Negative durations keep their sign,
/// which happens when the saved-time figure goes below zero.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn format_duration(seconds: f64) -> String {
    if !seconds.is_finite() {
        return "0s".to_string();
    }

    let whole = seconds.abs().trunc() as u64;
    let sign = if seconds < 0.0 && whole > 0 { "-" } else { "" };

    let hours = whole / 3600;
    let minutes = (whole % 3600) / 60;
    let secs = whole % 60;

    if hours > 0 {
        format!("{sign}{hours}h {minutes:02}m {secs:02}s")
    } else if minutes > 0 {
        format!("{sign}{minutes}m {secs:02}s")
    } else {
        format!("{sign}{secs}s")
    }
}

/// Format a timestamp as 24-hour `HH:MM:SS`
#[must_use]
pub fn format_clock<Tz: TimeZone>(at: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    at.format("%H:%M:%S").to_string()
}
