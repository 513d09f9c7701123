//! Progress Bar
//!
//! Fixed-width text bar with a cursor at the leading edge, followed by the
//! rounded percentage: `==========>--------- 50%`.

use crate::format::format_percent;
use crate::presenter::GlyphSet;

/// Default number of bar cells
pub const DEFAULT_WIDTH: usize = 20;

/// Render a progress bar for a 0-100 percentage
///
/// The percentage is mapped onto `width` cells by rounding to a position
/// `p`. The first `p` cells are filled, the next one is the cursor, and a
/// bar rounded to `width` is filled throughout. Out-of-range input never
/// panics: below zero leaves every cell empty, above 100 fills every cell.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn render(percent: f64, width: usize, glyphs: GlyphSet) -> String {
    let percent = if percent.is_finite() { percent } else { 0.0 };
    let (filled, cursor, empty) = glyphs.bar_marks();

    let mut bar = String::with_capacity(width * 3 + 6);
    if width > 0 {
        let rounded = (percent / (100.0 / width as f64)).round();
        let full = width as f64;

        for i in 0..width {
            let i = i as f64;
            let mark = if rounded > i || rounded == full {
                filled
            } else if rounded == i {
                cursor
            } else {
                empty
            };
            bar.push(mark);
        }
    }

    bar.push(' ');
    bar.push_str(&format_percent(percent));
    bar.push('%');
    bar
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ascii(percent: f64) -> String {
        render(percent, DEFAULT_WIDTH, GlyphSet::Ascii)
    }

    #[test]
    fn test_zero_has_leading_cursor() {
        assert_eq!(ascii(0.0), ">------------------- 0%");
        assert_eq!(ascii(5.0), "=>------------------ 5%");
    }

    #[test]
    fn test_full_bar() {
        assert_eq!(ascii(100.0), "==================== 100%");
        assert_eq!(ascii(98.0), "==================== 98%");
        assert_eq!(ascii(95.0), "===================> 95%");
    }

    #[test]
    fn test_half_bar() {
        let bar = ascii(50.0);
        assert_eq!(bar, "==========>--------- 50%");
        assert_eq!(bar.chars().filter(|&c| c == '=').count(), 10);
        assert_eq!(bar.chars().nth(10), Some('>'));
    }

    #[test]
    fn test_out_of_range() {
        assert_eq!(ascii(-20.0), "-------------------- -20%");
        assert_eq!(ascii(250.0), "==================== 250%");
        assert_eq!(ascii(f64::NAN), ">------------------- 0%");
    }

    #[test]
    fn test_zero_width() {
        assert_eq!(render(42.0, 0, GlyphSet::Ascii), " 42%");
    }

    #[test]
    fn test_cells_are_monotonic() {
        for p in 0..=100 {
            let bar = ascii(f64::from(p));
            let cells: Vec<char> = bar.chars().take(DEFAULT_WIDTH).collect();
            assert_eq!(cells.len(), DEFAULT_WIDTH);
            let first_empty = cells.iter().position(|&c| c == '-').unwrap_or(DEFAULT_WIDTH);
            assert!(cells[first_empty..].iter().all(|&c| c == '-'), "{bar}");
            assert!(cells.iter().filter(|&&c| c == '>').count() <= 1, "{bar}");
            assert!(bar.ends_with(&format!(" {p}%")), "{bar}");
        }
    }

    #[test]
    fn test_unicode_marks() {
        let bar = render(50.0, 4, GlyphSet::Unicode);
        assert_eq!(bar, "\u{2588}\u{2588}\u{25b6}\u{2591} 50%");
    }
}
