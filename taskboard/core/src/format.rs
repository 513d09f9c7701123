//! Number Formatting
//!
//! Counts are shown with `,` thousands separators.

/// Format an integer with thousands separators (`1234567` -> `1,234,567`)
#[must_use]
pub fn format_count(n: i64) -> String {
    let digits = n.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);

    if n < 0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Round a percentage to a whole number and format it like a count
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn format_percent(percent: f64) -> String {
    if !percent.is_finite() {
        return format_count(0);
    }
    // f64::round rounds half away from zero
    format_count(percent.round() as i64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_count() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(999), "999");
        assert_eq!(format_count(1000), "1,000");
        assert_eq!(format_count(1_234_567), "1,234,567");
        assert_eq!(format_count(-1200), "-1,200");
        assert_eq!(format_count(i64::MIN), "-9,223,372,036,854,775,808");
    }

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(0.0), "0");
        assert_eq!(format_percent(49.5), "50");
        assert_eq!(format_percent(40.4), "40");
        assert_eq!(format_percent(-2.5), "-3");
        assert_eq!(format_percent(f64::NAN), "0");
    }
}
