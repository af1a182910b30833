//! ISO-8601 duration parsing for `contentDetails.duration` strings.
//!
//! The Data API emits durations like `PT45S`, `PT1M5S`, `PT1H2M3S`, or
//! `P1DT30M`. Only whole-second precision is supported; the API never emits
//! fractional seconds or year/month designators for video durations.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DurationError {
    #[error("malformed ISO-8601 duration: {0:?}")]
    Malformed(String),
}

/// Parses an ISO-8601 duration string into whole seconds.
///
/// Accepted designators: `W` and `D` in the date part, `H`, `M`, `S` after
/// the `T` separator. At least one component must be present (`"P"` and
/// `"PT"` alone are malformed).
///
/// # Errors
///
/// Returns [`DurationError::Malformed`] for anything outside that subset —
/// missing `P` prefix, unknown designators, digits without a designator, or
/// fractional values.
pub fn parse_duration_seconds(text: &str) -> Result<u64, DurationError> {
    let malformed = || DurationError::Malformed(text.to_owned());

    let rest = text.strip_prefix('P').ok_or_else(malformed)?;

    let mut total: u64 = 0;
    let mut digits = String::new();
    let mut in_time = false;
    let mut components = 0usize;

    for ch in rest.chars() {
        match ch {
            'T' if !in_time && digits.is_empty() => in_time = true,
            '0'..='9' => digits.push(ch),
            _ => {
                if digits.is_empty() {
                    return Err(malformed());
                }
                let value: u64 = digits.parse().map_err(|_| malformed())?;
                digits.clear();
                let seconds_per_unit: u64 = match (in_time, ch) {
                    (false, 'W') => 604_800,
                    (false, 'D') => 86_400,
                    (true, 'H') => 3_600,
                    (true, 'M') => 60,
                    (true, 'S') => 1,
                    _ => return Err(malformed()),
                };
                total = total.saturating_add(value.saturating_mul(seconds_per_unit));
                components += 1;
            }
        }
    }

    // Trailing digits with no designator, or no components at all.
    if !digits.is_empty() || components == 0 {
        return Err(malformed());
    }

    Ok(total)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_seconds_only() {
        assert_eq!(parse_duration_seconds("PT45S"), Ok(45));
    }

    #[test]
    fn parses_exact_minute() {
        assert_eq!(parse_duration_seconds("PT1M"), Ok(60));
    }

    #[test]
    fn parses_minute_and_second() {
        assert_eq!(parse_duration_seconds("PT1M1S"), Ok(61));
    }

    #[test]
    fn parses_hours_minutes_seconds() {
        assert_eq!(parse_duration_seconds("PT1H2M3S"), Ok(3_723));
    }

    #[test]
    fn parses_days_with_time_part() {
        assert_eq!(parse_duration_seconds("P1DT1S"), Ok(86_401));
    }

    #[test]
    fn parses_weeks() {
        assert_eq!(parse_duration_seconds("P2W"), Ok(1_209_600));
    }

    #[test]
    fn parses_zero_seconds() {
        assert_eq!(parse_duration_seconds("PT0S"), Ok(0));
    }

    #[test]
    fn rejects_empty_string() {
        assert!(parse_duration_seconds("").is_err());
    }

    #[test]
    fn rejects_missing_prefix() {
        assert!(parse_duration_seconds("T1M").is_err());
    }

    #[test]
    fn rejects_bare_p() {
        assert!(parse_duration_seconds("P").is_err());
    }

    #[test]
    fn rejects_bare_pt() {
        assert!(parse_duration_seconds("PT").is_err());
    }

    #[test]
    fn rejects_designator_without_digits() {
        assert!(parse_duration_seconds("PTM").is_err());
    }

    #[test]
    fn rejects_trailing_digits() {
        assert!(parse_duration_seconds("PT1M30").is_err());
    }

    #[test]
    fn rejects_time_designator_in_date_part() {
        // 'H' before the 'T' separator is not a valid date-part unit.
        assert!(parse_duration_seconds("P1H").is_err());
    }

    #[test]
    fn rejects_fractional_seconds() {
        assert!(parse_duration_seconds("PT1.5S").is_err());
    }
}
