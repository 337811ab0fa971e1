// src/data_input/timestamp.rs

use chrono::NaiveDateTime;

use crate::constants::{MILLISECOND_DIGITS, TIMESTAMP_PARSE_FORMAT};
use crate::error::{Result, SyncError};

/// Left-pads the trailing colon-delimited millisecond field to three digits.
///
/// The logger writes `"2025-04-09 17:57:09:5"` for 5 ms. A field that already has three or more
/// digits is kept as is, and a string without any colon is returned unchanged.
pub fn normalize_milliseconds(time_str: &str) -> String {
    match time_str.rsplit_once(':') {
        Some((head, millis)) if millis.chars().count() < MILLISECOND_DIGITS => {
            format!("{}:{:0>width$}", head, millis, width = MILLISECOND_DIGITS)
        }
        _ => time_str.to_string(),
    }
}

/// Parses a logger timestamp. `row` is only used for error reporting.
pub fn parse_timestamp(row: usize, time_str: &str) -> Result<NaiveDateTime> {
    let normalized = normalize_milliseconds(time_str.trim());

    // The last colon separates seconds from the fraction.
    let parseable = match normalized.rsplit_once(':') {
        Some((head, fraction)) => format!("{}.{}", head, fraction),
        None => normalized.clone(),
    };

    NaiveDateTime::parse_from_str(&parseable, TIMESTAMP_PARSE_FORMAT).map_err(|e| {
        SyncError::InvalidTimestamp {
            row,
            value: time_str.to_string(),
            reason: e.to_string(),
        }
    })
}

/// Elapsed seconds from `start` to `end`. Negative when `end` precedes `start`.
pub fn seconds_between(start: NaiveDateTime, end: NaiveDateTime) -> f64 {
    let delta = end - start;
    match delta.num_nanoseconds() {
        Some(nanos) => nanos as f64 / 1_000_000_000.0,
        None => delta.num_milliseconds() as f64 / 1_000.0, // Beyond ~292 years.
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use chrono::Timelike;

    #[test]
    fn pads_short_millisecond_fields() {
        assert_eq!(normalize_milliseconds("2025-04-09 17:57:09:5"), "2025-04-09 17:57:09:005");
        assert_eq!(normalize_milliseconds("2025-04-09 17:57:09:50"), "2025-04-09 17:57:09:050");
        assert_eq!(normalize_milliseconds("2025-04-09 17:57:09:500"), "2025-04-09 17:57:09:500");
    }

    #[test]
    fn long_fields_are_not_truncated() {
        assert_eq!(normalize_milliseconds("2025-04-09 17:57:09:1234"), "2025-04-09 17:57:09:1234");
    }

    #[test]
    fn strings_without_colon_pass_through() {
        assert_eq!(normalize_milliseconds("20250409175709"), "20250409175709");
    }

    #[test]
    fn short_fields_are_milliseconds_not_fractions() {
        let five = parse_timestamp(0, "2025-04-09 17:57:09:5").unwrap();
        let fifty = parse_timestamp(0, "2025-04-09 17:57:09:50").unwrap();
        let five_hundred = parse_timestamp(0, "2025-04-09 17:57:09:500").unwrap();

        assert_eq!(five.nanosecond(), 5_000_000);
        assert_eq!(fifty.nanosecond(), 50_000_000);
        assert_eq!(five_hundred.nanosecond(), 500_000_000);
        assert_eq!(five.second(), 9);
    }

    #[test]
    fn malformed_timestamp_reports_row() {
        let err = parse_timestamp(7, "not a timestamp").unwrap_err();
        match err {
            SyncError::InvalidTimestamp { row, value, .. } => {
                assert_eq!(row, 7);
                assert_eq!(value, "not a timestamp");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn error_keeps_the_cell_as_logged() {
        let err = parse_timestamp(2, "2025-04-09 17:57:xx:5").unwrap_err();
        match err {
            SyncError::InvalidTimestamp { value, .. } => assert_eq!(value, "2025-04-09 17:57:xx:5"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn timestamp_without_millisecond_field_is_rejected() {
        // The seconds field is taken as the millisecond field, leaving "HH:MM" for the time.
        assert!(parse_timestamp(0, "2025-04-09 17:57:09").is_err());
    }

    #[test]
    fn seconds_between_is_fractional() {
        let start = parse_timestamp(0, "2025-04-09 17:57:09:5").unwrap();
        let end = parse_timestamp(1, "2025-04-09 17:57:10:250").unwrap();
        assert_abs_diff_eq!(seconds_between(start, end), 0.745, epsilon = 1e-12);
        assert_abs_diff_eq!(seconds_between(end, start), -0.745, epsilon = 1e-12);
        assert_eq!(seconds_between(start, start), 0.0);
    }
}
