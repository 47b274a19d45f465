//! IST wall-clock timestamps
//!
//! Every stored and displayed timestamp is wall-clock time at a fixed
//! UTC+05:30 offset, formatted `YYYY-MM-DD HH:MM:SS`.

use chrono::{Duration, NaiveDateTime, Timelike, Utc};

/// Offset of Indian Standard Time from UTC, in minutes
pub const IST_OFFSET_MINUTES: i64 = 5 * 60 + 30;

/// Storage and display format for timestamps
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Current wall-clock time in IST, truncated to whole seconds
pub fn ist_now() -> NaiveDateTime {
    to_ist(Utc::now().naive_utc())
}

/// Shift a naive UTC instant to IST wall-clock time
pub fn to_ist(utc: NaiveDateTime) -> NaiveDateTime {
    let shifted = utc + Duration::minutes(IST_OFFSET_MINUTES);
    // Stored precision is one second
    shifted.with_nanosecond(0).unwrap_or(shifted)
}

/// Format a timestamp for storage or display
pub fn format_timestamp(ts: &NaiveDateTime) -> String {
    ts.format(TIMESTAMP_FORMAT).to_string()
}

/// Parse a stored timestamp
pub fn parse_timestamp(raw: &str) -> Result<NaiveDateTime, chrono::ParseError> {
    NaiveDateTime::parse_from_str(raw, TIMESTAMP_FORMAT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_ist_shift_crosses_midnight() {
        let utc = NaiveDate::from_ymd_opt(2024, 3, 31)
            .unwrap()
            .and_hms_opt(20, 15, 42)
            .unwrap();
        let ist = to_ist(utc);
        assert_eq!(format_timestamp(&ist), "2024-04-01 01:45:42");
    }

    #[test]
    fn test_format_round_trip() {
        let raw = "2025-01-15 09:05:00";
        let parsed = parse_timestamp(raw).unwrap();
        assert_eq!(format_timestamp(&parsed), raw);
    }

    #[test]
    fn test_rejects_iso_t_separator() {
        assert!(parse_timestamp("2025-01-15T09:05:00").is_err());
    }
}
