//! Timestamp parsing and validation
//!
//! Pure validators for the wizard's date/time fields. They are deterministic
//! and cheap, so callers re-run them on every field change rather than only
//! on submit.

use chrono::{DateTime, NaiveDateTime, TimeZone, Timelike, Utc};

use crate::models::validation::ValidationCode;

/// Minute-granularity input format used by the wizard forms (assumed UTC)
pub const MINUTE_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Granularity of a parsed timestamp, driving how "now" is truncated when
/// comparing against it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Granularity {
    Minute,
    Second,
}

fn parse_with_granularity(raw: &str) -> Option<(DateTime<Utc>, Granularity)> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some((parsed.with_timezone(&Utc), Granularity::Second));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, MINUTE_FORMAT) {
        return Some((Utc.from_utc_datetime(&naive), Granularity::Minute));
    }
    None
}

fn truncate(value: DateTime<Utc>, granularity: Granularity) -> DateTime<Utc> {
    let truncated = match granularity {
        Granularity::Minute => value.with_second(0).and_then(|v| v.with_nanosecond(0)),
        Granularity::Second => value.with_nanosecond(0),
    };
    truncated.unwrap_or(value)
}

/// Parse a raw wizard timestamp field
///
/// Accepts RFC 3339 or the minute-granularity form `YYYY-MM-DD HH:MM`.
pub fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, ValidationCode> {
    parse_with_granularity(raw.trim())
        .map(|(value, _)| value)
        .ok_or(ValidationCode::InvalidFormat)
}

/// Validate a required timestamp field against "now"
///
/// Fails `Required` on an empty field, `InvalidFormat` on unparseable input
/// and `InPast` when the value precedes `now` truncated to the value's own
/// granularity, so a minute-precision input is never rejected because of the
/// seconds within the current minute.
pub fn validate_not_past(
    raw: Option<&str>,
    now: DateTime<Utc>,
) -> Result<DateTime<Utc>, ValidationCode> {
    let raw = raw.map(str::trim).unwrap_or("");
    if raw.is_empty() {
        return Err(ValidationCode::Required);
    }
    let (value, granularity) =
        parse_with_granularity(raw).ok_or(ValidationCode::InvalidFormat)?;
    if value < truncate(now, granularity) {
        return Err(ValidationCode::InPast);
    }
    Ok(value)
}

/// Validate that a slot ends strictly after it starts
///
/// Equal timestamps are invalid.
pub fn validate_order(
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> Result<(), ValidationCode> {
    if end > start {
        Ok(())
    } else {
        Err(ValidationCode::EndBeforeStart)
    }
}

/// Format a timestamp back into the wizard's minute-granularity input form
pub fn format_minute(value: DateTime<Utc>) -> String {
    value.format(MINUTE_FORMAT).to_string()
}

/// Format a timestamp for display
pub fn format_timestamp(value: DateTime<Utc>) -> String {
    value.format("%Y-%m-%d %H:%M:%S UTC").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 12, 30, 45).unwrap()
    }

    #[test]
    fn empty_field_is_required() {
        assert_eq!(validate_not_past(None, now()), Err(ValidationCode::Required));
        assert_eq!(
            validate_not_past(Some("   "), now()),
            Err(ValidationCode::Required)
        );
    }

    #[test]
    fn garbage_is_invalid_format() {
        assert_eq!(
            validate_not_past(Some("next tuesday"), now()),
            Err(ValidationCode::InvalidFormat)
        );
    }

    #[test]
    fn past_value_is_rejected() {
        assert_eq!(
            validate_not_past(Some("2025-06-01 12:29"), now()),
            Err(ValidationCode::InPast)
        );
    }

    #[test]
    fn minute_input_within_current_minute_is_accepted() {
        // now is 12:30:45; a minute-granularity 12:30 input compares against
        // now truncated to 12:30:00 and passes
        let parsed = validate_not_past(Some("2025-06-01 12:30"), now()).unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2025, 6, 1, 12, 30, 0).unwrap());
    }

    #[test]
    fn rfc3339_is_accepted_at_second_granularity() {
        let parsed = validate_not_past(Some("2025-06-01T12:30:45Z"), now()).unwrap();
        assert_eq!(parsed, now().with_nanosecond(0).unwrap());
        assert_eq!(
            validate_not_past(Some("2025-06-01T12:30:44Z"), now()),
            Err(ValidationCode::InPast)
        );
    }

    #[test]
    fn order_requires_strictly_later_end() {
        let start = now();
        assert_eq!(
            validate_order(start, start),
            Err(ValidationCode::EndBeforeStart)
        );
        assert_eq!(
            validate_order(start, start - Duration::minutes(1)),
            Err(ValidationCode::EndBeforeStart)
        );
        assert!(validate_order(start, start + Duration::minutes(1)).is_ok());
    }

    #[test]
    fn minute_format_round_trips() {
        let value = Utc.with_ymd_and_hms(2025, 6, 1, 18, 0, 0).unwrap();
        assert_eq!(parse_timestamp(&format_minute(value)).unwrap(), value);
    }
}
