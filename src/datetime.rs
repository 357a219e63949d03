//! Date/time utilities.

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};

/// Format a UTC timestamp as RFC3339 with second precision (`2024-01-15T10:30:00Z`).
pub fn to_rfc3339(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Parse a timestamp in RFC3339, SQLite (`YYYY-MM-DD HH:MM:SS`) or bare date form.
///
/// Bare dates resolve to midnight UTC. Returns `None` if nothing matches.
pub fn parse_utc(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }

    if let Ok(naive) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S") {
        return Some(naive.and_utc());
    }

    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Current time truncated to whole seconds, matching what the API serializes.
pub fn now() -> DateTime<Utc> {
    let now = Utc::now();
    DateTime::from_timestamp(now.timestamp(), 0).unwrap_or(now)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_to_rfc3339() {
        let dt = Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap();
        assert_eq!(to_rfc3339(&dt), "2024-01-15T10:30:00Z");
    }

    #[test]
    fn test_parse_rfc3339_with_offset() {
        let dt = parse_utc("2024-01-15T19:30:00+09:00").unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap());
    }

    #[test]
    fn test_parse_sqlite_format() {
        let dt = parse_utc("2024-12-31 23:59:59").unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2024, 12, 31, 23, 59, 59).unwrap());
    }

    #[test]
    fn test_parse_bare_date() {
        let dt = parse_utc("2024-01-20").unwrap();
        assert_eq!(to_rfc3339(&dt), "2024-01-20T00:00:00Z");
    }

    #[test]
    fn test_parse_invalid() {
        assert!(parse_utc("not a date").is_none());
        assert!(parse_utc("").is_none());
    }

    #[test]
    fn test_now_has_no_subseconds() {
        assert_eq!(now().timestamp_subsec_nanos(), 0);
    }
}
