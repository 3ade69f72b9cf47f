use chrono::{DateTime, NaiveDateTime, Utc};

/// Parse a server timestamp into UTC.
///
/// The backend emits RFC-3339 strings (`2024-01-02T10:00:00Z`), but stored
/// rows occasionally come back without an offset or with a space separator.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(naive.and_utc());
        }
    }
    None
}

/// Timestamp as epoch seconds, the native time unit of the retained chart widget.
pub fn epoch_seconds(raw: &str) -> Option<f64> {
    parse_timestamp(raw).map(|dt| dt.timestamp_millis() as f64 / 1000.0)
}

/// The `YYYY-MM-DD` prefix used for date filtering.
pub fn date_part(raw: &str) -> Option<&str> {
    raw.get(0..10)
}

/// Human readable form for the annotations table.
pub fn format_display(raw: &str) -> Option<String> {
    parse_timestamp(raw).map(|dt| dt.format("%Y-%m-%d %H:%M:%S").to_string())
}
