use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Parses the timestamp formats the API emits: RFC 3339, naive ISO
/// (`2024-05-01T10:00:00.123`) and Python's `str(datetime)`.
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_utc());
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

/// "May 1, 2024"
pub fn long_date(raw: Option<&str>) -> String {
    raw.and_then(parse_timestamp)
        .map(|dt| dt.format("%B %-d, %Y").to_string())
        .unwrap_or_else(|| "Unknown Date".to_string())
}

/// "5/1/2024"
pub fn short_date(raw: Option<&str>) -> String {
    raw.and_then(parse_timestamp)
        .map(|dt| dt.format("%-m/%-d/%Y").to_string())
        .unwrap_or_else(|| "Unknown Date".to_string())
}
