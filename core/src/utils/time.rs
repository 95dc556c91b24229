use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, SecondsFormat, Utc};

/// Date-time format string handed to the parsers with `--dt`
pub(crate) const PARSER_DATETIME_FORMAT: &str = "yyyy-MM-dd HH:mm:sszzz";

const OFFSET_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S%.f%:z", "%Y-%m-%d %H:%M:%S%.f%z"];
const NAIVE_FORMATS: [&str; 3] = [
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%m/%d/%Y %H:%M:%S%.f",
];

/// Permissive timestamp parser. Anything we cannot understand is `None`, never an error
/// Values without an offset are treated as UTC
pub(crate) fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    if let Ok(result) = DateTime::parse_from_rfc3339(value) {
        return Some(result.with_timezone(&Utc));
    }

    for format in OFFSET_FORMATS {
        if let Ok(result) = DateTime::<FixedOffset>::parse_from_str(value, format) {
            return Some(result.with_timezone(&Utc));
        }
    }

    for format in NAIVE_FORMATS {
        if let Ok(result) = NaiveDateTime::parse_from_str(value, format) {
            return Some(result.and_utc());
        }
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|date| date.and_utc())
}

/// Format a UTC timestamp the way the parsers format theirs. Ex: `2024-06-15 10:01:02+00:00`
pub(crate) fn format_timestamp(timestamp: &DateTime<Utc>) -> String {
    let value = timestamp.to_rfc3339_opts(SecondsFormat::AutoSi, false);
    value.replacen('T', " ", 1)
}
