use chrono::{DateTime, NaiveDateTime, Utc};

use crate::clients::cast;
use crate::types::{Field, SqlValue};

const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

/// Converts `DATETIME` and `TIMESTAMP` values into `SqlValue::DateTime`.
///
/// This is the default `cast` installed by `PlanetScaleDialect`; set
/// `ClientConfig::cast` to use a different conversion. Values without an offset
/// are read as UTC. Anything that does not parse, and every other column type,
/// goes through the client's default `cast`.
pub fn inflate_dates(field: &Field, value: Option<&[u8]>) -> SqlValue {
    if matches!(field.field_type.as_str(), "DATETIME" | "TIMESTAMP") {
        let parsed = value
            .filter(|v| !v.is_empty())
            .and_then(|v| std::str::from_utf8(v).ok())
            .and_then(parse_date_time);
        if let Some(date) = parsed {
            return SqlValue::DateTime(date);
        }
    }
    cast(field, value)
}

fn parse_date_time(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(date) = DateTime::parse_from_rfc3339(s) {
        return Some(date.with_timezone(&Utc));
    }
    // Offsets without a colon, e.g. `+0000`.
    if let Some(date) = ["%Y-%m-%d %H:%M:%S%.f%z", "%Y-%m-%dT%H:%M:%S%.f%z"]
        .iter()
        .find_map(|fmt| DateTime::parse_from_str(s, fmt).ok())
    {
        return Some(date.with_timezone(&Utc));
    }
    ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .map(|naive| naive.and_utc())
}

/// Formats a date as the literal MySQL expects: `YYYY-MM-DD HH:MM:SS.sss`, UTC.
pub fn format_date(date: &DateTime<Utc>) -> String {
    date.format(DATE_FORMAT).to_string()
}
