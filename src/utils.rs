use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer};

const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

#[derive(Deserialize)]
#[serde(untagged)]
enum TimestampInput {
    Text(String),
    Seconds(i64),
}

/// Parses an RFC 3339 timestamp, falling back to a naive timestamp (`T` or
/// space separated) or a bare date, which are both taken to be in UTC.
pub fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(s) {
        return Some(timestamp.with_timezone(&Utc));
    }

    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, format) {
            return Some(Utc.from_utc_datetime(&naive));
        }
    }

    let naive = NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()?
        .and_hms_opt(0, 0, 0)?;
    Some(Utc.from_utc_datetime(&naive))
}

pub fn timestamp_from_seconds(seconds: i64) -> Option<DateTime<Utc>> {
    Utc.timestamp_opt(seconds, 0).single()
}

/// Accepts `null`, a timestamp string understood by [`parse_timestamp`], or an
/// integer count of unix seconds.
pub fn deserialize_optional_timestamp<'de, D>(
    deserializer: D,
) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let input = match Option::<TimestampInput>::deserialize(deserializer) {
        Ok(input) => input,
        Err(_) => {
            return Err(D::Error::custom(
                "expected a timestamp string or unix seconds",
            ))
        }
    };

    match input {
        None => Ok(None),
        Some(TimestampInput::Text(s)) => parse_timestamp(&s)
            .map(Some)
            .ok_or_else(|| D::Error::custom(format!("invalid timestamp `{}`", s))),
        Some(TimestampInput::Seconds(seconds)) => timestamp_from_seconds(seconds)
            .map(Some)
            .ok_or_else(|| D::Error::custom(format!("unix seconds out of range: {}", seconds))),
    }
}
