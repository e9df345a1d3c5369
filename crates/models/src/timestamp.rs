//! ISO-8601 codec for entity timestamps.
//!
//! Timestamps are kept at microsecond precision so that a value written to
//! the JSON document or a database column reads back identical.

use chrono::{DateTime, NaiveDateTime, SubsecRound, TimeZone, Utc};

use crate::errors::ModelError;

const FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f";
const PARSE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

pub fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

pub fn format(ts: &DateTime<Utc>) -> String {
    ts.format(FORMAT).to_string()
}

/// Accepts the naive form produced by [`format`] (read as UTC) or RFC 3339.
pub fn parse(field: &'static str, value: &str) -> Result<DateTime<Utc>, ModelError> {
    if let Ok(naive) = NaiveDateTime::parse_from_str(value, PARSE_FORMAT) {
        return Ok(Utc.from_utc_datetime(&naive).trunc_subsecs(6));
    }
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc).trunc_subsecs(6))
        .map_err(|_| ModelError::MalformedTimestamp { field, value: value.to_string() })
}
