//! Conversions between record fields and their SQLite column representation.
//!
//! `completed` is an INTEGER 0/1 column and the timestamps are TEXT in
//! RFC 3339 UTC with millisecond precision, which sorts in time order.

use chrono::{DateTime, SecondsFormat, Utc};

pub fn encode_completed(completed: bool) -> i64 {
    if completed {
        1
    } else {
        0
    }
}

/// Any non-zero value reads back as `true`.
pub fn decode_completed(raw: i64) -> bool {
    raw != 0
}

pub fn encode_timestamp(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}

pub fn decode_timestamp(raw: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    DateTime::parse_from_rfc3339(raw).map(|ts| ts.with_timezone(&Utc))
}
