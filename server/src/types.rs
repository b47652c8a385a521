//! Record shape and request payloads.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A persisted todo record as returned by the API.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub completed: bool,
    #[serde(with = "millis")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "millis")]
    pub updated_at: DateTime<Utc>,
}

/// Body of `POST /api/todos`.
///
/// `title` is optional at the type level so a missing title surfaces as a
/// validation error with a message rather than a body-parse failure.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct CreateRecord {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub completed: Option<bool>,
}

/// Body of `PUT /api/todos/{id}`. Omitted fields are left untouched.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct UpdateRecord {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub completed: Option<bool>,
}

impl UpdateRecord {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none() && self.completed.is_none()
    }
}

/// Body of a successful `DELETE /api/todos/{id}`.
#[derive(Debug, Serialize, Deserialize)]
pub struct DeleteConfirmation {
    pub message: String,
}

mod millis {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    use crate::codec::{decode_timestamp, encode_timestamp};

    pub fn serialize<S: Serializer>(ts: &DateTime<Utc>, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&encode_timestamp(*ts))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(d)?;
        decode_timestamp(&raw).map_err(serde::de::Error::custom)
    }
}
