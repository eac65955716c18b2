//! Firestore's typed JSON document encoding.
//!
//! The REST API wraps every field value in a single-key object naming its
//! type (`{"stringValue": "ssh"}`, `{"integerValue": "1700000000000"}`).
//! Only the value types honeypot writers actually produce are interpreted;
//! anything else in a document is ignored unless it sits in one of the
//! event's fields.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::domain::events::{EventId, HoneypotEvent, NewHoneypotEvent, Timestamp};

pub const FIELD_TIMESTAMP: &str = "timestamp";
pub const FIELD_SOURCE_IP: &str = "sourceIP";
pub const FIELD_SERVICE: &str = "service";
pub const FIELD_ACTION: &str = "action";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Document {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(default)]
    pub fields: HashMap<String, Value>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListDocumentsResponse {
    #[serde(default)]
    pub documents: Vec<Document>,
    pub next_page_token: Option<String>,
}

#[derive(Debug, PartialEq, thiserror::Error)]
pub enum DecodeError {
    #[error("document has no name")]
    MissingName,
    #[error("missing field `{0}`")]
    MissingField(&'static str),
    #[error("field `{field}` is not a usable timestamp: {value}")]
    InvalidTimestamp { field: &'static str, value: String },
}

impl Document {
    /// Last path segment of `projects/.../documents/{collection}/{id}`.
    pub fn id(&self) -> Option<EventId> {
        self.name
            .rsplit('/')
            .next()
            .filter(|segment| !segment.is_empty())
            .map(EventId::from)
    }
}

pub fn encode_event(event: &NewHoneypotEvent) -> Document {
    let mut fields = HashMap::new();
    fields.insert(
        FIELD_TIMESTAMP.to_string(),
        json!({ "integerValue": event.timestamp.as_millis().to_string() }),
    );
    fields.insert(FIELD_SOURCE_IP.to_string(), json!({ "stringValue": event.source_ip }));
    fields.insert(FIELD_SERVICE.to_string(), json!({ "stringValue": event.service }));
    fields.insert(FIELD_ACTION.to_string(), json!({ "stringValue": event.action }));

    Document {
        name: String::new(),
        fields,
    }
}

/// Maps a stored document onto a [`HoneypotEvent`].
///
/// Text fields that are absent decode as empty strings, mirroring how the
/// dashboard has always shown sparse documents. The timestamp has no such
/// fallback: a row without an instant cannot be rendered honestly.
pub fn decode_event(document: &Document) -> Result<HoneypotEvent, DecodeError> {
    let id = document.id().ok_or(DecodeError::MissingName)?;
    let raw_timestamp = document
        .fields
        .get(FIELD_TIMESTAMP)
        .ok_or(DecodeError::MissingField(FIELD_TIMESTAMP))?;

    Ok(HoneypotEvent {
        id,
        timestamp: decode_timestamp(raw_timestamp)?,
        source_ip: text_field(&document.fields, FIELD_SOURCE_IP),
        service: text_field(&document.fields, FIELD_SERVICE),
        action: text_field(&document.fields, FIELD_ACTION),
    })
}

fn text_field(fields: &HashMap<String, Value>, key: &str) -> String {
    let Some(value) = fields.get(key) else {
        return String::new();
    };

    if let Some(s) = value.get("stringValue").and_then(Value::as_str) {
        return s.to_string();
    }
    if let Some(n) = value.get("integerValue") {
        return match n {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        };
    }
    if let Some(n) = value.get("doubleValue") {
        return n.to_string();
    }
    if value.get("nullValue").is_some() {
        return String::new();
    }

    value.to_string()
}

fn decode_timestamp(value: &Value) -> Result<Timestamp, DecodeError> {
    let invalid = || DecodeError::InvalidTimestamp {
        field: FIELD_TIMESTAMP,
        value: value.to_string(),
    };

    // Integers arrive as decimal strings, but accept bare numbers too.
    if let Some(n) = value.get("integerValue") {
        return match n {
            Value::String(s) => s.parse::<i64>().map(Timestamp).map_err(|_| invalid()),
            Value::Number(num) => num.as_i64().map(Timestamp).ok_or_else(invalid),
            _ => Err(invalid()),
        };
    }
    if let Some(n) = value.get("doubleValue").and_then(Value::as_f64) {
        return if n.is_finite() {
            Ok(Timestamp(n.trunc() as i64))
        } else {
            Err(invalid())
        };
    }
    if let Some(s) = value.get("timestampValue").and_then(Value::as_str) {
        return Timestamp::parse_rfc3339(s).ok_or_else(invalid);
    }
    if let Some(s) = value.get("stringValue").and_then(Value::as_str) {
        return Timestamp::parse_rfc3339(s)
            .or_else(|| s.trim().parse::<i64>().ok().map(Timestamp))
            .ok_or_else(invalid);
    }

    Err(invalid())
}
