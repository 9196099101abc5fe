//! Structured log events
//!
//! A log event is a small mapping of field name to scalar value, created
//! per log call and consumed immediately by the renderer. Field order is
//! insertion order: the plaintext renderer emits leftover key-value pairs
//! in the order the caller attached them, so storage preserves it.

use crate::core::exception::ExceptionInfo;
use crate::core::log_level::LogLevel;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Scalar value type for event fields
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EventValue {
    String(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    Null,
}

impl fmt::Display for EventValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventValue::String(s) => write!(f, "{}", s),
            EventValue::Int(i) => write!(f, "{}", i),
            EventValue::Float(fl) => write!(f, "{}", fl),
            EventValue::Bool(b) => write!(f, "{}", b),
            EventValue::Null => write!(f, "null"),
        }
    }
}

impl EventValue {
    /// Convert to serde_json::Value for JSON rendering
    #[must_use]
    pub fn to_json_value(&self) -> serde_json::Value {
        match self {
            EventValue::String(s) => serde_json::Value::String(s.clone()),
            EventValue::Int(i) => serde_json::Value::Number((*i).into()),
            EventValue::Float(f) => serde_json::Number::from_f64(*f)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            EventValue::Bool(b) => serde_json::Value::Bool(*b),
            EventValue::Null => serde_json::Value::Null,
        }
    }
}

impl From<String> for EventValue {
    fn from(s: String) -> Self {
        EventValue::String(s)
    }
}

impl From<&str> for EventValue {
    fn from(s: &str) -> Self {
        EventValue::String(s.to_string())
    }
}

impl From<i64> for EventValue {
    fn from(i: i64) -> Self {
        EventValue::Int(i)
    }
}

impl From<i32> for EventValue {
    fn from(i: i32) -> Self {
        EventValue::Int(i as i64)
    }
}

impl From<u32> for EventValue {
    fn from(i: u32) -> Self {
        EventValue::Int(i as i64)
    }
}

impl From<f64> for EventValue {
    fn from(f: f64) -> Self {
        EventValue::Float(f)
    }
}

impl From<bool> for EventValue {
    fn from(b: bool) -> Self {
        EventValue::Bool(b)
    }
}

/// Insertion-ordered field map with last-wins replace semantics.
///
/// Replacing an existing key keeps its original position, so repeated
/// assignment behaves like mapping update rather than append.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventFields {
    entries: Vec<(String, EventValue)>,
}

impl EventFields {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Insert a field, replacing an existing value in place
    pub fn insert<K, V>(&mut self, key: K, value: V)
    where
        K: Into<String>,
        V: Into<EventValue>,
    {
        let key = key.into();
        let value = value.into();
        if let Some(entry) = self.entries.iter_mut().find(|(k, _)| *k == key) {
            entry.1 = value;
        } else {
            self.entries.push((key, value));
        }
    }

    /// Builder-style insert
    #[must_use]
    pub fn with_field<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<EventValue>,
    {
        self.insert(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&EventValue> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }

    /// Remove a field and return its value
    pub fn remove(&mut self, key: &str) -> Option<EventValue> {
        let idx = self.entries.iter().position(|(k, _)| k == key)?;
        Some(self.entries.remove(idx).1)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &EventValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Format fields as `k1=v1, k2=v2` in insertion order
    pub fn format_pairs(&self) -> String {
        self.entries
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// One structured log event, owned by the calling log statement.
#[derive(Debug, Clone, PartialEq)]
pub struct LogEvent {
    fields: EventFields,
    exc_info: Option<ExceptionInfo>,
}

impl LogEvent {
    /// Escape control characters so a record stays on a single output line.
    /// An appended traceback is the only permitted multi-line content.
    fn sanitize_message(message: &str) -> String {
        message
            .replace('\n', "\\n")
            .replace('\r', "\\r")
            .replace('\t', "\\t")
    }

    /// Create an event carrying `message` under the `event` key
    pub fn new(message: impl Into<String>) -> Self {
        let mut fields = EventFields::new();
        fields.insert("event", Self::sanitize_message(&message.into()));
        Self {
            fields,
            exc_info: None,
        }
    }

    /// Create an event from pre-built fields plus a message
    pub fn with_fields(message: impl Into<String>, fields: EventFields) -> Self {
        let mut event = Self {
            fields,
            exc_info: None,
        };
        event
            .fields
            .insert("event", Self::sanitize_message(&message.into()));
        event
    }

    /// Builder-style field insert
    #[must_use]
    pub fn with_field<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<EventValue>,
    {
        self.fields.insert(key, value);
        self
    }

    /// Attach a captured exception descriptor
    #[must_use]
    pub fn with_exc_info(mut self, exc_info: ExceptionInfo) -> Self {
        self.exc_info = Some(exc_info);
        self
    }

    pub fn fields(&self) -> &EventFields {
        &self.fields
    }

    pub fn fields_mut(&mut self) -> &mut EventFields {
        &mut self.fields
    }

    pub fn exc_info(&self) -> Option<&ExceptionInfo> {
        self.exc_info.as_ref()
    }

    /// Stamp ambient context the way the configured pipeline does:
    /// `logger`, `level` (lowercase name) and an ISO-8601 timestamp.
    /// Fields already set by the caller are left alone.
    pub fn stamp(&mut self, logger: &str, level: LogLevel, now: DateTime<Utc>) {
        if !self.fields.contains_key("logger") {
            self.fields.insert("logger", logger);
        }
        if !self.fields.contains_key("level") {
            self.fields.insert("level", level.name());
        }
        if !self.fields.contains_key("timestamp") {
            self.fields.insert("timestamp", iso8601(&now));
        }
    }
}

/// ISO-8601 UTC timestamp with microsecond precision,
/// e.g. `2018-08-16T08:50:55.711270Z`
pub fn iso8601(datetime: &DateTime<Utc>) -> String {
    datetime.format("%Y-%m-%dT%H:%M:%S%.6fZ").to_string()
}
