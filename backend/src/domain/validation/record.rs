//! Typed output of a successful validation.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::Value;
use uuid::Uuid;

/// A single validated value, typed by its column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    /// `varchar` content.
    Text(String),
    /// `uuid` content.
    Uuid(Uuid),
    /// `serial` content.
    Integer(i32),
    /// `timestamptz` content, normalised to UTC.
    Timestamp(DateTime<Utc>),
    /// Explicit `null` for a nullable column.
    Null,
}

impl FieldValue {
    fn type_name(&self) -> &'static str {
        match self {
            Self::Text(_) => "text",
            Self::Uuid(_) => "uuid",
            Self::Integer(_) => "integer",
            Self::Timestamp(_) => "timestamp",
            Self::Null => "null",
        }
    }
}

impl Serialize for FieldValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Text(text) => serializer.serialize_str(text),
            Self::Uuid(uuid) => serializer.collect_str(uuid),
            Self::Integer(value) => serializer.serialize_i32(*value),
            Self::Timestamp(at) => {
                serializer.serialize_str(&at.to_rfc3339_opts(SecondsFormat::AutoSi, true))
            }
            Self::Null => serializer.serialize_none(),
        }
    }
}

/// Errors raised when reading typed values out of a [`ValidatedRecord`].
///
/// These indicate a mismatch between a validator and the type it feeds, never
/// bad client input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RecordError {
    /// The record does not contain the field.
    #[error("validated record has no field `{field}`")]
    Missing { field: &'static str },
    /// The field holds a value of another type.
    #[error("validated field `{field}` holds {found}, expected {expected}")]
    Mismatch {
        field: &'static str,
        expected: &'static str,
        found: &'static str,
    },
}

/// Fields accepted by a validator, in column order.
///
/// Only declared fields appear; unknown payload keys are dropped and omitted
/// optional fields are absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidatedRecord {
    fields: Vec<(&'static str, FieldValue)>,
}

impl ValidatedRecord {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            fields: Vec::with_capacity(capacity),
        }
    }

    pub(crate) fn push(&mut self, field: &'static str, value: FieldValue) {
        self.fields.push((field, value));
    }

    /// Value of `field`, if present.
    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.fields
            .iter()
            .find(|(name, _)| *name == field)
            .map(|(_, value)| value)
    }

    /// Whether `field` is present.
    pub fn contains(&self, field: &str) -> bool {
        self.get(field).is_some()
    }

    /// Present field names in column order.
    pub fn field_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.iter().map(|(name, _)| *name)
    }

    /// Number of present fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether no field is present.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Render the record as a JSON object.
    pub fn to_json(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }

    fn take(&mut self, field: &'static str) -> Option<FieldValue> {
        let index = self.fields.iter().position(|(name, _)| *name == field)?;
        Some(self.fields.remove(index).1)
    }

    fn mismatch(field: &'static str, expected: &'static str, found: &FieldValue) -> RecordError {
        RecordError::Mismatch {
            field,
            expected,
            found: found.type_name(),
        }
    }

    /// Remove a required text field.
    pub fn take_text(&mut self, field: &'static str) -> Result<String, RecordError> {
        match self.take(field) {
            Some(FieldValue::Text(text)) => Ok(text),
            Some(other) => Err(Self::mismatch(field, "text", &other)),
            None => Err(RecordError::Missing { field }),
        }
    }

    /// Remove an optional text field; absent and `null` both yield `None`.
    pub fn take_optional_text(&mut self, field: &'static str) -> Result<Option<String>, RecordError> {
        match self.take(field) {
            Some(FieldValue::Text(text)) => Ok(Some(text)),
            Some(FieldValue::Null) | None => Ok(None),
            Some(other) => Err(Self::mismatch(field, "text", &other)),
        }
    }

    /// Remove a required UUID field.
    pub fn take_uuid(&mut self, field: &'static str) -> Result<Uuid, RecordError> {
        match self.take(field) {
            Some(FieldValue::Uuid(uuid)) => Ok(uuid),
            Some(other) => Err(Self::mismatch(field, "uuid", &other)),
            None => Err(RecordError::Missing { field }),
        }
    }

    /// Remove an optional UUID field.
    pub fn take_optional_uuid(&mut self, field: &'static str) -> Result<Option<Uuid>, RecordError> {
        match self.take(field) {
            Some(FieldValue::Uuid(uuid)) => Ok(Some(uuid)),
            Some(FieldValue::Null) | None => Ok(None),
            Some(other) => Err(Self::mismatch(field, "uuid", &other)),
        }
    }

    /// Remove a required integer field.
    pub fn take_integer(&mut self, field: &'static str) -> Result<i32, RecordError> {
        match self.take(field) {
            Some(FieldValue::Integer(value)) => Ok(value),
            Some(other) => Err(Self::mismatch(field, "integer", &other)),
            None => Err(RecordError::Missing { field }),
        }
    }

    /// Remove a required timestamp field.
    pub fn take_timestamp(&mut self, field: &'static str) -> Result<DateTime<Utc>, RecordError> {
        match self.take(field) {
            Some(FieldValue::Timestamp(at)) => Ok(at),
            Some(other) => Err(Self::mismatch(field, "timestamp", &other)),
            None => Err(RecordError::Missing { field }),
        }
    }

    /// Remove an optional timestamp field.
    pub fn take_optional_timestamp(
        &mut self,
        field: &'static str,
    ) -> Result<Option<DateTime<Utc>>, RecordError> {
        match self.take(field) {
            Some(FieldValue::Timestamp(at)) => Ok(Some(at)),
            Some(FieldValue::Null) | None => Ok(None),
            Some(other) => Err(Self::mismatch(field, "timestamp", &other)),
        }
    }
}

impl Serialize for ValidatedRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (name, value) in &self.fields {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}
