//! Validators derived from entity schemas.
//!
//! A [`Validator`] is generated mechanically from an
//! [`EntitySchema`](crate::domain::schema::EntitySchema):
//!
//! - [`Validator::insert`] requires every non-nullable column without a
//!   default and lets generated or nullable columns be omitted.
//! - [`Validator::select`] requires every column of the persisted row.
//! - [`Validator::pick`] projects either view onto a subset of fields.
//!
//! Validation is pure: it checks JSON type, nullability and length, and never
//! semantic formats such as e-mail syntax.

mod failure;
mod record;
mod schemas;

pub use failure::{FieldIssue, IssueKind, PAYLOAD_FIELD, ValidationFailure};
pub use record::{FieldValue, RecordError, ValidatedRecord};
pub use schemas::{ParseError, PUBLIC_SUBMISSION_FIELDS, Schemas};

use chrono::{DateTime, Utc};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::domain::schema::{Column, ColumnType, EntitySchema};

/// Which derived shape a validator enforces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    /// Fields needed to create a row.
    Insert,
    /// Full persisted row.
    Select,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct FieldRule {
    column: Column,
    required: bool,
}

impl FieldRule {
    fn name(&self) -> &'static str {
        self.column.name()
    }

    fn check(&self, value: Option<&Value>) -> Result<Option<FieldValue>, IssueKind> {
        match value {
            None if self.required => Err(IssueKind::Missing),
            None => Ok(None),
            Some(Value::Null) if self.column.is_nullable() => Ok(Some(FieldValue::Null)),
            Some(value) => check_column_value(&self.column, value).map(Some),
        }
    }
}

fn check_column_value(column: &Column, value: &Value) -> Result<FieldValue, IssueKind> {
    match column.column_type() {
        ColumnType::Varchar => check_text(column, value),
        ColumnType::Uuid => {
            let raw = value.as_str().ok_or(IssueKind::InvalidType {
                expected: "string",
            })?;
            Uuid::parse_str(raw)
                .map(FieldValue::Uuid)
                .map_err(|_| IssueKind::InvalidFormat { expected: "UUID" })
        }
        ColumnType::Serial => value
            .as_i64()
            .and_then(|wide| i32::try_from(wide).ok())
            .map(FieldValue::Integer)
            .ok_or(IssueKind::InvalidType {
                expected: "32-bit integer",
            }),
        ColumnType::Timestamp => {
            let raw = value.as_str().ok_or(IssueKind::InvalidType {
                expected: "string",
            })?;
            DateTime::parse_from_rfc3339(raw)
                .map(|at| FieldValue::Timestamp(at.with_timezone(&Utc)))
                .map_err(|_| IssueKind::InvalidFormat {
                    expected: "RFC 3339 timestamp",
                })
        }
    }
}

fn check_text(column: &Column, value: &Value) -> Result<FieldValue, IssueKind> {
    let text = value.as_str().ok_or(IssueKind::InvalidType {
        expected: "string",
    })?;
    if text.is_empty() && !column.is_nullable() {
        return Err(IssueKind::Empty);
    }
    if let Some(max) = column.max_length() {
        let actual = text.chars().count();
        if actual > max {
            return Err(IssueKind::TooLong { max, actual });
        }
    }
    Ok(FieldValue::Text(text.to_owned()))
}

/// Strict-shape validator for one view of one entity.
///
/// # Examples
/// ```
/// use site_backend::domain::schema::CONTACT_SUBMISSIONS;
/// use site_backend::domain::validation::Validator;
/// use serde_json::json;
///
/// let validator = Validator::insert(&CONTACT_SUBMISSIONS);
/// let record = validator
///     .validate(&json!({
///         "name": "John Doe",
///         "email": "not-an-email",
///         "message": "Help needed"
///     }))
///     .expect("lenient e-mail is accepted");
/// assert_eq!(record.len(), 3);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Validator {
    table: &'static str,
    view: View,
    rules: Vec<FieldRule>,
}

impl Validator {
    fn derive(schema: &EntitySchema, view: View) -> Self {
        let rules = schema
            .columns()
            .iter()
            .map(|column| FieldRule {
                column: *column,
                required: match view {
                    View::Insert => column.is_required_on_insert(),
                    View::Select => true,
                },
            })
            .collect();
        Self {
            table: schema.table(),
            view,
            rules,
        }
    }

    /// Derive the insert validator for `schema`.
    pub fn insert(schema: &EntitySchema) -> Self {
        Self::derive(schema, View::Insert)
    }

    /// Derive the select validator for `schema`.
    pub fn select(schema: &EntitySchema) -> Self {
        Self::derive(schema, View::Select)
    }

    /// Restrict the validator to `fields`, keeping column order and each
    /// field's requirement. Names that are not columns select nothing.
    #[must_use]
    pub fn pick(mut self, fields: &[&str]) -> Self {
        self.rules.retain(|rule| fields.contains(&rule.name()));
        self
    }

    /// Table the validator was derived from.
    pub fn table(&self) -> &'static str {
        self.table
    }

    /// Derived view.
    pub fn view(&self) -> View {
        self.view
    }

    /// Declared fields in column order.
    pub fn fields(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.rules.iter().map(FieldRule::name)
    }

    /// Fields a payload must contain.
    pub fn required_fields(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.rules
            .iter()
            .filter(|rule| rule.required)
            .map(FieldRule::name)
    }

    /// Validate an untyped payload.
    ///
    /// # Errors
    /// Returns every field-level issue found, in column order, or a single
    /// whole-payload issue when `payload` is not a JSON object.
    pub fn validate(&self, payload: &Value) -> Result<ValidatedRecord, ValidationFailure> {
        let Some(object) = payload.as_object() else {
            return Err(ValidationFailure::not_an_object());
        };
        self.validate_object(object)
    }

    fn validate_object(&self, object: &Map<String, Value>) -> Result<ValidatedRecord, ValidationFailure> {
        let mut record = ValidatedRecord::with_capacity(self.rules.len());
        let mut issues = Vec::new();
        for rule in &self.rules {
            match rule.check(object.get(rule.name())) {
                Ok(Some(value)) => record.push(rule.name(), value),
                Ok(None) => {}
                Err(kind) => issues.push(FieldIssue::new(rule.name(), kind)),
            }
        }
        match ValidationFailure::from_issues(issues) {
            Some(failure) => Err(failure),
            None => Ok(record),
        }
    }

    /// Validate `payload` and convert the record into a typed value.
    ///
    /// # Errors
    /// [`ParseError::Invalid`] for rejected payloads; [`ParseError::Shape`]
    /// when `T` expects fields this validator does not produce.
    pub fn parse<T>(&self, payload: &Value) -> Result<T, ParseError>
    where
        T: TryFrom<ValidatedRecord, Error = RecordError>,
    {
        let record = self.validate(payload).map_err(ParseError::Invalid)?;
        T::try_from(record).map_err(ParseError::Shape)
    }
}

#[cfg(test)]
mod tests;
