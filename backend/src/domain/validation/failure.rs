//! Structured validation failures.

use std::fmt;

use serde::Serialize;
use serde_json::{Value, json};

use crate::domain::Error;

/// Pseudo field name used for issues concerning the payload as a whole.
pub const PAYLOAD_FIELD: &str = "$";

/// What went wrong with a single field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IssueKind {
    /// A required field is absent.
    Missing,
    /// The value has the wrong JSON type, or is `null` where that is not allowed.
    InvalidType {
        /// Human description of the accepted type.
        expected: &'static str,
    },
    /// A string exceeds the column's length limit.
    TooLong {
        /// Maximum number of characters.
        max: usize,
        /// Number of characters received.
        actual: usize,
    },
    /// A required string is empty.
    Empty,
    /// The value has the right type but cannot be parsed.
    InvalidFormat {
        /// Human description of the accepted format.
        expected: &'static str,
    },
    /// The payload is not a JSON object.
    NotAnObject,
}

impl IssueKind {
    /// Stable machine-readable code.
    pub fn code(self) -> &'static str {
        match self {
            Self::Missing => "missing_field",
            Self::InvalidType { .. } => "invalid_type",
            Self::TooLong { .. } => "too_long",
            Self::Empty => "empty",
            Self::InvalidFormat { .. } => "invalid_format",
            Self::NotAnObject => "not_an_object",
        }
    }
}

impl fmt::Display for IssueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing => write!(f, "missing required field"),
            Self::InvalidType { expected } => write!(f, "expected {expected}"),
            Self::TooLong { max, actual } => {
                write!(f, "must be at most {max} characters (got {actual})")
            }
            Self::Empty => write!(f, "must not be empty"),
            Self::InvalidFormat { expected } => write!(f, "must be a valid {expected}"),
            Self::NotAnObject => write!(f, "payload must be a JSON object"),
        }
    }
}

/// A problem attributed to one field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldIssue {
    field: &'static str,
    kind: IssueKind,
}

impl FieldIssue {
    pub(crate) fn new(field: &'static str, kind: IssueKind) -> Self {
        Self { field, kind }
    }

    /// Offending field, or [`PAYLOAD_FIELD`] for whole-payload issues.
    pub fn field(&self) -> &'static str {
        self.field
    }

    /// Issue category.
    pub fn kind(&self) -> IssueKind {
        self.kind
    }
}

impl fmt::Display for FieldIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.kind)
    }
}

#[derive(Serialize)]
struct IssueDto<'a> {
    field: &'a str,
    code: &'a str,
    message: String,
}

/// Every issue found while validating one payload, in column order.
///
/// ## Invariants
/// - Contains at least one issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationFailure {
    issues: Vec<FieldIssue>,
}

impl ValidationFailure {
    pub(crate) fn from_issues(issues: Vec<FieldIssue>) -> Option<Self> {
        if issues.is_empty() {
            None
        } else {
            Some(Self { issues })
        }
    }

    pub(crate) fn not_an_object() -> Self {
        Self {
            issues: vec![FieldIssue::new(PAYLOAD_FIELD, IssueKind::NotAnObject)],
        }
    }

    /// All issues in column order.
    pub fn issues(&self) -> &[FieldIssue] {
        &self.issues
    }

    /// Names of required fields that were absent.
    pub fn missing_fields(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.issues
            .iter()
            .filter(|issue| issue.kind == IssueKind::Missing)
            .map(FieldIssue::field)
    }

    /// Issue reported for `field`, if any.
    pub fn issue_for(&self, field: &str) -> Option<&FieldIssue> {
        self.issues.iter().find(|issue| issue.field == field)
    }

    /// JSON rendering used in API error details.
    ///
    /// # Examples
    /// ```
    /// use site_backend::domain::validation::Schemas;
    /// use serde_json::json;
    ///
    /// let schemas = Schemas::new();
    /// let failure = schemas
    ///     .insert_user()
    ///     .validate(&json!({ "username": "johndoe" }))
    ///     .unwrap_err();
    /// assert_eq!(
    ///     failure.to_details(),
    ///     json!({ "issues": [{
    ///         "field": "password",
    ///         "code": "missing_field",
    ///         "message": "missing required field"
    ///     }] })
    /// );
    /// ```
    pub fn to_details(&self) -> Value {
        let issues: Vec<IssueDto<'_>> = self
            .issues
            .iter()
            .map(|issue| IssueDto {
                field: issue.field,
                code: issue.kind.code(),
                message: issue.kind.to_string(),
            })
            .collect();
        json!({ "issues": issues })
    }
}

impl fmt::Display for ValidationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for issue in &self.issues {
            if !first {
                f.write_str("; ")?;
            }
            first = false;
            write!(f, "{issue}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationFailure {}

impl From<ValidationFailure> for Error {
    fn from(failure: ValidationFailure) -> Self {
        Error::invalid_request(failure.to_string()).with_details(failure.to_details())
    }
}
