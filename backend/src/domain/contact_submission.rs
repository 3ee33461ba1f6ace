//! Contact submission entity views.
//!
//! [`CreateContactSubmission`] is what a visitor may send; [`ContactSubmission`]
//! is the stored row returned to callers.

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::validation::{RecordError, ValidatedRecord};

/// Public projection of the `contact_submissions` insert view.
///
/// `id` and `created_at` are never client supplied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct CreateContactSubmission {
    #[schema(example = "John Doe")]
    name: String,
    /// Free-form contact address; its format is not checked.
    #[schema(example = "john@example.com")]
    email: String,
    #[schema(example = "Acme Corp")]
    company: Option<String>,
    #[schema(example = "accounting")]
    service: Option<String>,
    #[schema(example = "I need help with my accounting")]
    message: String,
}

impl CreateContactSubmission {
    /// Reassemble a submission from values storage already constrained.
    pub(crate) fn from_stored(
        name: String,
        email: String,
        company: Option<String>,
        service: Option<String>,
        message: String,
    ) -> Self {
        Self {
            name,
            email,
            company,
            service,
            message,
        }
    }

    /// Visitor's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Contact address, exactly as supplied.
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Organisation, if given.
    pub fn company(&self) -> Option<&str> {
        self.company.as_deref()
    }

    /// Requested service, if given.
    pub fn service(&self) -> Option<&str> {
        self.service.as_deref()
    }

    /// Message body.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl TryFrom<ValidatedRecord> for CreateContactSubmission {
    type Error = RecordError;

    fn try_from(mut record: ValidatedRecord) -> Result<Self, Self::Error> {
        Ok(Self {
            name: record.take_text("name")?,
            email: record.take_text("email")?,
            company: record.take_optional_text("company")?,
            service: record.take_optional_text("service")?,
            message: record.take_text("message")?,
        })
    }
}

/// Stored contact submission, i.e. the select view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct ContactSubmission {
    #[schema(example = 1)]
    id: i32,
    #[schema(example = "John Doe")]
    name: String,
    #[schema(example = "john@example.com")]
    email: String,
    #[schema(example = "Acme Corp")]
    company: Option<String>,
    #[schema(example = "accounting")]
    service: Option<String>,
    #[schema(example = "I need help with my accounting")]
    message: String,
    created_at: DateTime<Utc>,
}

impl ContactSubmission {
    /// Combine an accepted submission with its storage-generated columns.
    pub fn new(id: i32, submission: CreateContactSubmission, created_at: DateTime<Utc>) -> Self {
        let CreateContactSubmission {
            name,
            email,
            company,
            service,
            message,
        } = submission;
        Self {
            id,
            name,
            email,
            company,
            service,
            message,
            created_at,
        }
    }

    /// Sequential identifier.
    pub fn id(&self) -> i32 {
        self.id
    }

    /// Visitor's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Contact address.
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Organisation, if given.
    pub fn company(&self) -> Option<&str> {
        self.company.as_deref()
    }

    /// Requested service, if given.
    pub fn service(&self) -> Option<&str> {
        self.service.as_deref()
    }

    /// Message body.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Time the submission was stored.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

impl TryFrom<ValidatedRecord> for ContactSubmission {
    type Error = RecordError;

    fn try_from(mut record: ValidatedRecord) -> Result<Self, Self::Error> {
        Ok(Self {
            id: record.take_integer("id")?,
            name: record.take_text("name")?,
            email: record.take_text("email")?,
            company: record.take_optional_text("company")?,
            service: record.take_optional_text("service")?,
            message: record.take_text("message")?,
            created_at: record.take_timestamp("created_at")?,
        })
    }
}
