//! The validator set used by the application.

use serde_json::Value;

use super::{RecordError, ValidationFailure, Validator};
use crate::domain::schema::{CONTACT_SUBMISSIONS, USERS};
use crate::domain::{ContactSubmission, CreateContactSubmission, Error, NewUser, User};

/// Fields a site visitor may supply when leaving a contact request.
pub const PUBLIC_SUBMISSION_FIELDS: [&str; 5] = ["name", "email", "company", "service", "message"];

/// Failure to turn a payload into a typed entity.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// The payload was rejected by the validator.
    #[error(transparent)]
    Invalid(ValidationFailure),
    /// The validator and the target type disagree about the record shape.
    #[error(transparent)]
    Shape(RecordError),
}

impl From<ParseError> for Error {
    fn from(error: ParseError) -> Self {
        match error {
            ParseError::Invalid(failure) => failure.into(),
            ParseError::Shape(shape) => Error::internal(shape.to_string()),
        }
    }
}

/// Validators for every entity, built once at startup and shared read-only.
///
/// # Examples
/// ```
/// use site_backend::domain::validation::Schemas;
/// use serde_json::json;
///
/// let schemas = Schemas::new();
/// let result = schemas
///     .create_contact_submission()
///     .validate(&json!({ "name": "John Doe" }));
/// let failure = result.expect_err("email and message are required");
/// let missing: Vec<_> = failure.missing_fields().collect();
/// assert_eq!(missing, ["email", "message"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schemas {
    insert_user: Validator,
    select_user: Validator,
    create_contact_submission: Validator,
    select_contact_submission: Validator,
}

impl Default for Schemas {
    fn default() -> Self {
        Self {
            insert_user: Validator::insert(&USERS),
            select_user: Validator::select(&USERS),
            create_contact_submission: Validator::insert(&CONTACT_SUBMISSIONS)
                .pick(&PUBLIC_SUBMISSION_FIELDS),
            select_contact_submission: Validator::select(&CONTACT_SUBMISSIONS),
        }
    }
}

impl Schemas {
    /// Derive every validator from the entity schemas.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert view of `users`.
    pub fn insert_user(&self) -> &Validator {
        &self.insert_user
    }

    /// Select view of `users`.
    pub fn select_user(&self) -> &Validator {
        &self.select_user
    }

    /// Public submission validator: the `contact_submissions` insert view
    /// restricted to [`PUBLIC_SUBMISSION_FIELDS`].
    pub fn create_contact_submission(&self) -> &Validator {
        &self.create_contact_submission
    }

    /// Select view of `contact_submissions`.
    pub fn select_contact_submission(&self) -> &Validator {
        &self.select_contact_submission
    }

    /// Parse a user registration payload.
    pub fn parse_new_user(&self, payload: &Value) -> Result<NewUser, ParseError> {
        self.insert_user.parse(payload)
    }

    /// Parse a persisted user row.
    pub fn parse_user(&self, payload: &Value) -> Result<User, ParseError> {
        self.select_user.parse(payload)
    }

    /// Parse an untrusted contact form payload.
    pub fn parse_contact_submission_request(
        &self,
        payload: &Value,
    ) -> Result<CreateContactSubmission, ParseError> {
        self.create_contact_submission.parse(payload)
    }

    /// Parse a persisted contact submission row.
    pub fn parse_contact_submission(&self, payload: &Value) -> Result<ContactSubmission, ParseError> {
        self.select_contact_submission.parse(payload)
    }
}
