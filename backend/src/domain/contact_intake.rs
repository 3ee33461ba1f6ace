//! Contact intake service.
//!
//! Implements [`ContactIntake`] by validating untrusted payloads against the
//! public submission validator and handing accepted submissions to the
//! repository port.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{Value, json};
use tracing::{debug, info};

use crate::domain::ports::{
    ContactIntake, ContactSubmissionRepository, ContactSubmissionRepositoryError,
};
use crate::domain::validation::Schemas;
use crate::domain::{ContactSubmission, Error};

/// Contact intake service backed by a submission repository.
#[derive(Clone)]
pub struct ContactIntakeService<R> {
    schemas: Arc<Schemas>,
    repository: Arc<R>,
}

impl<R> ContactIntakeService<R> {
    /// Create a service sharing `schemas` and `repository`.
    pub fn new(schemas: Arc<Schemas>, repository: Arc<R>) -> Self {
        Self {
            schemas,
            repository,
        }
    }

    fn map_repository_error(error: ContactSubmissionRepositoryError) -> Error {
        match error {
            ContactSubmissionRepositoryError::Connection { message } => Error::service_unavailable(
                format!("contact submission storage unavailable: {message}"),
            ),
            ContactSubmissionRepositoryError::Query { message } => {
                Error::internal(format!("contact submission storage error: {message}"))
            }
            ContactSubmissionRepositoryError::Duplicate { constraint } => {
                Error::conflict("contact submission already exists")
                    .with_details(json!({ "constraint": constraint, "code": "duplicate" }))
            }
        }
    }
}

#[async_trait]
impl<R> ContactIntake for ContactIntakeService<R>
where
    R: ContactSubmissionRepository,
{
    async fn submit(&self, payload: &Value) -> Result<ContactSubmission, Error> {
        let submission = self
            .schemas
            .parse_contact_submission_request(payload)
            .inspect_err(|err| debug!(error = %err, "contact submission rejected"))?;

        let stored = self
            .repository
            .insert(&submission)
            .await
            .map_err(|err| {
                debug!(kind = err.kind(), error = %err, "contact submission insert failed");
                Self::map_repository_error(err)
            })?;

        info!(submission_id = stored.id(), "contact submission stored");
        Ok(stored)
    }
}
