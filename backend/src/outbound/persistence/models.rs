//! Diesel row types. Internal to the persistence adapter.

use chrono::{DateTime, Utc};
use diesel::prelude::*;

use super::schema::contact_submissions;
use crate::domain::{ContactSubmission, CreateContactSubmission};

/// Row as read back from `contact_submissions`.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = contact_submissions)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ContactSubmissionRow {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub company: Option<String>,
    pub service: Option<String>,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

impl From<ContactSubmissionRow> for ContactSubmission {
    fn from(row: ContactSubmissionRow) -> Self {
        let submission = CreateContactSubmission::from_stored(
            row.name,
            row.email,
            row.company,
            row.service,
            row.message,
        );
        ContactSubmission::new(row.id, submission, row.created_at)
    }
}

/// Insertable projection; `id` and `created_at` come from column defaults.
#[derive(Debug, Insertable)]
#[diesel(table_name = contact_submissions)]
pub(crate) struct NewContactSubmissionRow<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub company: Option<&'a str>,
    pub service: Option<&'a str>,
    pub message: &'a str,
}

impl<'a> From<&'a CreateContactSubmission> for NewContactSubmissionRow<'a> {
    fn from(submission: &'a CreateContactSubmission) -> Self {
        Self {
            name: submission.name(),
            email: submission.email(),
            company: submission.company(),
            service: submission.service(),
            message: submission.message(),
        }
    }
}
