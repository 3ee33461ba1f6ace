//! PostgreSQL-backed `ContactSubmissionRepository`.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::debug;

use crate::domain::ports::{ContactSubmissionRepository, ContactSubmissionRepositoryError};
use crate::domain::{ContactSubmission, CreateContactSubmission};

use super::models::{ContactSubmissionRow, NewContactSubmissionRow};
use super::pool::{DbPool, PoolError};
use super::schema::contact_submissions;

/// Diesel implementation of [`ContactSubmissionRepository`].
#[derive(Clone)]
pub struct DieselContactSubmissionRepository {
    pool: DbPool,
}

impl DieselContactSubmissionRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> ContactSubmissionRepositoryError {
    ContactSubmissionRepositoryError::connection(error.message())
}

fn map_diesel_error(error: diesel::result::Error) -> ContactSubmissionRepositoryError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
            ContactSubmissionRepositoryError::duplicate(
                info.constraint_name().unwrap_or("unknown"),
            )
        }
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            ContactSubmissionRepositoryError::connection("database connection error")
        }
        DieselError::QueryBuilderError(_) => {
            ContactSubmissionRepositoryError::query("database query error")
        }
        _ => ContactSubmissionRepositoryError::query("database error"),
    }
}

#[async_trait]
impl ContactSubmissionRepository for DieselContactSubmissionRepository {
    async fn insert(
        &self,
        submission: &CreateContactSubmission,
    ) -> Result<ContactSubmission, ContactSubmissionRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = diesel::insert_into(contact_submissions::table)
            .values(NewContactSubmissionRow::from(submission))
            .returning(ContactSubmissionRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(row.into())
    }
}
