//! Driven port for storing contact submissions.
use async_trait::async_trait;

use crate::domain::{ContactSubmission, CreateContactSubmission};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by contact submission adapters.
    pub enum ContactSubmissionRepositoryError {
        /// Storage could not be reached.
        Connection { message: String } => "contact submission repository connection failed: {message}",
        /// Statement failed during execution.
        Query { message: String } => "contact submission repository query failed: {message}",
        /// A uniqueness constraint rejected the row.
        Duplicate { constraint: String } => "contact submission violates unique constraint {constraint}",
    }
}

/// Storage for accepted contact submissions.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContactSubmissionRepository: Send + Sync {
    /// Persist `submission`, letting storage assign `id` and `created_at`.
    async fn insert(
        &self,
        submission: &CreateContactSubmission,
    ) -> Result<ContactSubmission, ContactSubmissionRepositoryError>;
}
