//! Driving port for accepting contact requests from site visitors.
//!
//! HTTP handlers hand the raw JSON body to this port; validation against
//! the public submission shape happens behind it.

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::{ContactSubmission, Error};

/// Use-case port for recording a contact request.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContactIntake: Send + Sync {
    /// Validate `payload` and store it.
    ///
    /// Rejected payloads surface as [`ErrorCode::InvalidRequest`] with the
    /// field issues attached as details.
    ///
    /// [`ErrorCode::InvalidRequest`]: crate::domain::ErrorCode::InvalidRequest
    async fn submit(&self, payload: &Value) -> Result<ContactSubmission, Error>;
}
