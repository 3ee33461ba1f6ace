//! Contact form endpoint.
//!
//! ```text
//! POST /api/v1/contact-submissions
//! {"name":"John Doe","email":"john@example.com","message":"I need help"}
//! ```

use actix_web::{HttpResponse, post, web};
use serde_json::Value;

use crate::domain::{ContactSubmission, CreateContactSubmission, Error};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;

/// Record a contact request from a site visitor.
///
/// Only `name`, `email`, `company`, `service` and `message` are read; any
/// other key, including `id` and `created_at`, is ignored.
#[utoipa::path(
    post,
    path = "/api/v1/contact-submissions",
    request_body = CreateContactSubmission,
    responses(
        (status = 201, description = "Submission stored", body = ContactSubmission),
        (status = 400, description = "Payload rejected", body = Error),
        (status = 409, description = "Submission conflicts with a stored row", body = Error),
        (status = 500, description = "Internal server error", body = Error),
        (status = 503, description = "Storage unavailable", body = Error)
    ),
    tags = ["contact"],
    operation_id = "createContactSubmission"
)]
#[post("/contact-submissions")]
pub async fn create_contact_submission(
    state: web::Data<HttpState>,
    payload: web::Json<Value>,
) -> ApiResult<HttpResponse> {
    let stored = state.contact_intake.submit(&payload).await?;
    Ok(HttpResponse::Created().json(stored))
}
