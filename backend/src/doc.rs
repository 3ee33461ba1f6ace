//! OpenAPI documentation.
//!
//! [`ApiDoc`] collects every HTTP endpoint and the schemas they exchange.
//! Swagger UI serves it in debug builds and `openapi-dump` prints it for
//! external tooling.

use utoipa::OpenApi;

use crate::domain::{ContactSubmission, CreateContactSubmission, Error, ErrorCode};
use crate::inbound::http::health::HealthStatus;

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Site backend API",
        description = "Contact form intake and health checks for the marketing site."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::contact_submissions::create_contact_submission,
        crate::inbound::http::health::health,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ContactSubmission,
        CreateContactSubmission,
        Error,
        ErrorCode,
        HealthStatus
    )),
    tags(
        (name = "contact", description = "Contact requests from site visitors"),
        (name = "health", description = "Status and orchestration probes")
    )
)]
pub struct ApiDoc;
