//! Contact site backend.
//!
//! Entity schemas for `users` and `contact_submissions`, the validators
//! derived from them, and the HTTP surface that accepts contact requests.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
