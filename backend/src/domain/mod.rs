//! Domain primitives, entity schemas and use-case services.
//!
//! Public surface:
//! - [`Error`] and [`ErrorCode`]: API error payload and its stable codes.
//! - [`TraceId`]: request-scoped correlation identifier.
//! - [`schema`]: declarative table definitions for `users` and
//!   `contact_submissions`.
//! - [`validation`]: validators derived from those schemas.
//! - [`User`], [`NewUser`], [`ContactSubmission`], [`CreateContactSubmission`]:
//!   typed entity views.
//! - [`ContactIntakeService`]: the contact form use case.

pub mod contact_intake;
pub mod contact_submission;
pub mod error;
pub mod ports;
pub mod schema;
pub mod trace_id;
pub mod user;
pub mod validation;

pub use self::contact_intake::ContactIntakeService;
pub use self::contact_submission::{ContactSubmission, CreateContactSubmission};
pub use self::error::{Error, ErrorCode};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{NewUser, User};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use site_backend::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::invalid_request("missing name"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
