//! Request body extraction rules shared by JSON endpoints.
//!
//! Bodies are parsed into untyped [`serde_json::Value`]s and checked by the
//! domain validators, so extraction only has to reject bytes that are not
//! JSON at all.

use actix_web::HttpRequest;
use actix_web::error::JsonPayloadError;
use actix_web::web::JsonConfig;
use serde_json::json;
use tracing::debug;

use crate::domain::Error;

/// Largest accepted JSON body.
///
/// Sized for a maximum-length submission written entirely as `\uXXXX`
/// surrogate-pair escapes (12 bytes per character).
pub const MAX_JSON_BODY_BYTES: usize = 64 * 1024;

fn payload_error(err: &JsonPayloadError) -> (&'static str, &'static str) {
    match err {
        JsonPayloadError::ContentType => (
            "unsupported_content_type",
            "request body must be sent as application/json",
        ),
        JsonPayloadError::Overflow { .. } | JsonPayloadError::OverflowKnownLength { .. } => {
            ("payload_too_large", "request body is too large")
        }
        _ => ("malformed_json", "request body must be valid JSON"),
    }
}

fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let (code, message) = payload_error(&err);
    debug!(error = %err, code, "rejected request body");
    Error::invalid_request(message)
        .with_details(json!({ "code": code }))
        .into()
}

/// Extractor configuration for JSON endpoints.
pub fn json_config() -> JsonConfig {
    JsonConfig::default()
        .limit(MAX_JSON_BODY_BYTES)
        .error_handler(json_error_handler)
}
