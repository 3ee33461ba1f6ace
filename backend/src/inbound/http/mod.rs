//! HTTP inbound adapter exposing the REST endpoints.

pub mod contact_submissions;
pub mod error;
pub mod health;
pub mod state;
pub mod validation;

pub use crate::domain::ApiResult;
