//! Shared HTTP adapter state.
//!
//! Handlers take this via `web::Data` so they depend only on domain ports
//! and stay testable without I/O.

use std::sync::Arc;

use crate::domain::ports::ContactIntake;

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub contact_intake: Arc<dyn ContactIntake>,
}

impl HttpState {
    /// Bundle the port implementations used by the handlers.
    pub fn new(contact_intake: Arc<dyn ContactIntake>) -> Self {
        Self { contact_intake }
    }
}
