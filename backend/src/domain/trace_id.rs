//! Per-request correlation id.
//!
//! The [`Trace`](crate::Trace) middleware mints one [`TraceId`] for every
//! HTTP request and runs the handler inside [`TraceId::scope`]. Anything
//! created while that request is being served, most importantly a rejected
//! contact submission's [`Error`](crate::domain::Error), picks the id up from
//! task-local storage and it is echoed back in the `trace-id` header.
//!
//! The id does not follow work onto `tokio::spawn` or `spawn_blocking`;
//! re-enter the scope there if the spawned work can fail.

use std::fmt;
use std::future::Future;
use std::str::FromStr;

use tokio::task_local;
use uuid::Uuid;

/// Response header carrying the request's [`TraceId`].
pub const TRACE_ID_HEADER: &str = "trace-id";

task_local! {
    static CURRENT: TraceId;
}

/// Correlation id for one inbound request.
///
/// # Examples
/// ```
/// use site_backend::TraceId;
/// use site_backend::domain::Error;
///
/// # tokio::runtime::Builder::new_current_thread().build().map(|rt| rt.block_on(async {
/// let id: TraceId = "6f1c1f8e-2b1e-4d7a-9c3e-0a4b5c6d7e8f".parse().expect("uuid");
/// let rejected = TraceId::scope(id, async { Error::invalid_request("name is required") }).await;
/// assert_eq!(rejected.trace_id(), Some("6f1c1f8e-2b1e-4d7a-9c3e-0a4b5c6d7e8f"));
/// # })).ok();
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TraceId(Uuid);

impl TraceId {
    /// Fresh random id for a new request.
    #[must_use]
    pub(crate) fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Id of the request currently being served, if any.
    #[must_use]
    pub fn current() -> Option<Self> {
        CURRENT.try_with(|id| *id).ok()
    }

    /// Run `fut` with `id` as the current request id.
    pub async fn scope<Fut>(id: TraceId, fut: Fut) -> Fut::Output
    where
        Fut: Future,
    {
        CURRENT.scope(id, fut).await
    }
}

impl fmt::Display for TraceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0.hyphenated(), f)
    }
}

impl FromStr for TraceId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}
