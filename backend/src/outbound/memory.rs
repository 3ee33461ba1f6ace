//! In-memory contact submission storage.

use std::sync::Arc;
use std::sync::atomic::{AtomicI32, Ordering};

use async_trait::async_trait;
use mockable::Clock;

use crate::domain::ports::{ContactSubmissionRepository, ContactSubmissionRepositoryError};
use crate::domain::{ContactSubmission, CreateContactSubmission};

/// Process-local repository assigning sequential ids from 1.
///
/// Only the id sequence is kept; accepted rows are returned to the caller and
/// then dropped, so memory use does not grow with the number of submissions.
pub struct InMemoryContactSubmissionRepository {
    clock: Arc<dyn Clock>,
    last_id: AtomicI32,
}

impl InMemoryContactSubmissionRepository {
    /// Create a repository stamping rows with `clock`.
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            last_id: AtomicI32::new(0),
        }
    }

    fn next_id(&self) -> Result<i32, ContactSubmissionRepositoryError> {
        self.last_id
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| last.checked_add(1))
            .map(|last| last + 1)
            .map_err(|_| ContactSubmissionRepositoryError::query("submission id sequence exhausted"))
    }
}

#[async_trait]
impl ContactSubmissionRepository for InMemoryContactSubmissionRepository {
    async fn insert(
        &self,
        submission: &CreateContactSubmission,
    ) -> Result<ContactSubmission, ContactSubmissionRepositoryError> {
        let id = self.next_id()?;
        Ok(ContactSubmission::new(id, submission.clone(), self.clock.utc()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::validation::Schemas;
    use chrono::{DateTime, Local, TimeZone, Utc};
    use serde_json::json;

    struct FixedClock(DateTime<Utc>);

    impl Clock for FixedClock {
        fn local(&self) -> DateTime<Local> {
            self.0.with_timezone(&Local)
        }

        fn utc(&self) -> DateTime<Utc> {
            self.0
        }
    }

    fn at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 6, 9, 30, 0).unwrap()
    }

    fn repository() -> InMemoryContactSubmissionRepository {
        InMemoryContactSubmissionRepository::new(Arc::new(FixedClock(at())))
    }

    fn submission(name: &str) -> CreateContactSubmission {
        Schemas::new()
            .parse_contact_submission_request(&json!({
                "name": name,
                "email": "visitor@example.com",
                "message": "Hello"
            }))
            .expect("valid submission")
    }

    #[tokio::test]
    async fn assigns_sequential_ids_and_clock_time() {
        let repo = repository();

        let first = repo.insert(&submission("Ada")).await.expect("first insert");
        let second = repo.insert(&submission("Grace")).await.expect("second insert");

        assert_eq!((first.id(), second.id()), (1, 2));
        assert_eq!(first.created_at(), at());
        assert_eq!(second.name(), "Grace");
    }

    #[tokio::test]
    async fn concurrent_inserts_receive_distinct_ids() {
        let repo = Arc::new(repository());
        let inserts = (0..32).map(|n| {
            let repo = Arc::clone(&repo);
            tokio::spawn(async move {
                repo.insert(&submission(&format!("visitor {n}")))
                    .await
                    .map(|row| row.id())
            })
        });

        let mut ids = Vec::new();
        for handle in inserts.collect::<Vec<_>>() {
            ids.push(handle.await.expect("task joins").expect("insert"));
        }
        ids.sort_unstable();
        assert_eq!(ids, (1..=32).collect::<Vec<_>>());
    }

    #[tokio::test]
    async fn keeps_only_the_id_sequence_after_many_inserts() {
        let repo = repository();
        for n in 0..1_000 {
            repo.insert(&submission(&format!("visitor {n}")))
                .await
                .expect("insert");
        }
        assert_eq!(repo.last_id.load(Ordering::SeqCst), 1_000);
    }

    #[tokio::test]
    async fn reports_an_exhausted_id_sequence() {
        let repo = InMemoryContactSubmissionRepository {
            clock: Arc::new(FixedClock(at())),
            last_id: AtomicI32::new(i32::MAX),
        };
        let err = repo
            .insert(&submission("Ada"))
            .await
            .expect_err("no ids left");
        assert_eq!(err.kind(), "query");
        assert_eq!(repo.last_id.load(Ordering::SeqCst), i32::MAX);
    }
}
