//! User entity views.
//!
//! [`NewUser`] is the insert view and [`User`] the select view of the `users`
//! table. Both are produced from validated records so their length and
//! presence invariants hold by construction. Passwords never leave through
//! `Serialize` or `Debug`.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::domain::validation::{RecordError, ValidatedRecord};

const REDACTED: &str = "<redacted>";

/// Fields accepted when creating a user.
///
/// `id` and `created_at` are normally generated by storage.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct NewUser {
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<Uuid>,
    username: String,
    #[serde(skip_serializing)]
    password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    created_at: Option<DateTime<Utc>>,
}

impl NewUser {
    /// Requested identifier, when the caller supplied one.
    pub fn id(&self) -> Option<Uuid> {
        self.id
    }

    /// Unique login name.
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Password exactly as supplied.
    pub fn password(&self) -> &str {
        &self.password
    }

    /// Requested creation time, when the caller supplied one.
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }
}

impl fmt::Debug for NewUser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewUser")
            .field("id", &self.id)
            .field("username", &self.username)
            .field("password", &REDACTED)
            .field("created_at", &self.created_at)
            .finish()
    }
}

impl TryFrom<ValidatedRecord> for NewUser {
    type Error = RecordError;

    fn try_from(mut record: ValidatedRecord) -> Result<Self, Self::Error> {
        Ok(Self {
            id: record.take_optional_uuid("id")?,
            username: record.take_text("username")?,
            password: record.take_text("password")?,
            created_at: record.take_optional_timestamp("created_at")?,
        })
    }
}

/// Persisted user row.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct User {
    id: Uuid,
    username: String,
    #[serde(skip_serializing)]
    password: String,
    created_at: DateTime<Utc>,
}

impl User {
    /// Assemble a stored user from an accepted insert and the generated columns.
    pub fn new(id: Uuid, user: NewUser, created_at: DateTime<Utc>) -> Self {
        Self {
            id: user.id.unwrap_or(id),
            username: user.username,
            password: user.password,
            created_at: user.created_at.unwrap_or(created_at),
        }
    }

    /// Stable identifier.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Unique login name.
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Stored password.
    pub fn password(&self) -> &str {
        &self.password
    }

    /// Creation time.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

impl fmt::Debug for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("username", &self.username)
            .field("password", &REDACTED)
            .field("created_at", &self.created_at)
            .finish()
    }
}

impl TryFrom<ValidatedRecord> for User {
    type Error = RecordError;

    fn try_from(mut record: ValidatedRecord) -> Result<Self, Self::Error> {
        Ok(Self {
            id: record.take_uuid("id")?,
            username: record.take_text("username")?,
            password: record.take_text("password")?,
            created_at: record.take_timestamp("created_at")?,
        })
    }
}

#[cfg(test)]
mod tests {
    //! Conversion and redaction coverage for user views.
    use super::*;
    use crate::domain::validation::Schemas;
    use chrono::TimeZone;
    use serde_json::{Value, json};

    fn new_user() -> NewUser {
        Schemas::new()
            .parse_new_user(&json!({"username": "johndoe", "password": "securePassword123"}))
            .expect("valid user payload")
    }

    #[test]
    fn insert_view_leaves_generated_columns_empty() {
        let user = new_user();
        assert_eq!(user.username(), "johndoe");
        assert_eq!(user.password(), "securePassword123");
        assert!(user.id().is_none());
        assert!(user.created_at().is_none());
    }

    #[test]
    fn debug_output_redacts_passwords() {
        let rendered = format!("{:?}", new_user());
        assert!(rendered.contains("johndoe"));
        assert!(!rendered.contains("securePassword123"));
    }

    #[test]
    fn stored_user_takes_generated_columns_when_not_supplied() {
        let id = Uuid::new_v4();
        let at = Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap();
        let user = User::new(id, new_user(), at);
        assert_eq!(user.id(), id);
        assert_eq!(user.created_at(), at);
    }

    /// Column values as storage would hand them back.
    fn stored_row(user: &User) -> Value {
        json!({
            "id": user.id(),
            "username": user.username(),
            "password": user.password(),
            "created_at": user.created_at(),
        })
    }

    fn stored_user() -> User {
        User::new(
            Uuid::new_v4(),
            new_user(),
            Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap(),
        )
    }

    #[test]
    fn stored_user_round_trips_through_select_view() {
        let user = stored_user();
        let reread = Schemas::new()
            .parse_user(&stored_row(&user))
            .expect("row matches select view");
        assert_eq!(reread, user);
    }

    #[test]
    fn serialised_views_omit_passwords() {
        let stored = serde_json::to_value(stored_user()).expect("serialise user");
        assert_eq!(stored.get("username"), Some(&json!("johndoe")));
        assert!(stored.get("password").is_none());

        let pending = serde_json::to_value(new_user()).expect("serialise new user");
        assert_eq!(pending, json!({ "username": "johndoe" }));
    }
}
