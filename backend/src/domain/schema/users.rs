//! `users` table definition.

use super::{Column, ColumnDefault, EntitySchema};

/// Registered site users.
///
/// `username` uniqueness is declared here but enforced by storage.
pub const USERS: EntitySchema = EntitySchema::new(
    "users",
    &[
        Column::uuid("id")
            .primary_key()
            .default(ColumnDefault::RandomUuid),
        Column::varchar("username", 255).not_null().unique(),
        Column::varchar("password", 255).not_null(),
        Column::timestamp("created_at")
            .not_null()
            .default(ColumnDefault::Now),
    ],
);
