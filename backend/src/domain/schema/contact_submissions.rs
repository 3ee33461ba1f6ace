//! `contact_submissions` table definition.

use super::{Column, ColumnDefault, EntitySchema};

/// Messages left through the public contact form.
pub const CONTACT_SUBMISSIONS: EntitySchema = EntitySchema::new(
    "contact_submissions",
    &[
        Column::serial("id").primary_key(),
        Column::varchar("name", 255).not_null(),
        Column::varchar("email", 255).not_null(),
        Column::varchar("company", 255),
        Column::varchar("service", 255),
        Column::varchar("message", 2000).not_null(),
        Column::timestamp("created_at")
            .not_null()
            .default(ColumnDefault::Now),
    ],
);
