//! Diesel table definitions.
//!
//! Must match `migrations/` exactly; the integration suite compares those
//! files with the domain schema declarations.

diesel::table! {
    /// Contact requests left by site visitors.
    contact_submissions (id) {
        /// Serial primary key.
        id -> Int4,
        #[max_length = 255]
        name -> Varchar,
        #[max_length = 255]
        email -> Varchar,
        #[max_length = 255]
        company -> Nullable<Varchar>,
        #[max_length = 255]
        service -> Nullable<Varchar>,
        #[max_length = 2000]
        message -> Varchar,
        created_at -> Timestamptz,
    }
}
