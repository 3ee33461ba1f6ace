//! Embedded schema migrations.
//!
//! The SQL under `migrations/` is compiled into the binary and applied on
//! startup over a short-lived synchronous connection.

use diesel::{Connection, PgConnection};
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::info;

/// Migrations shipped with the service.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Failure to bring the database schema up to date.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MigrationError {
    #[error("failed to connect for migrations: {message}")]
    Connect { message: String },
    #[error("failed to apply migrations: {message}")]
    Apply { message: String },
}

/// Apply every pending migration and return the versions that ran.
///
/// Blocks; call it from `spawn_blocking` inside async code.
///
/// # Errors
/// [`MigrationError::Connect`] when the database is unreachable and
/// [`MigrationError::Apply`] when a migration fails.
pub fn run_migrations(database_url: &str) -> Result<Vec<String>, MigrationError> {
    let mut conn = PgConnection::establish(database_url).map_err(|err| MigrationError::Connect {
        message: err.to_string(),
    })?;
    let applied: Vec<String> = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|err| MigrationError::Apply {
            message: err.to_string(),
        })?
        .into_iter()
        .map(|version| version.to_string())
        .collect();
    info!(count = applied.len(), versions = ?applied, "database migrations applied");
    Ok(applied)
}
