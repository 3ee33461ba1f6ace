//! PostgreSQL persistence adapters built on Diesel.
//!
//! Repositories translate between Diesel rows and domain types. Row structs
//! (`models`) and table definitions (`schema`) stay private to this module.
//!
//! ```ignore
//! use site_backend::outbound::persistence::{
//!     DbPool, DieselContactSubmissionRepository, PoolConfig,
//! };
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/site")).await?;
//! let repo = DieselContactSubmissionRepository::new(pool);
//! ```

mod diesel_contact_submission_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_contact_submission_repository::DieselContactSubmissionRepository;
pub use migrations::{MIGRATIONS, MigrationError, run_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
