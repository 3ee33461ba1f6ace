//! Outbound adapters implementing domain ports.
//!
//! - [`persistence`]: PostgreSQL repositories built on Diesel.
//! - [`memory`]: process-local repositories used when no database is
//!   configured and in tests.
//!
//! Adapters translate between domain types and storage representations and
//! hold no business rules.

pub mod memory;
pub mod persistence;
