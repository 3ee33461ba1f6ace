//! Domain ports for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod contact_intake;
mod contact_submission_repository;

#[cfg(test)]
pub use contact_intake::MockContactIntake;
pub use contact_intake::ContactIntake;
#[cfg(test)]
pub use contact_submission_repository::MockContactSubmissionRepository;
pub use contact_submission_repository::{
    ContactSubmissionRepository, ContactSubmissionRepositoryError,
};
