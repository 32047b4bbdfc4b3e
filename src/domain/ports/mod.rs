//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod activity_repository;
mod contact_repository;
mod deal_repository;
mod identity_repository;
mod lead_repository;
mod password_hasher;
mod repository_error;

#[cfg(test)]
pub use activity_repository::MockActivityRepository;
pub use activity_repository::ActivityRepository;
#[cfg(test)]
pub use contact_repository::MockContactRepository;
pub use contact_repository::ContactRepository;
#[cfg(test)]
pub use deal_repository::MockDealRepository;
pub use deal_repository::DealRepository;
#[cfg(test)]
pub use identity_repository::MockIdentityRepository;
pub use identity_repository::IdentityRepository;
#[cfg(test)]
pub use lead_repository::MockLeadRepository;
pub use lead_repository::LeadRepository;
#[cfg(test)]
pub use password_hasher::MockPasswordHasher;
pub use password_hasher::{PasswordHashError, PasswordHasher};
pub use repository_error::RepositoryError;
