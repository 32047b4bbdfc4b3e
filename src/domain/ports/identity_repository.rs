//! Port abstraction for identity persistence adapters.

use async_trait::async_trait;

use crate::domain::Identity;

use super::RepositoryError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IdentityRepository: Send + Sync {
    /// Fetch an identity by its unique email.
    async fn find_by_email(&self, email: &str) -> Result<Option<Identity>, RepositoryError>;

    /// Check whether an identity with the given email exists.
    async fn exists_by_email(&self, email: &str) -> Result<bool, RepositoryError>;

    /// Insert or update an identity record.
    async fn save(&self, identity: &Identity) -> Result<(), RepositoryError>;
}
