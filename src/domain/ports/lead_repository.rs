//! Port abstraction for lead persistence adapters.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::Lead;

use super::RepositoryError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LeadRepository: Send + Sync {
    /// Fetch every lead, ordered by creation time.
    async fn find_all(&self) -> Result<Vec<Lead>, RepositoryError>;

    /// Fetch a lead by identifier.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Lead>, RepositoryError>;

    /// Fetch a lead by its unique email.
    async fn find_by_email(&self, email: &str) -> Result<Option<Lead>, RepositoryError>;

    /// Insert or update a lead record.
    async fn save(&self, lead: &Lead) -> Result<(), RepositoryError>;

    /// Delete a lead, returning whether a record existed.
    async fn delete_by_id(&self, id: Uuid) -> Result<bool, RepositoryError>;
}
