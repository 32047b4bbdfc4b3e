//! Port abstraction for contact persistence adapters.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::Contact;

use super::RepositoryError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContactRepository: Send + Sync {
    /// Fetch every contact, ordered by creation time.
    async fn find_all(&self) -> Result<Vec<Contact>, RepositoryError>;

    /// Fetch a contact by identifier.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Contact>, RepositoryError>;

    /// Check whether a contact exists without loading it.
    ///
    /// Used by deal and activity writes to validate references.
    async fn exists_by_id(&self, id: Uuid) -> Result<bool, RepositoryError>;

    /// Insert or update a contact record.
    async fn save(&self, contact: &Contact) -> Result<(), RepositoryError>;

    /// Delete a contact, returning whether a record existed.
    async fn delete_by_id(&self, id: Uuid) -> Result<bool, RepositoryError>;
}
