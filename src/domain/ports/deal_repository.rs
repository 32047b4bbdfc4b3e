//! Port abstraction for deal persistence adapters.

use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;

use crate::domain::{Deal, DealStage};

use super::RepositoryError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DealRepository: Send + Sync {
    /// Fetch every deal, ordered by creation time.
    async fn find_all(&self) -> Result<Vec<Deal>, RepositoryError>;

    /// Fetch a deal by identifier.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Deal>, RepositoryError>;

    /// Check whether a deal exists without loading it.
    ///
    /// Used by activity writes to validate references.
    async fn exists_by_id(&self, id: Uuid) -> Result<bool, RepositoryError>;

    /// Fetch all deals belonging to one contact.
    async fn find_by_contact_id(&self, contact_id: Uuid) -> Result<Vec<Deal>, RepositoryError>;

    /// Fetch all deals currently in the given stage.
    async fn find_by_stage(&self, stage: DealStage) -> Result<Vec<Deal>, RepositoryError>;

    /// Fetch deals whose close date falls on or before the given date.
    async fn find_by_close_date_on_or_before(
        &self,
        date: NaiveDate,
    ) -> Result<Vec<Deal>, RepositoryError>;

    /// Fetch deals whose probability meets or exceeds the threshold.
    async fn find_by_probability_at_least(
        &self,
        probability: u8,
    ) -> Result<Vec<Deal>, RepositoryError>;

    /// Insert or update a deal record.
    async fn save(&self, deal: &Deal) -> Result<(), RepositoryError>;

    /// Delete a deal, returning whether a record existed.
    async fn delete_by_id(&self, id: Uuid) -> Result<bool, RepositoryError>;
}
