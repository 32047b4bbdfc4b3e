//! Port abstraction for activity persistence adapters.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::{Activity, ActivityKind};

use super::RepositoryError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ActivityRepository: Send + Sync {
    /// Fetch every activity, ordered by creation time.
    async fn find_all(&self) -> Result<Vec<Activity>, RepositoryError>;

    /// Fetch an activity by identifier.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Activity>, RepositoryError>;

    /// Fetch all activities referencing one contact.
    async fn find_by_contact_id(&self, contact_id: Uuid)
    -> Result<Vec<Activity>, RepositoryError>;

    /// Fetch all activities referencing one deal.
    async fn find_by_deal_id(&self, deal_id: Uuid) -> Result<Vec<Activity>, RepositoryError>;

    /// Fetch activities whose due date falls within the half-open window
    /// `[start, end)`.
    async fn find_due_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Activity>, RepositoryError>;

    /// Fetch incomplete activities whose due date is before `cutoff`.
    async fn find_overdue(&self, cutoff: DateTime<Utc>) -> Result<Vec<Activity>, RepositoryError>;

    /// Fetch activities filtered by completion status.
    async fn find_by_completed(&self, completed: bool)
    -> Result<Vec<Activity>, RepositoryError>;

    /// Fetch activities of one kind.
    async fn find_by_kind(&self, kind: ActivityKind) -> Result<Vec<Activity>, RepositoryError>;

    /// Insert or update an activity record.
    async fn save(&self, activity: &Activity) -> Result<(), RepositoryError>;

    /// Delete an activity, returning whether a record existed.
    async fn delete_by_id(&self, id: Uuid) -> Result<bool, RepositoryError>;
}
