//! Activity CRUD, scheduling queries, and optional reference validation.
//!
//! Contact and deal references are each validated only when the request
//! carries them; an unassociated activity is valid.

use std::sync::Arc;

use chrono::{Duration, Utc};
use uuid::Uuid;

use crate::domain::ports::{ActivityRepository, ContactRepository, DealRepository};
use crate::domain::{Activity, ActivityDraft, ActivityKind, ActivityPatch, Error};

/// Window used by the upcoming query.
const UPCOMING_HOURS: i64 = 24;

/// Activity use-cases over the activity, contact, and deal stores.
#[derive(Clone)]
pub struct ActivityService {
    activities: Arc<dyn ActivityRepository>,
    contacts: Arc<dyn ContactRepository>,
    deals: Arc<dyn DealRepository>,
}

impl ActivityService {
    pub fn new(
        activities: Arc<dyn ActivityRepository>,
        contacts: Arc<dyn ContactRepository>,
        deals: Arc<dyn DealRepository>,
    ) -> Self {
        Self {
            activities,
            contacts,
            deals,
        }
    }

    pub async fn list(&self) -> Result<Vec<Activity>, Error> {
        Ok(self.activities.find_all().await?)
    }

    pub async fn get(&self, id: Uuid) -> Result<Activity, Error> {
        self.activities
            .find_by_id(id)
            .await?
            .ok_or_else(Self::not_found)
    }

    pub async fn create(&self, draft: ActivityDraft) -> Result<Activity, Error> {
        self.check_references(draft.contact_id, draft.deal_id)
            .await?;
        let activity = Activity::create(draft, Utc::now());
        self.activities.save(&activity).await?;
        Ok(activity)
    }

    /// Merge a partial update into an existing activity.
    pub async fn update(&self, id: Uuid, patch: ActivityPatch) -> Result<Activity, Error> {
        let mut activity = self.get(id).await?;
        self.check_references(patch.contact_id, patch.deal_id)
            .await?;
        activity.apply(patch, Utc::now());
        self.activities.save(&activity).await?;
        Ok(activity)
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), Error> {
        if self.activities.delete_by_id(id).await? {
            Ok(())
        } else {
            Err(Self::not_found())
        }
    }

    pub async fn list_by_contact(&self, contact_id: Uuid) -> Result<Vec<Activity>, Error> {
        Ok(self.activities.find_by_contact_id(contact_id).await?)
    }

    pub async fn list_by_deal(&self, deal_id: Uuid) -> Result<Vec<Activity>, Error> {
        Ok(self.activities.find_by_deal_id(deal_id).await?)
    }

    /// Activities due within the next twenty-four hours.
    pub async fn upcoming(&self) -> Result<Vec<Activity>, Error> {
        let now = Utc::now();
        Ok(self
            .activities
            .find_due_between(now, now + Duration::hours(UPCOMING_HOURS))
            .await?)
    }

    /// Incomplete activities whose due date has passed.
    pub async fn overdue(&self) -> Result<Vec<Activity>, Error> {
        Ok(self.activities.find_overdue(Utc::now()).await?)
    }

    pub async fn completed(&self) -> Result<Vec<Activity>, Error> {
        Ok(self.activities.find_by_completed(true).await?)
    }

    pub async fn list_by_kind(&self, kind: ActivityKind) -> Result<Vec<Activity>, Error> {
        Ok(self.activities.find_by_kind(kind).await?)
    }

    async fn check_references(
        &self,
        contact_id: Option<Uuid>,
        deal_id: Option<Uuid>,
    ) -> Result<(), Error> {
        if let Some(contact_id) = contact_id
            && !self.contacts.exists_by_id(contact_id).await?
        {
            return Err(Error::invalid_request(format!(
                "contact {contact_id} does not exist"
            )));
        }
        if let Some(deal_id) = deal_id
            && !self.deals.exists_by_id(deal_id).await?
        {
            return Err(Error::invalid_request(format!(
                "deal {deal_id} does not exist"
            )));
        }
        Ok(())
    }

    fn not_found() -> Error {
        Error::not_found("activity not found")
    }
}
