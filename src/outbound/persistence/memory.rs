//! In-memory repository adapters.
//!
//! Each store guards its table with an `RwLock` and guarantees atomicity
//! only per single-record write, matching the storage contract the services
//! assume. Listings come back ordered by creation time, with the id as a
//! tie-break so the order is stable.
//!
//! A poisoned lock means a writer panicked mid-operation; it is reported as
//! a connection failure rather than unwound into the caller.

use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

use crate::domain::ports::{
    ActivityRepository, ContactRepository, DealRepository, IdentityRepository, LeadRepository,
    RepositoryError,
};
use crate::domain::{Activity, ActivityKind, Contact, Deal, DealStage, Identity, Lead};

fn read_table<T>(
    table: &RwLock<HashMap<Uuid, T>>,
) -> Result<RwLockReadGuard<'_, HashMap<Uuid, T>>, RepositoryError> {
    table
        .read()
        .map_err(|_| RepositoryError::connection("store lock poisoned"))
}

fn write_table<T>(
    table: &RwLock<HashMap<Uuid, T>>,
) -> Result<RwLockWriteGuard<'_, HashMap<Uuid, T>>, RepositoryError> {
    table
        .write()
        .map_err(|_| RepositoryError::connection("store lock poisoned"))
}

fn sorted_by_creation<T: Clone>(
    table: &HashMap<Uuid, T>,
    created_at: impl Fn(&T) -> (DateTime<Utc>, Uuid),
) -> Vec<T> {
    let mut records: Vec<T> = table.values().cloned().collect();
    records.sort_by_key(|record| created_at(record));
    records
}

/// Identity store backed by a `HashMap` keyed on the record id.
#[derive(Default)]
pub struct InMemoryIdentityRepository {
    table: RwLock<HashMap<Uuid, Identity>>,
}

#[async_trait]
impl IdentityRepository for InMemoryIdentityRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<Identity>, RepositoryError> {
        let table = read_table(&self.table)?;
        Ok(table
            .values()
            .find(|identity| identity.email == email)
            .cloned())
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool, RepositoryError> {
        let table = read_table(&self.table)?;
        Ok(table.values().any(|identity| identity.email == email))
    }

    async fn save(&self, identity: &Identity) -> Result<(), RepositoryError> {
        let mut table = write_table(&self.table)?;
        table.insert(identity.id, identity.clone());
        Ok(())
    }
}

/// Lead store backed by a `HashMap` keyed on the record id.
#[derive(Default)]
pub struct InMemoryLeadRepository {
    table: RwLock<HashMap<Uuid, Lead>>,
}

#[async_trait]
impl LeadRepository for InMemoryLeadRepository {
    async fn find_all(&self) -> Result<Vec<Lead>, RepositoryError> {
        let table = read_table(&self.table)?;
        Ok(sorted_by_creation(&table, |lead| (lead.created_at, lead.id)))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Lead>, RepositoryError> {
        let table = read_table(&self.table)?;
        Ok(table.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Lead>, RepositoryError> {
        let table = read_table(&self.table)?;
        Ok(table.values().find(|lead| lead.email == email).cloned())
    }

    async fn save(&self, lead: &Lead) -> Result<(), RepositoryError> {
        let mut table = write_table(&self.table)?;
        table.insert(lead.id, lead.clone());
        Ok(())
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<bool, RepositoryError> {
        let mut table = write_table(&self.table)?;
        Ok(table.remove(&id).is_some())
    }
}

/// Contact store backed by a `HashMap` keyed on the record id.
#[derive(Default)]
pub struct InMemoryContactRepository {
    table: RwLock<HashMap<Uuid, Contact>>,
}

#[async_trait]
impl ContactRepository for InMemoryContactRepository {
    async fn find_all(&self) -> Result<Vec<Contact>, RepositoryError> {
        let table = read_table(&self.table)?;
        Ok(sorted_by_creation(&table, |contact| {
            (contact.created_at, contact.id)
        }))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Contact>, RepositoryError> {
        let table = read_table(&self.table)?;
        Ok(table.get(&id).cloned())
    }

    async fn exists_by_id(&self, id: Uuid) -> Result<bool, RepositoryError> {
        let table = read_table(&self.table)?;
        Ok(table.contains_key(&id))
    }

    async fn save(&self, contact: &Contact) -> Result<(), RepositoryError> {
        let mut table = write_table(&self.table)?;
        table.insert(contact.id, contact.clone());
        Ok(())
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<bool, RepositoryError> {
        let mut table = write_table(&self.table)?;
        Ok(table.remove(&id).is_some())
    }
}

/// Deal store backed by a `HashMap` keyed on the record id.
#[derive(Default)]
pub struct InMemoryDealRepository {
    table: RwLock<HashMap<Uuid, Deal>>,
}

impl InMemoryDealRepository {
    fn filtered(
        &self,
        predicate: impl Fn(&Deal) -> bool,
    ) -> Result<Vec<Deal>, RepositoryError> {
        let table = read_table(&self.table)?;
        let mut deals: Vec<Deal> = table.values().filter(|deal| predicate(deal)).cloned().collect();
        deals.sort_by_key(|deal| (deal.created_at, deal.id));
        Ok(deals)
    }
}

#[async_trait]
impl DealRepository for InMemoryDealRepository {
    async fn find_all(&self) -> Result<Vec<Deal>, RepositoryError> {
        self.filtered(|_| true)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Deal>, RepositoryError> {
        let table = read_table(&self.table)?;
        Ok(table.get(&id).cloned())
    }

    async fn exists_by_id(&self, id: Uuid) -> Result<bool, RepositoryError> {
        let table = read_table(&self.table)?;
        Ok(table.contains_key(&id))
    }

    async fn find_by_contact_id(&self, contact_id: Uuid) -> Result<Vec<Deal>, RepositoryError> {
        self.filtered(|deal| deal.contact_id == contact_id)
    }

    async fn find_by_stage(&self, stage: DealStage) -> Result<Vec<Deal>, RepositoryError> {
        self.filtered(|deal| deal.stage == stage)
    }

    async fn find_by_close_date_on_or_before(
        &self,
        date: NaiveDate,
    ) -> Result<Vec<Deal>, RepositoryError> {
        self.filtered(|deal| deal.close_date.is_some_and(|close| close <= date))
    }

    async fn find_by_probability_at_least(
        &self,
        probability: u8,
    ) -> Result<Vec<Deal>, RepositoryError> {
        self.filtered(|deal| deal.probability >= probability)
    }

    async fn save(&self, deal: &Deal) -> Result<(), RepositoryError> {
        let mut table = write_table(&self.table)?;
        table.insert(deal.id, deal.clone());
        Ok(())
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<bool, RepositoryError> {
        let mut table = write_table(&self.table)?;
        Ok(table.remove(&id).is_some())
    }
}

/// Activity store backed by a `HashMap` keyed on the record id.
#[derive(Default)]
pub struct InMemoryActivityRepository {
    table: RwLock<HashMap<Uuid, Activity>>,
}

impl InMemoryActivityRepository {
    fn filtered(
        &self,
        predicate: impl Fn(&Activity) -> bool,
    ) -> Result<Vec<Activity>, RepositoryError> {
        let table = read_table(&self.table)?;
        let mut activities: Vec<Activity> = table
            .values()
            .filter(|activity| predicate(activity))
            .cloned()
            .collect();
        activities.sort_by_key(|activity| (activity.created_at, activity.id));
        Ok(activities)
    }
}

#[async_trait]
impl ActivityRepository for InMemoryActivityRepository {
    async fn find_all(&self) -> Result<Vec<Activity>, RepositoryError> {
        self.filtered(|_| true)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Activity>, RepositoryError> {
        let table = read_table(&self.table)?;
        Ok(table.get(&id).cloned())
    }

    async fn find_by_contact_id(
        &self,
        contact_id: Uuid,
    ) -> Result<Vec<Activity>, RepositoryError> {
        self.filtered(|activity| activity.contact_id == Some(contact_id))
    }

    async fn find_by_deal_id(&self, deal_id: Uuid) -> Result<Vec<Activity>, RepositoryError> {
        self.filtered(|activity| activity.deal_id == Some(deal_id))
    }

    async fn find_due_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Activity>, RepositoryError> {
        self.filtered(|activity| {
            activity
                .due_date
                .is_some_and(|due| due >= start && due < end)
        })
    }

    async fn find_overdue(&self, cutoff: DateTime<Utc>) -> Result<Vec<Activity>, RepositoryError> {
        self.filtered(|activity| {
            !activity.completed && activity.due_date.is_some_and(|due| due < cutoff)
        })
    }

    async fn find_by_completed(
        &self,
        completed: bool,
    ) -> Result<Vec<Activity>, RepositoryError> {
        self.filtered(|activity| activity.completed == completed)
    }

    async fn find_by_kind(&self, kind: ActivityKind) -> Result<Vec<Activity>, RepositoryError> {
        self.filtered(|activity| activity.kind == kind)
    }

    async fn save(&self, activity: &Activity) -> Result<(), RepositoryError> {
        let mut table = write_table(&self.table)?;
        table.insert(activity.id, activity.clone());
        Ok(())
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<bool, RepositoryError> {
        let mut table = write_table(&self.table)?;
        Ok(table.remove(&id).is_some())
    }
}
