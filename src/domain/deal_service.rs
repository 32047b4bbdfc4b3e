//! Deal CRUD, pipeline queries, and the contact-reference invariant.
//!
//! A deal is never persisted without a valid contact reference. The check
//! runs before the write on create, and on update only when the request
//! carries a new contact.

use std::sync::Arc;

use chrono::{Duration, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::domain::ports::{ContactRepository, DealRepository};
use crate::domain::{Deal, DealDraft, DealPatch, DealStage, Error};

/// Window used by the closing-soon query.
const CLOSING_SOON_DAYS: i64 = 30;
/// Threshold used by the high-probability query.
const HIGH_PROBABILITY_THRESHOLD: u8 = 75;

/// Deal use-cases over the deal and contact stores.
#[derive(Clone)]
pub struct DealService {
    deals: Arc<dyn DealRepository>,
    contacts: Arc<dyn ContactRepository>,
}

impl DealService {
    pub fn new(deals: Arc<dyn DealRepository>, contacts: Arc<dyn ContactRepository>) -> Self {
        Self { deals, contacts }
    }

    pub async fn list(&self) -> Result<Vec<Deal>, Error> {
        Ok(self.deals.find_all().await?)
    }

    pub async fn get(&self, id: Uuid) -> Result<Deal, Error> {
        self.deals
            .find_by_id(id)
            .await?
            .ok_or_else(Self::not_found)
    }

    pub async fn create(&self, draft: DealDraft) -> Result<Deal, Error> {
        Self::check_probability(draft.probability)?;
        self.require_contact(draft.contact_id).await?;
        let deal = Deal::create(draft, Utc::now());
        self.deals.save(&deal).await?;
        Ok(deal)
    }

    /// Merge a partial update into an existing deal.
    pub async fn update(&self, id: Uuid, patch: DealPatch) -> Result<Deal, Error> {
        Self::check_probability(patch.probability)?;
        let mut deal = self.get(id).await?;
        if let Some(contact_id) = patch.contact_id {
            self.require_contact(contact_id).await?;
        }
        deal.apply(patch, Utc::now());
        self.deals.save(&deal).await?;
        Ok(deal)
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), Error> {
        if self.deals.delete_by_id(id).await? {
            Ok(())
        } else {
            Err(Self::not_found())
        }
    }

    pub async fn list_by_contact(&self, contact_id: Uuid) -> Result<Vec<Deal>, Error> {
        Ok(self.deals.find_by_contact_id(contact_id).await?)
    }

    pub async fn list_by_stage(&self, stage: DealStage) -> Result<Vec<Deal>, Error> {
        Ok(self.deals.find_by_stage(stage).await?)
    }

    /// Total potential revenue: the sum of every deal's value, treating an
    /// unpriced deal as zero.
    pub async fn total_pipeline_value(&self) -> Result<Decimal, Error> {
        let total = self
            .deals
            .find_all()
            .await?
            .into_iter()
            .filter_map(|deal| deal.value)
            .sum();
        Ok(total)
    }

    /// Deals expected to close within the next thirty days, past-due ones
    /// included.
    pub async fn closing_soon(&self) -> Result<Vec<Deal>, Error> {
        let horizon = Utc::now().date_naive() + Duration::days(CLOSING_SOON_DAYS);
        Ok(self.deals.find_by_close_date_on_or_before(horizon).await?)
    }

    pub async fn high_probability(&self) -> Result<Vec<Deal>, Error> {
        Ok(self
            .deals
            .find_by_probability_at_least(HIGH_PROBABILITY_THRESHOLD)
            .await?)
    }

    async fn require_contact(&self, contact_id: Uuid) -> Result<(), Error> {
        if self.contacts.exists_by_id(contact_id).await? {
            Ok(())
        } else {
            Err(Error::invalid_request(format!(
                "contact {contact_id} does not exist"
            )))
        }
    }

    fn check_probability(probability: Option<u8>) -> Result<(), Error> {
        match probability {
            Some(p) if p > 100 => Err(Error::invalid_request(
                "probability must be between 0 and 100",
            )),
            _ => Ok(()),
        }
    }

    fn not_found() -> Error {
        Error::not_found("deal not found")
    }
}
