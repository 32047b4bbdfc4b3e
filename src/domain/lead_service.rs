//! Lead CRUD and lookup use-cases.

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::domain::ports::LeadRepository;
use crate::domain::{Error, Lead, LeadDraft, LeadPatch};

/// Lead use-cases over the lead store.
#[derive(Clone)]
pub struct LeadService {
    leads: Arc<dyn LeadRepository>,
}

impl LeadService {
    pub fn new(leads: Arc<dyn LeadRepository>) -> Self {
        Self { leads }
    }

    pub async fn list(&self) -> Result<Vec<Lead>, Error> {
        Ok(self.leads.find_all().await?)
    }

    pub async fn get(&self, id: Uuid) -> Result<Lead, Error> {
        self.leads
            .find_by_id(id)
            .await?
            .ok_or_else(Self::not_found)
    }

    pub async fn get_by_email(&self, email: &str) -> Result<Lead, Error> {
        self.leads
            .find_by_email(email)
            .await?
            .ok_or_else(Self::not_found)
    }

    pub async fn create(&self, draft: LeadDraft) -> Result<Lead, Error> {
        let lead = Lead::create(draft, Utc::now());
        self.leads.save(&lead).await?;
        Ok(lead)
    }

    /// Merge a partial update into an existing lead.
    pub async fn update(&self, id: Uuid, patch: LeadPatch) -> Result<Lead, Error> {
        let mut lead = self.get(id).await?;
        lead.apply(patch, Utc::now());
        self.leads.save(&lead).await?;
        Ok(lead)
    }

    /// Replace only the pipeline status label.
    pub async fn update_status(&self, id: Uuid, status: String) -> Result<Lead, Error> {
        let mut lead = self.get(id).await?;
        lead.set_status(status, Utc::now());
        self.leads.save(&lead).await?;
        Ok(lead)
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), Error> {
        if self.leads.delete_by_id(id).await? {
            Ok(())
        } else {
            Err(Self::not_found())
        }
    }

    fn not_found() -> Error {
        Error::not_found("lead not found")
    }
}
