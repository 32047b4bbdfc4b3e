//! Lead records: prospects captured before they become contacts.
//!
//! A lead has no relationships. Its `status` is a free-form pipeline label
//! rather than a closed enum, so operators can introduce stages without a
//! deploy.

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// A sales prospect that has not yet been qualified into a contact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lead {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub status: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields accepted when creating a lead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeadDraft {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub status: Option<String>,
}

/// Partial update: `None` leaves the stored value unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LeadPatch {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub status: Option<String>,
}

impl Lead {
    /// Materialize a new lead, stamping both timestamps to `now`.
    pub fn create(draft: LeadDraft, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            first_name: draft.first_name,
            last_name: draft.last_name,
            email: draft.email,
            phone: draft.phone,
            company: draft.company,
            status: draft.status,
            created_at: now,
            updated_at: now,
        }
    }

    /// Merge a partial update: absent fields keep their stored values.
    ///
    /// A present value overwrites unconditionally, including overwriting
    /// with an empty string. `updated_at` always refreshes; `created_at`
    /// never changes.
    pub fn apply(&mut self, patch: LeadPatch, now: DateTime<Utc>) {
        if let Some(first_name) = patch.first_name {
            self.first_name = first_name;
        }
        if let Some(last_name) = patch.last_name {
            self.last_name = last_name;
        }
        if let Some(email) = patch.email {
            self.email = email;
        }
        if let Some(phone) = patch.phone {
            self.phone = Some(phone);
        }
        if let Some(company) = patch.company {
            self.company = Some(company);
        }
        if let Some(status) = patch.status {
            self.status = Some(status);
        }
        self.updated_at = now;
    }

    /// Replace only the pipeline status label.
    pub fn set_status(&mut self, status: String, now: DateTime<Utc>) {
        self.status = Some(status);
        self.updated_at = now;
    }
}
