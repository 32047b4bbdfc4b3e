//! Deal records and the sales pipeline stage model.
//!
//! A deal always references an existing contact; the services enforce that
//! invariant before anything reaches the repository. Probability defaults
//! are derived from the stage when the caller does not supply one.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Closed set of pipeline stages a deal moves through.
///
/// Serialized in SCREAMING_SNAKE_CASE on the wire; an unknown stage string
/// fails deserialization and surfaces as a 400 before any service runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DealStage {
    Prospecting,
    Qualification,
    Proposal,
    Negotiation,
    ClosedWon,
    ClosedLost,
}

impl DealStage {
    /// Probability assumed for the stage when none is supplied.
    pub fn default_probability(self) -> u8 {
        match self {
            DealStage::Prospecting => 10,
            DealStage::Qualification => 25,
            DealStage::Proposal => 50,
            DealStage::Negotiation => 75,
            DealStage::ClosedWon => 100,
            DealStage::ClosedLost => 0,
        }
    }

    /// Stable wire name of the stage.
    pub fn as_str(self) -> &'static str {
        match self {
            DealStage::Prospecting => "PROSPECTING",
            DealStage::Qualification => "QUALIFICATION",
            DealStage::Proposal => "PROPOSAL",
            DealStage::Negotiation => "NEGOTIATION",
            DealStage::ClosedWon => "CLOSED_WON",
            DealStage::ClosedLost => "CLOSED_LOST",
        }
    }
}

impl std::fmt::Display for DealStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown stage name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown deal stage: {0}")]
pub struct UnknownStage(pub String);

impl std::str::FromStr for DealStage {
    type Err = UnknownStage;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PROSPECTING" => Ok(DealStage::Prospecting),
            "QUALIFICATION" => Ok(DealStage::Qualification),
            "PROPOSAL" => Ok(DealStage::Proposal),
            "NEGOTIATION" => Ok(DealStage::Negotiation),
            "CLOSED_WON" => Ok(DealStage::ClosedWon),
            "CLOSED_LOST" => Ok(DealStage::ClosedLost),
            other => Err(UnknownStage(other.to_owned())),
        }
    }
}

/// An opportunity in the sales pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deal {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub value: Option<Decimal>,
    pub stage: DealStage,
    /// Likelihood of closing, always within 0..=100.
    pub probability: u8,
    pub close_date: Option<NaiveDate>,
    pub contact_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields accepted when creating a deal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DealDraft {
    pub name: String,
    pub description: Option<String>,
    pub value: Option<Decimal>,
    pub stage: DealStage,
    pub probability: Option<u8>,
    pub close_date: Option<NaiveDate>,
    pub contact_id: Uuid,
}

/// Partial update: `None` leaves the stored value unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DealPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub value: Option<Decimal>,
    pub stage: Option<DealStage>,
    pub probability: Option<u8>,
    pub close_date: Option<NaiveDate>,
    pub contact_id: Option<Uuid>,
}

impl Deal {
    /// Materialize a new deal.
    ///
    /// When the draft carries no probability, the stage's default applies.
    /// Contact existence must already have been validated by the caller.
    pub fn create(draft: DealDraft, now: DateTime<Utc>) -> Self {
        let probability = draft
            .probability
            .unwrap_or_else(|| draft.stage.default_probability());
        Self {
            id: Uuid::new_v4(),
            name: draft.name,
            description: draft.description,
            value: draft.value,
            stage: draft.stage,
            probability,
            close_date: draft.close_date,
            contact_id: draft.contact_id,
            created_at: now,
            updated_at: now,
        }
    }

    /// Merge a partial update: absent fields keep their stored values.
    ///
    /// Setting the stage without an accompanying probability resets the
    /// probability to the new stage's default.
    pub fn apply(&mut self, patch: DealPatch, now: DateTime<Utc>) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(description) = patch.description {
            self.description = Some(description);
        }
        if let Some(value) = patch.value {
            self.value = Some(value);
        }
        match (patch.stage, patch.probability) {
            (Some(stage), Some(probability)) => {
                self.stage = stage;
                self.probability = probability;
            }
            (Some(stage), None) => {
                self.stage = stage;
                self.probability = stage.default_probability();
            }
            (None, Some(probability)) => {
                self.probability = probability;
            }
            (None, None) => {}
        }
        if let Some(close_date) = patch.close_date {
            self.close_date = Some(close_date);
        }
        if let Some(contact_id) = patch.contact_id {
            self.contact_id = contact_id;
        }
        self.updated_at = now;
    }
}
