//! Activity records: calls, emails, meetings, and tasks.
//!
//! Activities may reference a contact and/or a deal, or stand alone. The
//! completion date is a write-once audit field stamped on the first
//! false-to-true transition of `completed`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Closed set of activity kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum ActivityKind {
    Call,
    Email,
    Meeting,
    Task,
}

impl ActivityKind {
    /// Stable wire name of the kind.
    pub fn as_str(self) -> &'static str {
        match self {
            ActivityKind::Call => "CALL",
            ActivityKind::Email => "EMAIL",
            ActivityKind::Meeting => "MEETING",
            ActivityKind::Task => "TASK",
        }
    }
}

impl std::fmt::Display for ActivityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown kind name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown activity kind: {0}")]
pub struct UnknownKind(pub String);

impl std::str::FromStr for ActivityKind {
    type Err = UnknownKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "CALL" => Ok(ActivityKind::Call),
            "EMAIL" => Ok(ActivityKind::Email),
            "MEETING" => Ok(ActivityKind::Meeting),
            "TASK" => Ok(ActivityKind::Task),
            other => Err(UnknownKind(other.to_owned())),
        }
    }
}

/// A unit of work or touchpoint logged against the pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Activity {
    pub id: Uuid,
    pub kind: ActivityKind,
    pub subject: String,
    pub notes: Option<String>,
    pub due_date: Option<DateTime<Utc>>,
    pub completed: bool,
    pub completion_date: Option<DateTime<Utc>>,
    pub contact_id: Option<Uuid>,
    pub deal_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields accepted when creating an activity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityDraft {
    pub kind: ActivityKind,
    pub subject: String,
    pub notes: Option<String>,
    pub due_date: Option<DateTime<Utc>>,
    pub completed: Option<bool>,
    pub contact_id: Option<Uuid>,
    pub deal_id: Option<Uuid>,
}

/// Partial update: `None` leaves the stored value unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActivityPatch {
    pub kind: Option<ActivityKind>,
    pub subject: Option<String>,
    pub notes: Option<String>,
    pub due_date: Option<DateTime<Utc>>,
    pub completed: Option<bool>,
    pub contact_id: Option<Uuid>,
    pub deal_id: Option<Uuid>,
}

impl Activity {
    /// Materialize a new activity.
    ///
    /// `completed` defaults to false. The completion date is never stamped
    /// at creation, even when the draft arrives already completed.
    pub fn create(draft: ActivityDraft, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind: draft.kind,
            subject: draft.subject,
            notes: draft.notes,
            due_date: draft.due_date,
            completed: draft.completed.unwrap_or(false),
            completion_date: None,
            contact_id: draft.contact_id,
            deal_id: draft.deal_id,
            created_at: now,
            updated_at: now,
        }
    }

    /// Merge a partial update: absent fields keep their stored values.
    ///
    /// The completion date is stamped when `completed` flips to true and no
    /// date has been recorded yet. It is never cleared, including when
    /// `completed` flips back to false.
    pub fn apply(&mut self, patch: ActivityPatch, now: DateTime<Utc>) {
        if let Some(kind) = patch.kind {
            self.kind = kind;
        }
        if let Some(subject) = patch.subject {
            self.subject = subject;
        }
        if let Some(notes) = patch.notes {
            self.notes = Some(notes);
        }
        if let Some(due_date) = patch.due_date {
            self.due_date = Some(due_date);
        }
        if let Some(completed) = patch.completed {
            self.completed = completed;
        }
        if let Some(contact_id) = patch.contact_id {
            self.contact_id = Some(contact_id);
        }
        if let Some(deal_id) = patch.deal_id {
            self.deal_id = Some(deal_id);
        }
        if self.completed && self.completion_date.is_none() {
            self.completion_date = Some(now);
        }
        self.updated_at = now;
    }
}
