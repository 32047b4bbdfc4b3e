//! Contact records: qualified people attached to deals and activities.

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// A person the team actively works with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contact {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub job_title: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Full set of mutable contact fields.
///
/// Used both for creation and for update, because contact update replaces
/// every mutable field rather than merging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactDraft {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub job_title: Option<String>,
    pub notes: Option<String>,
}

impl Contact {
    /// Materialize a new contact, stamping both timestamps to `now`.
    pub fn create(draft: ContactDraft, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            first_name: draft.first_name,
            last_name: draft.last_name,
            email: draft.email,
            phone: draft.phone,
            company: draft.company,
            job_title: draft.job_title,
            notes: draft.notes,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replace every mutable field from the draft.
    ///
    /// Unlike the other entities, an absent optional field here clears the
    /// stored value. Identity and `created_at` are untouched.
    pub fn replace(&mut self, draft: ContactDraft, now: DateTime<Utc>) {
        self.first_name = draft.first_name;
        self.last_name = draft.last_name;
        self.email = draft.email;
        self.phone = draft.phone;
        self.company = draft.company;
        self.job_title = draft.job_title;
        self.notes = draft.notes;
        self.updated_at = now;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(secs, 0).single().expect("valid timestamp")
    }

    fn draft() -> ContactDraft {
        ContactDraft {
            first_name: "Grace".into(),
            last_name: "Hopper".into(),
            email: "grace@example.com".into(),
            phone: Some("+1 555 0100".into()),
            company: Some("Navy".into()),
            job_title: Some("Rear Admiral".into()),
            notes: Some("prefers email".into()),
        }
    }

    #[test]
    fn replace_clears_absent_optional_fields() {
        let mut contact = Contact::create(draft(), at(1_000));
        let original_id = contact.id;
        contact.replace(
            ContactDraft {
                first_name: "Grace".into(),
                last_name: "Hopper".into(),
                email: "grace@example.com".into(),
                phone: None,
                company: None,
                job_title: None,
                notes: None,
            },
            at(2_000),
        );
        assert_eq!(contact.id, original_id);
        assert!(contact.phone.is_none());
        assert!(contact.company.is_none());
        assert!(contact.job_title.is_none());
        assert!(contact.notes.is_none());
        assert_eq!(contact.created_at, at(1_000));
        assert_eq!(contact.updated_at, at(2_000));
    }

    #[test]
    fn create_stamps_both_timestamps() {
        let contact = Contact::create(draft(), at(1_000));
        assert_eq!(contact.created_at, contact.updated_at);
    }
}
