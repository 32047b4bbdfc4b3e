//! Contact CRUD use-cases.
//!
//! Contact update is full replacement, not a merge. See the data model
//! notes in DESIGN.md for why the asymmetry with the other entities is
//! kept.

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::domain::ports::ContactRepository;
use crate::domain::{Contact, ContactDraft, Error};

/// Contact use-cases over the contact store.
#[derive(Clone)]
pub struct ContactService {
    contacts: Arc<dyn ContactRepository>,
}

impl ContactService {
    pub fn new(contacts: Arc<dyn ContactRepository>) -> Self {
        Self { contacts }
    }

    pub async fn list(&self) -> Result<Vec<Contact>, Error> {
        Ok(self.contacts.find_all().await?)
    }

    pub async fn get(&self, id: Uuid) -> Result<Contact, Error> {
        self.contacts
            .find_by_id(id)
            .await?
            .ok_or_else(Self::not_found)
    }

    pub async fn create(&self, draft: ContactDraft) -> Result<Contact, Error> {
        let contact = Contact::create(draft, Utc::now());
        self.contacts.save(&contact).await?;
        Ok(contact)
    }

    /// Replace every mutable field of an existing contact.
    pub async fn update(&self, id: Uuid, draft: ContactDraft) -> Result<Contact, Error> {
        let mut contact = self.get(id).await?;
        contact.replace(draft, Utc::now());
        self.contacts.save(&contact).await?;
        Ok(contact)
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), Error> {
        if self.contacts.delete_by_id(id).await? {
            Ok(())
        } else {
            Err(Self::not_found())
        }
    }

    fn not_found() -> Error {
        Error::not_found("contact not found")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::ports::MockContactRepository;
    use mockall::predicate::eq;

    fn draft() -> ContactDraft {
        ContactDraft {
            first_name: "Grace".into(),
            last_name: "Hopper".into(),
            email: "grace@example.com".into(),
            phone: Some("+1 555 0100".into()),
            company: None,
            job_title: None,
            notes: None,
        }
    }

    #[tokio::test]
    async fn create_saves_and_returns_the_contact() {
        let mut contacts = MockContactRepository::new();
        contacts
            .expect_save()
            .withf(|contact| contact.email == "grace@example.com")
            .times(1)
            .return_once(|_| Ok(()));

        let contact = ContactService::new(Arc::new(contacts))
            .create(draft())
            .await
            .expect("create succeeds");
        assert_eq!(contact.created_at, contact.updated_at);
    }

    #[tokio::test]
    async fn update_replaces_all_fields_including_absent_optionals() {
        let existing = Contact::create(draft(), Utc::now());
        let id = existing.id;
        let mut contacts = MockContactRepository::new();
        contacts
            .expect_find_by_id()
            .with(eq(id))
            .return_once(move |_| Ok(Some(existing)));
        contacts
            .expect_save()
            .withf(|contact| contact.phone.is_none())
            .times(1)
            .return_once(|_| Ok(()));

        let updated = ContactService::new(Arc::new(contacts))
            .update(
                id,
                ContactDraft {
                    phone: None,
                    ..draft()
                },
            )
            .await
            .expect("update succeeds");
        assert!(updated.phone.is_none());
    }

    #[tokio::test]
    async fn update_of_a_missing_contact_is_not_found() {
        let mut contacts = MockContactRepository::new();
        contacts.expect_find_by_id().return_once(|_| Ok(None));
        contacts.expect_save().never();

        let err = ContactService::new(Arc::new(contacts))
            .update(Uuid::new_v4(), draft())
            .await
            .expect_err("contact is missing");
        assert_eq!(err.code, ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn delete_reports_whether_a_record_existed() {
        let mut contacts = MockContactRepository::new();
        contacts.expect_delete_by_id().return_once(|_| Ok(true));
        ContactService::new(Arc::new(contacts))
            .delete(Uuid::new_v4())
            .await
            .expect("delete succeeds");

        let mut contacts = MockContactRepository::new();
        contacts.expect_delete_by_id().return_once(|_| Ok(false));
        let err = ContactService::new(Arc::new(contacts))
            .delete(Uuid::new_v4())
            .await
            .expect_err("contact is missing");
        assert_eq!(err.code, ErrorCode::NotFound);
    }
}
