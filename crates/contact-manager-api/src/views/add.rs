use crate::constants::PHONE_MAX_LENGTH;
use crate::data::{Contact, ContactDraft};
use crate::service::Result;
use crate::service::contact_store::ContactStore;
use crate::service::notification::{Notification, NotificationTimer};

/// The add contact dialog
pub struct AddContactView {
    store: ContactStore,
    notifications: NotificationTimer,
    draft: ContactDraft,
}

impl AddContactView {
    pub fn new(store: ContactStore, notifications: NotificationTimer) -> Self {
        Self {
            store,
            notifications,
            draft: ContactDraft::default(),
        }
    }

    pub fn draft(&self) -> &ContactDraft {
        &self.draft
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.draft.name = name.into();
    }

    pub fn set_email(&mut self, email: impl Into<String>) {
        self.draft.email = email.into();
    }

    /// The phone input only takes the first [`PHONE_MAX_LENGTH`] characters
    pub fn set_phone(&mut self, phone: &str) {
        self.draft.phone = phone.chars().take(PHONE_MAX_LENGTH).collect();
    }

    pub fn toggle_draft_favorite(&mut self) {
        self.draft.is_favorite = !self.draft.is_favorite;
    }

    pub fn set_blocked(&mut self, is_blocked: bool) {
        self.draft.is_blocked = is_blocked;
    }

    /// While true, the submit button is disabled
    pub fn is_adding(&self) -> bool {
        self.store.is_adding()
    }

    /// Creates the contact. On success the form is cleared and the dialog can be
    /// closed, on failure the draft is kept so it can be submitted again.
    pub async fn submit(&mut self) -> Result<Contact> {
        let contact = self
            .store
            .add(self.draft.clone(), &self.notifications)
            .await?;
        self.draft = ContactDraft::default();
        Ok(contact)
    }

    pub fn current_notification(&self) -> Option<Notification> {
        self.notifications.current()
    }
}
