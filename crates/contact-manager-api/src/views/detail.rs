use crate::data::{Contact, ContactDraft, ContactId, EditDraft};
use crate::service::contact_store::ContactStore;
use crate::service::notification::{Notification, NotificationTimer};
use crate::service::{Error, Result};

/// The detail page of a single contact, with its edit form
pub struct ContactDetailView {
    store: ContactStore,
    notifications: NotificationTimer,
    contact: Contact,
    edit: Option<EditDraft>,
}

impl ContactDetailView {
    /// Opens the contact from the local collection, or fetches it from the server if
    /// it's not known locally, e.g. when navigating to the page directly.
    pub async fn open(
        store: ContactStore,
        notifications: NotificationTimer,
        id: &ContactId,
    ) -> Result<Self> {
        let contact = match store.get_by_id(id) {
            Some(contact) => contact,
            None => store.fetch(id).await?,
        };
        Ok(Self {
            store,
            notifications,
            contact,
            edit: None,
        })
    }

    pub fn contact(&self) -> &Contact {
        &self.contact
    }

    // the store is the source of truth, the page only shows its latest value
    fn sync(&mut self) {
        if let Some(contact) = self.store.get_by_id(&self.contact.id) {
            self.contact = contact;
        }
    }

    pub async fn toggle_favorite(&mut self) -> Result<Contact> {
        let res = self
            .store
            .toggle_favorite(&self.contact.id, &self.notifications)
            .await;
        self.sync();
        res
    }

    pub async fn toggle_block(&mut self) -> Result<Contact> {
        let res = self
            .store
            .toggle_block(&self.contact.id, &self.notifications)
            .await;
        self.sync();
        res
    }

    /// Opens the edit form, prefilled with the current values
    pub fn begin_edit(&mut self) -> &mut ContactDraft {
        self.sync();
        &mut self.edit.insert(EditDraft::new(&self.contact)).fields
    }

    pub fn edit_draft_mut(&mut self) -> Option<&mut ContactDraft> {
        self.edit.as_mut().map(|edit| &mut edit.fields)
    }

    pub fn is_editing(&self) -> bool {
        self.edit.is_some()
    }

    /// Whether the form differs from the contact's current values
    pub fn has_unsaved_changes(&self) -> bool {
        self.edit
            .as_ref()
            .is_some_and(|edit| edit.is_dirty(&self.contact))
    }

    /// Puts the current values back into the form, it stays open
    pub fn reset_edit(&mut self) {
        self.sync();
        if let Some(edit) = self.edit.as_mut() {
            edit.reset(&self.contact);
        }
    }

    /// Closes the form and discards the draft
    pub fn cancel_edit(&mut self) {
        self.edit = None;
    }

    /// Saves the edit form. The form stays open with its values if the server rejects
    /// the change.
    pub async fn submit_edit(&mut self) -> Result<Contact> {
        let Some(edit) = self.edit.as_ref() else {
            return Err(Error::InvalidOperation);
        };
        let saved = self
            .store
            .replace(&edit.id, edit.fields.clone(), &self.notifications)
            .await?;
        self.sync();
        self.edit = None;
        Ok(saved)
    }

    pub fn current_notification(&self) -> Option<Notification> {
        self.notifications.current()
    }

    /// Leaves the page. Pending remote calls still settle in the store, but no
    /// notification is shown for them anymore.
    pub fn close(self) {
        self.notifications.dispose();
    }
}
