use crate::data::{Contact, ContactId, FilterSelector, visible};
use crate::service::Result;
use crate::service::contact_store::{ContactStore, ContactsSnapshot, LoadState};
use crate::service::notification::{Notification, NotificationTimer};
use tokio::sync::watch;

/// The contacts list page with its filter select
pub struct ContactListView {
    store: ContactStore,
    notifications: NotificationTimer,
    filter: FilterSelector,
}

impl ContactListView {
    pub fn new(store: ContactStore, notifications: NotificationTimer) -> Self {
        Self {
            store,
            notifications,
            filter: FilterSelector::None,
        }
    }

    /// (Re)loads the collection, a failure is kept in [`ContactListView::load_state`]
    pub async fn refresh(&self) -> Result<()> {
        self.store.load().await
    }

    pub fn load_state(&self) -> LoadState {
        self.store.load_state()
    }

    pub fn filter(&self) -> FilterSelector {
        self.filter
    }

    pub fn set_filter(&mut self, selector: FilterSelector) {
        self.filter = selector;
    }

    /// The contacts to render for the active filter
    pub fn visible(&self) -> Vec<Contact> {
        visible(&self.store.snapshot(), self.filter)
    }

    pub fn subscribe(&self) -> watch::Receiver<ContactsSnapshot> {
        self.store.subscribe()
    }

    pub async fn toggle_favorite(&self, id: &ContactId) -> Result<Contact> {
        self.store.toggle_favorite(id, &self.notifications).await
    }

    pub async fn toggle_block(&self, id: &ContactId) -> Result<Contact> {
        self.store.toggle_block(id, &self.notifications).await
    }

    pub fn current_notification(&self) -> Option<Notification> {
        self.notifications.current()
    }
}
