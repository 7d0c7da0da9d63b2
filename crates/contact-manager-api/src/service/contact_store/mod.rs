mod mutation;

use super::notification::{NotificationKind, NotificationTimer, WeakNotificationTimer};
use super::{Error, Result};
use crate::constants::{MSG_CONTACT_ADDED, MSG_CONTACT_NOT_ADDED, MSG_CONTACT_NOT_UPDATED};
use crate::data::{Contact, ContactDraft, ContactId, ContactPatch};
use crate::external;
use crate::external::contacts::ContactsClientApi;
use log::{debug, error, info, warn};
use std::collections::HashSet;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::{Mutex, watch};

pub use mutation::Settlement;
use mutation::MutationTracker;

/// An immutable view of the contact collection
pub type ContactsSnapshot = Arc<Vec<Contact>>;

/// Progress of fetching the contact collection
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LoadState {
    #[default]
    Idle,
    Loading,
    Loaded,
    /// the last load failed, the previous collection is still shown
    Failed(String),
}

#[derive(Default)]
struct StoreState {
    contacts: Vec<Contact>,
    mutations: MutationTracker,
    load_seq: u64,
}

impl StoreState {
    fn find(&self, id: &ContactId) -> Option<&Contact> {
        self.contacts.iter().find(|c| &c.id == id)
    }

    /// Replaces the contact with the same id in place, or appends it
    fn upsert(&mut self, contact: Contact) {
        match self.contacts.iter_mut().find(|c| c.id == contact.id) {
            Some(existing) => *existing = contact,
            None => self.contacts.push(contact),
        }
    }
}

/// Clears the adding flag when an add settles, even if the settling task is torn down
struct AddingGuard(Arc<AtomicBool>);

impl Drop for AddingGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

/// The single source of truth for the contact collection.
///
/// All mutations go through the store. Remote calls and their settlement run in a
/// spawned task, so the store settles even if the requesting view goes away in the
/// meantime. Notifications are sent to the requesting view's timer only while it's
/// still alive.
#[derive(Clone)]
pub struct ContactStore {
    client: Arc<dyn ContactsClientApi>,
    state: Arc<Mutex<StoreState>>,
    snapshot: Arc<watch::Sender<ContactsSnapshot>>,
    load_state: Arc<watch::Sender<LoadState>>,
    adding: Arc<AtomicBool>,
}

impl ContactStore {
    pub fn new(client: Arc<dyn ContactsClientApi>) -> Self {
        let (snapshot, _) = watch::channel(ContactsSnapshot::default());
        let (load_state, _) = watch::channel(LoadState::default());
        Self {
            client,
            state: Arc::new(Mutex::new(StoreState::default())),
            snapshot: Arc::new(snapshot),
            load_state: Arc::new(load_state),
            adding: Arc::new(AtomicBool::new(false)),
        }
    }

    /// The current collection
    pub fn snapshot(&self) -> ContactsSnapshot {
        self.snapshot.borrow().clone()
    }

    /// Receives a new snapshot every time the collection changes
    pub fn subscribe(&self) -> watch::Receiver<ContactsSnapshot> {
        self.snapshot.subscribe()
    }

    pub fn get_by_id(&self, id: &ContactId) -> Option<Contact> {
        self.snapshot.borrow().iter().find(|c| &c.id == id).cloned()
    }

    pub fn load_state(&self) -> LoadState {
        self.load_state.borrow().clone()
    }

    pub fn is_adding(&self) -> bool {
        self.adding.load(Ordering::SeqCst)
    }

    fn publish(&self, state: &StoreState) {
        self.snapshot.send_replace(Arc::new(state.contacts.clone()));
    }

    /// Fetches the whole collection and replaces the local one with it. On failure the
    /// previous collection stays and the load state keeps the error.
    ///
    /// Changes the server confirmed while the load was in flight are newer than the
    /// loaded data, so their local values are kept.
    pub async fn load(&self) -> Result<()> {
        let (load_seq, issued) = {
            let mut state = self.state.lock().await;
            state.load_seq += 1;
            self.load_state.send_replace(LoadState::Loading);
            (state.load_seq, state.mutations.last_seq())
        };

        let store = self.clone();
        tokio::spawn(async move {
            let res = store.client.list_contacts().await;
            store.settle_load(load_seq, issued, res).await
        })
        .await?
    }

    async fn settle_load(
        &self,
        load_seq: u64,
        issued: u64,
        res: external::Result<Vec<Contact>>,
    ) -> Result<()> {
        let mut state = self.state.lock().await;
        let latest = state.load_seq == load_seq;

        let loaded = match res {
            Ok(loaded) => loaded,
            Err(e) => {
                error!("Error while loading contacts: {e}");
                if latest {
                    self.load_state.send_replace(LoadState::Failed(e.to_string()));
                }
                return Err(Error::Load(e));
            }
        };
        if !latest {
            debug!("discarding result of superseded contacts load {load_seq}");
            return Ok(());
        }

        let mut seen = HashSet::new();
        let mut contacts = Vec::with_capacity(loaded.len());
        for contact in loaded {
            if !seen.insert(contact.id.clone()) {
                warn!("server returned contact {} more than once", contact.id);
                continue;
            }
            let keep_local = if state.mutations.is_in_flight(&contact.id) {
                state.mutations.rebase(&contact.id, &contact);
                true
            } else {
                state.mutations.confirmed_since(&contact.id, issued)
            };
            if keep_local {
                if let Some(local) = state.find(&contact.id) {
                    contacts.push(local.clone());
                    continue;
                }
            }
            contacts.push(contact);
        }
        // e.g. contacts added after the load was sent
        for local in state.contacts.iter() {
            if !seen.contains(&local.id) && state.mutations.confirmed_since(&local.id, issued) {
                debug!("keeping contact {} confirmed during load", local.id);
                contacts.push(local.clone());
            }
        }

        info!("loaded {} contacts", contacts.len());
        state.contacts = contacts;
        state.mutations.forget_confirmed_until(issued);
        self.publish(&state);
        self.load_state.send_replace(LoadState::Loaded);
        Ok(())
    }

    /// Fetches a single contact from the server and puts it into the collection
    pub async fn fetch(&self, id: &ContactId) -> Result<Contact> {
        let store = self.clone();
        let id = id.clone();
        tokio::spawn(async move {
            let res = store.client.get_contact(&id).await;
            let mut state = store.state.lock().await;
            match res {
                Ok(contact) => {
                    if state.mutations.is_in_flight(&contact.id) {
                        state.mutations.rebase(&contact.id, &contact);
                        if let Some(local) = state.find(&contact.id) {
                            return Ok(local.clone());
                        }
                    }
                    state.mutations.mark_confirmed(&contact.id);
                    state.upsert(contact.clone());
                    store.publish(&state);
                    Ok(contact)
                }
                Err(external::Error::NotFound) => {
                    warn!("contact {id} not found on server");
                    Err(Error::NotFound)
                }
                Err(e) => {
                    error!("Error while fetching contact {id}: {e}");
                    Err(Error::Load(e))
                }
            }
        })
        .await?
    }

    /// Creates a contact from the draft. Only one add can be in flight, further
    /// submissions fail with [`Error::Busy`] until it settled.
    pub async fn add(&self, draft: ContactDraft, notifier: &NotificationTimer) -> Result<Contact> {
        if let Err(e) = draft.validate() {
            notifier.error(e.to_string());
            return Err(e.into());
        }
        if self.adding.swap(true, Ordering::SeqCst) {
            warn!("a contact is already being added, ignoring submission");
            return Err(Error::Busy);
        }

        let guard = AddingGuard(self.adding.clone());
        let store = self.clone();
        let notifier = notifier.downgrade();
        tokio::spawn(async move {
            let _guard = guard;
            let res = store.client.create_contact(&draft).await;
            store.settle_add(res, &notifier).await
        })
        .await?
    }

    async fn settle_add(
        &self,
        res: external::Result<Contact>,
        notifier: &WeakNotificationTimer,
    ) -> Result<Contact> {
        match res {
            Ok(contact) => {
                let mut state = self.state.lock().await;
                if state.find(&contact.id).is_some() {
                    warn!("created contact {} is already in the collection", contact.id);
                }
                state.mutations.mark_confirmed(&contact.id);
                state.upsert(contact.clone());
                self.publish(&state);
                info!("added contact {}", contact.id);
                notifier.raise(NotificationKind::Success, MSG_CONTACT_ADDED);
                Ok(contact)
            }
            Err(e) => {
                error!("Error while adding contact: {e}");
                notifier.raise(NotificationKind::Error, MSG_CONTACT_NOT_ADDED);
                Err(Error::Create(e))
            }
        }
    }

    /// Applies the partial update locally right away and sends it to the server. The
    /// server's answer replaces the optimistic value, a failure rolls it back.
    pub async fn update_fields(
        &self,
        id: &ContactId,
        patch: ContactPatch,
        notifier: &NotificationTimer,
    ) -> Result<Contact> {
        if patch.is_empty() {
            warn!("ignoring empty update of contact {id}");
            return Err(Error::InvalidOperation);
        }
        self.mutate(id, |_| patch, notifier).await
    }

    pub async fn toggle_favorite(
        &self,
        id: &ContactId,
        notifier: &NotificationTimer,
    ) -> Result<Contact> {
        self.mutate(id, |c| ContactPatch::favorite(!c.is_favorite), notifier)
            .await
    }

    pub async fn toggle_block(&self, id: &ContactId, notifier: &NotificationTimer) -> Result<Contact> {
        self.mutate(id, |c| ContactPatch::blocked(!c.is_blocked), notifier)
            .await
    }

    async fn mutate(
        &self,
        id: &ContactId,
        make_patch: impl FnOnce(&Contact) -> ContactPatch,
        notifier: &NotificationTimer,
    ) -> Result<Contact> {
        let (seq, patch) = {
            let mut state = self.state.lock().await;
            let Some(current) = state.find(id).cloned() else {
                return Err(Error::NotFound);
            };
            let patch = make_patch(&current);
            let seq = state.mutations.begin(id, Some(&current));
            state.upsert(patch.apply_to(&current));
            self.publish(&state);
            (seq, patch)
        };
        debug!("optimistically updated contact {id} ({seq})");

        let store = self.clone();
        let id = id.clone();
        let notifier = notifier.downgrade();
        tokio::spawn(async move {
            let res = store.client.patch_contact(&id, &patch).await;
            store.settle_mutation(&id, seq, res, &notifier).await
        })
        .await?
    }

    /// Replaces all fields of the contact. Unlike toggles this isn't applied locally
    /// until the server confirmed it.
    pub async fn replace(
        &self,
        id: &ContactId,
        draft: ContactDraft,
        notifier: &NotificationTimer,
    ) -> Result<Contact> {
        if let Err(e) = draft.validate() {
            notifier.error(e.to_string());
            return Err(e.into());
        }

        let seq = {
            let mut state = self.state.lock().await;
            let current = state.find(id).cloned();
            state.mutations.begin(id, current.as_ref())
        };

        let store = self.clone();
        let id = id.clone();
        let notifier = notifier.downgrade();
        tokio::spawn(async move {
            let res = store.client.replace_contact(&id, &draft).await;
            store.settle_mutation(&id, seq, res, &notifier).await
        })
        .await?
    }

    async fn settle_mutation(
        &self,
        id: &ContactId,
        seq: u64,
        res: external::Result<Contact>,
        notifier: &WeakNotificationTimer,
    ) -> Result<Contact> {
        let mut state = self.state.lock().await;
        match res {
            Ok(confirmed) => {
                match state.mutations.settle_ok(id, seq, &confirmed) {
                    Settlement::Confirmed => {
                        state.upsert(confirmed.clone());
                        self.publish(&state);
                        debug!("confirmed update of contact {id} ({seq})");
                    }
                    _ => debug!("discarding superseded update of contact {id} ({seq})"),
                }
                Ok(confirmed)
            }
            Err(e) => {
                error!("Error while updating contact {id}: {e}");
                match state.mutations.settle_err(id, seq) {
                    Settlement::RolledBack(Some(baseline)) => {
                        state.upsert(baseline);
                        self.publish(&state);
                        info!("rolled back contact {id} ({seq})");
                    }
                    Settlement::RolledBack(None) => {}
                    _ => debug!("failed update of contact {id} ({seq}) was already superseded"),
                }
                notifier.raise(NotificationKind::Error, MSG_CONTACT_NOT_UPDATED);
                Err(Error::Mutation {
                    id: id.clone(),
                    source: e,
                })
            }
        }
    }
}
