#[cfg(test)]
#[allow(clippy::module_inception)]
pub mod tests {
    use crate::data::{Contact, ContactDraft, ContactId, ContactPatch};
    use crate::external::Result;
    use crate::external::contacts::{ContactsClientApi, MockContactsClientApi};
    use crate::service::contact_store::ContactStore;
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    pub const TEST_NOTIFICATION_DURATION: Duration = Duration::from_millis(3000);

    pub fn get_baseline_contact(id: &str) -> Contact {
        Contact {
            id: ContactId::from(id),
            name: "Ann".to_owned(),
            email: "ann@example.com".to_owned(),
            phone: "0664123456".to_owned(),
            is_favorite: false,
            is_blocked: false,
        }
    }

    pub fn get_contact(id: &str, name: &str, is_favorite: bool, is_blocked: bool) -> Contact {
        Contact {
            id: ContactId::from(id),
            name: name.to_owned(),
            is_favorite,
            is_blocked,
            ..get_baseline_contact(id)
        }
    }

    /// A store that was loaded with the given contacts
    pub async fn get_loaded_store(client: impl ContactsClientApi + 'static) -> ContactStore {
        let store = ContactStore::new(Arc::new(client));
        store.load().await.expect("initial load failed");
        store
    }

    /// Wraps the mock and delays every call by the next queued duration, so tests can
    /// observe in-flight state and control the order of settlements. Needs a paused
    /// tokio clock to be deterministic.
    pub struct DelayedContactsClient {
        pub inner: MockContactsClientApi,
        delays: Mutex<VecDeque<Duration>>,
    }

    impl DelayedContactsClient {
        pub fn new(inner: MockContactsClientApi, delays: &[u64]) -> Self {
            Self {
                inner,
                delays: Mutex::new(delays.iter().map(|ms| Duration::from_millis(*ms)).collect()),
            }
        }

        async fn delay(&self) {
            let delay = self.delays.lock().unwrap().pop_front();
            if let Some(delay) = delay {
                tokio::time::sleep(delay).await;
            }
        }
    }

    #[async_trait]
    impl ContactsClientApi for DelayedContactsClient {
        async fn list_contacts(&self) -> Result<Vec<Contact>> {
            self.delay().await;
            self.inner.list_contacts().await
        }

        async fn get_contact(&self, id: &ContactId) -> Result<Contact> {
            self.delay().await;
            self.inner.get_contact(id).await
        }

        async fn create_contact(&self, draft: &ContactDraft) -> Result<Contact> {
            self.delay().await;
            self.inner.create_contact(draft).await
        }

        async fn patch_contact(&self, id: &ContactId, patch: &ContactPatch) -> Result<Contact> {
            self.delay().await;
            self.inner.patch_contact(id, patch).await
        }

        async fn replace_contact(&self, id: &ContactId, draft: &ContactDraft) -> Result<Contact> {
            self.delay().await;
            self.inner.replace_contact(id, draft).await
        }
    }

    /// A mock whose list call returns the given contacts
    pub fn mock_with_contacts(contacts: Vec<Contact>) -> MockContactsClientApi {
        let mut mock = MockContactsClientApi::new();
        mock.expect_list_contacts()
            .returning(move || Ok(contacts.clone()));
        mock
    }
}
