use super::{Error, Result};
use crate::Config;
use crate::constants::CONTACTS_PATH;
use crate::data::{Contact, ContactDraft, ContactId, ContactPatch};
use async_trait::async_trait;
use log::debug;
use reqwest::{RequestBuilder, StatusCode};

#[cfg(test)]
use mockall::automock;

/// The remote contact service.
///
/// Every call settles with the server's canonical contact, or an error.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ContactsClientApi: Send + Sync {
    /// GET /contacts
    async fn list_contacts(&self) -> Result<Vec<Contact>>;

    /// GET /contacts/:id
    async fn get_contact(&self, id: &ContactId) -> Result<Contact>;

    /// POST /contacts, the server assigns the id
    async fn create_contact(&self, draft: &ContactDraft) -> Result<Contact>;

    /// PATCH /contacts/:id with a partial field set, returns the merged contact
    async fn patch_contact(&self, id: &ContactId, patch: &ContactPatch) -> Result<Contact>;

    /// PUT /contacts/:id with the full field set
    async fn replace_contact(&self, id: &ContactId, draft: &ContactDraft) -> Result<Contact>;
}

#[derive(Clone)]
pub struct ContactsClient {
    client: reqwest::Client,
    server_url: String,
}

impl ContactsClient {
    pub fn new(config: &Config) -> Self {
        Self {
            client: reqwest::Client::new(),
            server_url: config.server_url.clone(),
        }
    }

    pub fn request_url(&self, path: &str) -> String {
        format!("{}{CONTACTS_PATH}{path}", self.server_url)
    }

    fn contact_url(&self, id: &ContactId) -> String {
        self.request_url(&format!("/{id}"))
    }

    async fn send<T: serde::de::DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let response = request.send().await?;
        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(Error::NotFound);
        }
        if !status.is_success() {
            return Err(Error::Status(status.as_u16()));
        }
        Ok(response.json().await?)
    }
}

#[async_trait]
impl ContactsClientApi for ContactsClient {
    async fn list_contacts(&self) -> Result<Vec<Contact>> {
        debug!("fetching all contacts");
        self.send(self.client.get(self.request_url(""))).await
    }

    async fn get_contact(&self, id: &ContactId) -> Result<Contact> {
        debug!("fetching contact {id}");
        self.send(self.client.get(self.contact_url(id))).await
    }

    async fn create_contact(&self, draft: &ContactDraft) -> Result<Contact> {
        debug!("creating contact {}", draft.name);
        self.send(self.client.post(self.request_url("")).json(draft))
            .await
    }

    async fn patch_contact(&self, id: &ContactId, patch: &ContactPatch) -> Result<Contact> {
        debug!("patching contact {id}");
        self.send(self.client.patch(self.contact_url(id)).json(patch))
            .await
    }

    async fn replace_contact(&self, id: &ContactId, draft: &ContactDraft) -> Result<Contact> {
        debug!("replacing contact {id}");
        self.send(self.client.put(self.contact_url(id)).json(draft))
            .await
    }
}
