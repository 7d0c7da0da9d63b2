pub mod contact_store;
pub mod notification;

use super::Config;
use crate::data::ContactId;
use crate::external;
use crate::external::contacts::{ContactsClient, ContactsClientApi};
use contact_store::ContactStore;
use log::info;
use notification::NotificationTimer;
use std::sync::Arc;
use thiserror::Error;

/// Generic result type
pub type Result<T> = std::result::Result<T, Error>;

/// The user visible category of a failed operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// the initial or a refreshing fetch failed, stale or empty data is shown
    LoadFailure,
    /// creating a contact was rejected, the draft is kept for a retry
    CreateFailure,
    /// a toggle or an edit was rejected, local state is back at the last confirmed value
    MutationFailure,
}

/// Generic error type
#[derive(Debug, Error)]
pub enum Error {
    /// fetching the contact collection or a single contact failed
    #[error("Failed to load contacts: {0}")]
    Load(#[source] external::Error),

    /// the server rejected a new contact
    #[error("Failed to create contact: {0}")]
    Create(#[source] external::Error),

    /// the server rejected a change of an existing contact
    #[error("Failed to update contact {id}: {source}")]
    Mutation {
        id: ContactId,
        #[source]
        source: external::Error,
    },

    /// errors that stem from a contact that neither the store nor the server knows
    #[error("not found")]
    NotFound,

    /// errors that stem from validation of a draft
    #[error("Validation Error: {0}")]
    Validation(#[from] contact_manager_core::Error),

    /// a contact is already being added, submissions are not queued
    #[error("a contact is already being added")]
    Busy,

    /// errors stemming from trying to do invalid operations, e.g. saving without editing
    #[error("invalid operation")]
    InvalidOperation,

    /// the task settling a remote call panicked or was cancelled
    #[error("Settlement task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl Error {
    pub fn failure_kind(&self) -> Option<FailureKind> {
        match self {
            Error::Load(_) | Error::NotFound => Some(FailureKind::LoadFailure),
            Error::Create(_) => Some(FailureKind::CreateFailure),
            Error::Mutation { .. } => Some(FailureKind::MutationFailure),
            Error::Validation(_) | Error::Busy | Error::InvalidOperation | Error::Task(_) => None,
        }
    }
}

/// A dependency container for all services that are used by the application
#[derive(Clone)]
pub struct ServiceContext {
    pub config: Config,
    pub contact_store: ContactStore,
}

impl ServiceContext {
    /// A fresh notification timer for a view, using the configured duration
    pub fn notification_timer(&self) -> NotificationTimer {
        NotificationTimer::new(self.config.notification_duration)
    }
}

/// building up the service context dependencies from the given config
pub fn create_service_context(config: Config) -> ServiceContext {
    info!("Using contacts server {}", config.server_url);
    let contacts_client: Arc<dyn ContactsClientApi> = Arc::new(ContactsClient::new(&config));
    let contact_store = ContactStore::new(contacts_client);

    ServiceContext {
        config,
        contact_store,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn failure_kinds() {
        assert_eq!(
            Error::Load(external::Error::Status(500)).failure_kind(),
            Some(FailureKind::LoadFailure)
        );
        assert_eq!(
            Error::Create(external::Error::Status(500)).failure_kind(),
            Some(FailureKind::CreateFailure)
        );
        assert_eq!(
            Error::Mutation {
                id: ContactId::from("1"),
                source: external::Error::NotFound,
            }
            .failure_kind(),
            Some(FailureKind::MutationFailure)
        );
        assert_eq!(Error::Busy.failure_kind(), None);
    }

    #[tokio::test]
    async fn service_context_uses_config() {
        let ctx = create_service_context(
            Config::new("http://localhost:3000").with_notification_duration(Duration::from_secs(1)),
        );
        assert_eq!(ctx.config.server_url, "http://localhost:3000");
        assert_eq!(ctx.notification_timer().duration(), Duration::from_secs(1));
        assert!(ctx.contact_store.snapshot().is_empty());
    }
}
