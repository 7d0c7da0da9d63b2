pub mod contacts;

use thiserror::Error;

/// Generic result type
pub type Result<T> = std::result::Result<T, Error>;

/// Generic error type
#[derive(Debug, Error)]
pub enum Error {
    /// all errors originating from interacting with the contacts web api, including
    /// connection failures and malformed payloads
    #[error("External Contacts Web API error: {0}")]
    Api(#[from] reqwest::Error),

    /// the requested contact doesn't exist on the server
    #[error("contact not found on server")]
    NotFound,

    /// the server answered with a non-success status code
    #[error("unexpected status code from contacts server: {0}")]
    Status(u16),
}
