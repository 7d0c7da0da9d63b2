pub mod contact;
pub mod filter;
#[cfg(test)]
mod tests;

use thiserror::Error;

pub use contact::{Contact, ContactDraft, ContactId, ContactPatch, EditDraft};
pub use filter::{FilterSelector, visible};

/// Generic model result type
pub type Result<T> = std::result::Result<T, Error>;

/// Generic model error type
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// a required field of a draft was empty
    #[error("field {0} is required")]
    FieldRequired(&'static str),

    /// the given filter value is not one of the known selectors
    #[error("unknown filter selector: {0}")]
    UnknownSelector(String),
}
