//! Presentation state of the pages of the client.
//!
//! Views never mutate contacts themselves, they read snapshots of the
//! [`ContactStore`](crate::service::contact_store::ContactStore) and request changes
//! through it. Each view owns its notification timer, dropping the view cancels it.

pub mod add;
pub mod detail;
pub mod list;

pub use add::AddContactView;
pub use detail::ContactDetailView;
pub use list::ContactListView;
