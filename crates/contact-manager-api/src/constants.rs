// General
pub const DEFAULT_SERVER_URL: &str = "https://contact-manager-server-lyart.vercel.app";
pub const CONTACTS_PATH: &str = "/contacts";

// Notifications
pub const DEFAULT_NOTIFICATION_DURATION_MS: u64 = 3000;
pub const MSG_CONTACT_ADDED: &str = "Contact added successfully";
pub const MSG_CONTACT_NOT_ADDED: &str = "Failed to add contact. Try again later.";
pub const MSG_CONTACT_NOT_UPDATED: &str = "Failed to update contact. Try again later.";

// Validation
pub const PHONE_MAX_LENGTH: usize = 10;
