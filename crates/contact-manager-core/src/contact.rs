use super::{Error, Result};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Server assigned identifier of a contact.
///
/// The remote service hands out ids either as JSON strings or as JSON numbers,
/// both are normalized to their textual form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ContactId(String);

impl ContactId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContactId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ContactId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for ContactId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<u64> for ContactId {
    fn from(value: u64) -> Self {
        Self(value.to_string())
    }
}

impl<'de> Deserialize<'de> for ContactId {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum WireId {
            Text(String),
            Unsigned(u64),
            Signed(i64),
        }

        Ok(match WireId::deserialize(deserializer)? {
            WireId::Text(id) => ContactId(id),
            WireId::Unsigned(id) => ContactId(id.to_string()),
            WireId::Signed(id) => ContactId(id.to_string()),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub id: ContactId,
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub is_favorite: bool,
    #[serde(default)]
    pub is_blocked: bool,
}

impl Contact {
    /// Builds the contact the server would return for the given draft and id
    pub fn from_draft(id: ContactId, draft: ContactDraft) -> Self {
        Self {
            id,
            name: draft.name,
            email: draft.email,
            phone: draft.phone,
            is_favorite: draft.is_favorite,
            is_blocked: draft.is_blocked,
        }
    }
}

/// The full set of mutable contact fields, without an id.
///
/// Used as the body for creating a contact and for replacing one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactDraft {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub is_favorite: bool,
    pub is_blocked: bool,
}

impl ContactDraft {
    pub fn new(name: impl Into<String>, phone: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            phone: phone.into(),
            ..Default::default()
        }
    }

    /// Checks the fields the forms mark as required. Email and phone format are
    /// not validated.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::FieldRequired("name"));
        }
        if self.phone.trim().is_empty() {
            return Err(Error::FieldRequired("phone"));
        }
        Ok(())
    }
}

impl From<&Contact> for ContactDraft {
    fn from(value: &Contact) -> Self {
        Self {
            name: value.name.clone(),
            email: value.email.clone(),
            phone: value.phone.clone(),
            is_favorite: value.is_favorite,
            is_blocked: value.is_blocked,
        }
    }
}

/// A partial update, only the set fields are sent to the server
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_favorite: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_blocked: Option<bool>,
}

impl ContactPatch {
    pub fn favorite(is_favorite: bool) -> Self {
        Self {
            is_favorite: Some(is_favorite),
            ..Default::default()
        }
    }

    pub fn blocked(is_blocked: bool) -> Self {
        Self {
            is_blocked: Some(is_blocked),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// Returns the contact with all set fields of the patch applied
    pub fn apply_to(&self, contact: &Contact) -> Contact {
        Contact {
            id: contact.id.clone(),
            name: self.name.clone().unwrap_or_else(|| contact.name.clone()),
            email: self.email.clone().unwrap_or_else(|| contact.email.clone()),
            phone: self.phone.clone().unwrap_or_else(|| contact.phone.clone()),
            is_favorite: self.is_favorite.unwrap_or(contact.is_favorite),
            is_blocked: self.is_blocked.unwrap_or(contact.is_blocked),
        }
    }
}

/// View-local copy of a contact's fields while it's being edited
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditDraft {
    pub id: ContactId,
    pub fields: ContactDraft,
}

impl EditDraft {
    pub fn new(contact: &Contact) -> Self {
        Self {
            id: contact.id.clone(),
            fields: ContactDraft::from(contact),
        }
    }

    /// Discards all unsaved changes
    pub fn reset(&mut self, contact: &Contact) {
        self.fields = ContactDraft::from(contact);
    }

    pub fn is_dirty(&self, contact: &Contact) -> bool {
        self.fields != ContactDraft::from(contact)
    }
}
