use crate::{Contact, ContactDraft, ContactId, ContactPatch, EditDraft, Error};

pub fn contact(id: &str, name: &str, is_favorite: bool, is_blocked: bool) -> Contact {
    Contact {
        id: ContactId::from(id),
        name: name.to_owned(),
        email: format!("{}@example.com", name.to_lowercase()),
        phone: "0664123456".to_owned(),
        is_favorite,
        is_blocked,
    }
}

#[test]
fn contact_deserializes_string_and_number_ids() {
    let from_string: Contact = serde_json::from_str(
        r#"{"id":"7","name":"Ann","email":"ann@example.com","phone":"123","isFavorite":true,"isBlocked":false}"#,
    )
    .unwrap();
    let from_number: Contact =
        serde_json::from_str(r#"{"id":7,"name":"Ann","phone":"123"}"#).unwrap();

    assert_eq!(from_string.id, ContactId::from("7"));
    assert_eq!(from_number.id, ContactId::from(7u64));
    assert!(from_string.is_favorite);
    assert_eq!(from_number.email, "");
    assert!(!from_number.is_favorite);
    assert!(!from_number.is_blocked);
}

#[test]
fn draft_serializes_with_wire_names() {
    let mut draft = ContactDraft::new("Ann", "1");
    draft.is_favorite = true;
    let json = serde_json::to_value(&draft).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "name": "Ann",
            "email": "",
            "phone": "1",
            "isFavorite": true,
            "isBlocked": false
        })
    );
}

#[test]
fn patch_only_serializes_set_fields() {
    let json = serde_json::to_value(ContactPatch::favorite(true)).unwrap();
    assert_eq!(json, serde_json::json!({ "isFavorite": true }));
    let json = serde_json::to_value(ContactPatch::blocked(false)).unwrap();
    assert_eq!(json, serde_json::json!({ "isBlocked": false }));
}

#[test]
fn patch_apply_keeps_unset_fields() {
    let ann = contact("1", "Ann", false, false);
    let patched = ContactPatch {
        name: Some("Anna".to_owned()),
        is_blocked: Some(true),
        ..Default::default()
    }
    .apply_to(&ann);

    assert_eq!(patched.id, ann.id);
    assert_eq!(patched.name, "Anna");
    assert_eq!(patched.email, ann.email);
    assert_eq!(patched.phone, ann.phone);
    assert!(!patched.is_favorite);
    assert!(patched.is_blocked);
    assert!(ContactPatch::default().is_empty());
    assert!(!ContactPatch::favorite(false).is_empty());
}

#[test]
fn draft_validation() {
    assert!(ContactDraft::new("Ann", "1").validate().is_ok());
    assert_eq!(
        ContactDraft::new("  ", "1").validate(),
        Err(Error::FieldRequired("name"))
    );
    assert_eq!(
        ContactDraft::new("Ann", "").validate(),
        Err(Error::FieldRequired("phone"))
    );
}

#[test]
fn contact_from_draft() {
    let draft = ContactDraft::new("A", "1");
    let created = Contact::from_draft(ContactId::from("42"), draft.clone());
    assert_eq!(created.id.as_str(), "42");
    assert_eq!(ContactDraft::from(&created), draft);
}

#[test]
fn edit_draft_reset() {
    let ann = contact("1", "Ann", false, false);
    let mut draft = EditDraft::new(&ann);
    assert!(!draft.is_dirty(&ann));

    draft.fields.name = "Annie".to_owned();
    draft.fields.is_favorite = true;
    assert!(draft.is_dirty(&ann));

    draft.reset(&ann);
    assert!(!draft.is_dirty(&ann));
    assert_eq!(draft.fields.name, "Ann");
}
