//! The `Contact` record and its wire representation.
//!
//! Contacts travel as camelCase JSON objects. On read, any string field that
//! is absent or null collapses to the empty string, and a missing `id` key
//! means the contact is unsaved. The client crate owns the write-side payload
//! (which never carries an `id`).

use serde::{Deserialize, Deserializer, Serialize};

use crate::types::ContactId;

/// A single address-book contact.
///
/// The only entity in the system. `first_name`, `last_name`, and `email` are
/// required by the form layer; the remaining fields are optional and default
/// to the empty string. `category` is a free string (see
/// [`crate::types::SUGGESTED_CATEGORIES`]).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Contact {
    /// Store-assigned identifier; `None` for an unsaved draft.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<ContactId>,
    #[serde(deserialize_with = "empty_if_null")]
    pub first_name: String,
    #[serde(deserialize_with = "empty_if_null")]
    pub last_name: String,
    #[serde(deserialize_with = "empty_if_null")]
    pub email: String,
    #[serde(deserialize_with = "empty_if_null")]
    pub phone: String,
    #[serde(deserialize_with = "empty_if_null")]
    pub company: String,
    #[serde(deserialize_with = "empty_if_null")]
    pub category: String,
    #[serde(deserialize_with = "empty_if_null")]
    pub address: String,
}

impl Contact {
    /// Create an unsaved contact with the required fields set.
    #[must_use]
    pub fn new(first_name: &str, last_name: &str, email: &str) -> Self {
        Self {
            first_name: first_name.to_owned(),
            last_name: last_name.to_owned(),
            email: email.to_owned(),
            ..Self::default()
        }
    }

    /// Whether the contact has been assigned an id by the store.
    #[must_use]
    pub const fn is_saved(&self) -> bool {
        self.id.is_some()
    }

    /// Display name, "First Last".
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Two-letter uppercase initials for an avatar, or "??" when either
    /// name part is empty.
    #[must_use]
    pub fn initials(&self) -> String {
        match (self.first_name.chars().next(), self.last_name.chars().next()) {
            (Some(first), Some(last)) => first.to_uppercase().chain(last.to_uppercase()).collect(),
            _ => "??".to_owned(),
        }
    }
}

/// Treat JSON `null` the same as an absent key: empty string.
fn empty_if_null<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_full_object() {
        let json = r#"{
            "id": 3,
            "firstName": "Ann",
            "lastName": "Lee",
            "email": "a@x.com",
            "phone": "555-0100",
            "company": "Acme Corp",
            "category": "friend",
            "address": "1 Main St"
        }"#;

        let contact: Contact = serde_json::from_str(json).unwrap();
        assert_eq!(contact.id, Some(ContactId::new(3)));
        assert_eq!(contact.first_name, "Ann");
        assert_eq!(contact.company, "Acme Corp");
        assert_eq!(contact.category, "friend");
    }

    #[test]
    fn test_deserialize_missing_fields_default_to_empty() {
        let json = r#"{"firstName": "Ann", "lastName": "Lee", "email": "a@x.com"}"#;

        let contact: Contact = serde_json::from_str(json).unwrap();
        assert_eq!(contact.id, None);
        assert_eq!(contact.phone, "");
        assert_eq!(contact.company, "");
        assert_eq!(contact.category, "");
        assert_eq!(contact.address, "");
    }

    #[test]
    fn test_deserialize_null_fields_default_to_empty() {
        let json = r#"{"firstName": "Ann", "lastName": null, "company": null}"#;

        let contact: Contact = serde_json::from_str(json).unwrap();
        assert_eq!(contact.first_name, "Ann");
        assert_eq!(contact.last_name, "");
        assert_eq!(contact.company, "");
    }

    #[test]
    fn test_serialize_skips_missing_id() {
        let contact = Contact::new("Ann", "Lee", "a@x.com");
        let json = serde_json::to_value(&contact).unwrap();
        assert!(json.get("id").is_none());
        assert_eq!(json["firstName"], "Ann");
    }

    #[test]
    fn test_serialize_includes_assigned_id() {
        let contact = Contact {
            id: Some(ContactId::new(12)),
            ..Contact::new("Ann", "Lee", "a@x.com")
        };
        let json = serde_json::to_value(&contact).unwrap();
        assert_eq!(json["id"], 12);
    }

    #[test]
    fn test_is_saved() {
        let mut contact = Contact::new("Ann", "Lee", "a@x.com");
        assert!(!contact.is_saved());
        contact.id = Some(ContactId::new(1));
        assert!(contact.is_saved());
    }

    #[test]
    fn test_full_name() {
        let contact = Contact::new("Ann", "Lee", "a@x.com");
        assert_eq!(contact.full_name(), "Ann Lee");
    }

    #[test]
    fn test_initials() {
        let contact = Contact::new("ann", "lee", "a@x.com");
        assert_eq!(contact.initials(), "AL");
    }

    #[test]
    fn test_initials_missing_name_part() {
        let contact = Contact::new("Ann", "", "a@x.com");
        assert_eq!(contact.initials(), "??");
        assert_eq!(Contact::default().initials(), "??");
    }
}
