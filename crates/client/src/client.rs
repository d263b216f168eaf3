//! HTTP client for the remote address-book store.

use reqwest::StatusCode;
use serde::Serialize;
use tracing::{debug, error, instrument};
use url::Url;

use cardfile_core::{Contact, ContactId};

use crate::error::AddressBookError;
use crate::search::SearchFilter;

/// Client for the remote address-book CRUD API.
///
/// Requests go to `{api_root}/addressbook` and
/// `{api_root}/addressbook/{id}` with standard verb mapping. Each call is a
/// single request; the transport's default timeout is the only deadline and
/// nothing is retried.
#[derive(Debug, Clone)]
pub struct AddressBookClient {
    http: reqwest::Client,
    base_url: String,
}

impl AddressBookClient {
    /// Create a new client addressing the given API root
    /// (e.g. `http://localhost:8081/api`).
    #[must_use]
    pub fn new(api_root: &Url) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: api_root.as_str().trim_end_matches('/').to_owned(),
        }
    }

    fn collection_url(&self) -> String {
        format!("{}/addressbook", self.base_url)
    }

    fn resource_url(&self, id: ContactId) -> String {
        format!("{}/addressbook/{id}", self.base_url)
    }

    /// Fetch every contact in the store.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the store responds with a
    /// non-success status, or the body is not a JSON array of contacts.
    #[instrument(skip(self))]
    pub async fn list_all(&self) -> Result<Vec<Contact>, AddressBookError> {
        let response = self.http.get(self.collection_url()).send().await?;
        let status = response.status();

        if !status.is_success() {
            return Err(api_error("list", response).await);
        }

        let contacts: Vec<Contact> = response
            .json()
            .await
            .map_err(|e| AddressBookError::Parse(e.to_string()))?;

        debug!(count = contacts.len(), "fetched contacts");
        Ok(contacts)
    }

    /// Fetch a single contact by id.
    ///
    /// Returns `Ok(None)` when the store answers 404.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, any other non-success status,
    /// or an undecodable body.
    #[instrument(skip(self), fields(id = %id))]
    pub async fn get(&self, id: ContactId) -> Result<Option<Contact>, AddressBookError> {
        let response = self.http.get(self.resource_url(id)).send().await?;
        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            debug!(%id, "contact not found");
            return Ok(None);
        }

        if !status.is_success() {
            return Err(api_error("get", response).await);
        }

        let contact = response
            .json()
            .await
            .map_err(|e| AddressBookError::Parse(e.to_string()))?;

        Ok(Some(contact))
    }

    /// Create a contact. The id is never sent; the store assigns one and the
    /// returned value carries it.
    ///
    /// # Errors
    ///
    /// Returns an error unless the store answers 200 or 201 with a contact
    /// object.
    #[instrument(skip(self, contact), fields(email = %contact.email))]
    pub async fn create(&self, contact: &Contact) -> Result<Contact, AddressBookError> {
        let response = self
            .http
            .post(self.collection_url())
            .json(&ContactPayload::from(contact))
            .send()
            .await?;
        let status = response.status();

        if status != StatusCode::OK && status != StatusCode::CREATED {
            return Err(api_error("create", response).await);
        }

        let created: Contact = response
            .json()
            .await
            .map_err(|e| AddressBookError::Parse(e.to_string()))?;

        debug!(id = ?created.id, "contact created");
        Ok(created)
    }

    /// Replace the contact stored under `id`.
    ///
    /// # Errors
    ///
    /// Returns an error unless the store answers 200 with the updated
    /// contact object.
    #[instrument(skip(self, contact), fields(id = %id))]
    pub async fn update(
        &self,
        id: ContactId,
        contact: &Contact,
    ) -> Result<Contact, AddressBookError> {
        let response = self
            .http
            .put(self.resource_url(id))
            .json(&ContactPayload::from(contact))
            .send()
            .await?;
        let status = response.status();

        if status != StatusCode::OK {
            return Err(api_error("update", response).await);
        }

        let updated: Contact = response
            .json()
            .await
            .map_err(|e| AddressBookError::Parse(e.to_string()))?;

        debug!(%id, "contact updated");
        Ok(updated)
    }

    /// Delete the contact stored under `id`.
    ///
    /// # Errors
    ///
    /// Returns an error unless the store answers 200 or 204.
    #[instrument(skip(self), fields(id = %id))]
    pub async fn delete(&self, id: ContactId) -> Result<(), AddressBookError> {
        let response = self.http.delete(self.resource_url(id)).send().await?;
        let status = response.status();

        if status != StatusCode::OK && status != StatusCode::NO_CONTENT {
            return Err(api_error("delete", response).await);
        }

        debug!(%id, "contact deleted");
        Ok(())
    }

    /// Search contacts by free-text query and category.
    ///
    /// Fetches the full set and re-scans it with [`SearchFilter::matches`];
    /// order is preserved from [`Self::list_all`]. There is no index and no
    /// server-side filtering.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying listing fails.
    #[instrument(skip(self, filter), fields(query = %filter.query, category = %filter.category))]
    pub async fn search(&self, filter: &SearchFilter) -> Result<Vec<Contact>, AddressBookError> {
        let all = self.list_all().await?;
        Ok(all.into_iter().filter(|c| filter.matches(c)).collect())
    }
}

/// Build an [`AddressBookError::Api`] from a non-success response, logging it
/// at the boundary.
async fn api_error(operation: &'static str, response: reqwest::Response) -> AddressBookError {
    let status = response.status().as_u16();
    let message = response.text().await.unwrap_or_default();
    error!(operation, status, "address-book store returned an error");
    AddressBookError::Api { status, message }
}

/// Write-side wire representation: every contact field except the id.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ContactPayload<'a> {
    first_name: &'a str,
    last_name: &'a str,
    email: &'a str,
    phone: &'a str,
    company: &'a str,
    category: &'a str,
    address: &'a str,
}

impl<'a> From<&'a Contact> for ContactPayload<'a> {
    fn from(contact: &'a Contact) -> Self {
        Self {
            first_name: &contact.first_name,
            last_name: &contact.last_name,
            email: &contact.email,
            phone: &contact.phone,
            company: &contact.company,
            category: &contact.category,
            address: &contact.address,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn client(root: &str) -> AddressBookClient {
        AddressBookClient::new(&Url::parse(root).unwrap())
    }

    #[test]
    fn test_collection_url() {
        let client = client("http://localhost:8081/api");
        assert_eq!(
            client.collection_url(),
            "http://localhost:8081/api/addressbook"
        );
    }

    #[test]
    fn test_trailing_slash_is_trimmed() {
        let client = client("http://localhost:8081/api/");
        assert_eq!(
            client.resource_url(ContactId::new(5)),
            "http://localhost:8081/api/addressbook/5"
        );
    }

    #[test]
    fn test_payload_never_carries_id() {
        let contact = Contact {
            id: Some(ContactId::new(9)),
            ..Contact::new("Ann", "Lee", "a@x.com")
        };

        let json = serde_json::to_value(ContactPayload::from(&contact)).unwrap();
        assert!(json.get("id").is_none());
        assert_eq!(json["firstName"], "Ann");
        assert_eq!(json["phone"], "");
    }
}
