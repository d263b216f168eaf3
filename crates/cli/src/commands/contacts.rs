//! Contact commands against the remote address-book store.
//!
//! # Environment Variables
//!
//! - `CARDFILE_API_URL` - Root URL of the remote address-book API

use clap::Args;
use thiserror::Error;
use url::Url;

use cardfile_client::{AddressBookClient, AddressBookError, SearchFilter};
use cardfile_core::{Contact, ContactId, Email, is_suggested_category};

/// Default root URL of the remote address-book API.
const DEFAULT_API_URL: &str = "http://localhost:8081/api";

/// Errors that can occur during contact commands.
#[derive(Debug, Error)]
pub enum ContactsError {
    /// Environment variable is present but not a URL.
    #[error("Invalid CARDFILE_API_URL: {0}")]
    InvalidApiUrl(String),

    /// A required name field is blank.
    #[error("{0} is required")]
    BlankName(&'static str),

    /// Invalid email.
    #[error("Invalid email: {0}")]
    InvalidEmail(String),

    /// No contact stored under the given id.
    #[error("No contact with id {0}")]
    NotFound(ContactId),

    /// The store rejected or failed the operation.
    #[error(transparent)]
    Store(#[from] AddressBookError),
}

/// Contact fields shared by `add` and `update`.
#[derive(Debug, Args)]
pub struct ContactArgs {
    /// First name
    #[arg(short = 'f', long)]
    pub first_name: String,

    /// Last name
    #[arg(short = 'l', long)]
    pub last_name: String,

    /// Email address
    #[arg(short, long)]
    pub email: String,

    /// Phone number
    #[arg(short, long, default_value = "")]
    pub phone: String,

    /// Company name
    #[arg(long, default_value = "")]
    pub company: String,

    /// Category (`personal`, `business`, `family`, `friend`, ...)
    #[arg(long, default_value = "")]
    pub category: String,

    /// Postal address
    #[arg(short, long, default_value = "")]
    pub address: String,
}

impl ContactArgs {
    /// Validate the fields and build an unsaved contact.
    fn into_contact(self) -> Result<Contact, ContactsError> {
        if self.first_name.trim().is_empty() {
            return Err(ContactsError::BlankName("First name"));
        }
        if self.last_name.trim().is_empty() {
            return Err(ContactsError::BlankName("Last name"));
        }
        Email::parse(self.email.trim())
            .map_err(|e| ContactsError::InvalidEmail(e.to_string()))?;

        let category = self.category.trim().to_owned();
        if !category.is_empty() && !is_suggested_category(&category) {
            tracing::warn!(%category, "category is not one of the suggested labels");
        }

        Ok(Contact {
            id: None,
            first_name: self.first_name.trim().to_owned(),
            last_name: self.last_name.trim().to_owned(),
            email: self.email.trim().to_owned(),
            phone: self.phone.trim().to_owned(),
            company: self.company.trim().to_owned(),
            category,
            address: self.address.trim().to_owned(),
        })
    }
}

/// Build a client from the environment.
fn client() -> Result<AddressBookClient, ContactsError> {
    dotenvy::dotenv().ok();

    let raw = std::env::var("CARDFILE_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_owned());
    let api_url = raw
        .parse::<Url>()
        .map_err(|e| ContactsError::InvalidApiUrl(e.to_string()))?;

    Ok(AddressBookClient::new(&api_url))
}

/// List every contact in the store.
pub async fn list() -> Result<(), ContactsError> {
    let contacts = client()?.list_all().await?;
    print_table(&contacts);
    Ok(())
}

/// Show one contact in full.
pub async fn get(id: i64) -> Result<(), ContactsError> {
    let id = ContactId::new(id);
    let contact = client()?
        .get(id)
        .await?
        .ok_or(ContactsError::NotFound(id))?;
    print_details(&contact);
    Ok(())
}

/// Create a contact and report its assigned id.
pub async fn add(args: ContactArgs) -> Result<(), ContactsError> {
    let contact = args.into_contact()?;
    let created = client()?.create(&contact).await?;
    match created.id {
        Some(id) => println!("Added contact {id}: {}", created.full_name()),
        None => println!("Added contact: {}", created.full_name()),
    }
    Ok(())
}

/// Replace the contact stored under `id`.
pub async fn update(id: i64, args: ContactArgs) -> Result<(), ContactsError> {
    let contact = args.into_contact()?;
    let updated = client()?.update(ContactId::new(id), &contact).await?;
    println!("Updated contact {id}: {}", updated.full_name());
    Ok(())
}

/// Delete the contact stored under `id`.
pub async fn delete(id: i64) -> Result<(), ContactsError> {
    client()?.delete(ContactId::new(id)).await?;
    println!("Deleted contact {id}");
    Ok(())
}

/// Search by free-text query and category.
pub async fn search(query: &str, category: &str) -> Result<(), ContactsError> {
    let filter = SearchFilter::new(query, category);
    let contacts = client()?.search(&filter).await?;
    print_table(&contacts);
    Ok(())
}

fn print_table(contacts: &[Contact]) {
    if contacts.is_empty() {
        println!("No contacts found.");
        return;
    }

    println!(
        "{:>5}  {:<24}  {:<28}  {:<16}  {}",
        "ID", "NAME", "EMAIL", "PHONE", "CATEGORY"
    );
    for contact in contacts {
        let id = contact
            .id
            .map_or_else(|| "-".to_owned(), |id| id.to_string());
        println!(
            "{:>5}  {:<24}  {:<28}  {:<16}  {}",
            id,
            contact.full_name(),
            contact.email,
            contact.phone,
            contact.category
        );
    }
    println!("{} contact(s)", contacts.len());
}

fn print_details(contact: &Contact) {
    let id = contact
        .id
        .map_or_else(|| "-".to_owned(), |id| id.to_string());
    println!("Contact {id}");
    println!("  Name:     {}", contact.full_name());
    println!("  Email:    {}", contact.email);
    println!("  Phone:    {}", contact.phone);
    println!("  Company:  {}", contact.company);
    println!("  Category: {}", contact.category);
    println!("  Address:  {}", contact.address);
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn valid_args() -> ContactArgs {
        ContactArgs {
            first_name: "Ann".to_owned(),
            last_name: "Lee".to_owned(),
            email: "a@x.com".to_owned(),
            phone: String::new(),
            company: String::new(),
            category: String::new(),
            address: String::new(),
        }
    }

    #[test]
    fn test_into_contact_valid() {
        let contact = valid_args().into_contact().unwrap();
        assert_eq!(contact.id, None);
        assert_eq!(contact.full_name(), "Ann Lee");
    }

    #[test]
    fn test_into_contact_requires_names() {
        let args = ContactArgs {
            first_name: "  ".to_owned(),
            ..valid_args()
        };
        assert!(matches!(
            args.into_contact(),
            Err(ContactsError::BlankName("First name"))
        ));
    }

    #[test]
    fn test_into_contact_rejects_bad_email() {
        let args = ContactArgs {
            email: "nope".to_owned(),
            ..valid_args()
        };
        assert!(matches!(
            args.into_contact(),
            Err(ContactsError::InvalidEmail(_))
        ));
    }

    #[test]
    fn test_into_contact_trims_fields() {
        let args = ContactArgs {
            company: " Acme Corp ".to_owned(),
            ..valid_args()
        };
        let contact = args.into_contact().unwrap();
        assert_eq!(contact.company, "Acme Corp");
    }
}
