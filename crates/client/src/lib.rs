//! Cardfile address-book API client.
//!
//! The sole boundary between Cardfile and the remote contact store. Maps the
//! five CRUD operations onto plain REST verbs against a fixed collection
//! endpoint, plus a search operation layered on the full listing.
//!
//! Failures are returned as a typed [`AddressBookError`] union
//! (transport, non-success status, undecodable body); callers decide how to
//! surface them. No retries, no caching, no local persistence.

#![cfg_attr(not(test), forbid(unsafe_code))]

mod client;
mod error;
mod search;

pub use client::AddressBookClient;
pub use error::AddressBookError;
pub use search::SearchFilter;
