//! HTTP route handlers for the web front end.
//!
//! # Route Structure
//!
//! ```text
//! GET    /health                 - Liveness check
//!
//! # Contacts (JSON views for the form/table UI)
//! GET    /contacts               - Current session view
//! POST   /contacts               - Submit the form (create or update)
//! POST   /contacts/{id}/edit     - Begin editing a contact
//! POST   /contacts/form/clear    - Cancel edit / clear the form
//! DELETE /contacts/{id}          - Delete a contact
//! POST   /contacts/reload        - Re-fetch the contact set
//! POST   /contacts/filter        - Apply query/category filter
//! POST   /contacts/filter/clear  - Clear the filter
//! ```

pub mod contacts;

use axum::Router;

use crate::state::AppState;

/// Build the route tree.
pub fn routes() -> Router<AppState> {
    Router::new().merge(contacts::routes())
}
