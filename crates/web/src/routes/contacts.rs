//! Contact form and table route handlers.
//!
//! Every handler resolves the caller's `ContactSession`, performs one action
//! on it, and answers with the refreshed [`SessionView`] - visible contacts,
//! draft, mode, filter, and any notices the action queued. The UI binds its
//! form and table to this one shape.

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{delete, get, post},
};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use tracing::instrument;

use cardfile_core::{Contact, ContactId, Email, SUGGESTED_CATEGORIES};

use crate::error::Result;
use crate::session::{ContactSession, Notice};
use crate::state::AppState;

/// Contact routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/contacts", get(view).post(submit))
        .route("/contacts/{id}/edit", post(begin_edit))
        .route("/contacts/{id}", delete(remove))
        .route("/contacts/form/clear", post(clear_form))
        .route("/contacts/reload", post(reload))
        .route("/contacts/filter", post(apply_filter))
        .route("/contacts/filter/clear", post(clear_filter))
}

/// Contact form fields as posted by the UI.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContactForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub company: String,
    pub category: String,
    pub address: String,
}

impl From<ContactForm> for Contact {
    fn from(form: ContactForm) -> Self {
        Self {
            id: None,
            first_name: form.first_name.trim().to_owned(),
            last_name: form.last_name.trim().to_owned(),
            email: form.email.trim().to_owned(),
            phone: form.phone.trim().to_owned(),
            company: form.company.trim().to_owned(),
            category: form.category.trim().to_owned(),
            address: form.address.trim().to_owned(),
        }
    }
}

/// Filter fields as posted by the UI.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct FilterForm {
    pub query: String,
    pub category: String,
}

/// The session state as rendered to the UI.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionView {
    pub contacts: Vec<Contact>,
    pub total: usize,
    pub editing: bool,
    pub form_title: &'static str,
    pub submit_label: &'static str,
    pub draft: Contact,
    pub query: String,
    pub category: String,
    pub categories: &'static [&'static str],
    pub notices: Vec<Notice>,
}

impl SessionView {
    fn from_session(session: &mut ContactSession) -> Self {
        Self {
            contacts: session.visible_contacts().to_vec(),
            total: session.total(),
            editing: session.is_editing(),
            form_title: session.form_title(),
            submit_label: session.submit_label(),
            draft: session.draft().clone(),
            query: session.filter().query.clone(),
            category: session.filter().category.clone(),
            categories: SUGGESTED_CATEGORIES,
            notices: session.take_notices(),
        }
    }
}

/// GET /contacts
#[instrument(skip(state, session))]
async fn view(State(state): State<AppState>, session: Session) -> Result<Json<SessionView>> {
    let mut contacts = state.contact_session(&session).await?;
    Ok(Json(SessionView::from_session(&mut contacts)))
}

/// POST /contacts
///
/// Submits the form; dispatches to create or update based on the session's
/// edit mode. Validation failures become error notices without a store call.
#[instrument(skip(state, session, form), fields(email = %form.email))]
async fn submit(
    State(state): State<AppState>,
    session: Session,
    Json(form): Json<ContactForm>,
) -> Result<Json<SessionView>> {
    let mut contacts = state.contact_session(&session).await?;

    if let Some(problem) = validate_form(&form) {
        let mut view = SessionView::from_session(&mut contacts);
        view.notices.push(Notice::error(problem));
        return Ok(Json(view));
    }

    contacts.fill_draft(form.into());
    contacts.submit_form().await;
    Ok(Json(SessionView::from_session(&mut contacts)))
}

/// POST /contacts/{id}/edit
#[instrument(skip(state, session))]
async fn begin_edit(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i64>,
) -> Result<Json<SessionView>> {
    let mut contacts = state.contact_session(&session).await?;
    contacts.begin_edit_by_id(ContactId::new(id));
    Ok(Json(SessionView::from_session(&mut contacts)))
}

/// DELETE /contacts/{id}
#[instrument(skip(state, session))]
async fn remove(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i64>,
) -> Result<Json<SessionView>> {
    let mut contacts = state.contact_session(&session).await?;
    contacts.remove(ContactId::new(id)).await;
    Ok(Json(SessionView::from_session(&mut contacts)))
}

/// POST /contacts/form/clear
#[instrument(skip(state, session))]
async fn clear_form(State(state): State<AppState>, session: Session) -> Result<Json<SessionView>> {
    let mut contacts = state.contact_session(&session).await?;
    contacts.cancel_edit();
    Ok(Json(SessionView::from_session(&mut contacts)))
}

/// POST /contacts/reload
#[instrument(skip(state, session))]
async fn reload(State(state): State<AppState>, session: Session) -> Result<Json<SessionView>> {
    let mut contacts = state.contact_session(&session).await?;
    contacts.reload().await;
    Ok(Json(SessionView::from_session(&mut contacts)))
}

/// POST /contacts/filter
#[instrument(skip(state, session, form), fields(query = %form.query, category = %form.category))]
async fn apply_filter(
    State(state): State<AppState>,
    session: Session,
    Json(form): Json<FilterForm>,
) -> Result<Json<SessionView>> {
    let mut contacts = state.contact_session(&session).await?;
    contacts.apply_filter(form.query, form.category).await;
    Ok(Json(SessionView::from_session(&mut contacts)))
}

/// POST /contacts/filter/clear
#[instrument(skip(state, session))]
async fn clear_filter(State(state): State<AppState>, session: Session) -> Result<Json<SessionView>> {
    let mut contacts = state.contact_session(&session).await?;
    contacts.clear_filter();
    Ok(Json(SessionView::from_session(&mut contacts)))
}

/// Validate the form the way the store expects contacts to be shaped:
/// non-blank names and a structurally valid email.
fn validate_form(form: &ContactForm) -> Option<&'static str> {
    if form.first_name.trim().is_empty() {
        return Some("First name is required.");
    }
    if form.last_name.trim().is_empty() {
        return Some("Last name is required.");
    }

    let email = form.email.trim();
    if email.is_empty() {
        return Some("Email is required.");
    }
    if Email::parse(email).is_err() {
        return Some("Please enter a valid email address.");
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_form() -> ContactForm {
        ContactForm {
            first_name: "Ann".to_owned(),
            last_name: "Lee".to_owned(),
            email: "a@x.com".to_owned(),
            ..ContactForm::default()
        }
    }

    #[test]
    fn test_validate_accepts_valid_form() {
        assert!(validate_form(&valid_form()).is_none());
    }

    #[test]
    fn test_validate_requires_names() {
        let form = ContactForm {
            first_name: "  ".to_owned(),
            ..valid_form()
        };
        assert_eq!(validate_form(&form), Some("First name is required."));

        let form = ContactForm {
            last_name: String::new(),
            ..valid_form()
        };
        assert_eq!(validate_form(&form), Some("Last name is required."));
    }

    #[test]
    fn test_validate_requires_email() {
        let form = ContactForm {
            email: String::new(),
            ..valid_form()
        };
        assert_eq!(validate_form(&form), Some("Email is required."));
    }

    #[test]
    fn test_validate_rejects_malformed_email() {
        let form = ContactForm {
            email: "not-an-email".to_owned(),
            ..valid_form()
        };
        assert_eq!(
            validate_form(&form),
            Some("Please enter a valid email address.")
        );
    }

    #[test]
    fn test_form_fields_are_trimmed() {
        let form = ContactForm {
            first_name: " Ann ".to_owned(),
            company: " Acme Corp ".to_owned(),
            ..valid_form()
        };

        let contact = Contact::from(form);
        assert_eq!(contact.first_name, "Ann");
        assert_eq!(contact.company, "Acme Corp");
        assert_eq!(contact.id, None);
    }
}
