//! Per-UI-session contact state and action sequencing.
//!
//! One [`ContactSession`] exists per UI session. It owns the working draft,
//! the full contact set, the filtered view, and the edit-mode flag, and it
//! sequences every user action onto the address-book client: each successful
//! mutation is followed by a full reload and a re-derivation of the filtered
//! view. Client failures collapse into a user-facing [`Notice`]; the session
//! state is left untouched so nothing is half-applied.

use serde::Serialize;
use tracing::{error, info, warn};

use cardfile_client::{AddressBookClient, SearchFilter};
use cardfile_core::{Contact, ContactId};

/// Severity of a user-facing notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Success,
    Error,
}

/// A message queued for the user, drained into the next response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub text: String,
}

impl Notice {
    /// A success notice.
    #[must_use]
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            text: text.into(),
        }
    }

    /// An error notice.
    #[must_use]
    pub fn error(text: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            text: text.into(),
        }
    }
}

/// View/session coordinator for one UI session.
pub struct ContactSession {
    client: AddressBookClient,
    draft: Contact,
    all_contacts: Vec<Contact>,
    visible_contacts: Vec<Contact>,
    filter: SearchFilter,
    editing: bool,
    initialized: bool,
    notices: Vec<Notice>,
}

impl ContactSession {
    /// Create a session around the given client. Call
    /// [`Self::initialize`] (or [`Self::ensure_initialized`]) before use.
    #[must_use]
    pub fn new(client: AddressBookClient) -> Self {
        Self {
            client,
            draft: Contact::default(),
            all_contacts: Vec::new(),
            visible_contacts: Vec::new(),
            filter: SearchFilter::default(),
            editing: false,
            initialized: false,
            notices: Vec::new(),
        }
    }

    /// Reset the draft, load the full contact set, and leave edit mode.
    pub async fn initialize(&mut self) {
        self.initialized = true;
        self.draft = Contact::default();
        self.editing = false;
        self.reload().await;
    }

    /// Run [`Self::initialize`] on first use; later calls are no-ops.
    pub async fn ensure_initialized(&mut self) {
        if !self.initialized {
            self.initialize().await;
        }
    }

    /// Re-fetch the full contact set; the visible list becomes an unfiltered
    /// copy. On failure both lists are reset to empty and an error notice is
    /// queued.
    pub async fn reload(&mut self) {
        match self.client.list_all().await {
            Ok(contacts) => {
                self.all_contacts = contacts;
                self.visible_contacts = self.all_contacts.clone();
            }
            Err(err) => {
                error!(error = %err, "failed to load contacts");
                self.all_contacts = Vec::new();
                self.visible_contacts = Vec::new();
                self.push_notice(Notice::error("Failed to load contacts. Please try again."));
            }
        }
    }

    /// Submit the form: update when in edit mode, create otherwise.
    pub async fn submit_form(&mut self) {
        if self.editing {
            self.submit_update().await;
        } else {
            self.submit_create().await;
        }
    }

    /// Create the draft through the client. On success the draft is cleared
    /// and the working set reloaded and refiltered; on failure an error
    /// notice is queued and nothing changes.
    pub async fn submit_create(&mut self) {
        match self.client.create(&self.draft).await {
            Ok(created) => {
                info!(id = ?created.id, "contact created");
                self.push_notice(Notice::success("Contact added successfully!"));
                self.clear_form();
                self.reload().await;
                self.refresh_filter().await;
            }
            Err(err) => {
                error!(error = %err, "failed to create contact");
                self.push_notice(Notice::error("Failed to add contact. Please try again."));
            }
        }
    }

    /// Update the contact addressed by the draft's id. Same shape as
    /// [`Self::submit_create`].
    pub async fn submit_update(&mut self) {
        let Some(id) = self.draft.id else {
            // Unreachable through the form flow; edit mode always carries an id.
            warn!("update submitted without a saved contact id");
            self.push_notice(Notice::error("Failed to update contact. Please try again."));
            return;
        };

        match self.client.update(id, &self.draft).await {
            Ok(_) => {
                info!(%id, "contact updated");
                self.push_notice(Notice::success("Contact updated successfully!"));
                self.clear_form();
                self.reload().await;
                self.refresh_filter().await;
            }
            Err(err) => {
                error!(%id, error = %err, "failed to update contact");
                self.push_notice(Notice::error("Failed to update contact. Please try again."));
            }
        }
    }

    /// Delete a contact. Success reloads and refilters; failure only queues
    /// an error notice.
    pub async fn remove(&mut self, id: ContactId) {
        match self.client.delete(id).await {
            Ok(()) => {
                info!(%id, "contact deleted");
                self.push_notice(Notice::success("Contact deleted successfully!"));
                self.reload().await;
                self.refresh_filter().await;
            }
            Err(err) => {
                error!(%id, error = %err, "failed to delete contact");
                self.push_notice(Notice::error("Failed to delete contact. Please try again."));
            }
        }
    }

    /// Copy every field of `contact` (including the id) into a fresh draft
    /// and enter edit mode.
    pub fn begin_edit(&mut self, contact: &Contact) {
        self.draft = contact.clone();
        self.editing = true;
    }

    /// [`Self::begin_edit`] addressed by id, looked up in the loaded set.
    pub fn begin_edit_by_id(&mut self, id: ContactId) {
        let found = self
            .all_contacts
            .iter()
            .find(|c| c.id == Some(id))
            .cloned();

        if let Some(contact) = found {
            self.begin_edit(&contact);
        } else {
            warn!(%id, "edit requested for unknown contact");
            self.push_notice(Notice::error("Contact not found."));
        }
    }

    /// Leave edit mode and reset the draft.
    pub fn cancel_edit(&mut self) {
        self.clear_form();
    }

    /// Reset the draft to an empty, unsaved contact and leave edit mode.
    pub fn clear_form(&mut self) {
        self.draft = Contact::default();
        self.editing = false;
    }

    /// Replace the draft's user-editable fields. The draft's id is kept;
    /// ids are store-assigned, never user input.
    pub fn fill_draft(&mut self, fields: Contact) {
        let id = self.draft.id;
        self.draft = Contact { id, ..fields };
    }

    /// Store the filter and recompute the visible list through the client's
    /// search. On failure the visible list falls back to an unfiltered copy
    /// and an error notice is queued.
    pub async fn apply_filter(&mut self, query: String, category: String) {
        self.filter = SearchFilter::new(query, category);
        self.refresh_filter().await;
    }

    /// Reset the filter; the visible list becomes an unfiltered copy.
    pub fn clear_filter(&mut self) {
        self.filter = SearchFilter::default();
        self.visible_contacts = self.all_contacts.clone();
    }

    async fn refresh_filter(&mut self) {
        match self.client.search(&self.filter).await {
            Ok(contacts) => {
                self.visible_contacts = contacts;
            }
            Err(err) => {
                error!(error = %err, "failed to search contacts");
                self.visible_contacts = self.all_contacts.clone();
                self.push_notice(Notice::error("Failed to search contacts. Please try again."));
            }
        }
    }

    /// The contacts currently visible after filtering.
    #[must_use]
    pub fn visible_contacts(&self) -> &[Contact] {
        &self.visible_contacts
    }

    /// The full, unfiltered contact set.
    #[must_use]
    pub fn all_contacts(&self) -> &[Contact] {
        &self.all_contacts
    }

    /// The working draft bound to the form.
    #[must_use]
    pub const fn draft(&self) -> &Contact {
        &self.draft
    }

    /// Whether the form is editing an existing contact.
    #[must_use]
    pub const fn is_editing(&self) -> bool {
        self.editing
    }

    /// The active search filter.
    #[must_use]
    pub const fn filter(&self) -> &SearchFilter {
        &self.filter
    }

    /// Number of visible contacts.
    #[must_use]
    pub fn total(&self) -> usize {
        self.visible_contacts.len()
    }

    /// Whether the visible list is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.visible_contacts.is_empty()
    }

    /// Form heading for the current mode.
    #[must_use]
    pub const fn form_title(&self) -> &'static str {
        if self.editing {
            "Edit Contact"
        } else {
            "Add New Contact"
        }
    }

    /// Submit-button label for the current mode.
    #[must_use]
    pub const fn submit_label(&self) -> &'static str {
        if self.editing {
            "Update Contact"
        } else {
            "Add Contact"
        }
    }

    /// Drain the queued notices.
    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    fn push_notice(&mut self, notice: Notice) {
        self.notices.push(notice);
    }
}
