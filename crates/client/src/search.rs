//! Contact search semantics.

use cardfile_core::Contact;

/// Free-text query plus category filter.
///
/// A contact matches when the query is empty or appears (case-insensitively)
/// in its first name, last name, email, or company, AND the category filter
/// is empty or equals the contact's category exactly (case-sensitively).
/// A contact with no company can never satisfy a non-empty query through the
/// company field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchFilter {
    /// Case-insensitive substring query; empty matches everything.
    pub query: String,
    /// Exact category to keep; empty matches everything.
    pub category: String,
}

impl SearchFilter {
    /// Create a filter from its parts.
    #[must_use]
    pub fn new(query: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            category: category.into(),
        }
    }

    /// Whether the filter constrains nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.query.is_empty() && self.category.is_empty()
    }

    /// Whether `contact` passes both the query and the category filter.
    #[must_use]
    pub fn matches(&self, contact: &Contact) -> bool {
        self.matches_query(contact) && self.matches_category(contact)
    }

    fn matches_query(&self, contact: &Contact) -> bool {
        if self.query.is_empty() {
            return true;
        }

        let query = self.query.to_lowercase();
        contact.first_name.to_lowercase().contains(&query)
            || contact.last_name.to_lowercase().contains(&query)
            || contact.email.to_lowercase().contains(&query)
            || contact.company.to_lowercase().contains(&query)
    }

    fn matches_category(&self, contact: &Contact) -> bool {
        self.category.is_empty() || self.category == contact.category
    }
}
