//! Contact category vocabulary.
//!
//! Categories are free strings on the wire; this module only carries the
//! label set the UI offers in its dropdown. Nothing rejects other values.

/// Category labels suggested by the UI.
pub const SUGGESTED_CATEGORIES: &[&str] = &["personal", "business", "family", "friend"];

/// Whether a category is one of the suggested labels.
///
/// Comparison is case-sensitive, matching how the category filter compares.
#[must_use]
pub fn is_suggested_category(category: &str) -> bool {
    SUGGESTED_CATEGORIES.contains(&category)
}
