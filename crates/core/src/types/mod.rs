//! Newtype wrappers and small vocabularies shared across Cardfile.

pub mod category;
pub mod email;
pub mod id;

pub use category::{SUGGESTED_CATEGORIES, is_suggested_category};
pub use email::{Email, EmailError};
pub use id::ContactId;
