//! Cardfile Core - Shared types library.
//!
//! This crate provides common types used across all Cardfile components:
//! - `client` - Remote address-book API client
//! - `web` - Web front end hosting per-session contact state
//! - `cli` - Command-line tools for working with the address book
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients. This keeps
//! it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`contact`] - The `Contact` record and its wire representation
//! - [`types`] - Newtype wrappers for type-safe IDs, emails, and categories

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod contact;
pub mod types;

pub use contact::Contact;
pub use types::*;
