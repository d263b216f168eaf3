//! Address-book API errors.

use thiserror::Error;

/// Errors that can occur when talking to the remote address-book store.
#[derive(Debug, Error)]
pub enum AddressBookError {
    /// HTTP request failed (connection, timeout, TLS).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The store returned a non-success status.
    #[error("API error: {status} - {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Response body, if any.
        message: String,
    },

    /// Failed to decode the response body.
    #[error("Parse error: {0}")]
    Parse(String),
}
