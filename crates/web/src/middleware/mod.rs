//! Middleware for the web front end.

pub mod session;

pub use session::create_session_layer;
