//! HTTP request handlers for the identity provider.

pub mod auth_handler;

pub use auth_handler::{handle_login, AppState};
