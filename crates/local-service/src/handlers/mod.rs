//! HTTP request handlers for the local service.

pub mod session_handler;

pub use session_handler::{handle_local_admin, handle_local_login, handle_local_resource, AppState};
