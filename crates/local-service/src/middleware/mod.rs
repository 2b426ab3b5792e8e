//! Middleware for the local service.

pub mod session;

pub use session::{require_session, SessionState};
