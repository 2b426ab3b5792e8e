//! Middleware for protected gateway routes.

pub mod auth;

pub use auth::{require_bearer, AuthState};
