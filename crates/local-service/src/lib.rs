//! Local Service Library
//!
//! An independently keyed trust domain issuing short-lived session tokens
//! for its own resources. Session artifacts are delivered as scoped cookies,
//! not bearer headers, and carry distinct `typ`/`iss` markers so they can
//! never be confused with identity-provider access tokens.
//!
//! # Modules
//!
//! - `config` - Service configuration
//! - `errors` - Error types
//! - `handlers` - HTTP request handlers
//! - `middleware` - Session cookie extraction and validation
//! - `models` - Request/response models
//! - `observability` - Metrics
//! - `routes` - Router construction
//! - `services` - Session issuance and decoding logic

pub mod config;
pub mod errors;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod observability;
pub mod routes;
pub mod services;
