//! Identity Provider (IdP) Service Library
//!
//! Authenticates principals against an injected credential store and issues
//! signed, risk-scored access tokens for the identity trust domain.
//!
//! # Modules
//!
//! - `config` - Service configuration
//! - `errors` - Error types
//! - `handlers` - HTTP request handlers
//! - `models` - Request/response models
//! - `observability` - Metrics
//! - `routes` - Router construction
//! - `services` - Token issuance logic

pub mod config;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod observability;
pub mod routes;
pub mod services;
