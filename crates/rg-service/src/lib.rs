//! Resource Gateway Library
//!
//! Verifies access tokens minted by the identity provider and runs every
//! request through a context-aware policy decision point. The gateway never
//! issues tokens itself; it only consumes the identity trust domain's
//! signing key for verification.
//!
//! # Modules
//!
//! - `config` - Service and policy configuration
//! - `errors` - Error types
//! - `handlers` - HTTP request handlers
//! - `middleware` - Bearer token extraction and verification
//! - `models` - Response models
//! - `observability` - Metrics recorder and definitions
//! - `policy` - The policy decision point
//! - `routes` - Router construction

pub mod config;
pub mod errors;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod observability;
pub mod policy;
pub mod routes;
