//! Shared types and utilities for the Context Gate services.

#![warn(clippy::pedantic)]

/// Module for the signed claims model
pub mod claims;

/// Module for the injected credential lookup capability
pub mod credentials;

/// Module for trust-domain scoped token signing and verification
pub mod jwt;

/// Module for privacy-safe logging helpers
pub mod observability;

/// Module for the contextual risk scorer
pub mod risk;

/// Module for secret types that prevent accidental logging
pub mod secret;
