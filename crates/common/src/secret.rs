//! Secret types for protecting sensitive values from accidental logging.
//!
//! Re-exports from the [`secrecy`] crate. Use [`SecretString`] for every
//! sensitive value in this workspace: passwords in login payloads, signing
//! secrets in configuration. `Debug` on these types prints `[REDACTED]`, so
//! any struct deriving `Debug` around them stays safe to trace, and the
//! underlying value is zeroized on drop.
//!
//! Reading the actual value requires an explicit [`ExposeSecret::expose_secret`]
//! call, which keeps secret use greppable.

pub use secrecy::{ExposeSecret, SecretBox, SecretString};
