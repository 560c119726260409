//! Authentication for the Cryptowatch API.
//!
//! Public market data needs no credentials. An optional API key raises the
//! request allowance; it is held as a secret and never printed.

mod credentials;

pub use credentials::{API_KEY_ENV_VAR, ApiKey};
