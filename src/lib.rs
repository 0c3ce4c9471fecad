//! # sealkit
//!
//! Passphrase-based sealing of small messages:
//! - Argon2id (m = 32 MiB, t = 2, p = 2) turns a passphrase and a 16-byte
//!   random salt into a 256-bit key
//! - ChaCha20-Poly1305 (IETF, 12-byte nonce, no AAD) seals the message
//!   into a detached `iv / data / tag` bundle
//! - keys, salts and recovered plaintext are zeroized on drop
//!
//! Key and salt storage are left to the caller.

pub mod bundle;
pub mod config;
pub mod crypto;
pub mod error;
pub mod facade;
pub mod runtime;
pub mod telemetry;

// Re-exports
pub use bundle::CiphertextBundle;
pub use config::CryptoConfig;
pub use crypto::{DerivedKey, Salt, SecureBuffer};
pub use error::{Result, SealError};
pub use facade::CryptoFacade;
pub use secrecy::SecretString;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
