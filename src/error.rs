//! Error types for sealkit

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SealError {
    #[error("Crypto runtime could not be initialized: {0}")]
    InitializationFailure(String),

    #[error("Key derivation failed: {0}")]
    KdfFailure(String),

    #[error("Encryption failed: {0}")]
    EncryptionFailure(String),

    /// Wrong key, tampered data or tag, wrong nonce and malformed bundles
    /// all map here with no further detail.
    #[error("Authentication failed")]
    AuthenticationFailure,

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SealError>;

impl SealError {
    pub fn is_security_critical(&self) -> bool {
        matches!(self, Self::AuthenticationFailure)
    }

    /// Errors a caller can reasonably handle and carry on from
    /// (lower the KDF cost, ask for the passphrase again).
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::KdfFailure(_) | Self::AuthenticationFailure)
    }

    /// Errors that indicate a broken environment or a defect.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::InitializationFailure(_) | Self::EncryptionFailure(_)
        )
    }
}
