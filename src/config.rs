//! Parameter set for the KDF and AEAD.
//!
//! The defaults are the interoperability contract: two implementations can
//! only exchange bundles when every value here matches.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SealError};

/// Environment variable naming a JSON config file.
pub const CONFIG_ENV: &str = "SEALKIT_CONFIG";

/// ChaCha20-Poly1305 key size.
pub const KEY_LEN: usize = 32;
/// ChaCha20-Poly1305 IETF nonce size.
pub const NONCE_LEN: usize = 12;
/// Poly1305 tag size.
pub const TAG_LEN: usize = 16;

/// Shortest salt argon2 accepts.
const MIN_SALT_LEN: usize = 8;

/// Immutable configuration for [`crate::CryptoFacade`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CryptoConfig {
    /// Salt length in bytes
    pub salt_len: usize,
    /// Argon2 memory in KiB
    pub memory_cost_kib: u32,
    /// Argon2 passes
    pub time_cost: u32,
    /// Argon2 lanes
    pub parallelism: u32,
    pub key_len: usize,
    pub nonce_len: usize,
    pub tag_len: usize,
}

impl Default for CryptoConfig {
    fn default() -> Self {
        Self {
            salt_len: 16,
            memory_cost_kib: 32 * 1024, // 32 MiB
            time_cost: 2,
            parallelism: 2,
            key_len: KEY_LEN,
            nonce_len: NONCE_LEN,
            tag_len: TAG_LEN,
        }
    }
}

impl CryptoConfig {
    /// For constrained devices. Keys derived with this preset do not match
    /// keys derived with the default.
    pub fn low_memory() -> Self {
        Self {
            memory_cost_kib: 8 * 1024, // 8 MiB
            time_cost: 3,
            parallelism: 1,
            ..Default::default()
        }
    }

    pub fn high_security() -> Self {
        Self {
            salt_len: 32,
            memory_cost_kib: 256 * 1024, // 256 MiB
            time_cost: 4,
            parallelism: 4,
            ..Default::default()
        }
    }

    /// Checks the values against what Argon2id and ChaCha20-Poly1305 accept.
    pub fn validate(&self) -> Result<()> {
        if self.key_len != KEY_LEN {
            return Err(SealError::InvalidConfig(format!(
                "key_len must be {KEY_LEN}, got {}",
                self.key_len
            )));
        }
        if self.nonce_len != NONCE_LEN {
            return Err(SealError::InvalidConfig(format!(
                "nonce_len must be {NONCE_LEN}, got {}",
                self.nonce_len
            )));
        }
        if self.tag_len != TAG_LEN {
            return Err(SealError::InvalidConfig(format!(
                "tag_len must be {TAG_LEN}, got {}",
                self.tag_len
            )));
        }
        if self.salt_len < MIN_SALT_LEN {
            return Err(SealError::InvalidConfig(format!(
                "salt_len must be at least {MIN_SALT_LEN}, got {}",
                self.salt_len
            )));
        }
        if self.time_cost == 0 {
            return Err(SealError::InvalidConfig("time_cost must be at least 1".into()));
        }
        if self.parallelism == 0 {
            return Err(SealError::InvalidConfig("parallelism must be at least 1".into()));
        }
        // argon2 needs 8 KiB blocks per lane
        if u64::from(self.memory_cost_kib) < 8 * u64::from(self.parallelism) {
            return Err(SealError::InvalidConfig(format!(
                "memory_cost_kib must be at least {} for {} lanes",
                8 * u64::from(self.parallelism),
                self.parallelism
            )));
        }
        Ok(())
    }

    /// Parses and validates a JSON document. Missing fields take defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&raw)
    }

    /// Loads from the file named by `SEALKIT_CONFIG`, or the defaults if unset.
    pub fn from_env() -> Result<Self> {
        match std::env::var_os(CONFIG_ENV) {
            Some(path) => {
                tracing::debug!("Loading crypto config from {:?}", path);
                Self::load(path)
            }
            None => Ok(Self::default()),
        }
    }
}
