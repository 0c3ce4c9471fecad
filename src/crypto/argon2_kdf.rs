//! Argon2id KDF: passphrase + salt -> 256-bit key

use std::fmt;

use argon2::{Algorithm, Argon2, Block, Params, Version};
use rand::rngs::OsRng;
use rand::RngCore;
use secrecy::{ExposeSecret, ExposeSecretMut, SecretBox, SecretString};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::config::{CryptoConfig, KEY_LEN};
use crate::error::{Result, SealError};

/// 32-byte key produced by Argon2id, wiped on drop.
pub struct DerivedKey {
    inner: SecretBox<[u8; KEY_LEN]>,
}

impl DerivedKey {
    /// Wraps raw key bytes, e.g. a key obtained from another implementation.
    pub fn from_bytes(bytes: [u8; KEY_LEN]) -> Self {
        Self {
            inner: SecretBox::new(Box::new(bytes)),
        }
    }

    pub fn expose(&self) -> &[u8; KEY_LEN] {
        self.inner.expose_secret()
    }
}

impl fmt::Debug for DerivedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("DerivedKey([REDACTED])")
    }
}

/// Random KDF salt. The caller persists it next to the ciphertext when the
/// key has to be re-derived later.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Salt(Vec<u8>);

impl Salt {
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn to_hex(&self) -> String {
        hex::encode(&self.0)
    }
}

impl fmt::Debug for Salt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Salt({} bytes)", self.0.len())
    }
}

/// Draws `len` bytes from the OS CSPRNG.
pub fn generate_salt(len: usize) -> Result<Salt> {
    let mut salt = Salt(vec![0u8; len]);
    OsRng
        .try_fill_bytes(&mut salt.0)
        .map_err(|e| SealError::KdfFailure(format!("RNG failed: {e}")))?;
    Ok(salt)
}

/// Runs Argon2id v0x13 with the costs from `config`.
///
/// Working memory is reserved up front with `try_reserve_exact`, so an
/// oversized `memory_cost_kib` comes back as [`SealError::KdfFailure`]
/// instead of aborting the process. The blocks are wiped by argon2 before
/// this returns.
pub fn derive_key(
    passphrase: &SecretString,
    salt: &Salt,
    config: &CryptoConfig,
) -> Result<DerivedKey> {
    let params = Params::new(
        config.memory_cost_kib,
        config.time_cost,
        config.parallelism,
        Some(KEY_LEN),
    )
    .map_err(|e| SealError::KdfFailure(format!("Invalid Argon2 params: {e}")))?;

    let block_count = params.block_count();
    let mut memory: Vec<Block> = Vec::new();
    memory.try_reserve_exact(block_count).map_err(|_| {
        SealError::KdfFailure(format!(
            "cannot allocate {} KiB of Argon2 memory",
            config.memory_cost_kib
        ))
    })?;
    memory.resize(block_count, Block::default());

    let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);

    let mut key = SecretBox::new(Box::new([0u8; KEY_LEN]));
    argon2
        .hash_password_into_with_memory(
            passphrase.expose_secret().as_bytes(),
            salt.as_bytes(),
            key.expose_secret_mut(),
            &mut memory,
        )
        .map_err(|e| SealError::KdfFailure(format!("Argon2id failed: {e}")))?;

    Ok(DerivedKey { inner: key })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fast_config() -> CryptoConfig {
        CryptoConfig {
            memory_cost_kib: 256,
            time_cost: 1,
            parallelism: 1,
            ..Default::default()
        }
    }

    fn passphrase(s: &str) -> SecretString {
        SecretString::from(s.to_owned())
    }

    #[test]
    fn test_derive_key_deterministic() {
        let salt = Salt::from_bytes([7u8; 16]);
        let config = fast_config();

        let k1 = derive_key(&passphrase("test_password"), &salt, &config).unwrap();
        let k2 = derive_key(&passphrase("test_password"), &salt, &config).unwrap();

        assert_eq!(k1.expose(), k2.expose());
        assert_ne!(k1.expose(), &[0u8; KEY_LEN]);
    }

    #[test]
    fn test_default_params_known_key() {
        // Argon2id v0x13, m=32768 KiB, t=2, p=2, 32-byte output
        let salt = Salt::from_bytes(*b"0123456789abcdef");
        let key = derive_key(&passphrase("myMasterPassword"), &salt, &CryptoConfig::default())
            .unwrap();
        assert_eq!(
            hex::encode(key.expose()),
            "4cf8b565f4bfcadf6493e2bae46b6599fc02a875bd253dd5ee2845c821570748"
        );
    }

    #[test]
    fn test_single_lane_matches_libsodium() {
        // crypto_pwhash(ARGON2ID13, opslimit=2, memlimit=32 MiB) always runs one lane
        let config = CryptoConfig {
            parallelism: 1,
            ..Default::default()
        };
        let salt = Salt::from_bytes(*b"0123456789abcdef");
        let key = derive_key(&passphrase("myMasterPassword"), &salt, &config).unwrap();
        assert_eq!(
            hex::encode(key.expose()),
            "05fb011872829b37b44aed164fd4f7e251278de958fa9d44a82c3bf7ed88aba4"
        );
    }

    #[test]
    fn test_cost_parameters_change_key() {
        let salt = Salt::from_bytes([7u8; 16]);
        let base = fast_config();
        let more_passes = CryptoConfig {
            time_cost: 2,
            ..fast_config()
        };

        let k1 = derive_key(&passphrase("pw"), &salt, &base).unwrap();
        let k2 = derive_key(&passphrase("pw"), &salt, &more_passes).unwrap();
        assert_ne!(k1.expose(), k2.expose());
    }

    #[test]
    fn test_different_passphrase_different_key() {
        let salt = Salt::from_bytes([7u8; 16]);
        let k1 = derive_key(&passphrase("password_a"), &salt, &fast_config()).unwrap();
        let k2 = derive_key(&passphrase("password_b"), &salt, &fast_config()).unwrap();
        assert_ne!(k1.expose(), k2.expose());
    }

    #[test]
    fn test_empty_passphrase_allowed() {
        let salt = generate_salt(16).unwrap();
        assert!(derive_key(&passphrase(""), &salt, &fast_config()).is_ok());
    }

    #[test]
    fn test_invalid_params_are_kdf_failure() {
        let config = CryptoConfig {
            time_cost: 0,
            ..fast_config()
        };
        let salt = generate_salt(16).unwrap();
        let err = derive_key(&passphrase("pw"), &salt, &config).unwrap_err();
        assert!(matches!(err, SealError::KdfFailure(_)));
    }

    #[test]
    fn test_short_salt_is_kdf_failure() {
        let salt = Salt::from_bytes(vec![1u8; 4]);
        let err = derive_key(&passphrase("pw"), &salt, &fast_config()).unwrap_err();
        assert!(matches!(err, SealError::KdfFailure(_)));
    }

    #[test]
    fn test_generate_salt_len() {
        let a = generate_salt(16).unwrap();
        let b = generate_salt(16).unwrap();
        assert_eq!(a.len(), 16);
        assert_ne!(a.as_bytes(), b.as_bytes());
        assert_eq!(a.to_hex().len(), 32);
    }

    #[test]
    fn test_debug_does_not_leak() {
        let key = DerivedKey::from_bytes([0xAB; KEY_LEN]);
        let salt = Salt::from_bytes([0xCD; 16]);
        assert_eq!(format!("{key:?}"), "DerivedKey([REDACTED])");
        assert_eq!(format!("{salt:?}"), "Salt(16 bytes)");
    }
}
