//! CryptoFacade - passphrase -> key -> sealed bundle and back

use secrecy::SecretString;

use crate::bundle::CiphertextBundle;
use crate::config::CryptoConfig;
use crate::crypto::{self, aead, DerivedKey, Salt, SecureBuffer};
use crate::error::{Result, SealError};
use crate::runtime;

/// Entry point tying Argon2id key derivation to ChaCha20-Poly1305.
///
/// Holds only an immutable [`CryptoConfig`]; every operation is a single
/// call with no state carried between calls.
///
/// ```no_run
/// use sealkit::{CryptoFacade, SecretString};
///
/// let facade = CryptoFacade::new()?;
/// let (key, salt) = facade.derive_key(&SecretString::from("myMasterPassword".to_owned()))?;
/// let bundle = facade.encrypt(&key, b"SuperSecret123!")?;
/// let plain = facade.decrypt(&key, &bundle)?;
/// assert_eq!(plain.as_str(), Some("SuperSecret123!"));
/// # let _ = salt;
/// # Ok::<(), sealkit::SealError>(())
/// ```
#[derive(Debug, Clone)]
pub struct CryptoFacade {
    config: CryptoConfig,
}

impl CryptoFacade {
    /// Facade with the default (interoperable) parameters.
    pub fn new() -> Result<Self> {
        Self::with_config(CryptoConfig::default())
    }

    /// Runs the process-wide initialization, then validates `config`.
    pub fn with_config(config: CryptoConfig) -> Result<Self> {
        runtime::init()?;
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &CryptoConfig {
        &self.config
    }

    /// Derives a key under a freshly generated salt.
    ///
    /// The salt must be stored by the caller if the key is to be derived
    /// again later (see [`Self::derive_key_with_salt`]).
    pub fn derive_key(&self, passphrase: &SecretString) -> Result<(DerivedKey, Salt)> {
        let salt = crypto::generate_salt(self.config.salt_len)?;
        let key = self.derive_key_with_salt(passphrase, &salt)?;
        Ok((key, salt))
    }

    /// Re-derives the key for a previously stored salt.
    pub fn derive_key_with_salt(&self, passphrase: &SecretString, salt: &Salt) -> Result<DerivedKey> {
        if salt.len() != self.config.salt_len {
            return Err(SealError::KdfFailure(format!(
                "salt must be {} bytes, got {}",
                self.config.salt_len,
                salt.len()
            )));
        }

        tracing::debug!(
            "Argon2id: {} KiB, t={}, p={}",
            self.config.memory_cost_kib,
            self.config.time_cost,
            self.config.parallelism
        );
        crypto::derive_key(passphrase, salt, &self.config)
    }

    /// Seals `plaintext` under a random nonce. An empty plaintext is fine.
    pub fn encrypt(&self, key: &DerivedKey, plaintext: &[u8]) -> Result<CiphertextBundle> {
        let bundle = aead::encrypt(key, plaintext)?;
        tracing::debug!("Sealed {} bytes", bundle.data.len());
        Ok(bundle)
    }

    /// Opens a bundle. Plaintext is only returned once the tag verifies.
    pub fn decrypt(&self, key: &DerivedKey, bundle: &CiphertextBundle) -> Result<SecureBuffer> {
        aead::decrypt(key, bundle).map_err(|e| {
            tracing::warn!("Bundle rejected: authentication failed");
            e
        })
    }
}
