//! Ciphertext bundle exchanged between encrypt and decrypt

use serde::{Deserialize, Serialize};

use crate::config::{NONCE_LEN, TAG_LEN};
use crate::error::{Result, SealError};

/// Nonce, ciphertext and detached Poly1305 tag.
///
/// Holds no key material. `data` is exactly as long as the plaintext.
/// Field lengths are not checked here; `decrypt` rejects a bundle with the
/// wrong iv or tag size as an authentication failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CiphertextBundle {
    #[serde(with = "hex::serde")]
    pub iv: Vec<u8>,
    #[serde(with = "hex::serde")]
    pub data: Vec<u8>,
    #[serde(with = "hex::serde")]
    pub tag: Vec<u8>,
}

impl CiphertextBundle {
    /// Flat form: `iv || data || tag`.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.iv.len() + self.data.len() + self.tag.len());
        out.extend_from_slice(&self.iv);
        out.extend_from_slice(&self.data);
        out.extend_from_slice(&self.tag);
        out
    }

    /// Splits the flat form produced by [`Self::to_bytes`].
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < NONCE_LEN + TAG_LEN {
            return Err(SealError::AuthenticationFailure);
        }
        let (iv, rest) = bytes.split_at(NONCE_LEN);
        let (data, tag) = rest.split_at(rest.len() - TAG_LEN);
        Ok(Self {
            iv: iv.to_vec(),
            data: data.to_vec(),
            tag: tag.to_vec(),
        })
    }
}
