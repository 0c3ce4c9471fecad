//! ChaCha20-Poly1305 (IETF, 96-bit nonce) in detached mode, no associated data

use chacha20poly1305::aead::{AeadInPlace, KeyInit};
use chacha20poly1305::{ChaCha20Poly1305, Key, Nonce, Tag};
use rand::rngs::OsRng;
use rand::RngCore;
use zeroize::Zeroizing;

use super::argon2_kdf::DerivedKey;
use super::secure_buffer::SecureBuffer;
use crate::bundle::CiphertextBundle;
use crate::config::{NONCE_LEN, TAG_LEN};
use crate::error::{Result, SealError};

const NO_AAD: &[u8] = b"";

/// Fresh random nonce. Uniqueness per key rests on the OS CSPRNG.
pub fn generate_nonce() -> Result<[u8; NONCE_LEN]> {
    let mut nonce = [0u8; NONCE_LEN];
    OsRng
        .try_fill_bytes(&mut nonce)
        .map_err(|e| SealError::EncryptionFailure(format!("RNG failed: {e}")))?;
    Ok(nonce)
}

pub fn encrypt(key: &DerivedKey, plaintext: &[u8]) -> Result<CiphertextBundle> {
    let nonce = generate_nonce()?;
    encrypt_with_nonce(key, &nonce, plaintext)
}

/// Encrypts under a caller-chosen nonce. Reusing a nonce with the same key
/// breaks both confidentiality and integrity.
pub(crate) fn encrypt_with_nonce(
    key: &DerivedKey,
    nonce: &[u8; NONCE_LEN],
    plaintext: &[u8],
) -> Result<CiphertextBundle> {
    let cipher = ChaCha20Poly1305::new(Key::from_slice(key.expose()));

    // Encrypted in place; wiped if encryption bails out with plaintext still in it
    let mut buffer = Zeroizing::new(plaintext.to_vec());
    let tag = cipher
        .encrypt_in_place_detached(Nonce::from_slice(nonce), NO_AAD, buffer.as_mut_slice())
        .map_err(|e| SealError::EncryptionFailure(format!("ChaCha20-Poly1305 failed: {e}")))?;

    if tag.len() != TAG_LEN || buffer.len() != plaintext.len() {
        return Err(SealError::EncryptionFailure(format!(
            "unexpected output sizes: tag {}, data {}",
            tag.len(),
            buffer.len()
        )));
    }

    Ok(CiphertextBundle {
        iv: nonce.to_vec(),
        data: std::mem::take(&mut *buffer),
        tag: tag.to_vec(),
    })
}

/// Verifies the tag and decrypts. Every failure is
/// [`SealError::AuthenticationFailure`].
pub fn decrypt(key: &DerivedKey, bundle: &CiphertextBundle) -> Result<SecureBuffer> {
    if bundle.iv.len() != NONCE_LEN || bundle.tag.len() != TAG_LEN {
        return Err(SealError::AuthenticationFailure);
    }

    let cipher = ChaCha20Poly1305::new(Key::from_slice(key.expose()));

    let mut buffer = Zeroizing::new(bundle.data.clone());
    cipher
        .decrypt_in_place_detached(
            Nonce::from_slice(&bundle.iv),
            NO_AAD,
            buffer.as_mut_slice(),
            Tag::from_slice(&bundle.tag),
        )
        .map_err(|_| SealError::AuthenticationFailure)?;

    Ok(SecureBuffer::from_vec(std::mem::take(&mut *buffer)))
}
