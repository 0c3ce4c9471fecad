//! Crypto primitives - Argon2id, ChaCha20-Poly1305, zeroizing buffers

pub mod aead;
mod argon2_kdf;
mod secure_buffer;

pub use argon2_kdf::{derive_key, generate_salt, DerivedKey, Salt};
pub use secure_buffer::SecureBuffer;
