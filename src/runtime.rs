//! Process-wide one-time initialization.
//!
//! The RustCrypto primitives need no global setup, but the OS entropy
//! source does have to work before any salt or nonce is drawn. The probe
//! runs once per process; its outcome is cached, so a failed probe keeps
//! failing instead of being retried.

use std::sync::OnceLock;

use zeroize::Zeroize;

use crate::error::{Result, SealError};

static INIT: OnceLock<std::result::Result<(), String>> = OnceLock::new();

/// Runs the entropy probe on first call and returns its cached result after.
/// Safe to call from several threads at once.
pub fn init() -> Result<()> {
    INIT.get_or_init(probe_entropy)
        .clone()
        .map_err(SealError::InitializationFailure)
}

pub fn is_initialized() -> bool {
    matches!(INIT.get(), Some(Ok(())))
}

fn probe_entropy() -> std::result::Result<(), String> {
    let mut probe = [0u8; 32];
    if let Err(e) = getrandom::getrandom(&mut probe) {
        tracing::error!("OS entropy source unavailable: {}", e);
        return Err(format!("OS entropy source unavailable: {e}"));
    }

    // 2^-256 for a working source
    let stuck = probe.iter().all(|&b| b == 0);
    probe.zeroize();
    if stuck {
        tracing::error!("OS entropy source returned all zeros");
        return Err("OS entropy source returned all zeros".into());
    }

    tracing::info!("Crypto runtime initialized");
    Ok(())
}
