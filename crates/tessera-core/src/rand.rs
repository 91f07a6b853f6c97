// Copyright (c) 2026 Tessera Contributors
// Tessera — Password-Authenticated Key Retrieval
// Licensed under the MIT License

//! Word-granular secure random source backing the ceremony primitives.
//!
//! The source hands out whole 64-bit words. Requesting a byte length that
//! is not a multiple of the word size is a caller programming error and
//! panics; an unavailable source surfaces as
//! [`PakeError::EntropyFailure`] and aborts the ceremony.

use std::sync::OnceLock;

use crate::types::{PakeError, PakeResult};

/// Granularity of the random source in bytes (one 64-bit word).
pub const WORD_LENGTH: usize = 8;

static SODIUM_READY: OnceLock<bool> = OnceLock::new();

/// Initializes the underlying CSPRNG. Idempotent and thread-safe.
///
/// # Errors
///
/// Returns [`PakeError::EntropyFailure`] if libsodium cannot be
/// initialized; no ceremony may proceed in that state.
pub fn init() -> PakeResult<()> {
    // SAFETY: sodium_init may be called from any thread; the OnceLock keeps
    // the result stable after the first call.
    let ready = SODIUM_READY.get_or_init(|| unsafe { libsodium_sys::sodium_init() >= 0 });
    if *ready {
        Ok(())
    } else {
        Err(PakeError::EntropyFailure)
    }
}

/// Fills `buf` with cryptographically secure random bytes.
///
/// # Panics
///
/// Panics if `buf.len()` is not a multiple of [`WORD_LENGTH`]. That is a
/// contract violation by the caller, not a runtime condition.
///
/// # Errors
///
/// Returns [`PakeError::EntropyFailure`] if the source is unavailable.
pub fn fill_words(buf: &mut [u8]) -> PakeResult<()> {
    assert!(
        buf.len() % WORD_LENGTH == 0,
        "random requests must be whole 64-bit words"
    );
    init()?;
    if buf.is_empty() {
        return Ok(());
    }
    // SAFETY: buf is a valid mutable slice; length matches buf.len().
    unsafe {
        libsodium_sys::randombytes_buf(buf.as_mut_ptr() as *mut _, buf.len());
    }
    Ok(())
}
