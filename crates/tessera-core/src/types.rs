// Copyright (c) 2026 Tessera Contributors
// Tessera — Password-Authenticated Key Retrieval
// Licensed under the MIT License

use thiserror::Error;

/// Length of a Ristretto255 scalar in bytes.
pub const SCALAR_LENGTH: usize = 32;
/// Length of a Ristretto255 group element encoding in bytes.
pub const POINT_LENGTH: usize = 32;
/// Length of a SHA-512 digest in bytes.
pub const HASH_LENGTH: usize = 64;

/// Length of a registration token in bytes.
pub const REGISTRATION_TOKEN_LENGTH: usize = 32;
/// Length of a per-user salt in bytes.
pub const SALT_LENGTH: usize = 16;
/// Length of a blinded (encrypted) password element in bytes.
pub const ENCRYPTED_PASSWORD_LENGTH: usize = POINT_LENGTH;
/// Length of a salted blinded password element in bytes.
pub const ENCRYPTED_SALTED_PASSWORD_LENGTH: usize = POINT_LENGTH;
/// Length of a password key (blinding scalar) in bytes.
pub const PASSWORD_KEY_LENGTH: usize = SCALAR_LENGTH;
/// Length of an encrypted long-term private key in bytes.
pub const ENCRYPTED_PRIVATE_KEY_LENGTH: usize = SCALAR_LENGTH;
/// Length of a long-term public key in bytes.
pub const PUBLIC_KEY_LENGTH: usize = POINT_LENGTH;
/// Length of a verification nonce (little-endian counter) in bytes.
pub const VERIFICATION_NONCE_LENGTH: usize = 8;
/// Length of a serialized verification proof (`R ‖ z`) in bytes.
pub const VERIFICATION_LENGTH: usize = POINT_LENGTH + SCALAR_LENGTH;

/// Maximum accepted password length in bytes.
pub const MAX_PASSWORD_LENGTH: usize = 4096;

const _: () = assert!(SCALAR_LENGTH == POINT_LENGTH);
const _: () = assert!(VERIFICATION_LENGTH == 64);
// Token and salt are drawn through the word-granular random source.
const _: () = assert!(REGISTRATION_TOKEN_LENGTH % 8 == 0);
const _: () = assert!(SALT_LENGTH % 8 == 0);

/// Domain-separation labels for the ceremony primitives.
pub mod labels {
    /// Hash-to-group input prefix for the password element.
    pub const PASSWORD_ELEMENT: &[u8] = b"TESSERA-PAKE-v1/PasswordElement";
    /// Hash-to-scalar prefix for the per-user salt scalar.
    pub const SALT_SCALAR: &[u8] = b"TESSERA-PAKE-v1/SaltScalar";
    /// Hash-to-scalar prefix for long-term private key derivation.
    pub const KEY_SEED: &[u8] = b"TESSERA-PAKE-v1/KeySeed";
    /// Prefix for the private-key masking pad.
    pub const KEY_MASK: &[u8] = b"TESSERA-PAKE-v1/KeyMask";
    /// Hash-to-scalar prefix for the proof challenge.
    pub const CHALLENGE: &[u8] = b"TESSERA-PAKE-v1/Challenge";
}

/// Error conditions surfaced by the ceremony core.
///
/// This is the whole failure surface: no numeric codes and no universal
/// exception type cross this layer's boundary.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum PakeError {
    /// A primitive operation could not complete (malformed input or an
    /// internal computation error). Never retried by this core.
    #[error("cryptographic operation failed")]
    CryptoFailure,
    /// The verification nonce counter space is exhausted. Fatal for the
    /// principal until re-registration.
    #[error("verification nonce space exhausted")]
    NonceExhausted,
    /// A proof did not validate against the expected public key and nonce.
    /// The recoverable outcome of a wrong password, tamper, or replay.
    #[error("verification failed")]
    VerificationFailed,
    /// No secure randomness is available. Aborts the ceremony.
    #[error("secure random source unavailable")]
    EntropyFailure,
}

/// Convenience alias for `Result<T, PakeError>`.
pub type PakeResult<T> = Result<T, PakeError>;

/// Compares two byte slices in constant time using libsodium's `sodium_memcmp`.
///
/// Returns `true` if the slices are equal. Differing lengths return `false`
/// immediately (length itself is not secret).
pub fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    // SAFETY: Both pointers come from valid slices. Length equality is verified before the call.
    unsafe {
        libsodium_sys::sodium_memcmp(a.as_ptr() as *const _, b.as_ptr() as *const _, a.len()) == 0
    }
}

/// Returns `true` if every byte in `data` is zero, checked in constant time.
pub fn is_all_zero(data: &[u8]) -> bool {
    // SAFETY: Pointer comes from a valid slice.
    unsafe { libsodium_sys::sodium_is_zero(data.as_ptr(), data.len()) == 1 }
}
