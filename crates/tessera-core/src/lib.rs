// Copyright (c) 2026 Tessera Contributors
// Tessera — Password-Authenticated Key Retrieval
// Licensed under the MIT License

//! Core library for the Tessera password-authenticated key retrieval
//! ceremony.
//!
//! A user registers a password without ever exposing it in recoverable
//! form, and later proves knowledge of that password to re-derive and use
//! a long-term key pair, without the verifying party learning the
//! password or the private key.
//!
//! # Crate layout
//!
//! * [`types`] -- widths, domain labels, error kinds, constant-time helpers.
//! * [`values`] -- the fixed-width opaque binary value family.
//! * [`crypto`] -- the primitive provider (Ristretto255 over libsodium).
//! * [`rand`] -- the word-granular secure random source.

/// The primitive provider consumed by both orchestrators.
pub mod crypto;
/// Word-granular secure random source.
pub mod rand;
/// Widths, domain labels, error kinds, and constant-time helpers.
pub mod types;
/// Fixed-width opaque binary value family.
pub mod values;

pub use crypto::{encrypt_password, generate_keys};
pub use types::{PakeError, PakeResult};
pub use values::{
    EncryptedPassword, EncryptedPrivateKey, EncryptedSaltedPassword, PasswordKey, Persistable,
    PublicKey, RegistrationToken, Salt, Verification, VerificationNonce,
};
