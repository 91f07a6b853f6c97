// Copyright (c) 2026 Tessera Contributors
// Tessera — Password-Authenticated Key Retrieval
// Licensed under the MIT License

use tessera_core::values::{EncryptedPrivateKey, Salt, Verification, VerificationNonce};
use tessera_core::{crypto, PakeResult};

/// Reconstructs password-derived material from the entered `password` and
/// builds a [`Verification`] for the challenge `nonce` the verifying side
/// issued.
///
/// The password is blinded fresh for this ceremony and combined with the
/// stored `salt`; nothing from a previous ceremony is reused. A wrong
/// password still yields a well-formed proof here; it is rejected only
/// when the verifying side validates it.
///
/// # Errors
///
/// * [`PakeError::CryptoFailure`] if the password is empty or oversized,
///   or a primitive operation fails.
/// * [`PakeError::EntropyFailure`] if the random source is unavailable.
///
/// [`PakeError::CryptoFailure`]: tessera_core::PakeError::CryptoFailure
/// [`PakeError::EntropyFailure`]: tessera_core::PakeError::EntropyFailure
pub fn prove(
    password: &[u8],
    salt: &Salt,
    encrypted_private_key: &EncryptedPrivateKey,
    nonce: &VerificationNonce,
) -> PakeResult<Verification> {
    let (encrypted_password, password_key) = crypto::encrypt_password(password)?;
    let encrypted_salted_password = encrypted_password.salted(salt)?;
    Verification::generate(
        encrypted_private_key,
        nonce,
        &encrypted_salted_password,
        &password_key,
    )
}
