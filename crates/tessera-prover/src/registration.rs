// Copyright (c) 2026 Tessera Contributors
// Tessera — Password-Authenticated Key Retrieval
// Licensed under the MIT License

use tessera_core::values::{EncryptedPrivateKey, PublicKey, RegistrationToken, Salt};
use tessera_core::{crypto, PakeResult};

/// The persistable outputs of a completed registration ceremony.
///
/// Exists only when every step of the ceremony succeeded; there is no
/// partial form to persist.
#[derive(Debug, Clone)]
pub struct Registration {
    /// Random identifier binding this registration attempt.
    pub token: RegistrationToken,
    /// Per-user salt; required for every later login.
    pub salt: Salt,
    /// Long-term private key, encrypted under password-derived material.
    pub encrypted_private_key: EncryptedPrivateKey,
    /// Long-term public key held by the verifying side.
    pub public_key: PublicKey,
}

/// Runs the registration ceremony for `password`.
///
/// Sequence: draw a token and a salt, blind the password, combine the
/// blinded password with the salt, derive the long-term key pair. The
/// blinded password and its blinding key are ceremony-local; both drop
/// (and the key zeroizes) before this function returns.
///
/// # Errors
///
/// Any step's failure aborts the whole ceremony and nothing is returned:
///
/// * [`PakeError::EntropyFailure`] if the random source is unavailable.
/// * [`PakeError::CryptoFailure`] if the password is empty or oversized,
///   or a primitive operation fails.
///
/// [`PakeError::EntropyFailure`]: tessera_core::PakeError::EntropyFailure
/// [`PakeError::CryptoFailure`]: tessera_core::PakeError::CryptoFailure
pub fn register(password: &[u8]) -> PakeResult<Registration> {
    let token = RegistrationToken::random()?;
    let salt = Salt::random()?;

    let (encrypted_password, password_key) = crypto::encrypt_password(password)?;
    let encrypted_salted_password = encrypted_password.salted(&salt)?;
    let (encrypted_private_key, public_key) =
        crypto::generate_keys(&encrypted_salted_password, &password_key)?;

    Ok(Registration {
        token,
        salt,
        encrypted_private_key,
        public_key,
    })
}
