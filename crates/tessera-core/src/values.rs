// Copyright (c) 2026 Tessera Contributors
// Tessera — Password-Authenticated Key Retrieval
// Licensed under the MIT License

//! The opaque binary value family exchanged during registration and
//! verification ceremonies.
//!
//! Every type here is a fixed-width byte container with no internal
//! structure. The [`Persistable`] ones are *exhaustively valid*: any bit
//! pattern of the fixed width decodes successfully, so reading stored
//! values back never fails structurally. Semantic correctness is
//! established only by the primitive operations in [`crate::crypto`].
//!
//! [`PasswordKey`] is the deliberate exception: it has no [`Persistable`]
//! impl, which makes serializing one a compile error rather than a policy.

use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::types::{
    PakeError, PakeResult, ENCRYPTED_PASSWORD_LENGTH, ENCRYPTED_PRIVATE_KEY_LENGTH,
    ENCRYPTED_SALTED_PASSWORD_LENGTH, PASSWORD_KEY_LENGTH, PUBLIC_KEY_LENGTH,
    REGISTRATION_TOKEN_LENGTH, SALT_LENGTH, VERIFICATION_LENGTH, VERIFICATION_NONCE_LENGTH,
};

/// A fixed-width binary value that is safe to serialize, store, and
/// transmit.
///
/// Decoding performs a width check and nothing else; there is no parsing
/// logic behind this trait.
pub trait Persistable: Sized {
    /// Exact encoded width in bytes.
    const WIDTH: usize;

    /// The encoded form of the value.
    fn as_bytes(&self) -> &[u8];

    /// Decodes a value from `bytes`.
    ///
    /// # Errors
    ///
    /// Returns [`PakeError::CryptoFailure`] only when `bytes` is not
    /// exactly [`Self::WIDTH`] bytes long.
    fn from_bytes(bytes: &[u8]) -> PakeResult<Self>;
}

macro_rules! opaque_value {
    ($(#[$meta:meta])* $name:ident, $width:path) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq)]
        pub struct $name {
            pub(crate) bytes: [u8; $width],
        }

        impl $name {
            /// Wraps raw bytes of the exact width. Every bit pattern is a
            /// legal instance.
            pub fn from_array(bytes: [u8; $width]) -> Self {
                Self { bytes }
            }
        }

        impl Persistable for $name {
            const WIDTH: usize = $width;

            fn as_bytes(&self) -> &[u8] {
                &self.bytes
            }

            fn from_bytes(bytes: &[u8]) -> PakeResult<Self> {
                let bytes: [u8; $width] =
                    bytes.try_into().map_err(|_| PakeError::CryptoFailure)?;
                Ok(Self { bytes })
            }
        }

        impl std::fmt::Debug for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, concat!(stringify!($name), "("))?;
                for b in &self.bytes {
                    write!(f, "{b:02x}")?;
                }
                write!(f, ")")
            }
        }
    };
}

opaque_value!(
    /// Random identifier binding one registration attempt.
    RegistrationToken,
    REGISTRATION_TOKEN_LENGTH
);

opaque_value!(
    /// Per-user randomizer preventing precomputation attacks.
    Salt,
    SALT_LENGTH
);

opaque_value!(
    /// Blinded representation of the plaintext password, fresh per ceremony.
    EncryptedPassword,
    ENCRYPTED_PASSWORD_LENGTH
);

opaque_value!(
    /// An [`EncryptedPassword`] combined with the stored [`Salt`].
    EncryptedSaltedPassword,
    ENCRYPTED_SALTED_PASSWORD_LENGTH
);

opaque_value!(
    /// Long-term private key, encrypted under password-derived material.
    EncryptedPrivateKey,
    ENCRYPTED_PRIVATE_KEY_LENGTH
);

opaque_value!(
    /// Long-term public key paired with an [`EncryptedPrivateKey`].
    PublicKey,
    PUBLIC_KEY_LENGTH
);

opaque_value!(
    /// Monotonic per-principal counter binding a single proof.
    VerificationNonce,
    VERIFICATION_NONCE_LENGTH
);

opaque_value!(
    /// Proof of private-key possession, bound to one issued nonce.
    Verification,
    VERIFICATION_LENGTH
);

/// Secret blinding factor paired with an [`EncryptedPassword`].
///
/// Exists only for the duration of the ceremony that produced it and is
/// zeroized on drop. This type intentionally does not implement
/// [`Persistable`]; it must never leave process memory.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct PasswordKey {
    pub(crate) bytes: [u8; PASSWORD_KEY_LENGTH],
}

impl PasswordKey {
    pub(crate) fn new(bytes: [u8; PASSWORD_KEY_LENGTH]) -> Self {
        Self { bytes }
    }
}

impl std::fmt::Debug for PasswordKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "PasswordKey([REDACTED; {}])", PASSWORD_KEY_LENGTH)
    }
}

impl RegistrationToken {
    /// Draws a fresh random token.
    ///
    /// # Errors
    ///
    /// Returns [`PakeError::EntropyFailure`] if the secure random source
    /// is unavailable.
    pub fn random() -> PakeResult<Self> {
        crate::crypto::generate_registration_token()
    }
}

impl Salt {
    /// Draws a fresh random salt.
    ///
    /// # Errors
    ///
    /// Returns [`PakeError::EntropyFailure`] if the secure random source
    /// is unavailable.
    pub fn random() -> PakeResult<Self> {
        crate::crypto::generate_random_salt()
    }
}

impl EncryptedPassword {
    /// Combines this blinded password with the stored `salt`.
    ///
    /// Pure in both inputs: the same pair always yields the same output.
    ///
    /// # Errors
    ///
    /// Returns [`PakeError::CryptoFailure`] if the stored bytes do not
    /// decode to a group element.
    pub fn salted(&self, salt: &Salt) -> PakeResult<EncryptedSaltedPassword> {
        crate::crypto::salt_encrypted_password(self, salt)
    }
}

impl VerificationNonce {
    /// The well-defined starting value of every principal's sequence.
    pub const ZERO: Self = Self {
        bytes: [0u8; VERIFICATION_NONCE_LENGTH],
    };

    /// Advances to the next value in the monotonic sequence.
    ///
    /// # Errors
    ///
    /// Returns [`PakeError::NonceExhausted`] when the counter space is
    /// exhausted.
    pub fn increment(&mut self) -> PakeResult<()> {
        crate::crypto::increment_verification_nonce(self)
    }
}

impl Default for VerificationNonce {
    fn default() -> Self {
        Self::ZERO
    }
}

impl Verification {
    /// Builds a proof of private-key possession bound to exactly the given
    /// `(encrypted_private_key, nonce, encrypted_salted_password,
    /// password_key)` tuple.
    ///
    /// # Errors
    ///
    /// Returns [`PakeError::CryptoFailure`] on malformed inputs and
    /// [`PakeError::EntropyFailure`] if the random source is unavailable.
    pub fn generate(
        encrypted_private_key: &EncryptedPrivateKey,
        nonce: &VerificationNonce,
        encrypted_salted_password: &EncryptedSaltedPassword,
        password_key: &PasswordKey,
    ) -> PakeResult<Self> {
        crate::crypto::generate_verification(
            encrypted_private_key,
            nonce,
            encrypted_salted_password,
            password_key,
        )
    }

    /// Checks this proof against the verifier's `public_key` and the nonce
    /// it issued.
    ///
    /// # Errors
    ///
    /// Returns [`PakeError::VerificationFailed`] when the proof does not
    /// match: wrong password, tampered proof, or a different nonce than
    /// the one the proof was built for.
    pub fn validate(
        &self,
        public_key: &PublicKey,
        nonce: &VerificationNonce,
    ) -> PakeResult<()> {
        crate::crypto::validate_verification(public_key, nonce, self)
    }
}
