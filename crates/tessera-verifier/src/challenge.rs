// Copyright (c) 2026 Tessera Contributors
// Tessera — Password-Authenticated Key Retrieval (Verifier)
// Licensed under the MIT License

//! Verifying-side state machine: `Idle -> NonceIssued -> Validated |
//! Rejected`.
//!
//! A [`Verifier`] holds the long-lived per-principal state (the stored
//! public key and the monotonic nonce). [`Verifier::issue_challenge`]
//! advances the nonce *before* handing it out, so a value is never reused
//! across challenges; the returned [`Challenge`] is the `NonceIssued`
//! state. [`Challenge::validate`] consumes the challenge, so each ceremony
//! runs exactly once and is not resumable; the terminal states are the two
//! outcomes of that call.

use tessera_core::values::{PublicKey, Verification, VerificationNonce};
use tessera_core::PakeResult;

/// Long-lived verifying-side state for one principal.
///
/// Concurrent challenges for the same principal must be serialized by the
/// caller; `issue_challenge` takes `&mut self`, so the borrow rules give
/// the single-writer discipline within one process.
#[derive(Debug)]
pub struct Verifier {
    public_key: PublicKey,
    nonce: VerificationNonce,
}

impl Verifier {
    /// Creates verifier state for a freshly registered principal; the
    /// nonce starts at the well-defined zero value.
    pub fn new(public_key: PublicKey) -> Self {
        Self {
            public_key,
            nonce: VerificationNonce::ZERO,
        }
    }

    /// Restores verifier state persisted after earlier ceremonies.
    pub fn resume(public_key: PublicKey, nonce: VerificationNonce) -> Self {
        Self { public_key, nonce }
    }

    /// The stored public key for this principal.
    pub fn public_key(&self) -> &PublicKey {
        &self.public_key
    }

    /// The current nonce; persist this alongside the public key.
    pub fn nonce(&self) -> &VerificationNonce {
        &self.nonce
    }

    /// Issues a fresh challenge, advancing the held nonce first so the
    /// issued value can never collide with an earlier challenge.
    ///
    /// # Errors
    ///
    /// Returns [`PakeError::NonceExhausted`] when the counter space for
    /// this principal is exhausted; further authentication requires
    /// re-registration.
    ///
    /// [`PakeError::NonceExhausted`]: tessera_core::PakeError::NonceExhausted
    pub fn issue_challenge(&mut self) -> PakeResult<Challenge> {
        self.nonce.increment()?;
        Ok(Challenge {
            public_key: self.public_key,
            nonce: self.nonce,
        })
    }
}

/// A single issued challenge, bound to the nonce it was issued with.
///
/// Validation consumes the challenge; re-validating the same challenge is
/// a compile error, not a runtime check.
#[must_use = "an issued challenge must be validated or abandoned"]
#[derive(Debug)]
pub struct Challenge {
    public_key: PublicKey,
    nonce: VerificationNonce,
}

impl Challenge {
    /// The issued nonce, to be transmitted to the prover.
    pub fn nonce(&self) -> &VerificationNonce {
        &self.nonce
    }

    /// Checks the received proof against the stored public key and the
    /// issued nonce.
    ///
    /// `Ok(())` is the `Validated` terminal state: the prover holds
    /// password-derived material consistent with the stored public key.
    ///
    /// # Errors
    ///
    /// Returns [`PakeError::VerificationFailed`] (the `Rejected` terminal
    /// state) for a wrong password, a tampered proof, or a proof built
    /// for a different nonce than this challenge's.
    ///
    /// [`PakeError::VerificationFailed`]: tessera_core::PakeError::VerificationFailed
    pub fn validate(self, verification: &Verification) -> PakeResult<()> {
        verification.validate(&self.public_key, &self.nonce)
    }
}
