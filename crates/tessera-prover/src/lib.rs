// Copyright (c) 2026 Tessera Contributors
// Tessera — Password-Authenticated Key Retrieval (Prover)
// Licensed under the MIT License

//! Prover side of the Tessera ceremony.
//!
//! [`register`] runs the one-time registration sequence and returns the
//! four persistable values the caller stores. [`prove`] runs the prover
//! half of a login: it rebuilds password-derived material from the entered
//! password and the stored salt, and binds a proof to the challenge nonce
//! issued by the verifying side.

mod authentication;
mod registration;

pub use authentication::prove;
pub use registration::{register, Registration};
