// Copyright (c) 2026 Tessera Contributors
// Tessera — Password-Authenticated Key Retrieval
// Licensed under the MIT License

//! The primitive provider: every cryptographic operation consumed by the
//! registration and verification orchestrators.
//!
//! All operations are stateless; the only state of the whole ceremony
//! lives in the values passed between calls. The construction runs over
//! Ristretto255:
//!
//! * password blinding is `r · H2G(password)` with a fresh random scalar
//!   `r` (the [`PasswordKey`]);
//! * salting multiplies by a scalar derived from the stored salt;
//! * key generation unblinds with `r⁻¹`, reaching the salted password
//!   point `s · H2G(password)` independent of the per-ceremony blind, and
//!   derives the long-term key pair from it;
//! * a [`Verification`] is a Schnorr proof of knowledge of the private
//!   scalar, with the issued nonce folded into the challenge.

use zeroize::Zeroize;

use crate::rand;
use crate::types::{
    constant_time_eq, is_all_zero, labels, PakeError, PakeResult, HASH_LENGTH,
    MAX_PASSWORD_LENGTH, POINT_LENGTH, SCALAR_LENGTH,
};
use crate::values::{
    EncryptedPassword, EncryptedPrivateKey, EncryptedSaltedPassword, PasswordKey, PublicKey,
    RegistrationToken, Salt, Verification, VerificationNonce,
};

/// Produces a fresh random registration token.
///
/// # Errors
///
/// Returns [`PakeError::EntropyFailure`] if the random source is
/// unavailable.
pub fn generate_registration_token() -> PakeResult<RegistrationToken> {
    let mut bytes = [0u8; crate::types::REGISTRATION_TOKEN_LENGTH];
    rand::fill_words(&mut bytes)?;
    Ok(RegistrationToken::from_array(bytes))
}

/// Produces a fresh random per-user salt.
///
/// # Errors
///
/// Returns [`PakeError::EntropyFailure`] if the random source is
/// unavailable.
pub fn generate_random_salt() -> PakeResult<Salt> {
    let mut bytes = [0u8; crate::types::SALT_LENGTH];
    rand::fill_words(&mut bytes)?;
    Ok(Salt::from_array(bytes))
}

/// Blinds `password` with a freshly generated secret scalar.
///
/// Two calls with the same password yield different outputs; the blind is
/// randomized per call. The returned [`PasswordKey`] must not outlive the
/// ceremony.
///
/// # Errors
///
/// Returns [`PakeError::CryptoFailure`] if `password` is empty or exceeds
/// [`MAX_PASSWORD_LENGTH`], and [`PakeError::EntropyFailure`] if the
/// random source is unavailable.
pub fn encrypt_password(password: &[u8]) -> PakeResult<(EncryptedPassword, PasswordKey)> {
    if password.is_empty() || password.len() > MAX_PASSWORD_LENGTH {
        return Err(PakeError::CryptoFailure);
    }

    let mut element = [0u8; POINT_LENGTH];
    hash_to_point(&[labels::PASSWORD_ELEMENT, password], &mut element)?;

    let blind = random_nonzero_scalar()?;
    let mut blinded = [0u8; POINT_LENGTH];
    let result = scalar_mult(&blind, &element, &mut blinded);
    element.zeroize();
    result?;

    Ok((
        EncryptedPassword::from_array(blinded),
        PasswordKey::new(blind),
    ))
}

/// Combines a blinded password with the stored salt.
///
/// Pure function of its two inputs.
///
/// # Errors
///
/// Returns [`PakeError::CryptoFailure`] if the encrypted password bytes do
/// not decode to a group element. Freshly produced values always do; the
/// path exists because any bit pattern decodes structurally.
pub fn salt_encrypted_password(
    encrypted_password: &EncryptedPassword,
    salt: &Salt,
) -> PakeResult<EncryptedSaltedPassword> {
    let mut salt_scalar = [0u8; SCALAR_LENGTH];
    hash_to_scalar(&[labels::SALT_SCALAR, &salt.bytes], &mut salt_scalar);
    if is_all_zero(&salt_scalar) {
        return Err(PakeError::CryptoFailure);
    }

    let mut salted = [0u8; POINT_LENGTH];
    let result = scalar_mult(&salt_scalar, &encrypted_password.bytes, &mut salted);
    salt_scalar.zeroize();
    result?;

    Ok(EncryptedSaltedPassword::from_array(salted))
}

/// Derives the long-term key pair from the salted password and the
/// ceremony's blinding key.
///
/// Deterministic in the underlying password and salt: independent blinds
/// of the same password reach the same pair. A wrong password produces a
/// well-formed but unusable pair; the mismatch is discovered only at
/// [`validate_verification`].
///
/// # Errors
///
/// Returns [`PakeError::CryptoFailure`] on malformed inputs.
pub fn generate_keys(
    encrypted_salted_password: &EncryptedSaltedPassword,
    password_key: &PasswordKey,
) -> PakeResult<(EncryptedPrivateKey, PublicKey)> {
    let mut seed_point = unblind(encrypted_salted_password, password_key)?;

    let mut private_scalar = [0u8; SCALAR_LENGTH];
    hash_to_scalar(&[labels::KEY_SEED, &seed_point], &mut private_scalar);
    if is_all_zero(&private_scalar) {
        seed_point.zeroize();
        return Err(PakeError::CryptoFailure);
    }

    let mut public_point = [0u8; POINT_LENGTH];
    let base_result = scalarmult_base(&private_scalar, &mut public_point);

    let mut mask = [0u8; SCALAR_LENGTH];
    key_mask(&seed_point, &mut mask);
    let mut encrypted = [0u8; SCALAR_LENGTH];
    for i in 0..SCALAR_LENGTH {
        encrypted[i] = private_scalar[i] ^ mask[i];
    }

    seed_point.zeroize();
    private_scalar.zeroize();
    mask.zeroize();
    base_result?;

    Ok((
        EncryptedPrivateKey::from_array(encrypted),
        PublicKey::from_array(public_point),
    ))
}

/// Advances `nonce` to the next value in the monotonic sequence.
///
/// # Errors
///
/// Returns [`PakeError::NonceExhausted`] when the counter space is
/// exhausted; the principal cannot authenticate again without
/// re-registration.
pub fn increment_verification_nonce(nonce: &mut VerificationNonce) -> PakeResult<()> {
    let value = u64::from_le_bytes(nonce.bytes);
    let next = value.checked_add(1).ok_or(PakeError::NonceExhausted)?;
    nonce.bytes = next.to_le_bytes();
    Ok(())
}

/// Builds a proof of private-key possession bound to exactly the given
/// `(encrypted_private_key, nonce, encrypted_salted_password,
/// password_key)` tuple.
///
/// The private scalar is recovered by unmasking the encrypted private key
/// with material derived from the salted password point; with a wrong
/// password the recovered scalar is wrong and the proof will not validate.
///
/// # Errors
///
/// Returns [`PakeError::CryptoFailure`] on malformed inputs and
/// [`PakeError::EntropyFailure`] if the random source is unavailable.
pub fn generate_verification(
    encrypted_private_key: &EncryptedPrivateKey,
    nonce: &VerificationNonce,
    encrypted_salted_password: &EncryptedSaltedPassword,
    password_key: &PasswordKey,
) -> PakeResult<Verification> {
    let mut seed_point = unblind(encrypted_salted_password, password_key)?;

    let mut mask = [0u8; SCALAR_LENGTH];
    key_mask(&seed_point, &mut mask);
    seed_point.zeroize();

    let mut unmasked = [0u8; SCALAR_LENGTH];
    for i in 0..SCALAR_LENGTH {
        unmasked[i] = encrypted_private_key.bytes[i] ^ mask[i];
    }
    mask.zeroize();

    // Reduce to a canonical scalar. A correctly unmasked key is already
    // canonical and survives unchanged; garbage from a wrong password is
    // mapped into the group order.
    let mut private_scalar = [0u8; SCALAR_LENGTH];
    widen_reduce(&unmasked, &mut private_scalar);
    unmasked.zeroize();
    if is_all_zero(&private_scalar) {
        return Err(PakeError::CryptoFailure);
    }

    let mut public_point = [0u8; POINT_LENGTH];
    let result = scalarmult_base(&private_scalar, &mut public_point);
    if let Err(err) = result {
        private_scalar.zeroize();
        return Err(err);
    }

    let mut commitment_scalar = random_nonzero_scalar()?;
    let mut commitment_point = [0u8; POINT_LENGTH];
    let result = scalarmult_base(&commitment_scalar, &mut commitment_point);
    if let Err(err) = result {
        private_scalar.zeroize();
        commitment_scalar.zeroize();
        return Err(err);
    }

    let mut challenge = [0u8; SCALAR_LENGTH];
    hash_to_scalar(
        &[
            labels::CHALLENGE,
            &commitment_point,
            &public_point,
            &nonce.bytes,
        ],
        &mut challenge,
    );

    // z = t + c·k
    let mut product = [0u8; SCALAR_LENGTH];
    scalar_mul(&challenge, &private_scalar, &mut product);
    let mut response = [0u8; SCALAR_LENGTH];
    scalar_add(&commitment_scalar, &product, &mut response);

    private_scalar.zeroize();
    commitment_scalar.zeroize();
    product.zeroize();
    challenge.zeroize();

    let mut proof = [0u8; crate::types::VERIFICATION_LENGTH];
    proof[..POINT_LENGTH].copy_from_slice(&commitment_point);
    proof[POINT_LENGTH..].copy_from_slice(&response);
    Ok(Verification::from_array(proof))
}

/// Checks `verification` against the verifier's own public key and the
/// nonce it issued.
///
/// # Errors
///
/// Returns [`PakeError::VerificationFailed`] when the proof does not match
/// the given public key and nonce. Structurally garbage proof or key bytes
/// are rejections too, never crashes.
pub fn validate_verification(
    public_key: &PublicKey,
    nonce: &VerificationNonce,
    verification: &Verification,
) -> PakeResult<()> {
    let commitment_point: &[u8; POINT_LENGTH] = verification.bytes[..POINT_LENGTH]
        .try_into()
        .map_err(|_| PakeError::VerificationFailed)?;
    let response: &[u8; SCALAR_LENGTH] = verification.bytes[POINT_LENGTH..]
        .try_into()
        .map_err(|_| PakeError::VerificationFailed)?;

    if !point_is_valid(commitment_point) || !point_is_valid(&public_key.bytes) {
        return Err(PakeError::VerificationFailed);
    }

    let mut challenge = [0u8; SCALAR_LENGTH];
    hash_to_scalar(
        &[
            labels::CHALLENGE,
            commitment_point,
            &public_key.bytes,
            &nonce.bytes,
        ],
        &mut challenge,
    );

    let mut canonical_response = [0u8; SCALAR_LENGTH];
    widen_reduce(response, &mut canonical_response);

    // z·B
    let mut lhs = [0u8; POINT_LENGTH];
    scalarmult_base(&canonical_response, &mut lhs)
        .map_err(|_| PakeError::VerificationFailed)?;

    // R + c·A
    let mut challenge_term = [0u8; POINT_LENGTH];
    scalar_mult(&challenge, &public_key.bytes, &mut challenge_term)
        .map_err(|_| PakeError::VerificationFailed)?;
    let mut rhs = [0u8; POINT_LENGTH];
    point_add(commitment_point, &challenge_term, &mut rhs)
        .map_err(|_| PakeError::VerificationFailed)?;

    if !constant_time_eq(&lhs, &rhs) {
        return Err(PakeError::VerificationFailed);
    }
    Ok(())
}

/// Removes the ceremony blind from the salted password:
/// `r⁻¹ · ESP = s · H2G(password)`.
fn unblind(
    encrypted_salted_password: &EncryptedSaltedPassword,
    password_key: &PasswordKey,
) -> PakeResult<[u8; POINT_LENGTH]> {
    let mut inverse = [0u8; SCALAR_LENGTH];
    scalar_invert(&password_key.bytes, &mut inverse)?;

    let mut point = [0u8; POINT_LENGTH];
    let result = scalar_mult(&inverse, &encrypted_salted_password.bytes, &mut point);
    inverse.zeroize();
    result?;
    Ok(point)
}

/// Derives the one-time pad masking the long-term private scalar.
fn key_mask(seed_point: &[u8; POINT_LENGTH], mask: &mut [u8; SCALAR_LENGTH]) {
    let mut digest = [0u8; HASH_LENGTH];
    sha512_multi(&[labels::KEY_MASK, seed_point], &mut digest);
    mask.copy_from_slice(&digest[..SCALAR_LENGTH]);
    digest.zeroize();
}

/// Generates a uniformly random, non-zero Ristretto255 scalar, drawing all
/// entropy through the word-granular random source.
fn random_nonzero_scalar() -> PakeResult<[u8; SCALAR_LENGTH]> {
    loop {
        let mut wide = [0u8; HASH_LENGTH];
        rand::fill_words(&mut wide)?;
        let mut scalar = [0u8; SCALAR_LENGTH];
        // SAFETY: wide is a 64-byte array, scalar a 32-byte array, as the
        // reduction requires.
        unsafe {
            libsodium_sys::crypto_core_ristretto255_scalar_reduce(
                scalar.as_mut_ptr(),
                wide.as_ptr(),
            );
        }
        wide.zeroize();
        if !is_all_zero(&scalar) {
            return Ok(scalar);
        }
    }
}

/// Hashes the concatenation of `parts` to a Ristretto255 scalar via
/// SHA-512 and modular reduction.
fn hash_to_scalar(parts: &[&[u8]], scalar_out: &mut [u8; SCALAR_LENGTH]) {
    let mut digest = [0u8; HASH_LENGTH];
    sha512_multi(parts, &mut digest);
    // SAFETY: digest is a 64-byte array, scalar_out a 32-byte array, as
    // the reduction requires.
    unsafe {
        libsodium_sys::crypto_core_ristretto255_scalar_reduce(
            scalar_out.as_mut_ptr(),
            digest.as_ptr(),
        );
    }
    digest.zeroize();
}

/// Hashes the concatenation of `parts` to a Ristretto255 group element via
/// SHA-512 and Elligator.
fn hash_to_point(parts: &[&[u8]], point_out: &mut [u8; POINT_LENGTH]) -> PakeResult<()> {
    let mut digest = [0u8; HASH_LENGTH];
    sha512_multi(parts, &mut digest);
    // SAFETY: digest is a 64-byte array, point_out a 32-byte array.
    // Return code is checked.
    let rc = unsafe {
        libsodium_sys::crypto_core_ristretto255_from_hash(point_out.as_mut_ptr(), digest.as_ptr())
    };
    digest.zeroize();
    if rc != 0 {
        return Err(PakeError::CryptoFailure);
    }
    Ok(())
}

/// Interprets 32 little-endian bytes as an integer and reduces it modulo
/// the group order. Canonical scalars pass through unchanged.
fn widen_reduce(bytes: &[u8; SCALAR_LENGTH], scalar_out: &mut [u8; SCALAR_LENGTH]) {
    let mut wide = [0u8; HASH_LENGTH];
    wide[..SCALAR_LENGTH].copy_from_slice(bytes);
    // SAFETY: wide is a 64-byte array, scalar_out a 32-byte array.
    unsafe {
        libsodium_sys::crypto_core_ristretto255_scalar_reduce(
            scalar_out.as_mut_ptr(),
            wide.as_ptr(),
        );
    }
    wide.zeroize();
}

/// Ristretto255 scalar multiplication: `result = scalar · point`.
///
/// # Errors
///
/// Returns [`PakeError::CryptoFailure`] if `point` is not a canonical
/// group element or the product is the identity.
fn scalar_mult(
    scalar: &[u8; SCALAR_LENGTH],
    point: &[u8; POINT_LENGTH],
    result: &mut [u8; POINT_LENGTH],
) -> PakeResult<()> {
    // SAFETY: All arrays are 32 bytes as required. Return code is checked.
    let rc = unsafe {
        libsodium_sys::crypto_scalarmult_ristretto255(
            result.as_mut_ptr(),
            scalar.as_ptr(),
            point.as_ptr(),
        )
    };
    if rc != 0 {
        return Err(PakeError::CryptoFailure);
    }
    Ok(())
}

/// Ristretto255 base-point multiplication: `result = scalar · B`.
///
/// # Errors
///
/// Returns [`PakeError::CryptoFailure`] if `scalar` is zero modulo the
/// group order.
fn scalarmult_base(
    scalar: &[u8; SCALAR_LENGTH],
    result: &mut [u8; POINT_LENGTH],
) -> PakeResult<()> {
    // SAFETY: Both arrays are 32 bytes as required. Return code is checked.
    let rc = unsafe {
        libsodium_sys::crypto_scalarmult_ristretto255_base(result.as_mut_ptr(), scalar.as_ptr())
    };
    if rc != 0 {
        return Err(PakeError::CryptoFailure);
    }
    Ok(())
}

/// Modular inverse of a Ristretto255 scalar.
///
/// # Errors
///
/// Returns [`PakeError::CryptoFailure`] if the scalar is zero.
fn scalar_invert(
    scalar: &[u8; SCALAR_LENGTH],
    result: &mut [u8; SCALAR_LENGTH],
) -> PakeResult<()> {
    // SAFETY: Both arrays are 32 bytes as required. Return code is checked.
    let rc = unsafe {
        libsodium_sys::crypto_core_ristretto255_scalar_invert(result.as_mut_ptr(), scalar.as_ptr())
    };
    if rc != 0 {
        return Err(PakeError::CryptoFailure);
    }
    Ok(())
}

/// Scalar multiplication modulo the group order: `result = x · y`.
fn scalar_mul(
    x: &[u8; SCALAR_LENGTH],
    y: &[u8; SCALAR_LENGTH],
    result: &mut [u8; SCALAR_LENGTH],
) {
    // SAFETY: All arrays are 32 bytes as required.
    unsafe {
        libsodium_sys::crypto_core_ristretto255_scalar_mul(
            result.as_mut_ptr(),
            x.as_ptr(),
            y.as_ptr(),
        );
    }
}

/// Scalar addition modulo the group order: `result = x + y`.
fn scalar_add(
    x: &[u8; SCALAR_LENGTH],
    y: &[u8; SCALAR_LENGTH],
    result: &mut [u8; SCALAR_LENGTH],
) {
    // SAFETY: All arrays are 32 bytes as required.
    unsafe {
        libsodium_sys::crypto_core_ristretto255_scalar_add(
            result.as_mut_ptr(),
            x.as_ptr(),
            y.as_ptr(),
        );
    }
}

/// Group element addition: `result = p + q`.
///
/// # Errors
///
/// Returns [`PakeError::CryptoFailure`] if either encoding is invalid.
fn point_add(
    p: &[u8; POINT_LENGTH],
    q: &[u8; POINT_LENGTH],
    result: &mut [u8; POINT_LENGTH],
) -> PakeResult<()> {
    // SAFETY: All arrays are 32 bytes as required. Return code is checked.
    let rc = unsafe {
        libsodium_sys::crypto_core_ristretto255_add(result.as_mut_ptr(), p.as_ptr(), q.as_ptr())
    };
    if rc != 0 {
        return Err(PakeError::CryptoFailure);
    }
    Ok(())
}

/// Returns `true` if `point` is a canonical, non-identity group element.
fn point_is_valid(point: &[u8; POINT_LENGTH]) -> bool {
    if is_all_zero(point) {
        return false;
    }
    // SAFETY: Pointer comes from a 32-byte array.
    unsafe { libsodium_sys::crypto_core_ristretto255_is_valid_point(point.as_ptr()) == 1 }
}

/// Computes the SHA-512 digest of the concatenation of all `parts`.
///
/// Uses the streaming SHA-512 API to avoid allocating a contiguous buffer.
fn sha512_multi(parts: &[&[u8]], out: &mut [u8; HASH_LENGTH]) {
    // SAFETY: State is initialized by _init before use. Subsequent _update
    // and _final calls use the initialized state pointer.
    unsafe {
        let mut state = std::mem::MaybeUninit::<libsodium_sys::crypto_hash_sha512_state>::uninit();
        libsodium_sys::crypto_hash_sha512_init(state.as_mut_ptr());
        let state_ptr = state.as_mut_ptr();
        for part in parts {
            libsodium_sys::crypto_hash_sha512_update(state_ptr, part.as_ptr(), part.len() as u64);
        }
        libsodium_sys::crypto_hash_sha512_final(state_ptr, out.as_mut_ptr());
    }
}
