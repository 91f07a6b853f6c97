use tessera_core::values::{Persistable, PublicKey, VerificationNonce};
use tessera_core::PakeError;
use tessera_prover::{prove, register};
use tessera_verifier::Verifier;

const PASSWORD: &[u8] = b"verifier-side password";

#[test]
fn new_verifier_starts_idle_at_zero() {
    let registration = register(PASSWORD).unwrap();
    let verifier = Verifier::new(registration.public_key);
    assert_eq!(*verifier.nonce(), VerificationNonce::ZERO);
    assert_eq!(*verifier.public_key(), registration.public_key);
}

#[test]
fn issue_challenge_advances_before_handing_out() {
    let registration = register(PASSWORD).unwrap();
    let mut verifier = Verifier::new(registration.public_key);

    let first = verifier.issue_challenge().unwrap();
    assert_eq!(
        *first.nonce(),
        VerificationNonce::from_array(1u64.to_le_bytes())
    );

    let second = verifier.issue_challenge().unwrap();
    assert_eq!(
        *second.nonce(),
        VerificationNonce::from_array(2u64.to_le_bytes())
    );

    // The verifier's held state tracks the last issued value.
    assert_eq!(verifier.nonce(), second.nonce());
}

#[test]
fn resume_continues_the_sequence() {
    let registration = register(PASSWORD).unwrap();
    let persisted = VerificationNonce::from_array(41u64.to_le_bytes());
    let mut verifier = Verifier::resume(registration.public_key, persisted);

    let challenge = verifier.issue_challenge().unwrap();
    assert_eq!(
        *challenge.nonce(),
        VerificationNonce::from_array(42u64.to_le_bytes())
    );

    let proof = prove(
        PASSWORD,
        &registration.salt,
        &registration.encrypted_private_key,
        challenge.nonce(),
    )
    .unwrap();
    challenge.validate(&proof).unwrap();
}

#[test]
fn exhausted_counter_is_fatal_for_the_principal() {
    let public_key = PublicKey::from_bytes(&[0x11u8; 32]).unwrap();
    let ceiling = VerificationNonce::from_array(u64::MAX.to_le_bytes());
    let mut verifier = Verifier::resume(public_key, ceiling);

    assert_eq!(
        verifier.issue_challenge().unwrap_err(),
        PakeError::NonceExhausted
    );
    // The held nonce did not move; a later attempt fails the same way.
    assert_eq!(*verifier.nonce(), ceiling);
    assert_eq!(
        verifier.issue_challenge().unwrap_err(),
        PakeError::NonceExhausted
    );
}

#[test]
fn stale_challenge_rejects_after_verifier_advances() {
    let registration = register(PASSWORD).unwrap();
    let mut verifier = Verifier::new(registration.public_key);

    let stale = verifier.issue_challenge().unwrap();
    let fresh = verifier.issue_challenge().unwrap();

    // The prover answers the stale challenge; the verifier validates the
    // fresh one.
    let proof = prove(
        PASSWORD,
        &registration.salt,
        &registration.encrypted_private_key,
        stale.nonce(),
    )
    .unwrap();
    assert_eq!(
        fresh.validate(&proof).unwrap_err(),
        PakeError::VerificationFailed
    );

    // Answered against its own nonce it would have been fine.
    let proof = prove(
        PASSWORD,
        &registration.salt,
        &registration.encrypted_private_key,
        stale.nonce(),
    )
    .unwrap();
    stale.validate(&proof).unwrap();
}
