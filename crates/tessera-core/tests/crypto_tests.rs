use tessera_core::crypto;
use tessera_core::types::*;
use tessera_core::values::*;

#[test]
fn token_and_salt_generation_nonzero() {
    let token = crypto::generate_registration_token().unwrap();
    assert!(!token.as_bytes().iter().all(|&b| b == 0));

    let salt = crypto::generate_random_salt().unwrap();
    assert!(!salt.as_bytes().iter().all(|&b| b == 0));
}

#[test]
fn encrypt_password_is_randomized() {
    let (first, _) = crypto::encrypt_password(b"same password").unwrap();
    let (second, _) = crypto::encrypt_password(b"same password").unwrap();
    assert_ne!(first.as_bytes(), second.as_bytes());
}

#[test]
fn encrypt_password_rejects_empty() {
    assert_eq!(
        crypto::encrypt_password(b"").unwrap_err(),
        PakeError::CryptoFailure
    );
}

#[test]
fn encrypt_password_rejects_oversized() {
    let oversized = vec![b'a'; MAX_PASSWORD_LENGTH + 1];
    assert_eq!(
        crypto::encrypt_password(&oversized).unwrap_err(),
        PakeError::CryptoFailure
    );
}

#[test]
fn salting_is_pure() {
    let salt = Salt::random().unwrap();
    let (encrypted, _) = crypto::encrypt_password(b"pw").unwrap();

    let first = crypto::salt_encrypted_password(&encrypted, &salt).unwrap();
    let second = crypto::salt_encrypted_password(&encrypted, &salt).unwrap();
    assert_eq!(first, second);
}

#[test]
fn different_salts_different_results() {
    let (encrypted, _) = crypto::encrypt_password(b"pw").unwrap();
    let a = encrypted.salted(&Salt::random().unwrap()).unwrap();
    let b = encrypted.salted(&Salt::random().unwrap()).unwrap();
    assert_ne!(a, b);
}

#[test]
fn salting_garbage_bytes_fails_cleanly() {
    // Any bit pattern decodes structurally; the semantic failure belongs
    // to the provider.
    let garbage = EncryptedPassword::from_bytes(&[0xFFu8; ENCRYPTED_PASSWORD_LENGTH]).unwrap();
    let salt = Salt::random().unwrap();
    assert_eq!(
        crypto::salt_encrypted_password(&garbage, &salt).unwrap_err(),
        PakeError::CryptoFailure
    );
}

#[test]
fn generate_keys_deterministic_across_blindings() {
    let salt = Salt::random().unwrap();

    let (ep1, key1) = crypto::encrypt_password(b"one password").unwrap();
    let (ep2, key2) = crypto::encrypt_password(b"one password").unwrap();
    assert_ne!(ep1.as_bytes(), ep2.as_bytes());

    let (private1, public1) = crypto::generate_keys(&ep1.salted(&salt).unwrap(), &key1).unwrap();
    let (private2, public2) = crypto::generate_keys(&ep2.salted(&salt).unwrap(), &key2).unwrap();

    assert_eq!(private1, private2);
    assert_eq!(public1, public2);
}

#[test]
fn different_passwords_different_keys() {
    let salt = Salt::random().unwrap();

    let (ep1, key1) = crypto::encrypt_password(b"password one").unwrap();
    let (ep2, key2) = crypto::encrypt_password(b"password two").unwrap();

    let (_, public1) = crypto::generate_keys(&ep1.salted(&salt).unwrap(), &key1).unwrap();
    let (_, public2) = crypto::generate_keys(&ep2.salted(&salt).unwrap(), &key2).unwrap();

    assert_ne!(public1, public2);
}

#[test]
fn verification_roundtrip_at_provider_level() {
    let salt = Salt::random().unwrap();
    let (ep, key) = crypto::encrypt_password(b"pw").unwrap();
    let salted = ep.salted(&salt).unwrap();
    let (private_key, public_key) = crypto::generate_keys(&salted, &key).unwrap();

    let mut nonce = VerificationNonce::ZERO;
    crypto::increment_verification_nonce(&mut nonce).unwrap();

    let proof = crypto::generate_verification(&private_key, &nonce, &salted, &key).unwrap();
    crypto::validate_verification(&public_key, &nonce, &proof).unwrap();
}

#[test]
fn verification_bound_to_nonce() {
    let salt = Salt::random().unwrap();
    let (ep, key) = crypto::encrypt_password(b"pw").unwrap();
    let salted = ep.salted(&salt).unwrap();
    let (private_key, public_key) = crypto::generate_keys(&salted, &key).unwrap();

    let mut issued = VerificationNonce::ZERO;
    issued.increment().unwrap();
    let proof = crypto::generate_verification(&private_key, &issued, &salted, &key).unwrap();

    let mut other = issued;
    other.increment().unwrap();
    assert_eq!(
        crypto::validate_verification(&public_key, &other, &proof).unwrap_err(),
        PakeError::VerificationFailed
    );
}

#[test]
fn garbage_proof_is_rejected_not_fatal() {
    let salt = Salt::random().unwrap();
    let (ep, key) = crypto::encrypt_password(b"pw").unwrap();
    let salted = ep.salted(&salt).unwrap();
    let (_, public_key) = crypto::generate_keys(&salted, &key).unwrap();

    let garbage = Verification::from_bytes(&[0xA5u8; VERIFICATION_LENGTH]).unwrap();
    let nonce = VerificationNonce::ZERO;
    assert_eq!(
        crypto::validate_verification(&public_key, &nonce, &garbage).unwrap_err(),
        PakeError::VerificationFailed
    );
}

#[test]
fn garbage_public_key_is_rejected_not_fatal() {
    let salt = Salt::random().unwrap();
    let (ep, key) = crypto::encrypt_password(b"pw").unwrap();
    let salted = ep.salted(&salt).unwrap();
    let (private_key, _) = crypto::generate_keys(&salted, &key).unwrap();

    let mut nonce = VerificationNonce::ZERO;
    nonce.increment().unwrap();
    let proof = crypto::generate_verification(&private_key, &nonce, &salted, &key).unwrap();

    let bogus = PublicKey::from_bytes(&[0xFFu8; PUBLIC_KEY_LENGTH]).unwrap();
    assert_eq!(
        crypto::validate_verification(&bogus, &nonce, &proof).unwrap_err(),
        PakeError::VerificationFailed
    );
}
