//! Signature engine properties: determinism, soundness, tamper detection.

use rsa::pkcs8::EncodePrivateKey;
use rsa::RsaPrivateKey;
use signet::{Algorithm, Jwt, JwtError, KeyMaterial, Signer};

const NOW: i64 = 1_700_000_000;

fn hs_signer(algorithm: Algorithm, secret: &[u8]) -> Signer {
    Signer::new(algorithm, KeyMaterial::secret(secret.to_vec()))
}

fn rsa_key_der() -> Vec<u8> {
    let key = RsaPrivateKey::new(&mut rand::rng(), 2048).expect("RSA key generation");
    key.to_pkcs8_der().expect("PKCS#8 encoding").as_bytes().to_vec()
}

/// Flip one character of a compact token, staying inside the base64url
/// alphabet so the mutation hits decoded bytes rather than the parser.
fn flip_char(token: &str, index: usize) -> String {
    let mut bytes = token.as_bytes().to_vec();
    bytes[index] = if bytes[index] == b'A' { b'B' } else { b'A' };
    String::from_utf8(bytes).expect("still ASCII")
}

#[test]
fn test_signing_is_deterministic() {
    for algorithm in [Algorithm::Hs256, Algorithm::Hs384, Algorithm::Hs512] {
        let signer = hs_signer(algorithm, b"fixed secret");
        let first = signer.sign("aGVhZGVy", "cGF5bG9hZA").unwrap();
        let second = signer.sign("aGVhZGVy", "cGF5bG9hZA").unwrap();
        assert_eq!(first, second, "{algorithm} must be deterministic");
    }
}

#[test]
fn test_hmac_sign_verify_soundness() {
    for algorithm in [Algorithm::Hs256, Algorithm::Hs384, Algorithm::Hs512] {
        let signer = hs_signer(algorithm, b"shared secret");
        let signature = signer.sign("aGVhZGVy", "cGF5bG9hZA").unwrap();
        assert!(signer.verify("aGVhZGVy", "cGF5bG9hZA", &signature).unwrap());
    }
}

#[test]
fn test_verify_rejects_wrong_secret() {
    let signer = hs_signer(Algorithm::Hs256, b"right secret");
    let other = hs_signer(Algorithm::Hs256, b"wrong secret");

    let signature = signer.sign("aGVhZGVy", "cGF5bG9hZA").unwrap();
    assert!(!other.verify("aGVhZGVy", "cGF5bG9hZA", &signature).unwrap());
}

#[test]
fn test_verify_rejects_wrong_algorithm() {
    let hs256 = hs_signer(Algorithm::Hs256, b"shared secret");
    let hs512 = hs_signer(Algorithm::Hs512, b"shared secret");

    let signature = hs256.sign("aGVhZGVy", "cGF5bG9hZA").unwrap();
    assert!(!hs512.verify("aGVhZGVy", "cGF5bG9hZA", &signature).unwrap());
}

#[test]
fn test_verify_rejects_truncated_signature() {
    let signer = hs_signer(Algorithm::Hs256, b"shared secret");
    let signature = signer.sign("aGVhZGVy", "cGF5bG9hZA").unwrap();
    assert!(!signer.verify("aGVhZGVy", "cGF5bG9hZA", &signature[..31]).unwrap());
    assert!(!signer.verify("aGVhZGVy", "cGF5bG9hZA", &[]).unwrap());
}

#[test]
fn test_verify_rejects_changed_payload() {
    let signer = hs_signer(Algorithm::Hs256, b"shared secret");
    let signature = signer.sign("aGVhZGVy", "cGF5bG9hZA").unwrap();
    assert!(!signer.verify("aGVhZGVy", "dGFtcGVyZWQ", &signature).unwrap());
}

#[test]
fn test_single_character_tamper_invalidates_token() {
    let signer = hs_signer(Algorithm::Hs256, b"shared secret");
    let token = Jwt::builder()
        .issuer("auth.example")
        .subject("42")
        .build(&signer)
        .unwrap();
    let compact = token.compact().unwrap();
    assert!(Jwt::parse(&compact).unwrap().is_valid_at(&signer, NOW).unwrap());

    for index in 0..compact.len() {
        if compact.as_bytes()[index] == b'.' {
            continue;
        }
        let tampered = flip_char(&compact, index);
        // A mutated token either stops parsing or fails validation; it must
        // never verify.
        let still_valid = Jwt::parse(&tampered)
            .map(|token| token.is_valid_at(&signer, NOW).unwrap())
            .unwrap_or(false);
        assert!(!still_valid, "tamper at byte {index} survived");
    }
}

#[test]
fn test_rsa_sign_verify_soundness() {
    let der = rsa_key_der();

    for algorithm in [Algorithm::Rs256, Algorithm::Rs384, Algorithm::Rs512] {
        let signer = Signer::new(algorithm, KeyMaterial::rsa_private_key(der.clone()));
        let signature = signer.sign("aGVhZGVy", "cGF5bG9hZA").unwrap();
        assert!(signer.verify("aGVhZGVy", "cGF5bG9hZA", &signature).unwrap());

        // PKCS#1 v1.5 is deterministic, so recompute-and-compare holds.
        assert_eq!(signature, signer.sign("aGVhZGVy", "cGF5bG9hZA").unwrap());
    }
}

#[test]
fn test_rsa_token_lifecycle() {
    let signer = Signer::new(Algorithm::Rs256, KeyMaterial::rsa_private_key(rsa_key_der()));
    let token = Jwt::builder().subject("42").build(&signer).unwrap();

    assert!(token.header().get("alg").unwrap().matches("RS256"));
    assert!(token.header().get("typ").unwrap().matches("JWT"));

    let parsed = Jwt::parse(&token.compact().unwrap()).unwrap();
    assert!(parsed.is_valid_at(&signer, NOW).unwrap());
}

#[test]
fn test_rsa_verify_rejects_other_key() {
    let signer = Signer::new(Algorithm::Rs256, KeyMaterial::rsa_private_key(rsa_key_der()));
    let other = Signer::new(Algorithm::Rs256, KeyMaterial::rsa_private_key(rsa_key_der()));

    let signature = signer.sign("aGVhZGVy", "cGF5bG9hZA").unwrap();
    assert!(!other.verify("aGVhZGVy", "cGF5bG9hZA", &signature).unwrap());
}

#[test]
fn test_rsa_garbage_key_fails_signing() {
    let signer = Signer::new(Algorithm::Rs256, KeyMaterial::rsa_private_key(b"garbage".to_vec()));
    assert!(matches!(
        signer.sign("aGVhZGVy", "cGF5bG9hZA"),
        Err(JwtError::SigningFailed(_))
    ));
}

#[test]
fn test_mismatched_key_material_fails_at_sign_time() {
    let signer = Signer::new(Algorithm::Rs256, KeyMaterial::secret(b"s3cr3t".to_vec()));
    assert!(matches!(
        signer.sign("aGVhZGVy", "cGF5bG9hZA"),
        Err(JwtError::MissingKey(_))
    ));

    // The error also propagates out of token validation, never Ok(false).
    let hs = hs_signer(Algorithm::Hs256, b"s3cr3t");
    let token = Jwt::builder().subject("42").build(&hs).unwrap();
    assert!(matches!(
        token.is_valid_at(&signer, NOW),
        Err(JwtError::MissingKey(_))
    ));
}

#[test]
fn test_unknown_algorithm_identifier() {
    let err = Signer::from_name("ES256", KeyMaterial::secret(b"k".to_vec())).unwrap_err();
    assert_eq!(err, JwtError::UnsupportedAlgorithm("ES256".to_string()));
}
