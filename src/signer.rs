//! Signature computation and verification.
//!
//! A [`Signer`] is an explicit, immutable pairing of an algorithm and key
//! material, constructed once and passed by reference wherever signing or
//! verification happens. There is no process-wide configuration cell, so
//! concurrent use is safe by construction.

use std::fmt;

use subtle::ConstantTimeEq;
use zeroize::Zeroizing;

use crate::algorithms::{Algorithm, Scheme};
use crate::crypto;
use crate::error::{JwtError, JwtResult};

/// Key material for a [`Signer`].
#[derive(Clone)]
pub enum KeyMaterial {
    /// Symmetric secret for the HS family.
    Secret(Zeroizing<Vec<u8>>),
    /// PKCS#8 DER encoded RSA private key for the RS family.
    RsaPrivateKey(Zeroizing<Vec<u8>>),
}

impl KeyMaterial {
    /// Wrap a symmetric secret.
    #[must_use]
    pub fn secret(bytes: impl Into<Vec<u8>>) -> Self {
        KeyMaterial::Secret(Zeroizing::new(bytes.into()))
    }

    /// Wrap a PKCS#8 DER encoded RSA private key.
    #[must_use]
    pub fn rsa_private_key(pkcs8_der: impl Into<Vec<u8>>) -> Self {
        KeyMaterial::RsaPrivateKey(Zeroizing::new(pkcs8_der.into()))
    }
}

// Key bytes never appear in debug output.
impl fmt::Debug for KeyMaterial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyMaterial::Secret(_) => f.write_str("KeyMaterial::Secret(..)"),
            KeyMaterial::RsaPrivateKey(_) => f.write_str("KeyMaterial::RsaPrivateKey(..)"),
        }
    }
}

/// Immutable signing configuration: one algorithm, one key.
#[derive(Debug, Clone)]
pub struct Signer {
    algorithm: Algorithm,
    key: KeyMaterial,
}

impl Signer {
    /// Pair an algorithm with key material.
    ///
    /// The pairing is checked at sign time, not here, so a mismatched
    /// scheme surfaces as `MissingKey` from [`Signer::sign`].
    #[must_use]
    pub fn new(algorithm: Algorithm, key: KeyMaterial) -> Self {
        Self { algorithm, key }
    }

    /// Resolve an algorithm identifier against the registry and pair it
    /// with key material.
    ///
    /// # Errors
    /// Returns `UnsupportedAlgorithm` for identifiers outside the registry.
    pub fn from_name(name: &str, key: KeyMaterial) -> JwtResult<Self> {
        Ok(Self::new(Algorithm::from_name(name)?, key))
    }

    /// The configured algorithm.
    #[must_use]
    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// Compute the raw signature bytes over the canonical signing input
    /// `header_encoded "." payload_encoded`.
    ///
    /// # Errors
    /// Returns `MissingKey` if the key material does not fit the configured
    /// algorithm's scheme, and `SigningFailed` if the underlying primitive
    /// rejects the key.
    pub fn sign(&self, header_encoded: &str, payload_encoded: &str) -> JwtResult<Vec<u8>> {
        let signing_input = format!("{header_encoded}.{payload_encoded}");
        match (self.algorithm.scheme(), &self.key) {
            (Scheme::Hmac, KeyMaterial::Secret(secret)) => {
                crypto::hmac::tag(self.algorithm.hash(), secret, signing_input.as_bytes())
            }
            (Scheme::Rsa, KeyMaterial::RsaPrivateKey(der)) => {
                crypto::rsa::sign(self.algorithm.hash(), der, signing_input.as_bytes())
            }
            (Scheme::Hmac, KeyMaterial::RsaPrivateKey(_)) => Err(JwtError::MissingKey(format!(
                "{} requires a symmetric secret",
                self.algorithm
            ))),
            (Scheme::Rsa, KeyMaterial::Secret(_)) => Err(JwtError::MissingKey(format!(
                "{} requires an RSA private key",
                self.algorithm
            ))),
        }
    }

    /// Recompute the signature and compare against a candidate in constant
    /// time. Signer and verifier share one canonicalization path because
    /// verification goes through [`Signer::sign`].
    ///
    /// Length or content mismatches return `Ok(false)`; only configuration
    /// errors propagate.
    ///
    /// # Errors
    /// The errors of [`Signer::sign`].
    pub fn verify(
        &self,
        header_encoded: &str,
        payload_encoded: &str,
        candidate: &[u8],
    ) -> JwtResult<bool> {
        let expected = self.sign(header_encoded, payload_encoded)?;
        Ok(expected.ct_eq(candidate).into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_material_debug_is_redacted() {
        let rendered = format!("{:?}", KeyMaterial::secret(b"super secret".to_vec()));
        assert!(!rendered.contains("super"));
        assert!(rendered.contains("Secret(..)"));
    }

    #[test]
    fn test_scheme_mismatch_is_missing_key() {
        let signer = Signer::new(Algorithm::Rs256, KeyMaterial::secret(b"s3cr3t".to_vec()));
        assert!(matches!(signer.sign("h", "p"), Err(JwtError::MissingKey(_))));

        let signer = Signer::new(
            Algorithm::Hs256,
            KeyMaterial::rsa_private_key(b"der".to_vec()),
        );
        assert!(matches!(signer.sign("h", "p"), Err(JwtError::MissingKey(_))));
    }

    #[test]
    fn test_from_name_resolves_registry() {
        let signer = Signer::from_name("HS384", KeyMaterial::secret(b"k".to_vec())).unwrap();
        assert_eq!(signer.algorithm(), Algorithm::Hs384);

        let err = Signer::from_name("none", KeyMaterial::secret(b"k".to_vec())).unwrap_err();
        assert_eq!(err, JwtError::UnsupportedAlgorithm("none".to_string()));
    }
}
