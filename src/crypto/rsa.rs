//! RSA PKCS#1 v1.5 signing for the RS algorithm family.
//!
//! Keys are PKCS#8 DER encoded private keys. PKCS#1 v1.5 signatures are
//! deterministic, which the verification path relies on.

use rsa::pkcs1v15::SigningKey;
use rsa::pkcs8::DecodePrivateKey;
use rsa::sha2::{Sha256, Sha384, Sha512};
use rsa::signature::{SignatureEncoding, Signer as _};
use rsa::RsaPrivateKey;

use crate::algorithms::HashFn;
use crate::error::{JwtError, JwtResult};

/// Sign the signing input with the private key and the given hash function.
pub(crate) fn sign(hash: HashFn, private_key_der: &[u8], signing_input: &[u8]) -> JwtResult<Vec<u8>> {
    let private_key = RsaPrivateKey::from_pkcs8_der(private_key_der)
        .map_err(|e| JwtError::SigningFailed(format!("invalid RSA private key: {e}")))?;

    let signature = match hash {
        HashFn::Sha256 => SigningKey::<Sha256>::new(private_key)
            .try_sign(signing_input)
            .map_err(|e| JwtError::SigningFailed(e.to_string()))?
            .to_bytes(),
        HashFn::Sha384 => SigningKey::<Sha384>::new(private_key)
            .try_sign(signing_input)
            .map_err(|e| JwtError::SigningFailed(e.to_string()))?
            .to_bytes(),
        HashFn::Sha512 => SigningKey::<Sha512>::new(private_key)
            .try_sign(signing_input)
            .map_err(|e| JwtError::SigningFailed(e.to_string()))?
            .to_bytes(),
    };

    Ok(signature.as_ref().to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_garbage_key_is_rejected() {
        let result = sign(HashFn::Sha256, b"not a der key", b"header.payload");
        assert!(matches!(result, Err(JwtError::SigningFailed(_))));
    }
}
