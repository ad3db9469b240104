//! HMAC-SHA tag computation for the HS algorithm family.

use hmac::digest::KeyInit;
use hmac::{Hmac, Mac};
use sha2::{Sha256, Sha384, Sha512};

use crate::algorithms::HashFn;
use crate::error::{JwtError, JwtResult};

type HmacSha256 = Hmac<Sha256>;
type HmacSha384 = Hmac<Sha384>;
type HmacSha512 = Hmac<Sha512>;

/// Compute the keyed hash of the signing input with the given hash function.
pub(crate) fn tag(hash: HashFn, secret: &[u8], signing_input: &[u8]) -> JwtResult<Vec<u8>> {
    match hash {
        HashFn::Sha256 => tag_with::<HmacSha256>(secret, signing_input),
        HashFn::Sha384 => tag_with::<HmacSha384>(secret, signing_input),
        HashFn::Sha512 => tag_with::<HmacSha512>(secret, signing_input),
    }
}

fn tag_with<M: Mac + KeyInit>(secret: &[u8], signing_input: &[u8]) -> JwtResult<Vec<u8>> {
    let mut mac = <M as Mac>::new_from_slice(secret)
        .map_err(|e| JwtError::SigningFailed(format!("invalid HMAC key: {e}")))?;
    mac.update(signing_input);
    Ok(mac.finalize().into_bytes().to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_lengths_match_hash_width() {
        let secret = b"secret";
        let input = b"header.payload";
        assert_eq!(tag(HashFn::Sha256, secret, input).unwrap().len(), 32);
        assert_eq!(tag(HashFn::Sha384, secret, input).unwrap().len(), 48);
        assert_eq!(tag(HashFn::Sha512, secret, input).unwrap().len(), 64);
    }

    #[test]
    fn test_tag_is_keyed() {
        let input = b"header.payload";
        let a = tag(HashFn::Sha256, b"key-a", input).unwrap();
        let b = tag(HashFn::Sha256, b"key-b", input).unwrap();
        assert_ne!(a, b);
    }
}
