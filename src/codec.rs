//! Compact serialization codec.
//!
//! Base64url encoding without padding (RFC 7515) over JSON-serialized claim
//! sets, plus the shape checks for the three-segment compact form.

use base64::alphabet;
use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig, URL_SAFE_NO_PAD};
use base64::engine::DecodePaddingMode;
use base64::Engine as _;

use crate::claims::ClaimSet;
use crate::error::{JwtError, JwtResult};

/// Tokens are emitted unpadded; inbound segments may carry `=` padding.
const URL_SAFE_LENIENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Base64 URL-safe encoding without padding.
#[inline]
pub(crate) fn base64_url_encode(input: &[u8]) -> String {
    URL_SAFE_NO_PAD.encode(input)
}

/// Base64 URL-safe decoding, accepting padded and unpadded input.
#[inline]
pub(crate) fn base64_url_decode(input: &str) -> Result<Vec<u8>, base64::DecodeError> {
    URL_SAFE_LENIENT.decode(input)
}

/// Encode a claim set into one compact segment.
///
/// JSON serialization follows the claim set's insertion order, so the output
/// is deterministic for a given set.
///
/// # Errors
/// Returns `Serialization` if the claim set cannot be JSON-serialized.
pub fn encode_claims(claims: &ClaimSet) -> JwtResult<String> {
    let json = serde_json::to_string(claims).map_err(|e| JwtError::Serialization(e.to_string()))?;
    Ok(base64_url_encode(json.as_bytes()))
}

/// Decode one compact segment back into a claim set.
///
/// # Errors
/// Returns `MalformedPart` if the segment fails base64url or JSON decoding.
pub fn decode_claims(segment: &str) -> JwtResult<ClaimSet> {
    let bytes = base64_url_decode(segment)
        .map_err(|e| JwtError::MalformedPart(format!("invalid base64url segment: {e}")))?;
    serde_json::from_slice(&bytes)
        .map_err(|e| JwtError::MalformedPart(format!("invalid claim JSON: {e}")))
}

/// True iff the string has the compact token shape: exactly three non-empty
/// dot-separated base64url segments.
#[must_use]
pub fn is_compact_token(token: &str) -> bool {
    let mut segments = 0;
    for segment in token.split('.') {
        segments += 1;
        if segments > 3 || segment.is_empty() || !segment.bytes().all(is_base64_url_byte) {
            return false;
        }
    }
    segments == 3
}

/// Split a compact token into its header, payload, and signature segments.
///
/// # Errors
/// Returns `MalformedToken` unless the input contains exactly two `.`
/// separators.
pub fn split_token(token: &str) -> JwtResult<(&str, &str, &str)> {
    let mut segments = token.split('.');
    match (segments.next(), segments.next(), segments.next(), segments.next()) {
        (Some(header), Some(payload), Some(signature), None) => Ok((header, payload, signature)),
        _ => Err(JwtError::MalformedToken(
            "expected exactly three dot-separated segments".to_string(),
        )),
    }
}

fn is_base64_url_byte(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || byte == b'-' || byte == b'_' || byte == b'='
}
