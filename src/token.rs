//! The token aggregate: header, payload, signature.

use std::fmt;

use chrono::Utc;

use crate::claims::{names, ClaimSet};
use crate::codec;
use crate::error::JwtResult;
use crate::signer::Signer;

/// An immutable signed token.
///
/// Created either freshly via [`Token::new_signed`], which computes the
/// signature at construction time, or from a wire string via
/// [`Token::from_parts`], which stores the received signature verbatim and
/// only checks it at validation time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    header: ClaimSet,
    payload: ClaimSet,
    signature: String,
}

impl Token {
    /// Build a freshly signed token.
    ///
    /// Missing `alg` and `typ` header claims are defaulted once, here: `alg`
    /// to the signer's algorithm identifier and `typ` to `"JWT"`.
    ///
    /// # Errors
    /// Propagates signer configuration errors and claim serialization
    /// failures.
    pub fn new_signed(mut header: ClaimSet, payload: ClaimSet, signer: &Signer) -> JwtResult<Self> {
        if !header.exists(names::ALGORITHM) {
            header.set(names::ALGORITHM, signer.algorithm().name());
        }
        if !header.exists(names::TOKEN_TYPE) {
            header.set(names::TOKEN_TYPE, names::TYPE_JWT);
        }

        let header_encoded = codec::encode_claims(&header)?;
        let payload_encoded = codec::encode_claims(&payload)?;
        let signature = signer.sign(&header_encoded, &payload_encoded)?;

        Ok(Self {
            header,
            payload,
            signature: codec::base64_url_encode(&signature),
        })
    }

    /// Reassemble a token received over the wire. No signing happens; the
    /// signature segment is stored as-is, still base64url-encoded.
    #[must_use]
    pub fn from_parts(header: ClaimSet, payload: ClaimSet, signature: impl Into<String>) -> Self {
        Self {
            header,
            payload,
            signature: signature.into(),
        }
    }

    /// Header claims.
    #[must_use]
    pub fn header(&self) -> &ClaimSet {
        &self.header
    }

    /// Payload claims.
    #[must_use]
    pub fn payload(&self) -> &ClaimSet {
        &self.payload
    }

    /// The base64url-encoded signature segment.
    #[must_use]
    pub fn signature(&self) -> &str {
        &self.signature
    }

    /// Render the compact `header.payload.signature` form.
    ///
    /// # Errors
    /// Returns `Serialization` if a claim set cannot be JSON-serialized.
    pub fn compact(&self) -> JwtResult<String> {
        let header = codec::encode_claims(&self.header)?;
        let payload = codec::encode_claims(&self.payload)?;
        Ok(format!("{header}.{payload}.{}", self.signature))
    }

    /// Evaluate the token's validity against the wall clock: temporal claims
    /// first, then the signature.
    ///
    /// Content mismatches (expired token, wrong signature) are `Ok(false)`;
    /// only signer configuration errors surface as `Err`.
    ///
    /// # Errors
    /// The errors of [`Signer::sign`] and claim serialization failures.
    pub fn is_valid(&self, signer: &Signer) -> JwtResult<bool> {
        self.is_valid_at(signer, Utc::now().timestamp())
    }

    /// [`Token::is_valid`] against an explicit clock, in seconds since epoch.
    ///
    /// Checks run in a fixed order, short-circuiting on the first failure:
    /// `iat` in the future, `exp` in the past, `nbf` in the future, then the
    /// signature. An absent temporal claim is no constraint; a present one
    /// that is not a base-10 integer makes the token invalid.
    ///
    /// # Errors
    /// The errors of [`Signer::sign`] and claim serialization failures.
    pub fn is_valid_at(&self, signer: &Signer, now: i64) -> JwtResult<bool> {
        if let Some(issued_at) = self.payload.get(names::ISSUED_AT) {
            match issued_at.as_timestamp() {
                Some(iat) if iat <= now => {}
                _ => {
                    tracing::debug!(claim = names::ISSUED_AT, "token rejected by temporal claim");
                    return Ok(false);
                }
            }
        }

        if let Some(expiration) = self.payload.get(names::EXPIRATION) {
            match expiration.as_timestamp() {
                Some(exp) if exp >= now => {}
                _ => {
                    tracing::debug!(claim = names::EXPIRATION, "token rejected by temporal claim");
                    return Ok(false);
                }
            }
        }

        if let Some(not_before) = self.payload.get(names::NOT_BEFORE) {
            match not_before.as_timestamp() {
                Some(nbf) if nbf <= now => {}
                _ => {
                    tracing::debug!(claim = names::NOT_BEFORE, "token rejected by temporal claim");
                    return Ok(false);
                }
            }
        }

        let header_encoded = codec::encode_claims(&self.header)?;
        let payload_encoded = codec::encode_claims(&self.payload)?;
        let Ok(candidate) = codec::base64_url_decode(&self.signature) else {
            return Ok(false);
        };

        signer.verify(&header_encoded, &payload_encoded, &candidate)
    }

    /// True iff the payload claim is present and equals `value` exactly
    /// (case-sensitive).
    #[must_use]
    pub fn check(&self, key: &str, value: &str) -> bool {
        self.payload.get(key).map_or(false, |claim| claim.matches(value))
    }

    /// True iff the token was issued by `issuer`.
    #[must_use]
    pub fn check_issuer(&self, issuer: &str) -> bool {
        self.check(names::ISSUER, issuer)
    }

    /// True iff the token relates to `subject`.
    #[must_use]
    pub fn check_subject(&self, subject: &str) -> bool {
        self.check(names::SUBJECT, subject)
    }

    /// True iff the token is intended for `audience`.
    #[must_use]
    pub fn check_audience(&self, audience: &str) -> bool {
        self.check(names::AUDIENCE, audience)
    }

    /// True iff the token carries the identifier `jwt_id`.
    #[must_use]
    pub fn check_jwt_id(&self, jwt_id: &str) -> bool {
        self.check(names::JWT_ID, jwt_id)
    }

    /// Conjunction of whichever standard-claim checks are supplied. An
    /// omitted parameter passes vacuously.
    #[must_use]
    pub fn check_all(
        &self,
        issuer: Option<&str>,
        subject: Option<&str>,
        audience: Option<&str>,
        jwt_id: Option<&str>,
    ) -> bool {
        issuer.map_or(true, |value| self.check_issuer(value))
            && subject.map_or(true, |value| self.check_subject(value))
            && audience.map_or(true, |value| self.check_audience(value))
            && jwt_id.map_or(true, |value| self.check_jwt_id(value))
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.compact() {
            Ok(compact) => f.write_str(&compact),
            Err(_) => Err(fmt::Error),
        }
    }
}
