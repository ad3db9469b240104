//! Token assembly and wire parsing.

use chrono::{DateTime, Duration, Utc};

use crate::algorithms::Algorithm;
use crate::claims::{names, ClaimSet, ClaimValue};
use crate::codec;
use crate::error::JwtResult;
use crate::signer::Signer;
use crate::token::Token;

/// Accumulates header and payload claims, then builds a signed [`Token`].
///
/// Setters consume and return the builder so claims chain:
///
/// ```
/// use signet::{Algorithm, JwtBuilder, KeyMaterial, Signer};
///
/// let signer = Signer::new(Algorithm::Hs256, KeyMaterial::secret(b"s3cr3t".to_vec()));
/// let token = JwtBuilder::new()
///     .subject("42")
///     .issuer("auth.example")
///     .build(&signer)
///     .unwrap();
/// assert!(token.check_subject("42"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct JwtBuilder {
    header: ClaimSet,
    payload: ClaimSet,
}

impl JwtBuilder {
    /// Create an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Accumulated header claims.
    #[must_use]
    pub fn header(&self) -> &ClaimSet {
        &self.header
    }

    /// Accumulated payload claims.
    #[must_use]
    pub fn payload(&self) -> &ClaimSet {
        &self.payload
    }

    /// Add a header claim.
    #[must_use]
    pub fn header_claim(mut self, key: impl Into<String>, value: impl Into<ClaimValue>) -> Self {
        self.header.set(key, value);
        self
    }

    /// Set the `alg` header claim.
    #[must_use]
    pub fn algorithm(self, algorithm: Algorithm) -> Self {
        self.header_claim(names::ALGORITHM, algorithm.name())
    }

    /// Set the `typ` header claim.
    #[must_use]
    pub fn token_type(self, token_type: impl Into<String>) -> Self {
        let token_type: String = token_type.into();
        self.header_claim(names::TOKEN_TYPE, token_type)
    }

    /// Add a payload claim.
    #[must_use]
    pub fn claim(mut self, key: impl Into<String>, value: impl Into<ClaimValue>) -> Self {
        self.payload.set(key, value);
        self
    }

    /// Set the issuer (`iss`) claim.
    #[must_use]
    pub fn issuer(self, issuer: impl Into<String>) -> Self {
        let issuer: String = issuer.into();
        self.claim(names::ISSUER, issuer)
    }

    /// Set the subject (`sub`) claim.
    #[must_use]
    pub fn subject(self, subject: impl Into<String>) -> Self {
        let subject: String = subject.into();
        self.claim(names::SUBJECT, subject)
    }

    /// Set the audience (`aud`) claim.
    #[must_use]
    pub fn audience(self, audience: impl Into<String>) -> Self {
        let audience: String = audience.into();
        self.claim(names::AUDIENCE, audience)
    }

    /// Set the expiration time (`exp`) claim.
    #[must_use]
    pub fn expires_at(self, at: DateTime<Utc>) -> Self {
        self.claim(names::EXPIRATION, at)
    }

    /// Set the expiration time relative to now.
    #[must_use]
    pub fn expires_in(self, duration: Duration) -> Self {
        self.expires_at(Utc::now() + duration)
    }

    /// Set the not-before (`nbf`) claim.
    #[must_use]
    pub fn not_before(self, at: DateTime<Utc>) -> Self {
        self.claim(names::NOT_BEFORE, at)
    }

    /// Set the issued-at (`iat`) claim.
    #[must_use]
    pub fn issued_at(self, at: DateTime<Utc>) -> Self {
        self.claim(names::ISSUED_AT, at)
    }

    /// Set the issued-at time to now.
    #[must_use]
    pub fn issued_now(self) -> Self {
        self.issued_at(Utc::now())
    }

    /// Set the token identifier (`jti`) claim.
    #[must_use]
    pub fn jwt_id(self, jwt_id: impl Into<String>) -> Self {
        let jwt_id: String = jwt_id.into();
        self.claim(names::JWT_ID, jwt_id)
    }

    /// Build a signed token from the accumulated claims. Missing `alg` and
    /// `typ` header claims are defaulted by [`Token::new_signed`].
    ///
    /// # Errors
    /// Propagates signer configuration errors and claim serialization
    /// failures.
    pub fn build(self, signer: &Signer) -> JwtResult<Token> {
        Token::new_signed(self.header, self.payload, signer)
    }

    /// Reassemble a token from its compact wire form.
    ///
    /// Returns `None` when the string is not a compact token — a normal
    /// outcome for arbitrary input, not an error. The signature segment is
    /// kept verbatim; its bytes are only decoded during verification.
    #[must_use]
    pub fn parse(token: &str) -> Option<Token> {
        if !codec::is_compact_token(token) {
            tracing::debug!(len = token.len(), "rejected non-compact token");
            return None;
        }
        let (header, payload, signature) = codec::split_token(token).ok()?;
        let header = codec::decode_claims(header).ok()?;
        let payload = codec::decode_claims(payload).ok()?;
        Some(Token::from_parts(header, payload, signature))
    }
}
