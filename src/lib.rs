//! Compact signed token (JWT/JWS) issuing and verification.
//!
//! This crate provides:
//! - HS256/HS384/HS512 and RS256/RS384/RS512 algorithms
//! - An explicit, immutable [`Signer`] value instead of global configuration
//! - Standard claims handling with temporal validity checks
//! - Constant-time signature comparison

pub mod algorithms;
pub mod builder;
pub mod claims;
pub mod codec;
pub(crate) mod crypto;
pub mod error;
pub mod signer;
pub mod token;

pub use algorithms::{Algorithm, HashFn, Scheme};
pub use builder::JwtBuilder;
pub use claims::{ClaimSet, ClaimValue};
pub use error::{JwtError, JwtResult};
pub use signer::{KeyMaterial, Signer};
pub use token::Token;

/// Main entry point for token operations.
pub struct Jwt;

impl Jwt {
    /// Start building a token.
    #[must_use]
    pub fn builder() -> JwtBuilder {
        JwtBuilder::new()
    }

    /// Reassemble a token from its compact wire form, or `None` when the
    /// input is not a compact token.
    #[must_use]
    pub fn parse(token: &str) -> Option<Token> {
        JwtBuilder::parse(token)
    }
}
