//! Signature algorithm registry.
//!
//! Maps each supported algorithm identifier to its hash function and signing
//! scheme. The registry is a closed sum type: adding an algorithm means
//! adding a variant, and every dispatch site is checked exhaustively by the
//! compiler.

use std::fmt;
use std::str::FromStr;

use crate::error::JwtError;

/// Hash function half of a registry entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HashFn {
    /// SHA-256
    Sha256,
    /// SHA-384
    Sha384,
    /// SHA-512
    Sha512,
}

/// Signing scheme half of a registry entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scheme {
    /// Keyed-hash message authentication with a symmetric secret.
    Hmac,
    /// RSA PKCS#1 v1.5 signature with a private key.
    Rsa,
}

/// Supported signature algorithms.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Algorithm {
    /// HMAC with SHA-256 (the default header algorithm).
    #[default]
    Hs256,
    /// HMAC with SHA-384.
    Hs384,
    /// HMAC with SHA-512.
    Hs512,
    /// RSA PKCS#1 v1.5 with SHA-256.
    Rs256,
    /// RSA PKCS#1 v1.5 with SHA-384.
    Rs384,
    /// RSA PKCS#1 v1.5 with SHA-512.
    Rs512,
}

impl Algorithm {
    /// Every registry entry, in identifier order.
    pub const ALL: [Algorithm; 6] = [
        Algorithm::Hs256,
        Algorithm::Hs384,
        Algorithm::Hs512,
        Algorithm::Rs256,
        Algorithm::Rs384,
        Algorithm::Rs512,
    ];

    /// Resolve an algorithm identifier against the registry.
    ///
    /// # Errors
    /// Returns `UnsupportedAlgorithm` for identifiers outside the registry.
    pub fn from_name(name: &str) -> Result<Self, JwtError> {
        match name {
            "HS256" => Ok(Algorithm::Hs256),
            "HS384" => Ok(Algorithm::Hs384),
            "HS512" => Ok(Algorithm::Hs512),
            "RS256" => Ok(Algorithm::Rs256),
            "RS384" => Ok(Algorithm::Rs384),
            "RS512" => Ok(Algorithm::Rs512),
            _ => Err(JwtError::UnsupportedAlgorithm(name.to_string())),
        }
    }

    /// Wire identifier carried in the `alg` header claim.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Algorithm::Hs256 => "HS256",
            Algorithm::Hs384 => "HS384",
            Algorithm::Hs512 => "HS512",
            Algorithm::Rs256 => "RS256",
            Algorithm::Rs384 => "RS384",
            Algorithm::Rs512 => "RS512",
        }
    }

    /// Hash function used by this algorithm.
    #[must_use]
    pub const fn hash(self) -> HashFn {
        match self {
            Algorithm::Hs256 | Algorithm::Rs256 => HashFn::Sha256,
            Algorithm::Hs384 | Algorithm::Rs384 => HashFn::Sha384,
            Algorithm::Hs512 | Algorithm::Rs512 => HashFn::Sha512,
        }
    }

    /// Signing scheme used by this algorithm.
    #[must_use]
    pub const fn scheme(self) -> Scheme {
        match self {
            Algorithm::Hs256 | Algorithm::Hs384 | Algorithm::Hs512 => Scheme::Hmac,
            Algorithm::Rs256 | Algorithm::Rs384 | Algorithm::Rs512 => Scheme::Rsa,
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = JwtError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Algorithm::from_name(s)
    }
}
