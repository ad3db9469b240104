//! Token error types.

use thiserror::Error;

/// Token operation result type.
pub type JwtResult<T> = Result<T, JwtError>;

/// Token error types.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JwtError {
    /// Input does not have the three-segment compact shape.
    #[error("malformed token: {0}")]
    MalformedToken(String),
    /// A compact segment failed base64url or JSON decoding.
    #[error("malformed token part: {0}")]
    MalformedPart(String),
    /// Algorithm identifier absent from the registry.
    #[error("unsupported algorithm: {0}")]
    UnsupportedAlgorithm(String),
    /// No key material usable for the configured algorithm.
    #[error("missing key material: {0}")]
    MissingKey(String),
    /// The underlying signing primitive reported failure.
    #[error("signing failed: {0}")]
    SigningFailed(String),
    /// Claim set could not be serialized to JSON.
    #[error("claim serialization failed: {0}")]
    Serialization(String),
}
