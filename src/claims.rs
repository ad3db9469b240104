//! Claim container and claim values.
//!
//! A [`ClaimSet`] is an insertion-ordered map from claim name to
//! [`ClaimValue`]. Order is preserved through encode/decode round-trips so a
//! re-encoded token is byte-identical to the wire form it was parsed from.
//! Timestamps are held as integers internally and rendered to base-10
//! strings only at the JSON boundary.

use std::borrow::Cow;
use std::fmt;

use indexmap::IndexMap;
use serde::de::{self, Deserialize, Deserializer};
use serde::ser::{Serialize, Serializer};

/// Standard claim names.
pub mod names {
    /// Header claim naming the signature algorithm.
    pub const ALGORITHM: &str = "alg";
    /// Header claim naming the token type.
    pub const TOKEN_TYPE: &str = "typ";
    /// Issuer.
    pub const ISSUER: &str = "iss";
    /// Subject.
    pub const SUBJECT: &str = "sub";
    /// Audience.
    pub const AUDIENCE: &str = "aud";
    /// Expiration time (seconds since epoch).
    pub const EXPIRATION: &str = "exp";
    /// Not-before time (seconds since epoch).
    pub const NOT_BEFORE: &str = "nbf";
    /// Issued-at time (seconds since epoch).
    pub const ISSUED_AT: &str = "iat";
    /// Token identifier.
    pub const JWT_ID: &str = "jti";

    /// Default value of the `typ` header claim.
    pub const TYPE_JWT: &str = "JWT";

    /// Claims interpreted as seconds since epoch.
    pub const TEMPORAL: [&str; 3] = [EXPIRATION, NOT_BEFORE, ISSUED_AT];
}

/// A single claim value.
///
/// `Timestamp` keeps seconds-since-epoch as an integer; it serializes as the
/// base-10 string the wire format carries. Two values are equal when their
/// rendered claim text is equal, so `Timestamp(42)` equals `Text("42")`.
#[derive(Debug, Clone)]
pub enum ClaimValue {
    /// Free-form text claim.
    Text(String),
    /// Seconds since the Unix epoch.
    Timestamp(i64),
}

impl ClaimValue {
    /// The claim rendered as text, exactly as it appears on the wire.
    #[must_use]
    pub fn as_text(&self) -> Cow<'_, str> {
        match self {
            ClaimValue::Text(text) => Cow::Borrowed(text),
            ClaimValue::Timestamp(seconds) => Cow::Owned(seconds.to_string()),
        }
    }

    /// The claim interpreted as seconds since epoch, if it is one.
    #[must_use]
    pub fn as_timestamp(&self) -> Option<i64> {
        match self {
            ClaimValue::Timestamp(seconds) => Some(*seconds),
            ClaimValue::Text(text) => text.parse().ok(),
        }
    }

    /// Exact, case-sensitive match against the rendered claim text.
    #[must_use]
    pub fn matches(&self, candidate: &str) -> bool {
        match self {
            ClaimValue::Text(text) => text == candidate,
            ClaimValue::Timestamp(seconds) => seconds.to_string() == candidate,
        }
    }
}

impl PartialEq for ClaimValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (ClaimValue::Text(a), ClaimValue::Text(b)) => a == b,
            (ClaimValue::Timestamp(a), ClaimValue::Timestamp(b)) => a == b,
            (ClaimValue::Text(text), ClaimValue::Timestamp(seconds))
            | (ClaimValue::Timestamp(seconds), ClaimValue::Text(text)) => {
                seconds.to_string() == *text
            }
        }
    }
}

impl Eq for ClaimValue {}

impl From<&str> for ClaimValue {
    fn from(value: &str) -> Self {
        ClaimValue::Text(value.to_string())
    }
}

impl From<String> for ClaimValue {
    fn from(value: String) -> Self {
        ClaimValue::Text(value)
    }
}

impl From<i64> for ClaimValue {
    fn from(seconds: i64) -> Self {
        ClaimValue::Timestamp(seconds)
    }
}

impl From<chrono::DateTime<chrono::Utc>> for ClaimValue {
    fn from(at: chrono::DateTime<chrono::Utc>) -> Self {
        ClaimValue::Timestamp(at.timestamp())
    }
}

impl Serialize for ClaimValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ClaimValue::Text(text) => serializer.serialize_str(text),
            ClaimValue::Timestamp(seconds) => serializer.collect_str(seconds),
        }
    }
}

impl<'de> Deserialize<'de> for ClaimValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct ValueVisitor;

        impl de::Visitor<'_> for ValueVisitor {
            type Value = ClaimValue;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a string or integer claim value")
            }

            fn visit_str<E: de::Error>(self, value: &str) -> Result<ClaimValue, E> {
                Ok(ClaimValue::Text(value.to_string()))
            }

            fn visit_string<E: de::Error>(self, value: String) -> Result<ClaimValue, E> {
                Ok(ClaimValue::Text(value))
            }

            fn visit_i64<E: de::Error>(self, value: i64) -> Result<ClaimValue, E> {
                Ok(ClaimValue::Timestamp(value))
            }

            fn visit_u64<E: de::Error>(self, value: u64) -> Result<ClaimValue, E> {
                i64::try_from(value)
                    .map(ClaimValue::Timestamp)
                    .map_err(|_| E::custom("integer claim out of range"))
            }
        }

        deserializer.deserialize_any(ValueVisitor)
    }
}

/// Insertion-ordered claim container.
///
/// A key is either absent or maps to a value; JSON `null` entries are
/// dropped during decode, never stored. Setting a temporal claim
/// (`exp`/`nbf`/`iat`) with canonical base-10 text normalizes it to
/// [`ClaimValue::Timestamp`] so round-trips stay stable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClaimSet {
    claims: IndexMap<String, ClaimValue>,
}

impl ClaimSet {
    /// Create an empty claim set.
    #[must_use]
    pub fn new() -> Self {
        Self {
            claims: IndexMap::new(),
        }
    }

    /// Look up a claim. Absent and present are distinguished by the `Option`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&ClaimValue> {
        self.claims.get(key)
    }

    /// True if the claim is present.
    #[must_use]
    pub fn exists(&self, key: &str) -> bool {
        self.claims.contains_key(key)
    }

    /// Insert or replace a claim.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<ClaimValue>) {
        let key = key.into();
        let value = normalize(&key, value.into());
        self.claims.insert(key, value);
    }

    /// Bulk-install claims, preserving iteration order.
    pub fn set_all<I>(&mut self, claims: I)
    where
        I: IntoIterator<Item = (String, ClaimValue)>,
    {
        for (key, value) in claims {
            self.set(key, value);
        }
    }

    /// Number of claims present.
    #[must_use]
    pub fn len(&self) -> usize {
        self.claims.len()
    }

    /// True if no claims are present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.claims.is_empty()
    }

    /// Iterate claims in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ClaimValue)> {
        self.claims.iter().map(|(key, value)| (key.as_str(), value))
    }
}

impl FromIterator<(String, ClaimValue)> for ClaimSet {
    fn from_iter<I: IntoIterator<Item = (String, ClaimValue)>>(iter: I) -> Self {
        let mut set = ClaimSet::new();
        set.set_all(iter);
        set
    }
}

impl Extend<(String, ClaimValue)> for ClaimSet {
    fn extend<I: IntoIterator<Item = (String, ClaimValue)>>(&mut self, iter: I) {
        self.set_all(iter);
    }
}

impl Serialize for ClaimSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.claims.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for ClaimSet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = IndexMap::<String, Option<ClaimValue>>::deserialize(deserializer)?;
        let mut set = ClaimSet::new();
        for (key, value) in raw {
            if let Some(value) = value {
                set.set(key, value);
            }
        }
        Ok(set)
    }
}

/// Temporal claims in canonical base-10 text become integers. The canonical
/// check keeps non-canonical text (leading zeros, signs) verbatim so
/// re-encoding never changes wire bytes.
fn normalize(key: &str, value: ClaimValue) -> ClaimValue {
    if names::TEMPORAL.contains(&key) {
        if let ClaimValue::Text(text) = &value {
            if let Ok(seconds) = text.parse::<i64>() {
                if seconds.to_string() == *text {
                    return ClaimValue::Timestamp(seconds);
                }
            }
        }
    }
    value
}
