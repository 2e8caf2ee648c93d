//! Identifier types for e-mobility roaming partners.
//!
//! This module provides the strongly-typed identifiers exchanged between
//! roaming partners:
//! - [`ProviderId`]: an e-mobility service provider id (e.g. `DE-GDF`)
//! - [`OperatorId`]: a charge point operator id (e.g. `DE*ABC`)
//! - [`Uid`]: an RFID card UID
//! - [`SessionId`], [`ProcessId`], [`EventTrackingId`]: opaque correlation ids
//!
//! Identifiers validate their grammar on parse and keep the original
//! spelling, so the string round trip is stable: `parse(x.to_string()) == x`.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Errors produced when an identifier fails its grammar check.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdError {
    /// The given text is not a well-formed provider identification.
    #[error("invalid provider identification: {0:?}")]
    Provider(String),

    /// The given text is not a well-formed operator identification.
    #[error("invalid operator identification: {0:?}")]
    Operator(String),

    /// The given text is not a well-formed RFID UID.
    #[error("invalid RFID UID: {0:?}")]
    Uid(String),

    /// An opaque identifier was empty.
    #[error("identifier must not be empty")]
    Empty,
}

/// Regex for provider ids: country code, optional `-` or `*`, three
/// alphanumerics (e.g. `DE-GDF`, `DE*GDF`, `DEGDF`).
static PROVIDER_ID_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z]{2}[*-]?[A-Za-z0-9]{3}$").expect("Invalid provider id regex")
});

/// Regex for operator ids: country code, optional `*`, three alphanumerics
/// (e.g. `DE*ABC`, `DEABC`).
static OPERATOR_ID_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z]{2}\*?[A-Za-z0-9]{3}$").expect("Invalid operator id regex")
});

/// Regex for RFID UIDs: 8 to 20 hex digits.
static UID_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Fa-f0-9]{8,20}$").expect("Invalid UID regex"));

/// An e-mobility service provider identification.
///
/// The wire form is a two-letter country code, an optional `-` or `*`
/// separator, and a three-character alphanumeric suffix. The original
/// spelling (including the separator) is preserved.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ProviderId(String);

impl ProviderId {
    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the two-letter country code.
    pub fn country_code(&self) -> &str {
        &self.0[..2]
    }

    /// Returns the three-character provider suffix.
    pub fn suffix(&self) -> &str {
        &self.0[self.0.len() - 3..]
    }

    /// Returns the separator character, if the original spelling had one.
    pub fn separator(&self) -> Option<char> {
        // 2 + 3 characters without a separator, 6 with one.
        if self.0.len() == 6 {
            self.0.chars().nth(2)
        } else {
            None
        }
    }
}

impl FromStr for ProviderId {
    type Err = IdError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        if PROVIDER_ID_REGEX.is_match(text) {
            Ok(Self(text.to_owned()))
        } else {
            Err(IdError::Provider(text.to_owned()))
        }
    }
}

impl fmt::Display for ProviderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl TryFrom<String> for ProviderId {
    type Error = IdError;

    fn try_from(text: String) -> Result<Self, Self::Error> {
        text.parse()
    }
}

impl From<ProviderId> for String {
    fn from(id: ProviderId) -> Self {
        id.0
    }
}

/// A charge point operator identification.
///
/// The wire form is a two-letter country code, an optional `*` separator,
/// and a three-character alphanumeric suffix (e.g. `DE*ABC`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct OperatorId(String);

impl OperatorId {
    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the two-letter country code.
    pub fn country_code(&self) -> &str {
        &self.0[..2]
    }

    /// Returns the three-character operator suffix.
    pub fn suffix(&self) -> &str {
        &self.0[self.0.len() - 3..]
    }
}

impl FromStr for OperatorId {
    type Err = IdError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        if OPERATOR_ID_REGEX.is_match(text) {
            Ok(Self(text.to_owned()))
        } else {
            Err(IdError::Operator(text.to_owned()))
        }
    }
}

impl fmt::Display for OperatorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl TryFrom<String> for OperatorId {
    type Error = IdError;

    fn try_from(text: String) -> Result<Self, Self::Error> {
        text.parse()
    }
}

impl From<OperatorId> for String {
    fn from(id: OperatorId) -> Self {
        id.0
    }
}

/// An RFID card UID: 8 to 20 hex digits.
///
/// The original spelling is preserved for the wire round trip, but equality
/// and hashing are case-insensitive: `aabbccdd` and `AABBCCDD` name the same
/// card.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Uid(String);

impl Uid {
    /// Returns the UID as a string slice, in its original spelling.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for Uid {
    type Err = IdError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        if UID_REGEX.is_match(text) {
            Ok(Self(text.to_owned()))
        } else {
            Err(IdError::Uid(text.to_owned()))
        }
    }
}

impl fmt::Display for Uid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl PartialEq for Uid {
    fn eq(&self, other: &Self) -> bool {
        self.0.eq_ignore_ascii_case(&other.0)
    }
}

impl Eq for Uid {}

impl Hash for Uid {
    fn hash<H: Hasher>(&self, state: &mut H) {
        for byte in self.0.bytes() {
            state.write_u8(byte.to_ascii_uppercase());
        }
    }
}

impl TryFrom<String> for Uid {
    type Error = IdError;

    fn try_from(text: String) -> Result<Self, Self::Error> {
        text.parse()
    }
}

impl From<Uid> for String {
    fn from(uid: Uid) -> Self {
        uid.0
    }
}

macro_rules! opaque_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Creates a new identifier from the given text, trusting the
            /// caller. Use `FromStr` when the text needs checking.
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Returns the identifier as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl FromStr for $name {
            type Err = IdError;

            fn from_str(text: &str) -> Result<Self, Self::Err> {
                if text.is_empty() {
                    Err(IdError::Empty)
                } else {
                    Ok(Self(text.to_owned()))
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self::new(value)
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self::new(value)
            }
        }
    };
}

opaque_id!(
    /// An opaque charging session identification.
    SessionId
);

opaque_id!(
    /// An opaque process identification correlating one request/response
    /// exchange across partners.
    ProcessId
);

opaque_id!(
    /// An opaque event tracking identification threaded through a whole
    /// roaming workflow for auditing.
    EventTrackingId
);

impl ProcessId {
    /// Generates a fresh random process identification.
    pub fn random() -> Self {
        Self(Uuid::new_v4().to_string())
    }
}

impl EventTrackingId {
    /// Generates a fresh random event tracking identification.
    pub fn random() -> Self {
        Self(Uuid::new_v4().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod provider_id {
        use super::*;

        #[test]
        fn accepts_known_spellings() {
            for text in ["DE-GDF", "DE*GDF", "DEGDF", "fr-XY1", "NL*999"] {
                let id: ProviderId = text.parse().unwrap();
                assert_eq!(id.as_str(), text);
            }
        }

        #[test]
        fn rejects_malformed_input() {
            for text in ["", "DE", "DE-GD", "DE-GDFX", "D3-GDF", "DE_GDF", "DE-GD F"] {
                assert_eq!(
                    text.parse::<ProviderId>(),
                    Err(IdError::Provider(text.to_owned())),
                    "{text:?} should be rejected"
                );
            }
        }

        #[test]
        fn round_trip_preserves_spelling() {
            let id: ProviderId = "DE*GDF".parse().unwrap();
            let reparsed: ProviderId = id.to_string().parse().unwrap();
            assert_eq!(id, reparsed);
        }

        #[test]
        fn structural_accessors() {
            let id: ProviderId = "DE-GDF".parse().unwrap();
            assert_eq!(id.country_code(), "DE");
            assert_eq!(id.suffix(), "GDF");
            assert_eq!(id.separator(), Some('-'));

            let compact: ProviderId = "DEGDF".parse().unwrap();
            assert_eq!(compact.country_code(), "DE");
            assert_eq!(compact.suffix(), "GDF");
            assert_eq!(compact.separator(), None);
        }

        #[test]
        fn serde_round_trip() {
            let id: ProviderId = "DE-GDF".parse().unwrap();
            let json = serde_json::to_string(&id).unwrap();
            assert_eq!(json, "\"DE-GDF\"");
            let parsed: ProviderId = serde_json::from_str(&json).unwrap();
            assert_eq!(id, parsed);
        }

        #[test]
        fn serde_rejects_malformed() {
            assert!(serde_json::from_str::<ProviderId>("\"bogus\"").is_err());
        }
    }

    mod operator_id {
        use super::*;

        #[test]
        fn accepts_known_spellings() {
            for text in ["DE*ABC", "DEABC", "at*001"] {
                let id: OperatorId = text.parse().unwrap();
                assert_eq!(id.as_str(), text);
            }
        }

        #[test]
        fn rejects_dash_separator() {
            // Operators use `*` only; the dash spelling belongs to providers.
            assert!("DE-ABC".parse::<OperatorId>().is_err());
        }

        #[test]
        fn accessors() {
            let id: OperatorId = "DE*ABC".parse().unwrap();
            assert_eq!(id.country_code(), "DE");
            assert_eq!(id.suffix(), "ABC");
        }
    }

    mod uid {
        use super::*;
        use std::collections::HashSet;

        #[test]
        fn accepts_hex_digits() {
            for text in ["AABBCCDD", "aabbccdd", "0123456789abcdef0123"] {
                assert!(text.parse::<Uid>().is_ok(), "{text:?} should parse");
            }
        }

        #[test]
        fn rejects_short_or_non_hex() {
            for text in ["", "AABBCC", "XYZXYZXYZ", "AABBCCDD11223344556677"] {
                assert!(text.parse::<Uid>().is_err(), "{text:?} should be rejected");
            }
        }

        #[test]
        fn equality_ignores_case() {
            let lower: Uid = "aabbccdd".parse().unwrap();
            let upper: Uid = "AABBCCDD".parse().unwrap();
            assert_eq!(lower, upper);

            let mut set = HashSet::new();
            set.insert(lower);
            assert!(set.contains(&upper));
        }

        #[test]
        fn display_preserves_spelling() {
            let uid: Uid = "aabbccdd".parse().unwrap();
            assert_eq!(uid.to_string(), "aabbccdd");
        }
    }

    mod opaque_ids {
        use super::*;

        #[test]
        fn rejects_empty() {
            assert_eq!("".parse::<SessionId>(), Err(IdError::Empty));
            assert_eq!("".parse::<ProcessId>(), Err(IdError::Empty));
        }

        #[test]
        fn random_ids_are_distinct() {
            assert_ne!(ProcessId::random(), ProcessId::random());
            assert_ne!(EventTrackingId::random(), EventTrackingId::random());
        }

        #[test]
        fn serde_is_transparent() {
            let id = SessionId::new("abc-123");
            let json = serde_json::to_string(&id).unwrap();
            assert_eq!(json, "\"abc-123\"");
        }
    }
}
