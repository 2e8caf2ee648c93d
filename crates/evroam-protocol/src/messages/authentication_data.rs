//! Authentication data fragments shared by pull and push messages.

use serde_json::{Map, Value};

use evroam_core::{ProviderId, Uid};

use crate::error::ParseResult;
use crate::fields;
use crate::messages::{ParseHook, SerializeHook};

/// One authentication record: the RFID UID a provider vouches for.
///
/// Wire form: `{ "UID": "AABBCCDD" }`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AuthenticationDataRecord {
    uid: Uid,
}

impl AuthenticationDataRecord {
    /// Creates a record for the given UID.
    pub fn new(uid: Uid) -> Self {
        Self { uid }
    }

    /// Returns the RFID UID.
    pub fn uid(&self) -> &Uid {
        &self.uid
    }

    /// Parses a record from its JSON object.
    pub fn try_parse(document: &Value) -> ParseResult<Self> {
        Self::try_parse_with(document, None)
    }

    /// Parses a record, applying an optional post-parse hook.
    pub fn try_parse_with(document: &Value, hook: Option<&ParseHook<Self>>) -> ParseResult<Self> {
        let object = fields::object(document)?;
        let uid = fields::mandatory(object, "UID", "RFID UID", fields::parsed::<Uid>)?;

        let record = Self { uid };
        Ok(match hook {
            Some(hook) => hook(document, record),
            None => record,
        })
    }

    /// Encodes the record as its JSON object.
    pub fn to_json(&self) -> Value {
        self.to_json_with(None)
    }

    /// Encodes the record, applying an optional serialize hook last.
    pub fn to_json_with(&self, hook: Option<&SerializeHook<Self>>) -> Value {
        let mut object = Map::new();
        object.insert("UID".to_owned(), Value::String(self.uid.to_string()));

        let json = Value::Object(object);
        match hook {
            Some(hook) => hook(self, json),
            None => json,
        }
    }
}

/// The authentication records one provider contributes.
///
/// Wire form:
///
/// ```json
/// {
///   "ProviderID": "DE-GDF",
///   "AuthenticationDataRecords": [ { "UID": "..." }, ... ]
/// }
/// ```
///
/// The record list is a sequence: wire order is preserved and significant.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProviderAuthenticationData {
    provider_id: ProviderId,
    records: Vec<AuthenticationDataRecord>,
}

impl ProviderAuthenticationData {
    /// Creates a fragment from its parts.
    pub fn new(provider_id: ProviderId, records: Vec<AuthenticationDataRecord>) -> Self {
        Self {
            provider_id,
            records,
        }
    }

    /// Returns the provider the records belong to.
    pub fn provider_id(&self) -> &ProviderId {
        &self.provider_id
    }

    /// Returns the authentication records in wire order.
    pub fn records(&self) -> &[AuthenticationDataRecord] {
        &self.records
    }

    /// Parses a fragment from its JSON object.
    pub fn try_parse(document: &Value) -> ParseResult<Self> {
        Self::try_parse_with(document, None)
    }

    /// Parses a fragment, applying an optional post-parse hook.
    pub fn try_parse_with(document: &Value, hook: Option<&ParseHook<Self>>) -> ParseResult<Self> {
        let object = fields::object(document)?;
        let provider_id = fields::mandatory(
            object,
            "ProviderID",
            "provider identification",
            fields::parsed::<ProviderId>,
        )?;
        let records = fields::optional_seq(
            object,
            "AuthenticationDataRecords",
            "authentication data records",
            |raw| AuthenticationDataRecord::try_parse(raw).map_err(|error| error.to_string()),
        )?;

        let data = Self {
            provider_id,
            records,
        };
        Ok(match hook {
            Some(hook) => hook(document, data),
            None => data,
        })
    }

    /// Encodes the fragment as its JSON object.
    pub fn to_json(&self) -> Value {
        self.to_json_with(None)
    }

    /// Encodes the fragment, applying an optional serialize hook last.
    pub fn to_json_with(&self, hook: Option<&SerializeHook<Self>>) -> Value {
        let mut object = Map::new();
        object.insert(
            "ProviderID".to_owned(),
            Value::String(self.provider_id.to_string()),
        );
        if !self.records.is_empty() {
            object.insert(
                "AuthenticationDataRecords".to_owned(),
                Value::Array(self.records.iter().map(|r| r.to_json()).collect()),
            );
        }

        let json = Value::Object(object);
        match hook {
            Some(hook) => hook(self, json),
            None => json,
        }
    }
}
