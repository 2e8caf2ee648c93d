//! PullAuthenticationData request and response codecs.
//!
//! A provider asks its roaming partners for the authentication data sets of
//! selected operators; the answer carries one
//! [`ProviderAuthenticationData`] fragment per contributing provider.

use std::collections::HashSet;
use std::hash::{Hash, Hasher};

use serde_json::{Map, Value};

use evroam_core::{OperatorId, ProviderId};

use crate::envelope::{Envelope, ParseOptions};
use crate::error::ParseResult;
use crate::messages::{
    ParseHook, ProviderAuthenticationData, SerializeHook, StatusCode, log_parse_failure,
};
use crate::{fields, hash};

/// Request: pull the authentication data visible to one provider.
///
/// Wire form:
///
/// ```json
/// {
///   "ProviderID": "DE-GDF",
///   "OperatorID": ["DE*ABC", "DE*XYZ"]
/// }
/// ```
///
/// `OperatorID` narrows the pull to the given operators; it is a set, so
/// wire order carries no meaning and duplicates collapse. An absent
/// `OperatorID` means "all operators" and parses as the empty set.
#[derive(Debug, Clone)]
pub struct PullAuthenticationDataRequest {
    provider_id: ProviderId,
    operator_ids: HashSet<OperatorId>,
    envelope: Envelope,
    hash: u64,
}

impl PullAuthenticationDataRequest {
    /// Creates a request from pre-validated parts.
    pub fn new(
        provider_id: ProviderId,
        operator_ids: HashSet<OperatorId>,
        envelope: Envelope,
    ) -> Self {
        let hash = hash::combine(
            hash::of(&provider_id),
            hash::of_iter_unordered(operator_ids.iter()),
        );
        Self {
            provider_id,
            operator_ids,
            envelope,
            hash,
        }
    }

    /// Returns the requesting provider.
    pub fn provider_id(&self) -> &ProviderId {
        &self.provider_id
    }

    /// Returns the operators the pull is narrowed to (empty = all).
    pub fn operator_ids(&self) -> &HashSet<OperatorId> {
        &self.operator_ids
    }

    /// Returns the request envelope.
    pub fn envelope(&self) -> &Envelope {
        &self.envelope
    }

    /// Parses a request from its JSON document.
    pub fn try_parse(document: &Value, options: ParseOptions<'_>) -> ParseResult<Self> {
        Self::try_parse_with(document, options, None)
    }

    /// Parses a request, applying an optional post-parse hook.
    pub fn try_parse_with(
        document: &Value,
        options: ParseOptions<'_>,
        hook: Option<&ParseHook<Self>>,
    ) -> ParseResult<Self> {
        log_parse_failure(
            "PullAuthenticationDataRequest",
            Self::parse_fields(document, options, hook),
        )
    }

    fn parse_fields(
        document: &Value,
        options: ParseOptions<'_>,
        hook: Option<&ParseHook<Self>>,
    ) -> ParseResult<Self> {
        let object = fields::object(document)?;
        let provider_id = fields::mandatory(
            object,
            "ProviderID",
            "provider identification",
            fields::parsed::<ProviderId>,
        )?;
        let operator_ids = fields::optional_set(
            object,
            "OperatorID",
            "operator identifications",
            fields::parsed::<OperatorId>,
        )?;
        let custom_data = object.get("CustomData").cloned();

        let request = Self::new(
            provider_id,
            operator_ids,
            options.into_envelope(custom_data),
        );
        Ok(match hook {
            Some(hook) => hook(document, request),
            None => request,
        })
    }

    /// Parses a request, treating malformed input as fatal.
    ///
    /// # Panics
    ///
    /// Panics with the descriptive parse error when the document is
    /// invalid. Use [`Self::try_parse`] at call sites with a recovery path.
    pub fn parse(document: &Value, options: ParseOptions<'_>) -> Self {
        match Self::try_parse(document, options) {
            Ok(request) => request,
            Err(error) => panic!("{error}"),
        }
    }

    /// Encodes the request as its JSON document.
    pub fn to_json(&self) -> Value {
        self.to_json_with(None)
    }

    /// Encodes the request, applying an optional serialize hook last.
    pub fn to_json_with(&self, hook: Option<&SerializeHook<Self>>) -> Value {
        let mut object = Map::new();
        object.insert(
            "ProviderID".to_owned(),
            Value::String(self.provider_id.to_string()),
        );
        if !self.operator_ids.is_empty() {
            object.insert(
                "OperatorID".to_owned(),
                Value::Array(
                    self.operator_ids
                        .iter()
                        .map(|id| Value::String(id.to_string()))
                        .collect(),
                ),
            );
        }
        if let Some(custom_data) = &self.envelope.custom_data {
            object.insert("CustomData".to_owned(), custom_data.clone());
        }

        let json = Value::Object(object);
        match hook {
            Some(hook) => hook(self, json),
            None => json,
        }
    }
}

impl PartialEq for PullAuthenticationDataRequest {
    fn eq(&self, other: &Self) -> bool {
        self.provider_id == other.provider_id && self.operator_ids == other.operator_ids
    }
}

impl Eq for PullAuthenticationDataRequest {}

impl Hash for PullAuthenticationDataRequest {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.hash);
    }
}

/// Response: the authentication data sets the partners answered with.
///
/// Wire form:
///
/// ```json
/// {
///   "AuthenticationData": [ { "ProviderID": "...", ... }, ... ],
///   "StatusCode": { "Code": "000" }
/// }
/// ```
///
/// `AuthenticationData` is a sequence: wire order is preserved.
#[derive(Debug, Clone)]
pub struct PullAuthenticationDataResponse {
    authentication_data: Vec<ProviderAuthenticationData>,
    status_code: Option<StatusCode>,
    envelope: Envelope,
    hash: u64,
}

impl PullAuthenticationDataResponse {
    /// Creates a response from pre-validated parts.
    pub fn new(
        authentication_data: Vec<ProviderAuthenticationData>,
        status_code: Option<StatusCode>,
        envelope: Envelope,
    ) -> Self {
        let hash = hash::combine(
            hash::of_iter_ordered(authentication_data.iter()),
            hash::of(&status_code),
        );
        Self {
            authentication_data,
            status_code,
            envelope,
            hash,
        }
    }

    /// Returns the per-provider data sets in wire order.
    pub fn authentication_data(&self) -> &[ProviderAuthenticationData] {
        &self.authentication_data
    }

    /// Returns the status answer, if the partner sent one.
    pub fn status_code(&self) -> Option<&StatusCode> {
        self.status_code.as_ref()
    }

    /// Returns the response envelope.
    pub fn envelope(&self) -> &Envelope {
        &self.envelope
    }

    /// Parses a response from its JSON document.
    pub fn try_parse(document: &Value, options: ParseOptions<'_>) -> ParseResult<Self> {
        Self::try_parse_with(document, options, None)
    }

    /// Parses a response, applying an optional post-parse hook.
    pub fn try_parse_with(
        document: &Value,
        options: ParseOptions<'_>,
        hook: Option<&ParseHook<Self>>,
    ) -> ParseResult<Self> {
        log_parse_failure(
            "PullAuthenticationDataResponse",
            Self::parse_fields(document, options, hook),
        )
    }

    fn parse_fields(
        document: &Value,
        options: ParseOptions<'_>,
        hook: Option<&ParseHook<Self>>,
    ) -> ParseResult<Self> {
        let object = fields::object(document)?;
        let authentication_data = fields::mandatory_seq(
            object,
            "AuthenticationData",
            "authentication data sets",
            |raw| ProviderAuthenticationData::try_parse(raw).map_err(|error| error.to_string()),
        )?;
        let status_code = fields::optional_object(object, "StatusCode", StatusCode::try_parse)?;
        let custom_data = object.get("CustomData").cloned();

        let response = Self::new(
            authentication_data,
            status_code,
            options.into_envelope(custom_data),
        );
        Ok(match hook {
            Some(hook) => hook(document, response),
            None => response,
        })
    }

    /// Parses a response, treating malformed input as fatal.
    ///
    /// # Panics
    ///
    /// Panics with the descriptive parse error when the document is
    /// invalid. Use [`Self::try_parse`] at call sites with a recovery path.
    pub fn parse(document: &Value, options: ParseOptions<'_>) -> Self {
        match Self::try_parse(document, options) {
            Ok(response) => response,
            Err(error) => panic!("{error}"),
        }
    }

    /// Encodes the response as its JSON document.
    pub fn to_json(&self) -> Value {
        self.to_json_with(None, None, None)
    }

    /// Encodes the response, applying the optional serialize hooks: one for
    /// the response itself (applied last) and one per nested fragment type.
    pub fn to_json_with(
        &self,
        hook: Option<&SerializeHook<Self>>,
        provider_data_hook: Option<&SerializeHook<ProviderAuthenticationData>>,
        status_code_hook: Option<&SerializeHook<StatusCode>>,
    ) -> Value {
        let mut object = Map::new();
        object.insert(
            "AuthenticationData".to_owned(),
            Value::Array(
                self.authentication_data
                    .iter()
                    .map(|data| data.to_json_with(provider_data_hook))
                    .collect(),
            ),
        );
        if let Some(status_code) = &self.status_code {
            object.insert(
                "StatusCode".to_owned(),
                status_code.to_json_with(status_code_hook),
            );
        }
        if let Some(custom_data) = &self.envelope.custom_data {
            object.insert("CustomData".to_owned(), custom_data.clone());
        }

        let json = Value::Object(object);
        match hook {
            Some(hook) => hook(self, json),
            None => json,
        }
    }
}

impl PartialEq for PullAuthenticationDataResponse {
    fn eq(&self, other: &Self) -> bool {
        self.authentication_data == other.authentication_data
            && self.status_code == other.status_code
    }
}

impl Eq for PullAuthenticationDataResponse {}

impl Hash for PullAuthenticationDataResponse {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.hash);
    }
}
