//! PushAuthenticationData request codec.

use std::hash::{Hash, Hasher};

use serde_json::{Map, Value};

use evroam_core::ActionType;

use crate::envelope::{Envelope, ParseOptions};
use crate::error::ParseResult;
use crate::messages::{ParseHook, ProviderAuthenticationData, SerializeHook, log_parse_failure};
use crate::{fields, hash};

/// Request: push authentication data sets to a roaming partner.
///
/// Wire form:
///
/// ```json
/// {
///   "ActionType": "fullLoad",
///   "ProviderAuthenticationData": [ { "ProviderID": "...", ... }, ... ]
/// }
/// ```
///
/// The data list is a sequence: the receiver applies it in wire order, so
/// order is significant for equality.
#[derive(Debug, Clone)]
pub struct PushAuthenticationDataRequest {
    action: ActionType,
    provider_authentication_data: Vec<ProviderAuthenticationData>,
    envelope: Envelope,
    hash: u64,
}

impl PushAuthenticationDataRequest {
    /// Creates a request from pre-validated parts.
    pub fn new(
        action: ActionType,
        provider_authentication_data: Vec<ProviderAuthenticationData>,
        envelope: Envelope,
    ) -> Self {
        let hash = hash::combine(
            hash::of(&action),
            hash::of_iter_ordered(provider_authentication_data.iter()),
        );
        Self {
            action,
            provider_authentication_data,
            envelope,
            hash,
        }
    }

    /// Returns how the pushed data relates to the receiver's data set.
    pub fn action(&self) -> ActionType {
        self.action
    }

    /// Returns the per-provider data sets in wire order.
    pub fn provider_authentication_data(&self) -> &[ProviderAuthenticationData] {
        &self.provider_authentication_data
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
            "PushAuthenticationDataRequest",
            Self::parse_fields(document, options, hook),
        )
    }

    fn parse_fields(
        document: &Value,
        options: ParseOptions<'_>,
        hook: Option<&ParseHook<Self>>,
    ) -> ParseResult<Self> {
        let object = fields::object(document)?;
        let action = fields::mandatory(
            object,
            "ActionType",
            "action type",
            fields::parsed::<ActionType>,
        )?;
        let provider_authentication_data = fields::mandatory_seq(
            object,
            "ProviderAuthenticationData",
            "provider authentication data sets",
            |raw| ProviderAuthenticationData::try_parse(raw).map_err(|error| error.to_string()),
        )?;
        let custom_data = object.get("CustomData").cloned();

        let request = Self::new(
            action,
            provider_authentication_data,
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
        self.to_json_with(None, None)
    }

    /// Encodes the request, applying the optional serialize hooks: one for
    /// the request itself (applied last) and one per nested data set.
    pub fn to_json_with(
        &self,
        hook: Option<&SerializeHook<Self>>,
        provider_data_hook: Option<&SerializeHook<ProviderAuthenticationData>>,
    ) -> Value {
        let mut object = Map::new();
        object.insert(
            "ActionType".to_owned(),
            Value::String(self.action.to_string()),
        );
        object.insert(
            "ProviderAuthenticationData".to_owned(),
            Value::Array(
                self.provider_authentication_data
                    .iter()
                    .map(|data| data.to_json_with(provider_data_hook))
                    .collect(),
            ),
        );
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

impl PartialEq for PushAuthenticationDataRequest {
    fn eq(&self, other: &Self) -> bool {
        self.action == other.action
            && self.provider_authentication_data == other.provider_authentication_data
    }
}

impl Eq for PushAuthenticationDataRequest {}

impl Hash for PushAuthenticationDataRequest {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.hash);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::messages::AuthenticationDataRecord;
    use evroam_core::ProviderId;
    use serde_json::json;

    fn provider(text: &str) -> ProviderId {
        text.parse().unwrap()
    }

    fn sample() -> PushAuthenticationDataRequest {
        PushAuthenticationDataRequest::new(
            ActionType::FullLoad,
            vec![
                ProviderAuthenticationData::new(
                    provider("DE-GDF"),
                    vec![
                        AuthenticationDataRecord::new("AABBCCDD".parse().unwrap()),
                        AuthenticationDataRecord::new("11223344".parse().unwrap()),
                    ],
                ),
                ProviderAuthenticationData::new(provider("DE*ICE"), Vec::new()),
            ],
            Envelope::new(),
        )
    }

    #[test]
    fn round_trip() {
        let request = sample();
        let reparsed =
            PushAuthenticationDataRequest::try_parse(&request.to_json(), ParseOptions::new())
                .unwrap();
        assert_eq!(request, reparsed);
        assert_eq!(crate::hash::of(&request), crate::hash::of(&reparsed));
    }

    #[test]
    fn missing_action_type_is_rejected() {
        let document = json!({"ProviderAuthenticationData": []});
        let error =
            PushAuthenticationDataRequest::try_parse(&document, ParseOptions::new()).unwrap_err();
        assert!(error.to_string().contains("action type"));
        assert!(error.to_string().contains("ActionType"));
    }

    #[test]
    fn unknown_action_type_is_rejected() {
        let document = json!({
            "ActionType": "reload",
            "ProviderAuthenticationData": [],
        });
        let error =
            PushAuthenticationDataRequest::try_parse(&document, ParseOptions::new()).unwrap_err();
        assert!(error.to_string().contains("reload"));
    }

    #[test]
    fn missing_data_list_is_rejected() {
        let document = json!({"ActionType": "update"});
        let error =
            PushAuthenticationDataRequest::try_parse(&document, ParseOptions::new()).unwrap_err();
        assert!(error.to_string().contains("ProviderAuthenticationData"));
    }

    #[test]
    fn data_set_order_is_significant() {
        let forward = PushAuthenticationDataRequest::try_parse(
            &json!({
                "ActionType": "update",
                "ProviderAuthenticationData": [
                    {"ProviderID": "DE-GDF"},
                    {"ProviderID": "DE*ICE"},
                ],
            }),
            ParseOptions::new(),
        )
        .unwrap();
        let backward = PushAuthenticationDataRequest::try_parse(
            &json!({
                "ActionType": "update",
                "ProviderAuthenticationData": [
                    {"ProviderID": "DE*ICE"},
                    {"ProviderID": "DE-GDF"},
                ],
            }),
            ParseOptions::new(),
        )
        .unwrap();
        assert_ne!(forward, backward);
    }

    #[test]
    fn emission_order_matches_declaration_order() {
        let text = sample().to_json().to_string();
        let action_at = text.find("ActionType").unwrap();
        let data_at = text.find("ProviderAuthenticationData").unwrap();
        assert!(action_at < data_at);
    }

    #[test]
    fn nested_hook_reaches_every_data_set() {
        let json = sample().to_json_with(
            None,
            Some(&|_data, mut json: Value| {
                json["Seen"] = Value::Bool(true);
                json
            }),
        );
        let sets = json["ProviderAuthenticationData"].as_array().unwrap();
        assert!(sets.iter().all(|set| set["Seen"] == true));
    }

    #[test]
    fn equal_requests_share_a_hash() {
        let first = sample();
        let second = sample();
        assert_eq!(first, second);
        assert_eq!(crate::hash::of(&first), crate::hash::of(&second));
    }
}
