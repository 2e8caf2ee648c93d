//! The acknowledgement every push-style request is answered with.

use std::hash::{Hash, Hasher};

use serde_json::{Map, Value};

use evroam_core::SessionId;

use crate::envelope::{Envelope, ParseOptions};
use crate::error::ParseResult;
use crate::messages::{ParseHook, SerializeHook, StatusCode, log_parse_failure};
use crate::{fields, hash};

/// Response: did the partner accept the request, and why not.
///
/// Wire form:
///
/// ```json
/// {
///   "Result": true,
///   "StatusCode": { "Code": "000" },
///   "SessionID": "abc-123"
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Acknowledgement {
    result: bool,
    status_code: StatusCode,
    session_id: Option<SessionId>,
    envelope: Envelope,
    hash: u64,
}

impl Acknowledgement {
    /// Creates an acknowledgement from pre-validated parts.
    pub fn new(
        result: bool,
        status_code: StatusCode,
        session_id: Option<SessionId>,
        envelope: Envelope,
    ) -> Self {
        let hash = hash::combine(
            hash::combine(hash::of(&result), hash::of(&status_code)),
            hash::of(&session_id),
        );
        Self {
            result,
            status_code,
            session_id,
            envelope,
            hash,
        }
    }

    /// Returns true if the partner accepted the request.
    pub fn result(&self) -> bool {
        self.result
    }

    /// Returns the structured status answer.
    pub fn status_code(&self) -> &StatusCode {
        &self.status_code
    }

    /// Returns the charging session the acknowledgement refers to, if any.
    pub fn session_id(&self) -> Option<&SessionId> {
        self.session_id.as_ref()
    }

    /// Returns the response envelope.
    pub fn envelope(&self) -> &Envelope {
        &self.envelope
    }

    /// Parses an acknowledgement from its JSON document.
    pub fn try_parse(document: &Value, options: ParseOptions<'_>) -> ParseResult<Self> {
        Self::try_parse_with(document, options, None)
    }

    /// Parses an acknowledgement, applying an optional post-parse hook.
    pub fn try_parse_with(
        document: &Value,
        options: ParseOptions<'_>,
        hook: Option<&ParseHook<Self>>,
    ) -> ParseResult<Self> {
        log_parse_failure(
            "Acknowledgement",
            Self::parse_fields(document, options, hook),
        )
    }

    fn parse_fields(
        document: &Value,
        options: ParseOptions<'_>,
        hook: Option<&ParseHook<Self>>,
    ) -> ParseResult<Self> {
        let object = fields::object(document)?;
        let result = fields::mandatory(object, "Result", "result flag", fields::boolean)?;
        let status_code =
            fields::mandatory_object(object, "StatusCode", "status code", StatusCode::try_parse)?;
        let session_id = fields::optional(
            object,
            "SessionID",
            "session identification",
            None,
            |raw| fields::parsed::<SessionId>(raw).map(Some),
        )?;
        let custom_data = object.get("CustomData").cloned();

        let acknowledgement = Self::new(
            result,
            status_code,
            session_id,
            options.into_envelope(custom_data),
        );
        Ok(match hook {
            Some(hook) => hook(document, acknowledgement),
            None => acknowledgement,
        })
    }

    /// Parses an acknowledgement, treating malformed input as fatal.
    ///
    /// # Panics
    ///
    /// Panics with the descriptive parse error when the document is
    /// invalid. Use [`Self::try_parse`] at call sites with a recovery path.
    pub fn parse(document: &Value, options: ParseOptions<'_>) -> Self {
        match Self::try_parse(document, options) {
            Ok(acknowledgement) => acknowledgement,
            Err(error) => panic!("{error}"),
        }
    }

    /// Encodes the acknowledgement as its JSON document.
    pub fn to_json(&self) -> Value {
        self.to_json_with(None, None)
    }

    /// Encodes the acknowledgement, applying the optional serialize hooks:
    /// one for the acknowledgement itself (applied last) and one for the
    /// nested status code.
    pub fn to_json_with(
        &self,
        hook: Option<&SerializeHook<Self>>,
        status_code_hook: Option<&SerializeHook<StatusCode>>,
    ) -> Value {
        let mut object = Map::new();
        object.insert("Result".to_owned(), Value::Bool(self.result));
        object.insert(
            "StatusCode".to_owned(),
            self.status_code.to_json_with(status_code_hook),
        );
        if let Some(session_id) = &self.session_id {
            object.insert(
                "SessionID".to_owned(),
                Value::String(session_id.to_string()),
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

impl PartialEq for Acknowledgement {
    fn eq(&self, other: &Self) -> bool {
        self.result == other.result
            && self.status_code == other.status_code
            && self.session_id == other.session_id
    }
}

impl Eq for Acknowledgement {}

impl Hash for Acknowledgement {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.hash);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ParseError;
    use crate::messages::StatusCodeKind;
    use serde_json::json;

    fn sample() -> Acknowledgement {
        Acknowledgement::new(
            true,
            StatusCode::new(StatusCodeKind::Success).with_description("ok"),
            Some(SessionId::new("sess-42")),
            Envelope::new(),
        )
    }

    #[test]
    fn round_trip() {
        let acknowledgement = sample();
        let reparsed =
            Acknowledgement::try_parse(&acknowledgement.to_json(), ParseOptions::new()).unwrap();
        assert_eq!(acknowledgement, reparsed);
        assert_eq!(
            crate::hash::of(&acknowledgement),
            crate::hash::of(&reparsed)
        );
    }

    #[test]
    fn missing_result_is_rejected() {
        let error = Acknowledgement::try_parse(
            &json!({"StatusCode": {"Code": "000"}}),
            ParseOptions::new(),
        )
        .unwrap_err();
        assert!(error.to_string().contains("result flag"));
    }

    #[test]
    fn missing_status_code_is_rejected() {
        let error = Acknowledgement::try_parse(&json!({"Result": true}), ParseOptions::new())
            .unwrap_err();
        assert!(error.to_string().contains("StatusCode"));
    }

    #[test]
    fn nested_status_failure_is_annotated() {
        let error = Acknowledgement::try_parse(
            &json!({"Result": true, "StatusCode": {"Description": "no code"}}),
            ParseOptions::new(),
        )
        .unwrap_err();
        match error {
            ParseError::Nested { field, source } => {
                assert_eq!(field, "StatusCode");
                assert!(source.to_string().contains("status code value"));
            }
            other => panic!("expected a nested error, got {other:?}"),
        }
    }

    #[test]
    fn session_id_is_optional() {
        let acknowledgement = Acknowledgement::try_parse(
            &json!({"Result": false, "StatusCode": {"Code": "017"}}),
            ParseOptions::new(),
        )
        .unwrap();
        assert!(acknowledgement.session_id().is_none());
        assert!(!acknowledgement.result());
        assert_eq!(
            acknowledgement.status_code().code(),
            StatusCodeKind::UnauthorizedAccess
        );
    }

    #[test]
    fn absent_session_id_is_omitted_from_encoding() {
        let acknowledgement = Acknowledgement::new(
            true,
            StatusCode::new(StatusCodeKind::Success),
            None,
            Envelope::new(),
        );
        let json = acknowledgement.to_json();
        assert!(json.get("SessionID").is_none());
    }

    #[test]
    fn custom_data_round_trips_untouched() {
        let document = json!({
            "Result": true,
            "StatusCode": {"Code": "000"},
            "CustomData": {"foo": "bar"},
        });
        let acknowledgement =
            Acknowledgement::try_parse(&document, ParseOptions::new()).unwrap();
        assert_eq!(acknowledgement.to_json()["CustomData"], json!({"foo": "bar"}));
    }

    #[test]
    fn status_code_hook_applies_to_nested_object() {
        let json = sample().to_json_with(
            None,
            Some(&|status: &StatusCode, mut json: Value| {
                json["Echo"] = Value::String(status.code().to_string());
                json
            }),
        );
        assert_eq!(json["StatusCode"]["Echo"], "000");
    }

    #[test]
    fn hash_is_consistent_with_equality() {
        let first = sample();
        let second = sample();
        assert_eq!(first, second);
        assert_eq!(crate::hash::of(&first), crate::hash::of(&second));

        let different = Acknowledgement::new(
            false,
            StatusCode::new(StatusCodeKind::Success).with_description("ok"),
            Some(SessionId::new("sess-42")),
            Envelope::new(),
        );
        assert_ne!(first, different);
    }
}
