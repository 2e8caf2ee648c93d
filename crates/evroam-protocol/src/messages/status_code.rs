//! The status code fragment carried by response messages.

use std::fmt;
use std::str::FromStr;

use serde_json::{Map, Value};
use thiserror::Error;

use crate::error::ParseResult;
use crate::fields;
use crate::messages::{ParseHook, SerializeHook};

/// The given text is not a recognized status code.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid status code: {0:?}")]
pub struct InvalidStatusCode(pub String);

/// The enumerated wire codes a partner may answer with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusCodeKind {
    /// The request was processed successfully.
    Success,
    /// The receiving system failed internally.
    SystemError,
    /// The receiving system's database failed.
    DatabaseError,
    /// The transmitted data could not be processed.
    DataError,
    /// The sender is not authorized for this operation.
    UnauthorizedAccess,
    /// The transmitted content is invalid.
    InvalidContent,
}

impl StatusCodeKind {
    /// Returns the fixed three-digit wire code.
    pub fn as_code(&self) -> &'static str {
        match self {
            Self::Success => "000",
            Self::SystemError => "001",
            Self::DatabaseError => "002",
            Self::DataError => "009",
            Self::UnauthorizedAccess => "017",
            Self::InvalidContent => "021",
        }
    }

    /// Returns a human-readable description of the code.
    pub fn description(&self) -> &'static str {
        match self {
            Self::Success => "Success",
            Self::SystemError => "System error",
            Self::DatabaseError => "Database error",
            Self::DataError => "Data error",
            Self::UnauthorizedAccess => "Unauthorized access",
            Self::InvalidContent => "Invalid content",
        }
    }
}

impl FromStr for StatusCodeKind {
    type Err = InvalidStatusCode;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        match text {
            "000" => Ok(Self::Success),
            "001" => Ok(Self::SystemError),
            "002" => Ok(Self::DatabaseError),
            "009" => Ok(Self::DataError),
            "017" => Ok(Self::UnauthorizedAccess),
            "021" => Ok(Self::InvalidContent),
            other => Err(InvalidStatusCode(other.to_owned())),
        }
    }
}

impl fmt::Display for StatusCodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_code())
    }
}

/// A structured status answer: the code plus optional free-text detail.
///
/// Wire form:
///
/// ```json
/// { "Code": "000", "Description": "...", "AdditionalInfo": "..." }
/// ```
///
/// `Description` and `AdditionalInfo` default to empty text when absent and
/// are omitted from the encoding when empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StatusCode {
    code: StatusCodeKind,
    description: String,
    additional_info: String,
}

impl StatusCode {
    /// Creates a status code with no detail text.
    pub fn new(code: StatusCodeKind) -> Self {
        Self {
            code,
            description: String::new(),
            additional_info: String::new(),
        }
    }

    /// Builder: set the description text.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Builder: set the additional info text.
    pub fn with_additional_info(mut self, additional_info: impl Into<String>) -> Self {
        self.additional_info = additional_info.into();
        self
    }

    /// Returns the wire code.
    pub fn code(&self) -> StatusCodeKind {
        self.code
    }

    /// Returns the description text (empty when the partner sent none).
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the additional info text (empty when the partner sent none).
    pub fn additional_info(&self) -> &str {
        &self.additional_info
    }

    /// Parses a status code fragment from its JSON object.
    pub fn try_parse(document: &Value) -> ParseResult<Self> {
        Self::try_parse_with(document, None)
    }

    /// Parses a status code fragment, applying an optional post-parse hook.
    pub fn try_parse_with(document: &Value, hook: Option<&ParseHook<Self>>) -> ParseResult<Self> {
        let object = fields::object(document)?;
        let code = fields::mandatory(
            object,
            "Code",
            "status code value",
            fields::parsed::<StatusCodeKind>,
        )?;
        let description = fields::optional(
            object,
            "Description",
            "status description",
            String::new(),
            fields::string,
        )?;
        let additional_info = fields::optional(
            object,
            "AdditionalInfo",
            "additional status information",
            String::new(),
            fields::string,
        )?;

        let status = Self {
            code,
            description,
            additional_info,
        };
        Ok(match hook {
            Some(hook) => hook(document, status),
            None => status,
        })
    }

    /// Encodes the fragment as its JSON object.
    pub fn to_json(&self) -> Value {
        self.to_json_with(None)
    }

    /// Encodes the fragment, applying an optional serialize hook last.
    pub fn to_json_with(&self, hook: Option<&SerializeHook<Self>>) -> Value {
        let mut object = Map::new();
        object.insert("Code".to_owned(), Value::String(self.code.to_string()));
        if !self.description.is_empty() {
            object.insert(
                "Description".to_owned(),
                Value::String(self.description.clone()),
            );
        }
        if !self.additional_info.is_empty() {
            object.insert(
                "AdditionalInfo".to_owned(),
                Value::String(self.additional_info.clone()),
            );
        }

        let json = Value::Object(object);
        match hook {
            Some(hook) => hook(self, json),
            None => json,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ParseError;
    use serde_json::json;

    #[test]
    fn kind_round_trip() {
        for kind in [
            StatusCodeKind::Success,
            StatusCodeKind::SystemError,
            StatusCodeKind::DatabaseError,
            StatusCodeKind::DataError,
            StatusCodeKind::UnauthorizedAccess,
            StatusCodeKind::InvalidContent,
        ] {
            assert_eq!(kind.as_code().parse::<StatusCodeKind>().unwrap(), kind);
        }
    }

    #[test]
    fn unknown_code_is_rejected() {
        assert_eq!(
            "999".parse::<StatusCodeKind>(),
            Err(InvalidStatusCode("999".to_owned()))
        );
    }

    #[test]
    fn parse_full_fragment() {
        let document = json!({
            "Code": "009",
            "Description": "Data error",
            "AdditionalInfo": "record 4 malformed",
        });
        let status = StatusCode::try_parse(&document).unwrap();
        assert_eq!(status.code(), StatusCodeKind::DataError);
        assert_eq!(status.description(), "Data error");
        assert_eq!(status.additional_info(), "record 4 malformed");
    }

    #[test]
    fn detail_text_defaults_empty() {
        let status = StatusCode::try_parse(&json!({"Code": "000"})).unwrap();
        assert_eq!(status.description(), "");
        assert_eq!(status.additional_info(), "");
        assert_eq!(status, StatusCode::new(StatusCodeKind::Success));
    }

    #[test]
    fn missing_code_names_the_field() {
        let error = StatusCode::try_parse(&json!({"Description": "x"})).unwrap_err();
        assert!(error.to_string().contains("status code value"));
    }

    #[test]
    fn empty_fragment_is_rejected() {
        assert_eq!(
            StatusCode::try_parse(&json!({})),
            Err(ParseError::EmptyDocument)
        );
    }

    #[test]
    fn encoding_omits_empty_detail() {
        let json = StatusCode::new(StatusCodeKind::Success).to_json();
        assert_eq!(json, json!({"Code": "000"}));
    }

    #[test]
    fn round_trip() {
        let status = StatusCode::new(StatusCodeKind::SystemError)
            .with_description("down for maintenance")
            .with_additional_info("retry later");
        let reparsed = StatusCode::try_parse(&status.to_json()).unwrap();
        assert_eq!(status, reparsed);
    }

    #[test]
    fn hooks_apply_last() {
        let document = json!({"Code": "000"});
        let parsed = StatusCode::try_parse_with(
            &document,
            Some(&|_raw, status: StatusCode| status.with_description("added by hook")),
        )
        .unwrap();
        assert_eq!(parsed.description(), "added by hook");

        let encoded = parsed.to_json_with(Some(&|_status, mut json: Value| {
            json["Vendor"] = Value::String("custom".to_owned());
            json
        }));
        assert_eq!(encoded["Vendor"], "custom");
    }
}
