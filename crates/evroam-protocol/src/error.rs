//! Parse error types.

use thiserror::Error;

/// Result type for message parsing.
pub type ParseResult<T> = Result<T, ParseError>;

/// Errors that can occur while parsing a wire document.
///
/// `try_parse` never panics for anticipated malformed input; every failure
/// surfaces through one of these variants.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The document is absent, null, or has no fields at all.
    #[error("the given JSON object must not be null or empty")]
    EmptyDocument,

    /// A named field is missing or failed its typed sub-parser.
    #[error("the given {what} ({field}) is missing or invalid: {reason}")]
    Field {
        /// The wire-level field name (e.g. `ProviderID`).
        field: &'static str,
        /// A human-readable description of the field (e.g. "provider
        /// identification").
        what: &'static str,
        /// Why the sub-parser rejected the raw value.
        reason: String,
    },

    /// A composite field's inner parse failed.
    #[error("invalid {field}: {source}")]
    Nested {
        /// The outer wire-level field name.
        field: &'static str,
        /// The inner failure.
        #[source]
        source: Box<ParseError>,
    },

    /// An unanticipated fault, converted at the outermost parse boundary so
    /// callers always receive a result.
    #[error("unexpected parse failure: {0}")]
    Unexpected(String),
}

impl ParseError {
    /// Creates a field validation error.
    pub fn field(field: &'static str, what: &'static str, reason: impl Into<String>) -> Self {
        Self::Field {
            field,
            what,
            reason: reason.into(),
        }
    }

    /// Wraps an inner parse failure with the outer field name.
    pub fn nested(field: &'static str, source: ParseError) -> Self {
        Self::Nested {
            field,
            source: Box::new(source),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_error_names_field_and_description() {
        let error = ParseError::field("ProviderID", "provider identification", "field is missing");
        let text = error.to_string();
        assert!(text.contains("ProviderID"));
        assert!(text.contains("provider identification"));
        assert!(text.contains("missing"));
    }

    #[test]
    fn empty_document_has_fixed_text() {
        assert_eq!(
            ParseError::EmptyDocument.to_string(),
            "the given JSON object must not be null or empty"
        );
    }

    #[test]
    fn nested_error_carries_inner_failure() {
        let inner = ParseError::field("Code", "status code value", "field is missing");
        let outer = ParseError::nested("StatusCode", inner.clone());
        assert!(outer.to_string().contains("StatusCode"));
        assert_eq!(
            outer,
            ParseError::Nested {
                field: "StatusCode",
                source: Box::new(inner),
            }
        );
    }
}
