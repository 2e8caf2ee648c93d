//! Message codecs for the roaming protocol.
//!
//! Each message type is an immutable value object with the same contract:
//! `try_parse` decodes a JSON document with strict field validation,
//! `to_json` re-encodes it deterministically, and equality/hashing cover
//! the domain fields only (never the envelope). Field declaration order in
//! each codec defines both parse order and emission order.

mod acknowledgement;
mod authentication_data;
mod pull_authentication_data;
mod push_authentication_data;
mod status_code;

use serde_json::Value;

use crate::error::ParseResult;

pub use acknowledgement::Acknowledgement;
pub use authentication_data::{AuthenticationDataRecord, ProviderAuthenticationData};
pub use pull_authentication_data::{PullAuthenticationDataRequest, PullAuthenticationDataResponse};
pub use push_authentication_data::PushAuthenticationDataRequest;
pub use status_code::{InvalidStatusCode, StatusCode, StatusCodeKind};

/// A caller-supplied post-parse transform.
///
/// Receives the raw document and the freshly built message; its return
/// value is the final parse result. Held only for the duration of one
/// parse call, never stored on the message.
pub type ParseHook<T> = dyn Fn(&Value, T) -> T;

/// A caller-supplied pre-return serialize transform.
///
/// Receives the message and the freshly built document; its return value
/// is the final encoding. Held only for the duration of one serialize call.
pub type SerializeHook<T> = dyn Fn(&T, Value) -> Value;

/// Logs a parse failure at debug level and passes the result through.
pub(crate) fn log_parse_failure<T>(
    message_type: &'static str,
    result: ParseResult<T>,
) -> ParseResult<T> {
    if let Err(error) = &result {
        tracing::debug!(message_type, %error, "failed to parse message");
    }
    result
}
