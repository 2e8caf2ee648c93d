//! Request/response codecs for e-mobility roaming exchanges.
//!
//! Every protocol message is an immutable value object with one shared
//! contract:
//!
//! - `try_parse` decodes a JSON document with strict, field-scoped
//!   validation and never panics for malformed input
//! - `to_json` re-encodes the message deterministically, emitting fields in
//!   declaration order and omitting optional fields at their defaults
//! - equality and hashing cover domain fields only; the [`Envelope`]
//!   (correlation id, timestamp, timeout, cancellation, custom data) is
//!   pass-through metadata for the transport layer
//!
//! Per-call [`ParseHook`]/[`SerializeHook`] closures let callers intercept
//! one decode or encode without the message storing anything.
//!
//! # Example
//!
//! ```rust
//! use evroam_protocol::{ParseOptions, PullAuthenticationDataRequest};
//! use serde_json::json;
//!
//! let document = json!({
//!     "ProviderID": "DE-GDF",
//!     "OperatorID": ["DE*ABC", "DE*XYZ"],
//! });
//!
//! let request = PullAuthenticationDataRequest::try_parse(&document, ParseOptions::new())
//!     .expect("valid document");
//! assert_eq!(request.provider_id().as_str(), "DE-GDF");
//! assert_eq!(request.operator_ids().len(), 2);
//!
//! let encoded = request.to_json();
//! assert_eq!(encoded["OperatorID"].as_array().unwrap().len(), 2);
//! ```

pub mod envelope;
mod error;
pub mod fields;
mod hash;
pub mod messages;

pub use envelope::{CancellationToken, Envelope, EnvelopePolicy, ParseOptions, SystemPolicy};
pub use error::{ParseError, ParseResult};
pub use messages::{
    Acknowledgement, AuthenticationDataRecord, InvalidStatusCode, ParseHook,
    ProviderAuthenticationData, PullAuthenticationDataRequest, PullAuthenticationDataResponse,
    PushAuthenticationDataRequest, SerializeHook, StatusCode, StatusCodeKind,
};
