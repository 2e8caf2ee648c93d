//! The message envelope: cross-cutting request metadata.
//!
//! Every message carries an [`Envelope`] next to its domain fields: a
//! correlation process id, an issue timestamp, an event tracking id, a
//! request timeout, a cancellation signal and an opaque custom-data payload.
//! The envelope is pass-through metadata for the transport layer; it takes
//! no part in message equality or hashing, and the codec never inspects the
//! custom data or polls the cancellation signal.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use chrono::{DateTime, Duration, Utc};
use serde_json::Value;

use evroam_core::{EventTrackingId, ProcessId};

/// An opaque cancellation signal threaded through the envelope for the
/// benefit of an external transport layer.
///
/// Clones share the same underlying flag. The codec itself never blocks,
/// polls, or checks the signal.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    flag: Arc<AtomicBool>,
}

impl CancellationToken {
    /// Creates a fresh, un-cancelled token.
    pub fn new() -> Self {
        Self::default()
    }

    /// Signals cancellation to every clone of this token.
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    /// Returns true if the token has been cancelled.
    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }
}

/// Pluggable defaults for envelope fields left unset by the caller.
pub trait EnvelopePolicy {
    /// The timestamp to stamp on a message whose caller supplied none.
    fn timestamp(&self) -> DateTime<Utc>;

    /// The process id to assign to a message whose caller supplied none.
    fn process_id(&self) -> ProcessId;
}

/// The default policy: wall-clock time and random process ids.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemPolicy;

impl EnvelopePolicy for SystemPolicy {
    fn timestamp(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn process_id(&self) -> ProcessId {
        ProcessId::random()
    }
}

/// Cross-cutting request metadata attached to every message.
#[derive(Debug, Clone, Default)]
pub struct Envelope {
    /// Correlation id for one request/response exchange.
    pub process_id: Option<ProcessId>,
    /// When the message was issued.
    pub timestamp: Option<DateTime<Utc>>,
    /// Tracking id threaded through a whole roaming workflow.
    pub event_tracking_id: Option<EventTrackingId>,
    /// How long the transport should wait for a response.
    pub request_timeout: Option<Duration>,
    /// Cancellation signal for the transport layer.
    pub cancellation: CancellationToken,
    /// Opaque caller-defined payload, carried through unchanged.
    pub custom_data: Option<Value>,
}

impl Envelope {
    /// Creates an empty envelope with no metadata set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: set the process id.
    pub fn with_process_id(mut self, process_id: ProcessId) -> Self {
        self.process_id = Some(process_id);
        self
    }

    /// Builder: set the issue timestamp.
    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    /// Builder: set the event tracking id.
    pub fn with_event_tracking_id(mut self, id: EventTrackingId) -> Self {
        self.event_tracking_id = Some(id);
        self
    }

    /// Builder: set the request timeout.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    /// Builder: set the custom data payload.
    pub fn with_custom_data(mut self, custom_data: Value) -> Self {
        self.custom_data = Some(custom_data);
        self
    }
}

/// Caller-supplied envelope overrides handed to every `try_parse`.
///
/// Unset timestamp and process id are resolved through the configured
/// [`EnvelopePolicy`] ([`SystemPolicy`] unless overridden), so a parsed
/// message always leaves with both populated.
#[derive(Default)]
pub struct ParseOptions<'a> {
    process_id: Option<ProcessId>,
    timestamp: Option<DateTime<Utc>>,
    event_tracking_id: Option<EventTrackingId>,
    request_timeout: Option<Duration>,
    cancellation: CancellationToken,
    policy: Option<&'a dyn EnvelopePolicy>,
}

impl<'a> ParseOptions<'a> {
    /// Creates options with no overrides; defaults come from [`SystemPolicy`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: correlate the parsed message with an existing process id.
    pub fn with_process_id(mut self, process_id: ProcessId) -> Self {
        self.process_id = Some(process_id);
        self
    }

    /// Builder: stamp the parsed message with a fixed timestamp.
    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    /// Builder: set the event tracking id.
    pub fn with_event_tracking_id(mut self, id: EventTrackingId) -> Self {
        self.event_tracking_id = Some(id);
        self
    }

    /// Builder: set the request timeout.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    /// Builder: thread a cancellation signal through the envelope.
    pub fn with_cancellation(mut self, cancellation: CancellationToken) -> Self {
        self.cancellation = cancellation;
        self
    }

    /// Builder: resolve unset defaults through a custom policy.
    pub fn with_policy(mut self, policy: &'a dyn EnvelopePolicy) -> Self {
        self.policy = Some(policy);
        self
    }

    /// Resolves the options into a complete envelope, filling unset
    /// timestamp and process id through the policy and attaching the
    /// document's custom data unchanged.
    pub fn into_envelope(self, custom_data: Option<Value>) -> Envelope {
        let policy: &dyn EnvelopePolicy = self.policy.unwrap_or(&SystemPolicy);
        Envelope {
            process_id: Some(self.process_id.unwrap_or_else(|| policy.process_id())),
            timestamp: Some(self.timestamp.unwrap_or_else(|| policy.timestamp())),
            event_tracking_id: self.event_tracking_id,
            request_timeout: self.request_timeout,
            cancellation: self.cancellation,
            custom_data,
        }
    }
}
