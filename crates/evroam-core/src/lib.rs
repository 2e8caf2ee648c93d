//! Core types: roaming identifiers, action types, tracing setup

pub mod action;
pub mod identifiers;
pub mod tracing;

pub use action::{ActionType, InvalidActionType};
pub use identifiers::{
    EventTrackingId, IdError, OperatorId, ProcessId, ProviderId, SessionId, Uid,
};
pub use tracing::{TracingConfig, TracingError, TracingOutputFormat, init_tracing};
