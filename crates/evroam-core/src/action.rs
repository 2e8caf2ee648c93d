//! Action types for authentication data pushes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The given text is not a recognized action type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid action type: {0:?}")]
pub struct InvalidActionType(pub String);

/// How a pushed data set relates to the data already known to the receiver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ActionType {
    /// Replace the entire data set.
    FullLoad,
    /// Update existing records in place.
    Update,
    /// Insert new records.
    Insert,
    /// Delete the given records.
    Delete,
}

impl ActionType {
    /// Returns the fixed wire spelling of this action type.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FullLoad => "fullLoad",
            Self::Update => "update",
            Self::Insert => "insert",
            Self::Delete => "delete",
        }
    }
}

impl FromStr for ActionType {
    type Err = InvalidActionType;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        match text {
            "fullLoad" => Ok(Self::FullLoad),
            "update" => Ok(Self::Update),
            "insert" => Ok(Self::Insert),
            "delete" => Ok(Self::Delete),
            other => Err(InvalidActionType(other.to_owned())),
        }
    }
}

impl fmt::Display for ActionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
