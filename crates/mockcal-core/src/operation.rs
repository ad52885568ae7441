//! Names of the calendar service operations.
//!
//! Shared between the configuration (fault injection) and the service facade.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the six operations exposed by the calendar service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    SignIn,
    SignOut,
    FetchEvents,
    CreateEvent,
    UpdateEvent,
    DeleteEvent,
}

impl Operation {
    pub const ALL: [Operation; 6] = [
        Operation::SignIn,
        Operation::SignOut,
        Operation::FetchEvents,
        Operation::CreateEvent,
        Operation::UpdateEvent,
        Operation::DeleteEvent,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Operation::SignIn => "sign_in",
            Operation::SignOut => "sign_out",
            Operation::FetchEvents => "fetch_events",
            Operation::CreateEvent => "create_event",
            Operation::UpdateEvent => "update_event",
            Operation::DeleteEvent => "delete_event",
        }
    }

    /// Whether this operation touches the event store (and so requires a session).
    pub fn requires_session(self) -> bool {
        !matches!(self, Operation::SignIn)
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown operation name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown operation: {0}")]
pub struct UnknownOperation(pub String);

impl FromStr for Operation {
    type Err = UnknownOperation;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Operation::ALL
            .into_iter()
            .find(|op| op.as_str() == s.trim())
            .ok_or_else(|| UnknownOperation(s.to_string()))
    }
}
