//! Calendar-specific error types.

use mockcal_core::{AppError, Operation};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CalendarError {
    #[error("Not signed in")]
    NotSignedIn,

    #[error("Already signed in")]
    AlreadySignedIn,

    #[error("Event not found: {0}")]
    NotFound(String),

    #[error("Operation {operation} failed: {reason}")]
    OperationFailure {
        operation: Operation,
        reason: String,
    },

    #[error("Invalid event data: {0}")]
    InvalidEventData(String),
}

impl CalendarError {
    /// User-friendly error message for notifications.
    pub fn user_message(&self) -> String {
        match self {
            Self::NotSignedIn => "Please sign in to your calendar account".to_string(),
            Self::AlreadySignedIn => "You are already signed in".to_string(),
            Self::NotFound(_) => "Event not found".to_string(),
            Self::OperationFailure { operation, .. } => failure_text(*operation).to_string(),
            Self::InvalidEventData(msg) => format!("Invalid event: {}", msg),
        }
    }
}

fn failure_text(operation: Operation) -> &'static str {
    match operation {
        Operation::SignIn => "Failed to sign in",
        Operation::SignOut => "Failed to sign out",
        Operation::FetchEvents => "Failed to fetch events",
        Operation::CreateEvent => "Failed to create event",
        Operation::UpdateEvent => "Failed to update event",
        Operation::DeleteEvent => "Failed to delete event",
    }
}

impl From<CalendarError> for AppError {
    fn from(err: CalendarError) -> Self {
        AppError::Service(err.to_string())
    }
}
