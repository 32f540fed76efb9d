//! Error types for the shindig ecosystem.

use thiserror::Error;

/// Errors that can occur in shindig operations.
///
/// Validation variants are recoverable: the conversation layer answers them
/// by asking the same question again. Nothing here is fatal to the process.
#[derive(Error, Debug)]
pub enum ShindigError {
    #[error("Event name cannot be empty")]
    EmptyName,

    #[error("Invalid date '{0}'. Expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("Invalid time '{0}'. Expected HH:MM")]
    InvalidTime(String),

    #[error("Invalid RSVP response '{0}'. Expected yes, no, or maybe")]
    InvalidResponse(String),

    /// Unknown id and foreign owner collapse into the same error, so a
    /// lookup never reveals whether somebody else's event exists.
    #[error("Unknown event: {0}")]
    UnknownEvent(String),

    #[error("No events found for this chat")]
    NoEvents,
}

/// Result type alias for shindig operations.
pub type ShindigResult<T> = Result<T, ShindigError>;
