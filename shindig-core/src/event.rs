//! Core event types.
//!
//! An `Event` is owned by the chat identity that created it and lives in
//! memory for the lifetime of the process. Guest lists and RSVP records
//! hang off the event record itself.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ShindigError;

/// Identity of a chat participant. Opaque and comparable; assigned by the
/// chat transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChatId(pub i64);

impl fmt::Display for ChatId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique token identifying an event. Generated once at creation and
/// immutable afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EventId(String);

impl EventId {
    /// Generate a fresh random id (128-bit, collisions negligible).
    pub fn generate() -> Self {
        EventId(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for EventId {
    fn from(s: &str) -> Self {
        EventId(s.to_string())
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An attendance response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Rsvp {
    Yes,
    No,
    Maybe,
}

impl Rsvp {
    pub fn as_str(&self) -> &'static str {
        match self {
            Rsvp::Yes => "yes",
            Rsvp::No => "no",
            Rsvp::Maybe => "maybe",
        }
    }
}

impl FromStr for Rsvp {
    type Err = ShindigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "yes" => Ok(Rsvp::Yes),
            "no" => Ok(Rsvp::No),
            "maybe" => Ok(Rsvp::Maybe),
            _ => Err(ShindigError::InvalidResponse(s.to_string())),
        }
    }
}

impl fmt::Display for Rsvp {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A scheduled event with an owner, name, and start instant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    pub id: EventId,
    /// The chat that created the event; sole authority to cancel or edit it.
    pub owner: ChatId,
    pub name: String,
    /// Start instant in the chat's own time. A single implicit zone; zone
    /// handling is out of scope.
    pub start: NaiveDateTime,
    /// Invitee names in insertion order. Duplicates allowed.
    pub guests: Vec<String>,
    /// One entry per responder; a later response overwrites the earlier one.
    pub rsvps: HashMap<ChatId, Rsvp>,
    /// Display names of everyone who answered yes, in answer order.
    /// Append-only: a repeated yes appends again.
    pub yes_respondents: Vec<String>,
}

impl Event {
    pub fn new(owner: ChatId, name: String, start: NaiveDateTime) -> Self {
        Event {
            id: EventId::generate(),
            owner,
            name,
            start,
            guests: Vec::new(),
            rsvps: HashMap::new(),
            yes_respondents: Vec::new(),
        }
    }
}
