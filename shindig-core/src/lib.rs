//! Core engine for the shindig event organizer.
//!
//! This crate holds everything transport-independent:
//! - `EventStore` for event records and conversation sessions
//! - `ReminderScheduler` for the one-shot pre-event reminders
//! - `Conversation` for the multi-step create, edit, and invite flows
//! - `Notifier`, the outbound delivery boundary a transport implements

pub mod conversation;
pub mod error;
pub mod event;
pub mod link;
pub mod notify;
pub mod organizer;
pub mod parse;
pub mod reminder;
pub mod store;

// Re-export the main types at crate root for convenience
pub use conversation::{Conversation, Outcome, Prompt, SessionState, Step};
pub use error::{ShindigError, ShindigResult};
pub use event::{ChatId, Event, EventId, Rsvp};
pub use link::event_link;
pub use notify::{DeliveryError, Notifier};
pub use organizer::{Organizer, RsvpReceipt};
pub use reminder::ReminderScheduler;
pub use store::EventStore;
