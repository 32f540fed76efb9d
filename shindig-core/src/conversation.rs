//! Multi-step dialogue flows.
//!
//! The create, edit, and invite flows each ask a fixed sequence of
//! questions. A chat has at most one flow in progress, held in the
//! `EventStore` session table, and every plain-text message the caller
//! hands in either advances the flow, repeats the same question, or
//! finishes it. Starting a new flow silently discards the old one.

use std::sync::Arc;

use chrono::NaiveDate;

use crate::error::{ShindigError, ShindigResult};
use crate::event::{ChatId, Event, EventId};
use crate::organizer::Organizer;
use crate::parse;
use crate::store::EventStore;

/// Where a chat currently is inside a flow.
///
/// Variants carry the answers collected so far, so the store needs no
/// separate draft record.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionState {
    AwaitingName,
    AwaitingDate { name: String },
    AwaitingTime { name: String, date: NaiveDate },
    AwaitingNewDate { event_id: EventId },
    AwaitingNewTime { event_id: EventId, date: NaiveDate },
    AwaitingInviteSelection,
    AwaitingInviteeNames { event_id: EventId },
}

/// The question to put to the chat next. Rendering is the transport
/// layer's business.
#[derive(Debug, Clone, PartialEq)]
pub enum Prompt {
    EventName,
    EventDate,
    EventTime,
    NewEventDate,
    NewEventTime,
    InviteSelection { event_ids: Vec<EventId> },
    InviteeNames { event_name: String, guests: Vec<String> },
}

/// Result of feeding one message into an in-progress flow.
#[derive(Debug)]
pub enum Step {
    /// Answer accepted; ask the next question.
    Next(Prompt),
    /// Answer rejected; explain and ask the same question again.
    Retry { error: ShindigError, prompt: Prompt },
    /// Flow finished.
    Done(Outcome),
    /// Flow aborted; the session is gone.
    Failed(ShindigError),
}

/// What a finished flow produced.
#[derive(Debug)]
pub enum Outcome {
    Created(Event),
    Rescheduled(Event),
    Invited { event: Event, invitees: Vec<String> },
}

/// Drives the question-and-answer flows over a store and an organizer.
pub struct Conversation {
    store: Arc<EventStore>,
    organizer: Arc<Organizer>,
}

impl Conversation {
    /// The store must be the one the organizer writes to.
    pub fn new(store: Arc<EventStore>, organizer: Arc<Organizer>) -> Self {
        Conversation { store, organizer }
    }

    // =========================================================================
    // Flow entry points
    // =========================================================================

    /// Start the create flow for `chat`.
    pub async fn begin_create(&self, chat: ChatId) -> Prompt {
        self.store.set_session(chat, SessionState::AwaitingName).await;
        Prompt::EventName
    }

    /// Start the edit flow for one of `chat`'s own events.
    pub async fn begin_edit(&self, chat: ChatId, id: &EventId) -> ShindigResult<Prompt> {
        let event = self.store.get(id).await?;
        if event.owner != chat {
            return Err(ShindigError::UnknownEvent(id.to_string()));
        }
        self.store
            .set_session(chat, SessionState::AwaitingNewDate { event_id: id.clone() })
            .await;
        Ok(Prompt::NewEventDate)
    }

    /// Start the invite flow, offering `chat`'s own events to pick from.
    pub async fn begin_invite(&self, chat: ChatId) -> ShindigResult<Prompt> {
        let events = self.store.events_for(chat).await;
        if events.is_empty() {
            return Err(ShindigError::NoEvents);
        }
        self.store
            .set_session(chat, SessionState::AwaitingInviteSelection)
            .await;
        Ok(Prompt::InviteSelection {
            event_ids: events.into_iter().map(|e| e.id).collect(),
        })
    }

    // =========================================================================
    // Advancing
    // =========================================================================

    /// Feed one plain-text message into the chat's in-progress flow.
    ///
    /// Returns `None` when no flow is in progress, so the caller can fall
    /// back to its own handling for stray text.
    pub async fn handle_text(&self, chat: ChatId, text: &str) -> Option<Step> {
        let state = self.store.session(chat).await?;
        Some(self.advance(chat, state, text).await)
    }

    /// One transition of the flow machine. On a rejected answer the stored
    /// session is left untouched, which is what repeats the question.
    async fn advance(&self, chat: ChatId, state: SessionState, text: &str) -> Step {
        match state {
            SessionState::AwaitingName => match parse::parse_event_name(text) {
                Ok(name) => {
                    self.store
                        .set_session(chat, SessionState::AwaitingDate { name })
                        .await;
                    Step::Next(Prompt::EventDate)
                }
                Err(error) => Step::Retry { error, prompt: Prompt::EventName },
            },

            SessionState::AwaitingDate { name } => match parse::parse_event_date(text) {
                Ok(date) => {
                    self.store
                        .set_session(chat, SessionState::AwaitingTime { name, date })
                        .await;
                    Step::Next(Prompt::EventTime)
                }
                Err(error) => Step::Retry { error, prompt: Prompt::EventDate },
            },

            SessionState::AwaitingTime { name, date } => match parse::parse_event_time(text) {
                Ok(time) => {
                    self.store.clear_session(chat).await;
                    match self.organizer.create_event(chat, &name, date.and_time(time)).await {
                        Ok(event) => Step::Done(Outcome::Created(event)),
                        Err(error) => Step::Failed(error),
                    }
                }
                Err(error) => Step::Retry { error, prompt: Prompt::EventTime },
            },

            SessionState::AwaitingNewDate { event_id } => match parse::parse_event_date(text) {
                Ok(date) => {
                    self.store
                        .set_session(chat, SessionState::AwaitingNewTime { event_id, date })
                        .await;
                    Step::Next(Prompt::NewEventTime)
                }
                Err(error) => Step::Retry { error, prompt: Prompt::NewEventDate },
            },

            SessionState::AwaitingNewTime { event_id, date } => {
                match parse::parse_event_time(text) {
                    Ok(time) => {
                        self.store.clear_session(chat).await;
                        match self
                            .organizer
                            .edit_event_time(chat, &event_id, date.and_time(time))
                            .await
                        {
                            Some(event) => Step::Done(Outcome::Rescheduled(event)),
                            // The event vanished mid-flow (canceled from
                            // elsewhere). Ownership was checked at entry.
                            None => Step::Failed(ShindigError::UnknownEvent(
                                event_id.to_string(),
                            )),
                        }
                    }
                    Err(error) => Step::Retry { error, prompt: Prompt::NewEventTime },
                }
            }

            SessionState::AwaitingInviteSelection => {
                let id = EventId::from(text.trim());
                match self.store.get(&id).await {
                    Ok(event) => {
                        self.store
                            .set_session(chat, SessionState::AwaitingInviteeNames {
                                event_id: id,
                            })
                            .await;
                        Step::Next(Prompt::InviteeNames {
                            event_name: event.name,
                            guests: event.guests,
                        })
                    }
                    Err(error) => {
                        // Existence check only: any known event is
                        // selectable, not just the chat's own.
                        let event_ids = self
                            .store
                            .events_for(chat)
                            .await
                            .into_iter()
                            .map(|e| e.id)
                            .collect();
                        Step::Retry {
                            error,
                            prompt: Prompt::InviteSelection { event_ids },
                        }
                    }
                }
            }

            SessionState::AwaitingInviteeNames { event_id } => {
                let invitees: Vec<String> = text
                    .split(',')
                    .map(str::trim)
                    .filter(|name| !name.is_empty())
                    .map(str::to_string)
                    .collect();

                self.store.clear_session(chat).await;
                for name in &invitees {
                    if let Err(error) = self.organizer.add_guest(&event_id, name).await {
                        return Step::Failed(error);
                    }
                }
                match self.store.get(&event_id).await {
                    Ok(event) => Step::Done(Outcome::Invited { event, invitees }),
                    Err(error) => Step::Failed(error),
                }
            }
        }
    }
}
