//! In-memory event and session storage.

use std::collections::HashMap;

use chrono::NaiveDateTime;
use tokio::sync::RwLock;

use crate::conversation::SessionState;
use crate::error::{ShindigError, ShindigResult};
use crate::event::{ChatId, Event, EventId, Rsvp};
use crate::parse;

/// Owns all event records and in-progress conversation sessions.
///
/// State is process-lifetime only; durability is out of scope. All
/// mutations go through the writer lock, so writes to any one event are
/// mutually exclusive, while listings and lookups share the reader lock.
pub struct EventStore {
    inner: RwLock<StoreInner>,
}

#[derive(Default)]
struct StoreInner {
    /// Kept in insertion order so listings come back in creation order.
    events: Vec<Event>,
    sessions: HashMap<ChatId, SessionState>,
}

impl StoreInner {
    fn find_mut(&mut self, id: &EventId) -> ShindigResult<&mut Event> {
        self.events
            .iter_mut()
            .find(|e| &e.id == id)
            .ok_or_else(|| ShindigError::UnknownEvent(id.to_string()))
    }
}

impl EventStore {
    pub fn new() -> Self {
        EventStore {
            inner: RwLock::new(StoreInner::default()),
        }
    }

    // =========================================================================
    // Event operations
    // =========================================================================

    /// Validate and store a new event, returning the stored record.
    ///
    /// The start instant is already a real calendar instant by construction;
    /// only the name needs checking here. No side effects beyond storage:
    /// reminder arming is composed one level up.
    pub async fn create(
        &self,
        owner: ChatId,
        name: &str,
        start: NaiveDateTime,
    ) -> ShindigResult<Event> {
        let name = parse::parse_event_name(name)?;
        let event = Event::new(owner, name, start);

        let mut inner = self.inner.write().await;
        inner.events.push(event.clone());
        Ok(event)
    }

    /// All events owned by `chat`, in creation order. Empty if none.
    pub async fn events_for(&self, chat: ChatId) -> Vec<Event> {
        let inner = self.inner.read().await;
        inner
            .events
            .iter()
            .filter(|e| e.owner == chat)
            .cloned()
            .collect()
    }

    /// Look up a single event by id.
    pub async fn get(&self, id: &EventId) -> ShindigResult<Event> {
        let inner = self.inner.read().await;
        inner
            .events
            .iter()
            .find(|e| &e.id == id)
            .cloned()
            .ok_or_else(|| ShindigError::UnknownEvent(id.to_string()))
    }

    /// Remove an event iff `chat` owns it.
    ///
    /// Returns false for both an unknown id and a foreign owner, with no
    /// way to tell the two apart.
    pub async fn cancel(&self, chat: ChatId, id: &EventId) -> bool {
        let mut inner = self.inner.write().await;
        let before = inner.events.len();
        inner.events.retain(|e| !(&e.id == id && e.owner == chat));
        inner.events.len() < before
    }

    /// Move an event's start instant iff `chat` owns it. Returns the
    /// updated record so the caller can rearm the reminder.
    pub async fn edit_start(
        &self,
        chat: ChatId,
        id: &EventId,
        new_start: NaiveDateTime,
    ) -> Option<Event> {
        let mut inner = self.inner.write().await;
        let event = inner
            .events
            .iter_mut()
            .find(|e| &e.id == id && e.owner == chat)?;
        event.start = new_start;
        Some(event.clone())
    }

    /// Append `name` to the guest list. No dedup and no ownership check;
    /// anyone who knows the id can add guests.
    pub async fn add_guest(&self, id: &EventId, name: &str) -> ShindigResult<()> {
        let mut inner = self.inner.write().await;
        let event = inner.find_mut(id)?;
        event.guests.push(name.to_string());
        Ok(())
    }

    /// The invitee names for an event, in invitation order.
    pub async fn guests(&self, id: &EventId) -> ShindigResult<Vec<String>> {
        Ok(self.get(id).await?.guests)
    }

    /// Record a response, overwriting any earlier one from the same
    /// responder. A yes also appends the display name to the standing
    /// yes list.
    pub async fn record_rsvp(
        &self,
        id: &EventId,
        responder: ChatId,
        display_name: &str,
        rsvp: Rsvp,
    ) -> ShindigResult<Event> {
        let mut inner = self.inner.write().await;
        let event = inner.find_mut(id)?;
        event.rsvps.insert(responder, rsvp);
        if rsvp == Rsvp::Yes {
            event.yes_respondents.push(display_name.to_string());
        }
        Ok(event.clone())
    }

    /// Display names of everyone who has answered yes, in answer order.
    pub async fn yes_respondents(&self, id: &EventId) -> ShindigResult<Vec<String>> {
        Ok(self.get(id).await?.yes_respondents)
    }

    // =========================================================================
    // Conversation sessions
    // =========================================================================

    /// The chat's in-progress flow state, if any.
    pub async fn session(&self, chat: ChatId) -> Option<SessionState> {
        let inner = self.inner.read().await;
        inner.sessions.get(&chat).cloned()
    }

    /// Enter `state` for the chat, silently replacing any in-progress flow.
    pub async fn set_session(&self, chat: ChatId, state: SessionState) {
        let mut inner = self.inner.write().await;
        inner.sessions.insert(chat, state);
    }

    /// Drop the chat's flow state, if any.
    pub async fn clear_session(&self, chat: ChatId) {
        let mut inner = self.inner.write().await;
        inner.sessions.remove(&chat);
    }
}

impl Default for EventStore {
    fn default() -> Self {
        Self::new()
    }
}
