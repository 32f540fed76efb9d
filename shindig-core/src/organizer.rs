//! High-level event operations.
//!
//! The `Organizer` is the seam the transport layer talks to: every
//! operation composes the store, the reminder scheduler, and the notifier
//! so callers never have to keep the three in step themselves.

use std::sync::Arc;

use chrono::NaiveDateTime;
use log::warn;

use crate::error::ShindigResult;
use crate::event::{ChatId, Event, EventId, Rsvp};
use crate::notify::Notifier;
use crate::reminder::ReminderScheduler;
use crate::store::EventStore;

/// Acknowledgement of a recorded RSVP.
#[derive(Debug)]
pub struct RsvpReceipt {
    pub event_id: EventId,
    pub response: Rsvp,
}

/// Composes storage, reminder timers, and owner notifications.
pub struct Organizer {
    store: Arc<EventStore>,
    scheduler: Arc<ReminderScheduler>,
    notifier: Arc<dyn Notifier>,
}

impl Organizer {
    pub fn new(
        store: Arc<EventStore>,
        scheduler: Arc<ReminderScheduler>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Organizer { store, scheduler, notifier }
    }

    /// Create and store an event, then arm its reminder.
    ///
    /// Past starts are accepted; for them the reminder is simply skipped.
    pub async fn create_event(
        &self,
        owner: ChatId,
        name: &str,
        start: NaiveDateTime,
    ) -> ShindigResult<Event> {
        let event = self.store.create(owner, name, start).await?;
        self.scheduler.schedule(&event).await;
        Ok(event)
    }

    /// The chat's own events, in creation order.
    pub async fn events_for(&self, chat: ChatId) -> Vec<Event> {
        self.store.events_for(chat).await
    }

    pub async fn get_event(&self, id: &EventId) -> ShindigResult<Event> {
        self.store.get(id).await
    }

    /// Cancel an event and its pending reminder.
    ///
    /// False for an unknown id or a foreign owner. On success the reminder
    /// is gone before this returns; it cannot fire afterwards.
    pub async fn cancel_event(&self, chat: ChatId, id: &EventId) -> bool {
        if !self.store.cancel(chat, id).await {
            return false;
        }
        self.scheduler.cancel(id).await;
        true
    }

    /// Move an event's start and rearm its reminder against the new
    /// instant. `None` for an unknown id or a foreign owner.
    pub async fn edit_event_time(
        &self,
        chat: ChatId,
        id: &EventId,
        new_start: NaiveDateTime,
    ) -> Option<Event> {
        let event = self.store.edit_start(chat, id, new_start).await?;
        self.scheduler.schedule(&event).await;
        Some(event)
    }

    pub async fn add_guest(&self, id: &EventId, name: &str) -> ShindigResult<()> {
        self.store.add_guest(id, name).await
    }

    /// Record a response and tell the event owner about it.
    ///
    /// The owner notification is best-effort: a delivery failure is logged
    /// and the recorded RSVP stands.
    pub async fn record_rsvp(
        &self,
        id: &EventId,
        responder: ChatId,
        display_name: &str,
        response: Rsvp,
    ) -> ShindigResult<RsvpReceipt> {
        let event = self
            .store
            .record_rsvp(id, responder, display_name, response)
            .await?;

        let text = format!(
            "📬 {} responded '{}' to your event \"{}\".",
            display_name, response, event.name
        );
        if let Err(e) = self.notifier.deliver(event.owner, &text).await {
            warn!("Owner notification for event {id} failed: {e}");
        }

        Ok(RsvpReceipt { event_id: event.id, response })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ShindigError;
    use async_trait::async_trait;
    use chrono::{Duration, Local};
    use tokio::sync::Mutex;

    #[derive(Default)]
    struct Recorder {
        deliveries: Mutex<Vec<(ChatId, String)>>,
    }

    #[async_trait]
    impl Notifier for Recorder {
        async fn deliver(
            &self,
            chat: ChatId,
            text: &str,
        ) -> Result<(), crate::notify::DeliveryError> {
            self.deliveries.lock().await.push((chat, text.to_string()));
            Ok(())
        }
    }

    fn fixture() -> (Arc<ReminderScheduler>, Organizer, Arc<Recorder>) {
        let recorder = Arc::new(Recorder::default());
        let notifier: Arc<dyn Notifier> = recorder.clone();
        let scheduler = Arc::new(ReminderScheduler::new(Arc::clone(&notifier)));
        let organizer = Organizer::new(
            Arc::new(EventStore::new()),
            Arc::clone(&scheduler),
            notifier,
        );
        (scheduler, organizer, recorder)
    }

    fn starting_in(minutes: i64) -> NaiveDateTime {
        Local::now().naive_local() + Duration::minutes(minutes)
    }

    // --- create ---

    #[tokio::test]
    async fn create_stores_the_event_and_arms_its_reminder() {
        let (scheduler, organizer, _) = fixture();
        let event = organizer
            .create_event(ChatId(1), "Launch", starting_in(180))
            .await
            .unwrap();

        assert_eq!(organizer.get_event(&event.id).await.unwrap().name, "Launch");
        assert!(scheduler.pending(&event.id).await);
    }

    #[tokio::test]
    async fn create_with_a_near_start_skips_the_reminder() {
        let (scheduler, organizer, _) = fixture();
        let event = organizer
            .create_event(ChatId(1), "Soon", starting_in(15))
            .await
            .unwrap();

        assert!(!scheduler.pending(&event.id).await);
        assert!(organizer.get_event(&event.id).await.is_ok());
    }

    // --- cancel ---

    #[tokio::test]
    async fn cancel_is_owner_only_and_disarms_the_reminder() {
        let (scheduler, organizer, _) = fixture();
        let owner = ChatId(1);
        let event = organizer
            .create_event(owner, "Picnic", starting_in(180))
            .await
            .unwrap();

        assert!(!organizer.cancel_event(ChatId(2), &event.id).await);
        assert!(scheduler.pending(&event.id).await);

        assert!(organizer.cancel_event(owner, &event.id).await);
        assert!(!scheduler.pending(&event.id).await);
        assert!(organizer.get_event(&event.id).await.is_err());
    }

    // --- edit ---

    #[tokio::test]
    async fn edit_moves_the_start_for_the_owner_only() {
        let (_, organizer, _) = fixture();
        let owner = ChatId(1);
        let event = organizer
            .create_event(owner, "Standup", starting_in(180))
            .await
            .unwrap();

        let moved = starting_in(600);
        assert!(organizer
            .edit_event_time(ChatId(2), &event.id, moved)
            .await
            .is_none());

        let updated = organizer
            .edit_event_time(owner, &event.id, moved)
            .await
            .unwrap();
        assert_eq!(updated.start, moved);
    }

    // --- rsvp ---

    #[tokio::test]
    async fn rsvp_notifies_the_owner() {
        let (_, organizer, recorder) = fixture();
        let owner = ChatId(1);
        let event = organizer
            .create_event(owner, "Launch", starting_in(15))
            .await
            .unwrap();

        let receipt = organizer
            .record_rsvp(&event.id, ChatId(5), "Alice", Rsvp::Maybe)
            .await
            .unwrap();
        assert_eq!(receipt.event_id, event.id);
        assert_eq!(receipt.response, Rsvp::Maybe);

        let deliveries = recorder.deliveries.lock().await;
        assert_eq!(deliveries.len(), 1);
        assert_eq!(deliveries[0].0, owner);
        assert_eq!(
            deliveries[0].1,
            "📬 Alice responded 'maybe' to your event \"Launch\"."
        );
    }

    #[tokio::test]
    async fn rsvp_for_an_unknown_event_is_an_error() {
        let (_, organizer, recorder) = fixture();
        let result = organizer
            .record_rsvp(&EventId::from("missing"), ChatId(5), "Alice", Rsvp::Yes)
            .await;
        assert!(matches!(result, Err(ShindigError::UnknownEvent(_))));
        assert!(recorder.deliveries.lock().await.is_empty());
    }
}
