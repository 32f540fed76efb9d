//! End-to-end lifecycle tests for the shindig core.
//!
//! Everything runs against the real store, scheduler, and conversation
//! wiring with a recording notifier at the boundary. Timing tests pause
//! tokio's clock and step it past the reminder fire instants.

use std::sync::Arc;
use std::time::Duration as StdDuration;

use async_trait::async_trait;
use chrono::{Local, NaiveDateTime};
use shindig_core::{
    ChatId, Conversation, DeliveryError, EventStore, Notifier, Organizer, Outcome, Prompt,
    ReminderScheduler, Rsvp, Step,
};
use tokio::sync::Mutex;

#[derive(Default)]
struct Recorder {
    deliveries: Mutex<Vec<(ChatId, String)>>,
}

impl Recorder {
    async fn count(&self) -> usize {
        self.deliveries.lock().await.len()
    }

    async fn texts_for(&self, chat: ChatId) -> Vec<String> {
        self.deliveries
            .lock()
            .await
            .iter()
            .filter(|(c, _)| *c == chat)
            .map(|(_, text)| text.clone())
            .collect()
    }
}

#[async_trait]
impl Notifier for Recorder {
    async fn deliver(&self, chat: ChatId, text: &str) -> Result<(), DeliveryError> {
        self.deliveries.lock().await.push((chat, text.to_string()));
        Ok(())
    }
}

struct Harness {
    store: Arc<EventStore>,
    scheduler: Arc<ReminderScheduler>,
    organizer: Arc<Organizer>,
    conversation: Conversation,
    recorder: Arc<Recorder>,
}

fn harness() -> Harness {
    let store = Arc::new(EventStore::new());
    let recorder = Arc::new(Recorder::default());
    let notifier: Arc<dyn Notifier> = recorder.clone();
    let scheduler = Arc::new(ReminderScheduler::new(Arc::clone(&notifier)));
    let organizer = Arc::new(Organizer::new(
        Arc::clone(&store),
        Arc::clone(&scheduler),
        notifier,
    ));
    let conversation = Conversation::new(Arc::clone(&store), Arc::clone(&organizer));
    Harness { store, scheduler, organizer, conversation, recorder }
}

fn in_hours(hours: i64) -> NaiveDateTime {
    Local::now().naive_local() + chrono::Duration::hours(hours)
}

fn in_minutes(minutes: i64) -> NaiveDateTime {
    Local::now().naive_local() + chrono::Duration::minutes(minutes)
}

/// Step the paused clock and let woken timer tasks finish.
async fn advance(secs: u64) {
    tokio::time::advance(StdDuration::from_secs(secs)).await;
    tokio::time::sleep(StdDuration::from_millis(1)).await;
}

// --- reminder timing ---

#[tokio::test(start_paused = true)]
async fn reminder_fires_exactly_once_one_hour_before_start() {
    let h = harness();
    let owner = ChatId(1);
    let event = h
        .organizer
        .create_event(owner, "Launch", in_hours(2))
        .await
        .unwrap();

    assert_eq!(h.recorder.count().await, 0);

    // Short of the fire instant.
    advance(3500).await;
    assert_eq!(h.recorder.count().await, 0);

    advance(200).await;
    let texts = h.recorder.texts_for(owner).await;
    assert_eq!(texts, ["⏰ Reminder: 'Launch' starts in 1 hour!"]);
    assert!(!h.scheduler.pending(&event.id).await);

    // Long after: no repeat.
    advance(7200).await;
    assert_eq!(h.recorder.count().await, 1);
}

#[tokio::test(start_paused = true)]
async fn no_reminder_when_the_lead_has_already_passed() {
    let h = harness();
    let event = h
        .organizer
        .create_event(ChatId(1), "Soon", in_minutes(30))
        .await
        .unwrap();

    // The event itself is stored fine; only the reminder is skipped.
    assert!(!h.scheduler.pending(&event.id).await);
    assert_eq!(h.organizer.events_for(ChatId(1)).await.len(), 1);

    advance(4 * 3600).await;
    assert_eq!(h.recorder.count().await, 0);
}

#[tokio::test(start_paused = true)]
async fn cancel_is_owner_only_and_suppresses_the_reminder() {
    let h = harness();
    let owner = ChatId(1);
    let event = h
        .organizer
        .create_event(owner, "Picnic", in_hours(2))
        .await
        .unwrap();

    assert!(!h.organizer.cancel_event(ChatId(2), &event.id).await);
    assert!(h.scheduler.pending(&event.id).await);
    assert_eq!(h.organizer.events_for(owner).await.len(), 1);

    assert!(h.organizer.cancel_event(owner, &event.id).await);
    assert!(!h.scheduler.pending(&event.id).await);
    assert!(h.organizer.events_for(owner).await.is_empty());

    advance(4 * 3600).await;
    assert_eq!(h.recorder.count().await, 0);
}

#[tokio::test(start_paused = true)]
async fn reschedule_suppresses_the_old_fire_instant() {
    let h = harness();
    let owner = ChatId(1);
    let event = h
        .organizer
        .create_event(owner, "Demo", in_hours(2))
        .await
        .unwrap();

    let updated = h
        .organizer
        .edit_event_time(owner, &event.id, in_hours(9))
        .await
        .unwrap();
    assert_eq!(updated.id, event.id);

    // The original fire instant passes without a delivery.
    advance(2 * 3600).await;
    assert_eq!(h.recorder.count().await, 0);

    // The rearmed one fires an hour before the new start.
    advance(6 * 3600 + 120).await;
    assert_eq!(h.recorder.texts_for(owner).await.len(), 1);
}

// --- rsvp bookkeeping ---

#[tokio::test]
async fn rsvp_override_keeps_the_earlier_yes_entry() {
    let h = harness();
    let owner = ChatId(1);
    let alice = ChatId(5);
    let event = h
        .organizer
        .create_event(owner, "Launch", in_minutes(10))
        .await
        .unwrap();

    h.organizer
        .record_rsvp(&event.id, alice, "Alice", Rsvp::Yes)
        .await
        .unwrap();
    h.organizer
        .record_rsvp(&event.id, alice, "Alice", Rsvp::No)
        .await
        .unwrap();

    let stored = h.organizer.get_event(&event.id).await.unwrap();
    assert_eq!(stored.rsvps.len(), 1);
    assert_eq!(stored.rsvps[&alice], Rsvp::No);
    // The yes list never reconciles with a later answer.
    assert_eq!(stored.yes_respondents, ["Alice"]);

    assert_eq!(
        h.recorder.texts_for(owner).await,
        [
            "📬 Alice responded 'yes' to your event \"Launch\".",
            "📬 Alice responded 'no' to your event \"Launch\"."
        ]
    );
}

#[tokio::test]
async fn created_events_come_back_in_creation_order() {
    let h = harness();
    let owner = ChatId(1);

    h.organizer
        .create_event(owner, "Later", in_hours(50))
        .await
        .unwrap();
    h.organizer
        .create_event(owner, "Sooner", in_hours(20))
        .await
        .unwrap();
    h.organizer
        .create_event(ChatId(2), "Foreign", in_hours(30))
        .await
        .unwrap();

    let names: Vec<String> = h
        .organizer
        .events_for(owner)
        .await
        .into_iter()
        .map(|e| e.name)
        .collect();
    assert_eq!(names, ["Later", "Sooner"]);
}

// --- dialogue-driven creation ---

#[tokio::test]
async fn dialogue_recovers_from_a_bad_date() {
    let h = harness();
    let chat = ChatId(3);

    h.conversation.begin_create(chat).await;
    let step = h.conversation.handle_text(chat, "Trivia Night").await.unwrap();
    assert!(matches!(step, Step::Next(Prompt::EventDate)));

    let step = h.conversation.handle_text(chat, "31-12-2030").await.unwrap();
    assert!(matches!(step, Step::Retry { .. }));

    let step = h.conversation.handle_text(chat, "2030-12-31").await.unwrap();
    assert!(matches!(step, Step::Next(Prompt::EventTime)));

    let step = h.conversation.handle_text(chat, "19:00").await.unwrap();
    match step {
        Step::Done(Outcome::Created(event)) => assert_eq!(event.name, "Trivia Night"),
        other => panic!("expected Done(Created), got {other:?}"),
    }
    assert_eq!(h.organizer.events_for(chat).await.len(), 1);
}

#[tokio::test(start_paused = true)]
async fn dialogue_created_event_gets_a_reminder() {
    let h = harness();
    let chat = ChatId(4);
    let start = in_hours(26);

    h.conversation.begin_create(chat).await;
    h.conversation.handle_text(chat, "Quarterly Sync").await.unwrap();
    h.conversation
        .handle_text(chat, &start.format("%Y-%m-%d").to_string())
        .await
        .unwrap();
    let step = h
        .conversation
        .handle_text(chat, &start.format("%H:%M").to_string())
        .await
        .unwrap();
    assert!(matches!(step, Step::Done(Outcome::Created(_))));
    assert!(h.store.session(chat).await.is_none());

    // A day in: the fire instant (an hour before start) is still ahead.
    advance(24 * 3600).await;
    assert_eq!(h.recorder.count().await, 0);

    advance(2 * 3600).await;
    assert_eq!(
        h.recorder.texts_for(chat).await,
        ["⏰ Reminder: 'Quarterly Sync' starts in 1 hour!"]
    );
}
