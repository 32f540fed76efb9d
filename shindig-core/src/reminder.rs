//! One-shot reminder scheduling.
//!
//! Each event gets at most one pending reminder, delivered a fixed lead
//! time before the start instant. Timers are independent spawned tasks, so
//! arming them never blocks conversation handling; the tokio timer wheel
//! keeps many pending reminders cheap.
//!
//! Cancels and reschedules are linearized against the fire path through
//! the timer table lock: whichever side takes the lock first wins, and a
//! reminder fires at most once either way.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{Duration, Local};
use log::{debug, warn};
use tokio::sync::Mutex;
use tokio::task::AbortHandle;
use tokio::time::Instant;

use crate::event::{ChatId, Event, EventId};
use crate::notify::Notifier;

/// Schedules and cancels the per-event reminder timers.
///
/// Holds only event ids and timer handles, never the event records
/// themselves; the store stays the single owner of event state.
pub struct ReminderScheduler {
    timers: Arc<Mutex<TimerTable>>,
    notifier: Arc<dyn Notifier>,
    lead: Duration,
}

/// Timer bookkeeping: the live slot per event plus a generation counter
/// that lets a woken timer prove it has not been replaced.
#[derive(Default)]
struct TimerTable {
    slots: HashMap<EventId, TimerSlot>,
    next_generation: u64,
}

struct TimerSlot {
    generation: u64,
    abort: AbortHandle,
}

impl ReminderScheduler {
    /// Default lead time between the reminder and the event start.
    pub const DEFAULT_LEAD_MINUTES: i64 = 60;

    pub fn new(notifier: Arc<dyn Notifier>) -> Self {
        Self::with_lead(notifier, Self::DEFAULT_LEAD_MINUTES)
    }

    /// Scheduler with a custom lead time in minutes.
    pub fn with_lead(notifier: Arc<dyn Notifier>, lead_minutes: i64) -> Self {
        ReminderScheduler {
            timers: Arc::new(Mutex::new(TimerTable::default())),
            notifier,
            lead: Duration::minutes(lead_minutes),
        }
    }

    /// Arm the reminder for `event`, replacing any pending one.
    ///
    /// When the fire instant is already in the past (the event starts in
    /// less than the lead time), nothing is armed: no catch-up reminders.
    /// The retire-old/arm-new pair happens under one lock acquisition, so
    /// a stale timer can never slip through between the two.
    pub async fn schedule(&self, event: &Event) {
        let mut table = self.timers.lock().await;

        // Retire any pending timer first. After an edit the old fire
        // instant is stale and must never deliver.
        if let Some(slot) = table.slots.remove(&event.id) {
            slot.abort.abort();
        }

        // Starts at the calendar's far edge leave no room to subtract
        // the lead; treat them like a fire instant already behind us.
        let Some(fire_at) = event.start.checked_sub_signed(self.lead) else {
            debug!(
                "No reminder for '{}': start {} cannot fit the lead",
                event.name, event.start
            );
            return;
        };

        let now = Local::now().naive_local();
        let wait = match (fire_at - now).to_std() {
            Ok(wait) if !wait.is_zero() => wait,
            _ => {
                debug!(
                    "No reminder for '{}': fire instant {} has already passed",
                    event.name, fire_at
                );
                return;
            }
        };

        // Pin the deadline here. The spawned task may not run until
        // after time has moved on, and the fire instant must not move
        // with it.
        let deadline = Instant::now() + wait;

        let generation = table.next_generation;
        table.next_generation += 1;

        let task = tokio::spawn(run_timer(
            Arc::clone(&self.timers),
            Arc::clone(&self.notifier),
            event.id.clone(),
            event.owner,
            reminder_text(&event.name, self.lead),
            deadline,
            generation,
        ));
        table.slots.insert(
            event.id.clone(),
            TimerSlot {
                generation,
                abort: task.abort_handle(),
            },
        );

        debug!("Armed reminder for '{}' at {} (event {})", event.name, fire_at, event.id);
    }

    /// Cancel any pending reminder for `id`. No-op when none is armed.
    pub async fn cancel(&self, id: &EventId) {
        let mut table = self.timers.lock().await;
        if let Some(slot) = table.slots.remove(id) {
            slot.abort.abort();
            debug!("Canceled pending reminder for event {id}");
        }
    }

    /// Whether a reminder is currently armed for `id`.
    pub async fn pending(&self, id: &EventId) -> bool {
        self.timers.lock().await.slots.contains_key(id)
    }
}

/// Sleeps until the fire deadline, then delivers iff this generation still
/// owns the slot. A cancel or reschedule that won the table lock while we
/// slept has removed or replaced the slot, which suppresses the delivery.
async fn run_timer(
    timers: Arc<Mutex<TimerTable>>,
    notifier: Arc<dyn Notifier>,
    id: EventId,
    owner: ChatId,
    text: String,
    deadline: Instant,
    generation: u64,
) {
    tokio::time::sleep_until(deadline).await;

    {
        let mut table = timers.lock().await;
        match table.slots.get(&id) {
            Some(slot) if slot.generation == generation => {
                table.slots.remove(&id);
            }
            _ => return,
        }
    }

    if let Err(e) = notifier.deliver(owner, &text).await {
        warn!("Reminder delivery for event {id} failed: {e}");
    }
}

fn reminder_text(name: &str, lead: Duration) -> String {
    if lead == Duration::hours(1) {
        format!("⏰ Reminder: '{name}' starts in 1 hour!")
    } else {
        format!("⏰ Reminder: '{name}' starts in {} minutes!", lead.num_minutes())
    }
}
