//! Notification delivery boundary.
//!
//! The core never talks to a chat network directly; it hands outbound
//! messages to a `Notifier` and moves on. Reminder deliveries and RSVP
//! receipts to event owners both pass through here.

use async_trait::async_trait;
use thiserror::Error;

use crate::event::ChatId;

/// Failure reported by a notification backend.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct DeliveryError(pub String);

/// Delivers a message to a chat identity.
///
/// Implementations belong to the transport layer (or to tests). Delivery is
/// fire-and-forget from the core's perspective: failures are logged by the
/// caller and never retried.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn deliver(&self, chat: ChatId, text: &str) -> Result<(), DeliveryError>;
}
