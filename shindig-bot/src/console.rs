//! Console-backed notification delivery.

use async_trait::async_trait;
use owo_colors::OwoColorize;
use shindig_core::{ChatId, DeliveryError, Notifier};

/// Prints outbound notifications to the terminal, tagged with the target
/// chat id.
///
/// Reminders and RSVP receipts arrive through here asynchronously, so a
/// delivery can land while the input prompt is open, the way a phone
/// notification would.
pub struct ConsoleNotifier;

#[async_trait]
impl Notifier for ConsoleNotifier {
    async fn deliver(&self, chat: ChatId, text: &str) -> Result<(), DeliveryError> {
        println!("\n{} {}", format!("[chat {chat}]").dimmed(), text);
        Ok(())
    }
}
