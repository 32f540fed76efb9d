//! Command routing.
//!
//! One inbound chat message in, one reply text out. Lines starting with
//! `/` are commands; anything else feeds the in-progress conversation
//! flow. Command handling always wins over an open flow, exactly like a
//! chat bot's command handlers firing before its text handlers.

use std::sync::Arc;

use shindig_core::{ChatId, Conversation, EventId, Organizer, Rsvp};

use crate::render::{self, Render};

pub struct Router {
    organizer: Arc<Organizer>,
    conversation: Conversation,
    display_name: String,
}

impl Router {
    pub fn new(organizer: Arc<Organizer>, conversation: Conversation, display_name: String) -> Self {
        Router { organizer, conversation, display_name }
    }

    /// Handle one inbound message and produce the reply.
    pub async fn handle(&self, chat: ChatId, input: &str) -> String {
        let text = input.trim();
        match text.strip_prefix('/') {
            Some(command) => self.command(chat, command).await,
            None => self.plain_text(chat, text).await,
        }
    }

    async fn command(&self, chat: ChatId, input: &str) -> String {
        let mut parts = input.split_whitespace();
        let command = parts.next().unwrap_or_default();
        let args: Vec<&str> = parts.collect();

        match command {
            "start" => render::welcome(&self.display_name),
            "createevent" => self.conversation.begin_create(chat).await.render(),
            "myevents" => render::event_list(&self.organizer.events_for(chat).await),
            "cancel" => self.cancel(chat, &args).await,
            "edit" => self.edit(chat, &args).await,
            "invite" => match self.conversation.begin_invite(chat).await {
                Ok(prompt) => prompt.render(),
                Err(error) => error.render(),
            },
            "rsvp" => self.rsvp(chat, &args).await,
            "guestlist" => self.guest_list(&args).await,
            _ => format!("❌ Unknown command /{command}. Send /start for the feature list."),
        }
    }

    async fn plain_text(&self, chat: ChatId, text: &str) -> String {
        match self.conversation.handle_text(chat, text).await {
            Some(step) => step.render(),
            None => {
                "💡 Nothing in progress. Start with /createevent, or /start for the feature list."
                    .to_string()
            }
        }
    }

    async fn cancel(&self, chat: ChatId, args: &[&str]) -> String {
        let Some(id) = single_arg(args) else {
            return "❌ Invalid format. Use /cancel <event_id>.".to_string();
        };
        if self.organizer.cancel_event(chat, &EventId::from(id)).await {
            format!("✅ Event {id} has been canceled.")
        } else {
            "❌ Invalid event ID or you don't have permission to cancel this event.".to_string()
        }
    }

    async fn edit(&self, chat: ChatId, args: &[&str]) -> String {
        let Some(id) = single_arg(args) else {
            return "❌ Invalid format. Use /edit <event_id>.".to_string();
        };
        match self.conversation.begin_edit(chat, &EventId::from(id)).await {
            Ok(prompt) => prompt.render(),
            Err(_) => {
                "❌ Invalid event ID or you don't have permission to edit this event.".to_string()
            }
        }
    }

    async fn rsvp(&self, chat: ChatId, args: &[&str]) -> String {
        let &[id, response] = args else {
            return "❌ Invalid format. Use /rsvp <event_id> <yes|no|maybe>.".to_string();
        };
        let response: Rsvp = match response.parse() {
            Ok(response) => response,
            Err(error) => return error.render(),
        };
        match self
            .organizer
            .record_rsvp(&EventId::from(id), chat, &self.display_name, response)
            .await
        {
            Ok(receipt) => format!(
                "✅ Your RSVP '{}' for event {} is recorded.",
                receipt.response, receipt.event_id
            ),
            Err(error) => error.render(),
        }
    }

    async fn guest_list(&self, args: &[&str]) -> String {
        let Some(id) = single_arg(args) else {
            return "❌ Invalid format. Use /guestlist <event_id>.".to_string();
        };
        match self.organizer.get_event(&EventId::from(id)).await {
            Ok(event) => render::yes_respondent_list(&event),
            Err(error) => error.render(),
        }
    }
}

fn single_arg<'a>(args: &[&'a str]) -> Option<&'a str> {
    match args {
        [id] => Some(id),
        _ => None,
    }
}
