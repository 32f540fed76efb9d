//! Chat message rendering for shindig-core types.
//!
//! This module provides an extension trait that turns core prompts,
//! outcomes, and errors into the outbound message texts, plus free
//! functions for the command replies that aren't tied to one core type.

use shindig_core::{Event, Outcome, Prompt, ShindigError, Step, event_link};

/// Extension trait for rendering chat replies.
pub trait Render {
    fn render(&self) -> String;
}

fn date_of(event: &Event) -> String {
    event.start.format("%Y-%m-%d").to_string()
}

fn time_of(event: &Event) -> String {
    event.start.format("%H:%M").to_string()
}

impl Render for Prompt {
    fn render(&self) -> String {
        match self {
            Prompt::EventName => "📋 What is the name of the event?".to_string(),
            Prompt::EventDate => {
                "📅 Enter the date of the event (format: YYYY-MM-DD):".to_string()
            }
            Prompt::EventTime => "⏰ Enter the time of the event (format: HH:MM):".to_string(),
            Prompt::NewEventDate => {
                "📅 Enter the new date of the event (format: YYYY-MM-DD):".to_string()
            }
            Prompt::NewEventTime => {
                "⏰ Enter the new time of the event (format: HH:MM):".to_string()
            }
            Prompt::InviteSelection { event_ids } => {
                let mut lines = vec!["Select the event to invite guests:".to_string()];
                lines.extend(event_ids.iter().map(|id| format!("  {id}")));
                lines.join("\n")
            }
            Prompt::InviteeNames { event_name, guests } => {
                let mut lines = vec![format!("Guests for event '{event_name}':")];
                lines.extend(guests.iter().map(|guest| format!("Guest Name: {guest}")));
                lines.push(
                    "📩 Enter the names of participants separated by commas to invite:"
                        .to_string(),
                );
                lines.join("\n")
            }
        }
    }
}

impl Render for Outcome {
    fn render(&self) -> String {
        match self {
            Outcome::Created(event) => format!(
                "✅ Event \"{}\" created!\n\
                 📆 {} at {}\n\
                 🔔 Reminder set!\n\
                 📋 Event ID: {}\n\
                 🌍 View in Google Calendar: {}",
                event.name,
                date_of(event),
                time_of(event),
                event.id,
                event_link(&event.name, event.start)
            ),
            Outcome::Rescheduled(event) => format!(
                "✅ Event \"{}\" updated!\n\
                 📆 New date: {} at {}\n\
                 🔔 Reminder updated!\n\
                 🌍 View in Google Calendar: {}",
                event.name,
                date_of(event),
                time_of(event),
                event_link(&event.name, event.start)
            ),
            Outcome::Invited { event, invitees } => {
                let mut lines: Vec<String> = invitees
                    .iter()
                    .map(|invitee| {
                        format!(
                            "📩 You have invited {} to the event \"{}\"!\n\
                             📅 Date: {}\n\
                             ⏰ Time: {}",
                            invitee,
                            event.name,
                            date_of(event),
                            time_of(event)
                        )
                    })
                    .collect();
                lines.push("✅ Invitations sent successfully.".to_string());
                lines.join("\n")
            }
        }
    }
}

impl Render for ShindigError {
    fn render(&self) -> String {
        match self {
            ShindigError::EmptyName => "❌ The event name cannot be empty.".to_string(),
            ShindigError::InvalidDate(_) => "❌ Invalid date format. Use YYYY-MM-DD.".to_string(),
            ShindigError::InvalidTime(_) => "❌ Invalid time format. Use HH:MM.".to_string(),
            ShindigError::InvalidResponse(_) => {
                "❌ Invalid response. Use yes, no, or maybe.".to_string()
            }
            ShindigError::UnknownEvent(_) => "❌ Invalid event ID.".to_string(),
            ShindigError::NoEvents => "❌ No events found to invite guests.".to_string(),
        }
    }
}

impl Render for Step {
    fn render(&self) -> String {
        match self {
            Step::Next(prompt) => prompt.render(),
            Step::Retry { error, prompt } => format!("{}\n{}", error.render(), prompt.render()),
            Step::Done(outcome) => outcome.render(),
            Step::Failed(error) => error.render(),
        }
    }
}

/// Greeting with the feature list.
pub fn welcome(display_name: &str) -> String {
    format!(
        "👋 Hello, {display_name}! I am the RSVP bot to help you manage events.\n\
         \n\
         📅 Features: \n\
         ✔️ Create an event (/createevent)\n\
         ✔️ View my events (/myevents)\n\
         ✔️ Confirm attendance (/rsvp ID yes/no/maybe)\n\
         ✔️ Cancel an event (/cancel ID)\n\
         ✔️ Edit an event's date and time (/edit ID)\n\
         ✔️ View guest list (/guestlist ID)\n\
         🚀 Start with /createevent!"
    )
}

/// The `/myevents` listing.
pub fn event_list(events: &[Event]) -> String {
    if events.is_empty() {
        return "❌ No upcoming events found.".to_string();
    }

    let mut lines = vec!["📅 Your upcoming events:".to_string()];
    for event in events {
        lines.push(format!("ID: {}", event.id));
        lines.push(format!("Name: {}", event.name));
        lines.push(format!("Date: {}", date_of(event)));
        lines.push(format!("Time: {}", time_of(event)));
        lines.push("----------------------".to_string());
    }
    lines.join("\n")
}

/// The `/guestlist` reply: everyone who answered yes.
pub fn yes_respondent_list(event: &Event) -> String {
    if event.yes_respondents.is_empty() {
        return "No guests have responded 'yes' yet.".to_string();
    }

    format!(
        "Guests who responded 'yes' for event '{}':\n{}",
        event.name,
        event.yes_respondents.join("\n")
    )
}
