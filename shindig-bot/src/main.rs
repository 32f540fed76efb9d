mod config;
mod console;
mod render;
mod router;

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use dialoguer::Input;
use log::debug;
use owo_colors::OwoColorize;
use shindig_core::{ChatId, Conversation, EventStore, Notifier, Organizer, ReminderScheduler};

use crate::config::BotConfig;
use crate::console::ConsoleNotifier;
use crate::router::Router;

#[derive(Parser)]
#[command(name = "shindig")]
#[command(about = "Organize events, collect RSVPs, and get reminded from a chat prompt")]
struct Cli {
    /// Chat identity to speak as (overrides the config file)
    #[arg(long)]
    chat_id: Option<i64>,

    /// Display name shown to event owners (overrides the config file)
    #[arg(long)]
    name: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let config = BotConfig::load()?;

    let chat = ChatId(cli.chat_id.unwrap_or(config.chat_id));
    let display_name = cli.name.unwrap_or(config.display_name);
    debug!(
        "Session for chat {chat} with a {} minute reminder lead",
        config.reminder_lead_minutes
    );

    let store = Arc::new(EventStore::new());
    let notifier: Arc<dyn Notifier> = Arc::new(ConsoleNotifier);
    let scheduler = Arc::new(ReminderScheduler::with_lead(
        Arc::clone(&notifier),
        config.reminder_lead_minutes,
    ));
    let organizer = Arc::new(Organizer::new(Arc::clone(&store), scheduler, notifier));
    let conversation = Conversation::new(store, Arc::clone(&organizer));
    let router = Router::new(organizer, conversation, display_name.clone());

    println!("{}", "shindig".bold());
    println!(
        "{}",
        format!(
            "Chatting as {display_name} (chat {chat}). /start for the feature list, /quit to leave."
        )
        .dimmed()
    );
    println!();

    loop {
        let line = match Input::<String>::new()
            .with_prompt(display_name.as_str())
            .allow_empty(true)
            .interact_text()
        {
            Ok(line) => line,
            // Closed stdin ends the session.
            Err(_) => break,
        };

        let text = line.trim();
        if text.is_empty() {
            continue;
        }
        if text == "/quit" || text == "/exit" {
            break;
        }

        println!("{}", router.handle(chat, text).await);
        println!();
    }

    Ok(())
}
