//! Bot configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use config::{Config, File};
use serde::Deserialize;
use shindig_core::ReminderScheduler;

fn default_chat_id() -> i64 {
    1
}

fn default_display_name() -> String {
    "you".to_string()
}

fn default_reminder_lead_minutes() -> i64 {
    ReminderScheduler::DEFAULT_LEAD_MINUTES
}

/// Configuration at ~/.config/shindig/config.toml
///
/// Every key has a default, so a fresh install runs without editing
/// anything. The `--chat-id` and `--name` flags override per session.
#[derive(Deserialize, Clone)]
pub struct BotConfig {
    /// Chat identity this console session speaks as.
    #[serde(default = "default_chat_id")]
    pub chat_id: i64,

    /// Name shown to event owners when this session responds to an RSVP.
    #[serde(default = "default_display_name")]
    pub display_name: String,

    /// Minutes between the reminder delivery and the event start.
    #[serde(default = "default_reminder_lead_minutes")]
    pub reminder_lead_minutes: i64,
}

impl BotConfig {
    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not determine config directory")?
            .join("shindig");

        Ok(config_dir.join("config.toml"))
    }

    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
        }

        let config: BotConfig = Config::builder()
            .add_source(File::from(config_path).required(false))
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Create a default config file with all options commented out.
    fn create_default_config(path: &Path) -> Result<()> {
        let contents = "\
# shindig configuration

# Chat identity for this console session:
# chat_id = 1

# Name shown to event owners when you RSVP:
# display_name = \"you\"

# How long before an event the reminder fires, in minutes:
# reminder_lead_minutes = 60
";

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("Could not create config directory {}", parent.display())
            })?;
        }

        std::fs::write(path, contents)
            .with_context(|| format!("Could not write config file {}", path.display()))?;

        Ok(())
    }
}
