//! Application configuration loaded from environment variables.
//!
//! The bot credential is required; the text-generation credential is
//! optional and disables content regeneration when absent.

use crate::time_utils::{parse_clock_time, parse_utc_offset};
use chrono::{FixedOffset, NaiveTime, Offset, Utc};
use std::env;

/// Default Bot API endpoint.
pub const DEFAULT_BOT_API_URL: &str = "https://api.telegram.org";

/// Default OpenAI-compatible endpoint for content generation.
pub const DEFAULT_GENERATOR_BASE_URL: &str = "https://api.openai.com/v1";

/// Default model for content generation.
pub const DEFAULT_GENERATOR_MODEL: &str = "gpt-4o-mini";

/// Default trailing window for the statistics report.
pub const DEFAULT_STATS_WINDOW_DAYS: u32 = 14;

/// Largest accepted statistics window.
pub const MAX_STATS_WINDOW_DAYS: u32 = 366;

/// Wall-clock times at which the daily reminders fire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReminderTimes {
    pub breakfast: NaiveTime,
    pub lunch: NaiveTime,
    pub dinner: NaiveTime,
    pub workout: NaiveTime,
    pub nutrition_log: NaiveTime,
}

impl Default for ReminderTimes {
    fn default() -> Self {
        Self {
            breakfast: hm(8, 0),
            lunch: hm(13, 0),
            dinner: hm(19, 0),
            workout: hm(18, 0),
            nutrition_log: hm(21, 30),
        }
    }
}

fn hm(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).unwrap_or(NaiveTime::MIN)
}

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    // --- Bot transport ---
    /// Bot API credential (required)
    pub bot_token: String,
    /// Base URL of the Bot API
    pub bot_api_url: String,
    /// Secret path segment for the inbound event webhook
    pub webhook_secret: String,
    /// Server port
    pub port: u16,

    // --- Text generation ---
    /// API key for the text generation service (optional)
    pub generator_api_key: Option<String>,
    /// OpenAI-compatible base URL
    pub generator_base_url: String,
    /// Model name
    pub generator_model: String,

    // --- Schedule ---
    /// Fixed local offset used for "today" and reminder times
    pub utc_offset: FixedOffset,
    pub reminders: ReminderTimes,
    /// Days covered by the statistics report (ending today)
    pub stats_window_days: u32,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// A `.env` file is read first when present.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let utc_offset = match env::var("TZ_OFFSET") {
            Ok(raw) => parse_utc_offset(&raw).ok_or(ConfigError::Invalid("TZ_OFFSET", raw))?,
            Err(_) => default_offset(),
        };

        let stats_window_days = match env::var("STATS_WINDOW_DAYS") {
            Ok(raw) => raw
                .trim()
                .parse::<u32>()
                .ok()
                .filter(|days| (1..=MAX_STATS_WINDOW_DAYS).contains(days))
                .ok_or(ConfigError::Invalid("STATS_WINDOW_DAYS", raw))?,
            Err(_) => DEFAULT_STATS_WINDOW_DAYS,
        };

        let defaults = ReminderTimes::default();
        let reminders = ReminderTimes {
            breakfast: reminder_time("REMINDER_BREAKFAST", defaults.breakfast)?,
            lunch: reminder_time("REMINDER_LUNCH", defaults.lunch)?,
            dinner: reminder_time("REMINDER_DINNER", defaults.dinner)?,
            workout: reminder_time("REMINDER_WORKOUT", defaults.workout)?,
            nutrition_log: reminder_time("REMINDER_NUTRITION", defaults.nutrition_log)?,
        };

        Ok(Self {
            bot_token: env::var("BOT_TOKEN")
                .map(|v| v.trim().to_string())
                .ok()
                .filter(|v| !v.is_empty())
                .ok_or(ConfigError::Missing("BOT_TOKEN"))?,
            bot_api_url: env::var("BOT_API_URL")
                .unwrap_or_else(|_| DEFAULT_BOT_API_URL.to_string()),
            webhook_secret: env::var("WEBHOOK_SECRET")
                .map(|v| v.trim().to_string())
                .ok()
                .filter(|v| !v.is_empty())
                .ok_or(ConfigError::Missing("WEBHOOK_SECRET"))?,
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .unwrap_or(8080),

            generator_api_key: env::var("GENERATOR_API_KEY")
                .ok()
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty()),
            generator_base_url: env::var("GENERATOR_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_GENERATOR_BASE_URL.to_string()),
            generator_model: env::var("GENERATOR_MODEL")
                .unwrap_or_else(|_| DEFAULT_GENERATOR_MODEL.to_string()),

            utc_offset,
            reminders,
            stats_window_days,
        })
    }

    /// Config for tests, with no generator credential.
    pub fn test_default() -> Self {
        Self {
            bot_token: "test_bot_token".to_string(),
            bot_api_url: "http://localhost:8081".to_string(),
            webhook_secret: "test_webhook_secret".to_string(),
            port: 8080,
            generator_api_key: None,
            generator_base_url: "http://localhost:11434/v1".to_string(),
            generator_model: DEFAULT_GENERATOR_MODEL.to_string(),
            utc_offset: default_offset(),
            reminders: ReminderTimes::default(),
            stats_window_days: DEFAULT_STATS_WINDOW_DAYS,
        }
    }
}

/// Kyiv standard time.
fn default_offset() -> FixedOffset {
    FixedOffset::east_opt(2 * 3600).unwrap_or_else(|| Utc.fix())
}

fn reminder_time(var: &'static str, default: NaiveTime) -> Result<NaiveTime, ConfigError> {
    match env::var(var) {
        Ok(raw) => parse_clock_time(&raw).ok_or(ConfigError::Invalid(var, raw)),
        Err(_) => Ok(default),
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {0}: {1:?}")]
    Invalid(&'static str, String),
}
