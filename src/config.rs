//! Configuration for homework_watcher_rust

use anyhow::{anyhow, Context, Result};
use std::env;
use std::time::Duration;

use crate::review_client::DEFAULT_REVIEW_API_URL;

/// Default polling interval in seconds.
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 600;

/// Default first-poll lookback window in seconds (roughly one month).
pub const DEFAULT_LOOKBACK_SECS: i64 = 2_629_743;

#[derive(Debug, Clone)]
pub struct WatcherConfig {
    // Credentials (all required)
    pub api_token: String,
    pub bot_token: String,
    pub chat_id: String,

    // Review API
    pub endpoint: String,

    // Polling behavior
    pub poll_interval: Duration,
    pub lookback_secs: i64,
    pub advance_from_date: bool,
}

impl WatcherConfig {
    /// Load configuration from the environment. The three credentials are
    /// required and checked here, before any client exists; everything else
    /// falls back to defaults.
    pub fn from_env() -> Result<Self> {
        let api_token = required_var("REVIEW_API_TOKEN")?;
        let bot_token = required_var("TELEGRAM_BOT_TOKEN")?;
        let chat_id = required_var("TELEGRAM_CHAT_ID")?;

        let endpoint =
            env::var("REVIEW_API_URL").unwrap_or_else(|_| DEFAULT_REVIEW_API_URL.to_string());

        let poll_interval_secs = parse_u64("POLL_INTERVAL_SECS", DEFAULT_POLL_INTERVAL_SECS)?;
        if poll_interval_secs == 0 {
            return Err(anyhow!("POLL_INTERVAL_SECS must be > 0"));
        }

        let lookback_secs = parse_i64("LOOKBACK_SECS", DEFAULT_LOOKBACK_SECS)?;
        if lookback_secs < 0 {
            return Err(anyhow!("LOOKBACK_SECS must be >= 0"));
        }

        let advance_from_date = parse_bool_env("ADVANCE_FROM_DATE", false);

        Ok(Self {
            api_token,
            bot_token,
            chat_id,
            endpoint,
            poll_interval: Duration::from_secs(poll_interval_secs),
            lookback_secs,
            advance_from_date,
        })
    }
}

fn required_var(key: &str) -> Result<String> {
    env::var(key).with_context(|| format!("{key} must be set"))
}

/// Parse environment variable as u64 with default fallback
fn parse_u64(var_name: &str, default: u64) -> Result<u64> {
    match env::var(var_name) {
        Ok(val) => val
            .parse()
            .map_err(|_| anyhow!("{} must be a valid u64", var_name)),
        Err(_) => Ok(default),
    }
}

/// Parse environment variable as i64 with default fallback
fn parse_i64(var_name: &str, default: i64) -> Result<i64> {
    match env::var(var_name) {
        Ok(val) => val
            .parse()
            .map_err(|_| anyhow!("{} must be a valid i64", var_name)),
        Err(_) => Ok(default),
    }
}

fn parse_bool_env(key: &str, default: bool) -> bool {
    env::var(key)
        .ok()
        .map(|v| matches!(v.trim().to_lowercase().as_str(), "1" | "true" | "yes" | "y" | "on"))
        .unwrap_or(default)
}
