use std::time::Duration;

use anyhow::{Context, Result};

use crate::editor::view::{ViewSection, DEFAULT_STAT_ANIMATION_DELAY};

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// PostgreSQL record store; `None` keeps records in memory.
    pub database_url: Option<String>,
    pub port: u16,
    pub rust_log: String,
    pub stat_animation_delay: Duration,
    /// Section shown when a session starts.
    pub initial_view: ViewSection,
    /// Sessions untouched for this long are discarded.
    pub session_idle_ttl: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            database_url: None,
            port: 8080,
            rust_log: "info".to_string(),
            stat_animation_delay: DEFAULT_STAT_ANIMATION_DELAY,
            initial_view: ViewSection::Landing,
            session_idle_ttl: Duration::from_secs(30 * 60),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let defaults = Config::default();
        Ok(Config {
            database_url: optional_env("DATABASE_URL"),
            port: optional_env("PORT")
                .map(|p| p.parse::<u16>())
                .transpose()
                .context("PORT must be a valid port number")?
                .unwrap_or(defaults.port),
            rust_log: optional_env("RUST_LOG").unwrap_or(defaults.rust_log),
            stat_animation_delay: optional_env("STAT_ANIMATION_DELAY_MS")
                .map(|ms| ms.parse::<u64>().map(Duration::from_millis))
                .transpose()
                .context("STAT_ANIMATION_DELAY_MS must be a whole number of milliseconds")?
                .unwrap_or(defaults.stat_animation_delay),
            initial_view: optional_env("INITIAL_VIEW")
                .map(|v| v.parse::<ViewSection>())
                .transpose()
                .map_err(anyhow::Error::msg)
                .context("INITIAL_VIEW must be 'landing' or 'editor'")?
                .unwrap_or(defaults.initial_view),
            session_idle_ttl: optional_env("SESSION_IDLE_TTL_SECS")
                .map(|secs| secs.parse::<u64>().map(Duration::from_secs))
                .transpose()
                .context("SESSION_IDLE_TTL_SECS must be a whole number of seconds")?
                .unwrap_or(defaults.session_idle_ttl),
        })
    }
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}
