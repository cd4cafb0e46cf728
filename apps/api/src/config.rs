use std::time::Duration;

use anyhow::{Context, Result};

const DEFAULT_INSIGHT_TTL_SECS: u64 = 60 * 60;

/// Application configuration loaded from environment variables.
/// Startup fails if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub gemini_api_key: String,
    pub port: u16,
    pub rust_log: String,
    /// How long a generated industry insight is served before it is regenerated.
    pub insight_ttl: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            gemini_api_key: require_env("GEMINI_API_KEY")?,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            insight_ttl: parse_ttl(std::env::var("INSIGHT_TTL_SECS").ok().as_deref())?,
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn parse_ttl(raw: Option<&str>) -> Result<Duration> {
    let secs = match raw {
        None => DEFAULT_INSIGHT_TTL_SECS,
        Some(s) => s
            .trim()
            .parse::<u64>()
            .context("INSIGHT_TTL_SECS must be a whole number of seconds")?,
    };
    if secs == 0 {
        anyhow::bail!("INSIGHT_TTL_SECS must be greater than zero");
    }
    Ok(Duration::from_secs(secs))
}
