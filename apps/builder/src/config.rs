use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the remote document store, e.g. `https://store.example.com/v1`.
    pub store_base_url: String,
    /// Collection the resume documents live in.
    pub store_collection: String,
    /// Per-request timeout for store calls, in seconds.
    pub store_timeout_secs: u64,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            store_base_url: require_env("STORE_BASE_URL")?,
            store_collection: std::env::var("STORE_COLLECTION")
                .unwrap_or_else(|_| "resumes".to_string()),
            store_timeout_secs: std::env::var("STORE_TIMEOUT_SECS")
                .unwrap_or_else(|_| "10".to_string())
                .parse::<u64>()
                .context("STORE_TIMEOUT_SECS must be a number of seconds")?,
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}
