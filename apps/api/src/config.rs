use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Only `JOBS_PATH` is required; everything else has a sensible default.
#[derive(Debug, Clone)]
pub struct Config {
    /// Path to the JSON job corpus file (array of job records).
    pub jobs_path: String,
    /// Optional path to a JSON file of seed candidate profiles.
    pub profiles_path: Option<String>,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            jobs_path: require_env("JOBS_PATH")?,
            profiles_path: std::env::var("PROFILES_PATH").ok(),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}
