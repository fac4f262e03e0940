use anyhow::{Context, Result};

use crate::recommend::engine::EngineConfig;

/// Application configuration loaded from environment variables.
/// Every variable has a default — the service needs no external resources.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub engine: EngineConfig,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8000".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            engine: EngineConfig {
                flat_epsilon: std::env::var("FLAT_SIMILARITY_EPSILON")
                    .unwrap_or_else(|_| "1e-9".to_string())
                    .parse::<f64>()
                    .context("FLAT_SIMILARITY_EPSILON must be a valid float")?,
                ..EngineConfig::default()
            },
        })
    }
}
