use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct CorsConfig {
    pub allow_origins: Vec<String>,
    pub max_age: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub cors: CorsConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
}

/// Triage order of the owner's pending-verification queue.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum QueueOrder {
    /// Oldest submission first (default triage order).
    #[default]
    OldestFirst,
    NewestFirst,
}

#[derive(Debug, Deserialize, Clone)]
pub struct VerificationConfig {
    pub queue_order: QueueOrder,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub verification: VerificationConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        let s = Config::builder()
            .set_default("server.host", "127.0.0.1")?
            // The original deployment serves the workflow API on 5001.
            .set_default("server.port", 5001)?
            .set_default("server.cors.allow_origins", Vec::<String>::new())?
            .set_default("server.cors.max_age", 3600)?
            .set_default("database.url", "sqlite://scrapflow.db?mode=rwc")?
            .set_default("verification.queue_order", "oldest_first")?
            // Load from config/config.toml
            .add_source(File::with_name("config/config").required(false))
            // Override from environment (e.g., SCRAPFLOW__DATABASE__URL)
            .add_source(Environment::with_prefix("SCRAPFLOW").separator("__"))
            .build()?;

        s.try_deserialize()
    }
}
