use std::path::PathBuf;

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

#[derive(Debug, Deserialize, Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
    /// Lifetime of issued bearer tokens.
    pub token_ttl_days: i64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    /// Root of the content-addressed blob store.
    pub blob_dir: PathBuf,
    /// Ceiling for media attached to a course, in bytes.
    pub max_media_bytes: u64,
    /// Hard cap on an upload request body. Must exceed `max_media_bytes` so
    /// oversized files are still answered with a validation error.
    pub max_request_bytes: usize,
}

impl StorageConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_request_bytes as u64 <= self.max_media_bytes {
            return Err(ConfigError::Message(format!(
                "storage.max_request_bytes ({}) must exceed storage.max_media_bytes ({})",
                self.max_request_bytes, self.max_media_bytes
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct AiConfig {
    /// Empty means unset; generation requests then fail upstream.
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    pub storage: StorageConfig,
    pub ai: AiConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        let s = Config::builder()
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 5000)?
            .set_default("server.cors.allow_origins", Vec::<String>::new())?
            .set_default("server.cors.max_age", 3600)?
            .set_default("auth.token_ttl_days", 7)?
            .set_default("storage.blob_dir", "./data/blobs")?
            .set_default(
                "storage.max_media_bytes",
                common::media::COURSE_MEDIA_MAX_BYTES,
            )?
            .set_default("storage.max_request_bytes", 32 * 1024 * 1024)?
            .set_default("ai.api_key", "")?
            .set_default("ai.base_url", "https://api.openai.com/v1")?
            .set_default("ai.model", "gpt-3.5-turbo")?
            .set_default("ai.timeout_secs", 60)?
            // Load from config/config.toml
            .add_source(File::with_name("config/config").required(false))
            // Override from environment (e.g., LIVEROOM__AUTH__JWT_SECRET)
            .add_source(Environment::with_prefix("LIVEROOM").separator("__"))
            .build()?;

        let config: Self = s.try_deserialize()?;
        config.storage.validate()?;
        Ok(config)
    }
}
