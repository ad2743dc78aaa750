use serde::Deserialize;
use config::{builder::DefaultState, Config, ConfigBuilder, Environment, File};
use anyhow::Result;
use std::time::Duration;

use crate::modules::perception::search::{SafeSearch, TimeLimit};

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub listen_addr: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RateLimitConfig {
    pub max_requests: usize,
    pub window_sec: u64,
    pub sweep_interval_sec: u64,
}

impl RateLimitConfig {
    /// Human-readable policy, used verbatim in 429 responses.
    pub fn policy_text(&self) -> String {
        let window_min = self.window_sec / 60;
        if window_min > 0 && self.window_sec % 60 == 0 {
            format!("Rate limit: {} requests / {} min per IP", self.max_requests, window_min)
        } else {
            format!("Rate limit: {} requests / {} sec per IP", self.max_requests, self.window_sec)
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct SearchConfig {
    pub endpoint: String,
    pub region: String,
    pub safe_search: SafeSearch,
    pub time_limit: TimeLimit,
    pub max_results: usize,
    pub timeout_sec: u64,
    pub query_suffix: String,
    pub excerpt_chars: usize,
}

impl SearchConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_sec)
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct GenerationConfig {
    pub base_url: String,
    pub model: String,
    pub timeout_sec: u64,
    /// Name of the environment variable holding the Gemini key. Read on every call.
    pub api_key_env: String,
}

impl GenerationConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_sec)
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct AuthConfig {
    pub username: String,
    pub password: String,
    pub token_prefix: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub server: ServerConfig,
    pub rate_limit: RateLimitConfig,
    pub search: SearchConfig,
    pub generation: GenerationConfig,
    pub auth: AuthConfig,
}

impl Settings {
    /// Defaults, then `sector_config.{toml,yaml,json}` if present, then `SCOUT__*` env vars.
    pub fn load() -> Result<Self> {
        let settings = Self::defaults_builder()?
            .add_source(File::with_name("sector_config").required(false))
            .add_source(
                Environment::with_prefix("SCOUT")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let settings: Settings = settings.try_deserialize()?;
        Ok(settings)
    }

    /// Built-in defaults only. No file or environment lookups.
    pub fn defaults() -> Result<Self> {
        let settings = Self::defaults_builder()?.build()?;
        Ok(settings.try_deserialize()?)
    }

    fn defaults_builder() -> Result<ConfigBuilder<DefaultState>> {
        let builder = Config::builder()
            .set_default("server.listen_addr", "127.0.0.1:8000")?
            .set_default("rate_limit.max_requests", 3_i64)?
            .set_default("rate_limit.window_sec", 300_i64)?
            .set_default("rate_limit.sweep_interval_sec", 60_i64)?
            .set_default("search.endpoint", "https://html.duckduckgo.com/html/")?
            .set_default("search.region", "in-en")?
            .set_default("search.safe_search", "moderate")?
            .set_default("search.time_limit", "day")?
            .set_default("search.max_results", 8_i64)?
            .set_default("search.timeout_sec", 15_i64)?
            .set_default("search.query_suffix", "India stock market news opportunities 2025")?
            .set_default("search.excerpt_chars", 200_i64)?
            .set_default("generation.base_url", "https://generativelanguage.googleapis.com")?
            .set_default("generation.model", "gemini-1.5-flash")?
            .set_default("generation.timeout_sec", 30_i64)?
            .set_default("generation.api_key_env", "GEMINI_API_KEY")?
            .set_default("auth.username", "guest")?
            .set_default("auth.password", "appscrip2025")?
            .set_default("auth.token_prefix", "appscrip_guest")?;
        Ok(builder)
    }
}
