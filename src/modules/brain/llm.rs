use reqwest::Client;
use anyhow::{Result, Context};
use async_trait::async_trait;
use serde_json::{json, Value};
use std::env;
use std::time::Duration;
use tracing::{info, warn};

use crate::config::settings::GenerationConfig;
use crate::utils::text::truncate_chars;

/// What the generative collaborator gave back when it could be reached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Generation {
    Text(String),
    /// Reachable, but answered with a non-success status.
    Rejected { status: u16 },
    /// No API key configured; the call was not attempted.
    NoApiKey,
}

/// External generative-text collaborator. `Err` means transport failure, timeout or an
/// unreadable body.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<Generation>;
}

pub struct GeminiClient {
    client: Client,
    base_url: String,
    model: String,
    timeout: Duration,
    api_key_env: String,
    api_key: Option<String>,
}

impl GeminiClient {
    pub fn new(client: Client, cfg: &GenerationConfig) -> Self {
        Self {
            client,
            base_url: cfg.base_url.clone(),
            model: cfg.model.clone(),
            timeout: cfg.timeout(),
            api_key_env: cfg.api_key_env.clone(),
            api_key: None,
        }
    }

    /// Pin the key instead of reading the environment on each call.
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    fn resolve_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .or_else(|| env::var(&self.api_key_env).ok())
            .filter(|k| !k.trim().is_empty())
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model
        )
    }

    fn extract_text(raw: &str) -> Result<String> {
        let json_res: Value = serde_json::from_str(raw).context("Gemini body is not JSON")?;
        let text = json_res["candidates"][0]["content"]["parts"][0]["text"]
            .as_str()
            .context("Gemini body has no candidates[0].content.parts[0].text")?;
        Ok(text.to_string())
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<Generation> {
        let Some(key) = self.resolve_key() else {
            warn!("⚠️ {} not set, skipping Gemini call", self.api_key_env);
            return Ok(Generation::NoApiKey);
        };

        let body = json!({
            "contents": [
                { "parts": [ { "text": prompt } ] }
            ]
        });

        let resp = self.client
            .post(self.endpoint())
            .query(&[("key", key.as_str())])
            .timeout(self.timeout)
            .json(&body)
            .send()
            .await
            .context("Gemini request failed")?;

        let status = resp.status();
        let raw = resp.text().await.context("Gemini body read failed")?;

        info!("Gemini status: {}", status);
        info!("Gemini raw response: {}", truncate_chars(&raw, 500));

        if !status.is_success() {
            return Ok(Generation::Rejected { status: status.as_u16() });
        }

        Ok(Generation::Text(Self::extract_text(&raw)?))
    }
}
