use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;
use tracing::{error, info};

use super::search::{SafeSearch, SearchHit, SearchProvider, SearchRequest, TimeLimit};
use crate::config::settings::SearchConfig;
use crate::utils::text::truncate_chars;

/// Where a digest's text came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DigestSource {
    Live { results: usize },
    Empty,
    Failed,
}

/// Aggregated news text handed to the report prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewsDigest {
    text: String,
    source: DigestSource,
}

impl NewsDigest {
    pub(crate) fn new(text: String, source: DigestSource) -> Self {
        Self { text, source }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn source(&self) -> DigestSource {
        self.source
    }

    /// First `max_chars` chars, for inspection endpoints.
    pub fn preview(&self, max_chars: usize) -> &str {
        truncate_chars(&self.text, max_chars)
    }
}

impl fmt::Display for NewsDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

pub struct NewsSentinel {
    provider: Arc<dyn SearchProvider>,
    query_suffix: String,
    region: String,
    safe_search: SafeSearch,
    time_limit: TimeLimit,
    max_results: usize,
    excerpt_chars: usize,
    timeout: Duration,
}

impl NewsSentinel {
    pub fn new(provider: Arc<dyn SearchProvider>, cfg: &SearchConfig) -> Self {
        Self {
            provider,
            query_suffix: cfg.query_suffix.clone(),
            region: cfg.region.clone(),
            safe_search: cfg.safe_search,
            time_limit: cfg.time_limit,
            max_results: cfg.max_results,
            excerpt_chars: cfg.excerpt_chars,
            timeout: cfg.timeout(),
        }
    }

    fn request_for(&self, sector: &str) -> SearchRequest {
        SearchRequest {
            query: format!("{} {}", sector, self.query_suffix),
            region: self.region.clone(),
            safe_search: self.safe_search,
            time_limit: self.time_limit,
            max_results: self.max_results,
        }
    }

    fn bullet(&self, hit: &SearchHit) -> String {
        format!(
            "- {} ({})\n  {}...",
            hit.title,
            hit.link(),
            truncate_chars(&hit.body, self.excerpt_chars)
        )
    }

    /// Never fails: provider errors and timeouts turn into a placeholder digest.
    pub async fn fetch_digest(&self, sector: &str) -> NewsDigest {
        let request = self.request_for(sector);

        let hits = match timeout(self.timeout, self.provider.search(&request)).await {
            Ok(Ok(hits)) => hits,
            Ok(Err(e)) => {
                error!("❌ News search failed for '{}': {:#}", sector, e);
                return Self::failed(sector);
            }
            Err(_) => {
                error!("❌ News search timed out after {}s for '{}'", self.timeout.as_secs(), sector);
                return Self::failed(sector);
            }
        };

        let lines: Vec<String> = hits.iter().take(self.max_results).map(|h| self.bullet(h)).collect();

        if lines.is_empty() {
            return NewsDigest::new(
                format!("No recent results found for {} in India.", sector),
                DigestSource::Empty,
            );
        }

        info!("📰 News digest for '{}': {} results", sector, lines.len());
        NewsDigest::new(lines.join("\n"), DigestSource::Live { results: lines.len() })
    }

    fn failed(sector: &str) -> NewsDigest {
        NewsDigest::new(
            format!("Could not fetch live market data for {} due to an error.", sector),
            DigestSource::Failed,
        )
    }
}
