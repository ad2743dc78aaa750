use std::sync::Arc;
use std::time::Duration;

use crate::config::Settings;
use crate::modules::brain::{GeminiClient, ReportSynthesizer, TextGenerator};
use crate::modules::gate::SlidingWindowLimiter;
use crate::modules::perception::{DuckDuckGoSearch, NewsSentinel, SearchProvider};
use crate::utils::HttpClientFactory;

/// Shared state for all handlers. Built once at startup; the request log lives here.
pub struct AppState {
    pub settings: Settings,
    pub limiter: SlidingWindowLimiter,
    pub news: NewsSentinel,
    pub reports: ReportSynthesizer,
}

impl AppState {
    pub fn new(
        settings: Settings,
        search: Arc<dyn SearchProvider>,
        generator: Arc<dyn TextGenerator>,
    ) -> Arc<Self> {
        let limiter = SlidingWindowLimiter::new(
            settings.rate_limit.max_requests,
            Duration::from_secs(settings.rate_limit.window_sec),
        );
        let news = NewsSentinel::new(search, &settings.search);
        let reports = ReportSynthesizer::new(generator);

        Arc::new(Self { settings, limiter, news, reports })
    }

    /// Wire the real DuckDuckGo and Gemini collaborators.
    pub fn from_settings(settings: Settings) -> anyhow::Result<Arc<Self>> {
        let search_client = HttpClientFactory::create(settings.search.timeout())?;
        let llm_client = HttpClientFactory::create_direct(settings.generation.timeout())?;

        let search = Arc::new(DuckDuckGoSearch::new(search_client, settings.search.endpoint.clone()));
        let generator = Arc::new(GeminiClient::new(llm_client, &settings.generation));

        Ok(Self::new(settings, search, generator))
    }
}
