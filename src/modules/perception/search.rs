use anyhow::{anyhow, bail, Result};
use async_trait::async_trait;
use percent_encoding::percent_decode_str;
use reqwest::Client;
use scraper::{Html, Selector};
use serde::Deserialize;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SafeSearch {
    Strict,
    Moderate,
    Off,
}

impl SafeSearch {
    /// DuckDuckGo `kp` value.
    pub fn ddg_code(self) -> &'static str {
        match self {
            SafeSearch::Strict => "1",
            SafeSearch::Moderate => "-1",
            SafeSearch::Off => "-2",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeLimit {
    Day,
    Week,
    Month,
    Year,
}

impl TimeLimit {
    /// DuckDuckGo `df` value.
    pub fn ddg_code(self) -> &'static str {
        match self {
            TimeLimit::Day => "d",
            TimeLimit::Week => "w",
            TimeLimit::Month => "m",
            TimeLimit::Year => "y",
        }
    }
}

#[derive(Debug, Clone)]
pub struct SearchRequest {
    pub query: String,
    pub region: String,
    pub safe_search: SafeSearch,
    pub time_limit: TimeLimit,
    pub max_results: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchHit {
    pub title: String,
    pub body: String,
    /// Primary link: the result's target URL.
    pub href: Option<String>,
    /// Secondary link: the displayed URL, used when `href` is missing.
    pub url: Option<String>,
}

impl SearchHit {
    pub fn link(&self) -> &str {
        self.href
            .as_deref()
            .filter(|s| !s.is_empty())
            .or(self.url.as_deref())
            .unwrap_or("")
    }
}

/// External search collaborator.
#[async_trait]
pub trait SearchProvider: Send + Sync {
    async fn search(&self, request: &SearchRequest) -> Result<Vec<SearchHit>>;
}

/// Scrapes DuckDuckGo's HTML results page.
pub struct DuckDuckGoSearch {
    client: Client,
    endpoint: String,
}

impl DuckDuckGoSearch {
    pub fn new(client: Client, endpoint: impl Into<String>) -> Self {
        Self { client, endpoint: endpoint.into() }
    }

    fn form_params(request: &SearchRequest) -> Vec<(&'static str, String)> {
        vec![
            ("q", request.query.clone()),
            ("kl", request.region.clone()),
            ("kp", request.safe_search.ddg_code().to_string()),
            ("df", request.time_limit.ddg_code().to_string()),
        ]
    }
}

#[async_trait]
impl SearchProvider for DuckDuckGoSearch {
    async fn search(&self, request: &SearchRequest) -> Result<Vec<SearchHit>> {
        let resp = self.client
            .post(&self.endpoint)
            .form(&Self::form_params(request))
            .header("Accept", "text/html")
            .send()
            .await?;

        if !resp.status().is_success() {
            bail!("DuckDuckGo HTML search error: {}", resp.status());
        }

        let body = resp.text().await?;
        let hits = parse_results(&body, request.max_results)?;
        debug!("DuckDuckGo returned {} hits for '{}'", hits.len(), request.query);
        Ok(hits)
    }
}

fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| anyhow!("invalid selector '{}': {:?}", css, e))
}

/// Pull result blocks out of a DuckDuckGo HTML page. Blocks without a title are skipped.
pub fn parse_results(html: &str, max_results: usize) -> Result<Vec<SearchHit>> {
    let result_sel = selector(".result")?;
    let link_sel = selector("a.result__a")?;
    let url_sel = selector(".result__url")?;
    let snippet_sel = selector(".result__snippet")?;

    let doc = Html::parse_document(html);
    let mut hits = Vec::new();

    for result in doc.select(&result_sel) {
        if hits.len() >= max_results {
            break;
        }
        let Some(link) = result.select(&link_sel).next() else { continue };

        let title = link.text().collect::<String>().trim().to_string();
        if title.is_empty() {
            continue;
        }

        let href = link.value().attr("href").map(decode_redirect).filter(|s| !s.is_empty());
        let url = result
            .select(&url_sel)
            .next()
            .map(|el| el.text().collect::<String>().trim().to_string())
            .filter(|s| !s.is_empty());
        let body = result
            .select(&snippet_sel)
            .next()
            .map(|el| el.text().collect::<String>().trim().to_string())
            .unwrap_or_default();

        hits.push(SearchHit { title, body, href, url });
    }

    Ok(hits)
}

/// DuckDuckGo wraps targets as `//duckduckgo.com/l/?uddg=<encoded>&rut=...`.
fn decode_redirect(href: &str) -> String {
    if let Some(pos) = href.find("uddg=") {
        let start = pos + 5;
        let end = href[start..].find('&').map(|i| start + i).unwrap_or(href.len());
        let encoded = &href[start..end];
        if !encoded.is_empty() {
            return percent_decode_str(encoded).decode_utf8_lossy().into_owned();
        }
    }
    if let Some(rest) = href.strip_prefix("//") {
        return format!("https://{}", rest);
    }
    href.to_string()
}
