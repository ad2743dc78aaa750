use std::sync::Arc;
use tracing::{error, info, warn};

use super::llm::{Generation, TextGenerator};
use crate::modules::gate::SectorQuery;
use crate::modules::perception::NewsDigest;
use crate::utils::text::ist_now;

/// Why a report fell back to a static template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DegradeReason {
    UpstreamStatus(u16),
    MissingApiKey,
    UpstreamError(String),
}

/// Exactly one of these comes out of every synthesis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportOutcome {
    Generated(String),
    Degraded { reason: DegradeReason, report: String },
}

impl ReportOutcome {
    pub fn report(&self) -> &str {
        match self {
            ReportOutcome::Generated(text) => text,
            ReportOutcome::Degraded { report, .. } => report,
        }
    }

    pub fn into_report(self) -> String {
        match self {
            ReportOutcome::Generated(text) => text,
            ReportOutcome::Degraded { report, .. } => report,
        }
    }

    pub fn is_generated(&self) -> bool {
        matches!(self, ReportOutcome::Generated(_))
    }
}

pub fn build_prompt(sector: &str, market_data: &str) -> String {
    format!(
        r#"Analyze this {sector} India market data for trade opportunities.

MARKET DATA:
{market_data}

Generate a MARKDOWN report with these sections:
## Current Trends
## Buy Opportunities (specific stocks)
## Sell Risks
## Trade Summary (actionable today)

Keep it focused on Indian equities."#
    )
}

/// Used when the model answered but refused (bad key, quota, 5xx) or no key is configured.
pub fn fallback_report(sector: &SectorQuery, stamp: &str) -> String {
    format!(
        "# {} Analysis Fallback\n\n\
        **Trends:** Market data unavailable\n\
        **Opportunities:** Check Nifty {} index\n\
        **Generated:** {}",
        sector.title(),
        sector,
        stamp
    )
}

/// Used when the model could not be reached or its answer could not be read.
pub fn unavailable_report(sector: &SectorQuery, stamp: &str) -> String {
    format!(
        "# {} Service Temporary Unavailable\n\n\
        **Status:** AI analysis temporarily down.\n\
        **Manual check:** Search '{} India stock news'.\n\
        **Time:** {}",
        sector.title(),
        sector,
        stamp
    )
}

pub struct ReportSynthesizer {
    generator: Arc<dyn TextGenerator>,
}

impl ReportSynthesizer {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }

    pub async fn synthesize(&self, sector: &SectorQuery, digest: &NewsDigest) -> ReportOutcome {
        let prompt = build_prompt(sector.as_str(), digest.as_str());

        match self.generator.generate(&prompt).await {
            Ok(Generation::Text(text)) => {
                info!("🧠 Report generated for '{}' ({} chars)", sector, text.len());
                ReportOutcome::Generated(text)
            }
            Ok(Generation::Rejected { status }) => {
                warn!("⚠️ Generative API returned {} for '{}', using fallback", status, sector);
                ReportOutcome::Degraded {
                    reason: DegradeReason::UpstreamStatus(status),
                    report: fallback_report(sector, &ist_now()),
                }
            }
            Ok(Generation::NoApiKey) => ReportOutcome::Degraded {
                reason: DegradeReason::MissingApiKey,
                report: fallback_report(sector, &ist_now()),
            },
            Err(e) => {
                error!("❌ Generative API failed for '{}': {:#}", sector, e);
                ReportOutcome::Degraded {
                    reason: DegradeReason::UpstreamError(format!("{:#}", e)),
                    report: unavailable_report(sector, &ist_now()),
                }
            }
        }
    }
}
