use axum::{
    body::Bytes,
    extract::{Query, State},
    Json,
};
use chrono::Utc;
use std::sync::Arc;
use tracing::{info, info_span, warn, Instrument};
use uuid::Uuid;

use super::dto::*;
use super::error::{ApiError, ApiResult};
use super::extract::{BearerToken, ClientIdentifier};
use super::state::AppState;
use crate::modules::gate::SectorQuery;
use crate::utils::text::{ist_now, now_secs};

const DEBUG_SAMPLE_CHARS: usize = 1000;
const DEFAULT_DEBUG_SECTOR: &str = "technology";

/// GET / - readiness
pub async fn root() -> Json<RootResponse> {
    Json(RootResponse {
        message: "Trade Opportunities API READY".into(),
        endpoint: "/analyzesector?sector=pharmaceuticals".into(),
    })
}

/// POST /login - placeholder guest login, single configured credential pair
pub async fn login(
    State(state): State<Arc<AppState>>,
    Query(query): Query<LoginParams>,
    body: Bytes,
) -> ApiResult<Json<LoginResponse>> {
    let form: LoginParams = serde_urlencoded::from_bytes(&body).unwrap_or_default();

    let (Some(username), Some(password)) = (
        query.username.or(form.username),
        query.password.or(form.password),
    ) else {
        return Err(ApiError::BadRequest("username and password are required".into()));
    };

    let auth = &state.settings.auth;
    if username != auth.username || password != auth.password {
        warn!("Login rejected for user '{}'", username);
        return Err(ApiError::Unauthorized("Invalid credentials".into()));
    }

    Ok(Json(LoginResponse {
        access_token: format!("{}_{}", auth.token_prefix, Utc::now().timestamp()),
        token_type: "bearer".into(),
    }))
}

/// GET /debug/news - inspect the digest that would be fed to the model
pub async fn debug_news(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SectorParams>,
) -> Json<DebugNewsResponse> {
    let sector = params.sector.unwrap_or_else(|| DEFAULT_DEBUG_SECTOR.to_string());
    let digest = state.news.fetch_digest(&sector).await;

    Json(DebugNewsResponse {
        market_data_sample: digest.preview(DEBUG_SAMPLE_CHARS).to_string(),
        sector,
    })
}

/// GET /analyzesector - full pipeline: gate, digest, report
pub async fn analyze_sector(
    State(state): State<Arc<AppState>>,
    _token: BearerToken,
    ClientIdentifier(client): ClientIdentifier,
    Query(params): Query<SectorParams>,
) -> ApiResult<Json<AnalysisResponse>> {
    let sector = SectorQuery::parse(params.sector.as_deref().unwrap_or_default())?;

    let admission = state.limiter.admit(&client, now_secs());
    if !admission.allowed {
        warn!("🚫 Rate limited ip={} ({} requests in window)", client, admission.used);
        return Err(ApiError::RateLimited(state.settings.rate_limit.policy_text()));
    }

    let span = info_span!("analyze", request_id = %Uuid::new_v4(), sector = %sector, ip = %client);
    async move {
        info!("Analyzing sector={} from ip={}", sector, client);

        let digest = state.news.fetch_digest(sector.as_str()).await;
        let outcome = state.reports.synthesize(&sector, &digest).await;
        info!(generated = outcome.is_generated(), digest = ?digest.source(), "analysis complete");

        Ok::<_, ApiError>(Json(AnalysisResponse {
            sector: sector.title(),
            report: outcome.into_report(),
            timestamp: ist_now(),
            status: "analysis_complete".into(),
            requests_used: admission.used,
            limit_remaining: admission.remaining(),
        }))
    }
    .instrument(span)
    .await
}
