use serde::{Deserialize, Serialize};

/// GET / response
#[derive(Debug, Serialize, Deserialize)]
pub struct RootResponse {
    pub message: String,
    pub endpoint: String,
}

/// POST /login credentials, from the query string or a urlencoded form body
#[derive(Debug, Default, Deserialize)]
pub struct LoginParams {
    pub username: Option<String>,
    pub password: Option<String>,
}

/// POST /login response
#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub token_type: String,
}

#[derive(Debug, Deserialize)]
pub struct SectorParams {
    pub sector: Option<String>,
}

/// GET /debug/news response
#[derive(Debug, Serialize, Deserialize)]
pub struct DebugNewsResponse {
    pub sector: String,
    pub market_data_sample: String,
}

/// GET /analyzesector response
#[derive(Debug, Serialize, Deserialize)]
pub struct AnalysisResponse {
    pub sector: String,
    pub report: String,
    pub timestamp: String,
    pub status: String,
    pub requests_used: usize,
    pub limit_remaining: usize,
}
