use std::net::SocketAddr;
use std::time::Duration;
use dotenvy::dotenv;
use tracing::{info, warn, error};

use sector_scout::api::{router, AppState};
use sector_scout::config::Settings;
use sector_scout::init_tracing;
use sector_scout::utils::text::now_secs;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    init_tracing();
    info!("Starting Sector Scout v{}...", env!("CARGO_PKG_VERSION"));

    // 1. 配置
    let settings = Settings::load().map_err(|e| {
        error!("CRITICAL: could not load settings: {:#}", e);
        e
    })?;
    let listen_addr: SocketAddr = settings.server.listen_addr.parse()?;
    let sweep_interval = Duration::from_secs(settings.rate_limit.sweep_interval_sec.max(1));

    if std::env::var(&settings.generation.api_key_env).map(|k| k.trim().is_empty()).unwrap_or(true) {
        warn!("⚠️ {} not set; reports will use the fallback template until it is", settings.generation.api_key_env);
    }

    // 2. 模块初始化
    let state = AppState::from_settings(settings)?;

    // 3. 限流器清理
    let sweeper = state.clone();
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(sweep_interval);
        loop {
            ticker.tick().await;
            sweeper.limiter.sweep(now_secs());
        }
    });

    // 4. HTTP
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(listen_addr).await?;
    info!("✅ Listening on {}", listen_addr);
    axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>()).await?;

    Ok(())
}
