use reqwest::Client;
use std::time::Duration;
use anyhow::Result;
use tracing::info;

pub struct HttpClientFactory;

impl HttpClientFactory {
    /// Client for the search provider. Short overall timeout; search pages are small.
    pub fn create(timeout: Duration) -> Result<Client> {
        let builder = Client::builder()
            .timeout(timeout)
            .connect_timeout(Duration::from_secs(10))
            .pool_idle_timeout(Duration::from_secs(90))
            .tcp_keepalive(Some(Duration::from_secs(30)))
            .user_agent(concat!("sector_scout/", env!("CARGO_PKG_VERSION")));

        info!("🌐 [Http Client] search client ready (timeout {}s)", timeout.as_secs());

        let client = builder.build()?;
        Ok(client)
    }

    /// Client for the generative API. The overall timeout bounds a whole generateContent call.
    pub fn create_direct(timeout: Duration) -> Result<Client> {
        let builder = Client::builder()
            .timeout(timeout)
            .connect_timeout(Duration::from_secs(10))
            // force HTTP/1.1
            .http1_only();

        let client = builder.build()?;
        Ok(client)
    }
}
