use std::sync::Arc;
use std::time::Duration;

use crate::clients::{HttpTransport, JikanClient, RateLimiter, ReqwestTransport};
use crate::config::Config;
use crate::services::{FeedValidator, SeasonalService};

/// Build a shared HTTP client with reasonable defaults for API calls.
/// Reused by the Jikan client and the feed validator so they share one pool.
fn build_shared_http_client(config: &Config) -> anyhow::Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(config.jikan.request_timeout_seconds.into()))
        .user_agent(config.jikan.user_agent.as_str())
        .pool_max_idle_per_host(10)
        .build()
        .map_err(|e| anyhow::anyhow!("Failed to build shared HTTP client: {e}"))
}

#[derive(Clone)]
pub struct SharedState {
    pub seasonal: Arc<SeasonalService>,

    pub feeds: Arc<FeedValidator>,
}

impl SharedState {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let http_client = build_shared_http_client(config)?;
        let transport: Arc<dyn HttpTransport> =
            Arc::new(ReqwestTransport::with_shared_client(http_client));

        Ok(Self::with_transport(config, transport))
    }

    /// Wires the services over an arbitrary transport.
    pub fn with_transport(config: &Config, transport: Arc<dyn HttpTransport>) -> Self {
        let limiter = Arc::new(RateLimiter::default());
        let jikan = JikanClient::new(transport.clone(), limiter)
            .with_base_url(&config.jikan.base_url);

        Self {
            seasonal: Arc::new(SeasonalService::new(jikan)),
            feeds: Arc::new(FeedValidator::new(transport)),
        }
    }
}
