//! REST API client for BitMEX instrument metadata

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, instrument};
use url::Url;

use super::domains::ExchangeDomain;
use super::messages::Instrument;
use super::traits::InstrumentSource;
use crate::common::errors::{ClientError, Result};

/// Path of the instrument listing, relative to the API root
pub const INSTRUMENT_PATH: &str = "instrument";

/// REST API client for the public BitMEX endpoints
#[derive(Debug, Clone)]
pub struct BitmexRestClient {
    /// HTTP client
    client: Client,
    /// API root, always ending with a slash
    base_url: Url,
}

impl BitmexRestClient {
    /// Create a new REST client
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_timeout(base_url, Duration::from_secs(30))
    }

    /// Create a client for a known deployment
    pub fn for_domain(domain: ExchangeDomain, timeout: Duration) -> Result<Self> {
        Self::with_timeout(domain.rest_url(), timeout)
    }

    /// Create a new REST client with custom timeout
    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ClientError::Internal(e.to_string()))?;

        // Url::join drops the last segment unless the base ends with '/'
        let base_url = Url::parse(&format!("{}/", base_url.trim_end_matches('/')))?;

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    async fn fetch_instruments(&self, query: &[(&str, String)]) -> Result<Vec<Instrument>> {
        let mut url = self.base_url.join(INSTRUMENT_PATH)?;
        url.query_pairs_mut().extend_pairs(query);
        debug!("Fetching instruments from: {}", url);

        let response = self.client.get(url).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::InvalidResponse(format!(
                "Server returned status {}: {}",
                status, body
            )));
        }

        let instruments: Vec<Instrument> = response.json().await?;
        Ok(instruments)
    }
}

#[async_trait]
impl InstrumentSource for BitmexRestClient {
    #[instrument(skip(self))]
    async fn list_instruments(&self, start: u64, count: u32) -> Result<Vec<Instrument>> {
        self.fetch_instruments(&[("count", count.to_string()), ("start", start.to_string())])
            .await
    }

    #[instrument(skip(self))]
    async fn get_instrument(&self, symbol: &str) -> Result<Vec<Instrument>> {
        self.fetch_instruments(&[("symbol", symbol.to_string())]).await
    }
}
