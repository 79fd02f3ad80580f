//! REST client for the market-data quote endpoint

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, instrument};

use super::messages::QuoteEnvelope;
use crate::common::errors::{BridgeError, Result};
use crate::common::traits::QuoteSource;
use crate::common::types::Quote;

/// REST client for a Yahoo-Finance-style quote endpoint
#[derive(Debug, Clone)]
pub struct QuoteRestClient {
    /// HTTP client
    client: Client,
    /// Base URL for the quote API
    base_url: String,
}

impl QuoteRestClient {
    /// Create a new quote client with the default 30 second timeout
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_timeout(base_url, Duration::from_secs(30))
    }

    /// Create a new quote client with a custom request timeout
    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Fetch the current bid/ask quote for a ticker
    ///
    /// Returns `Ok(None)` when the endpoint has no usable quote — the symbol
    /// is unknown, or bid/ask are missing or zero (the feed does this outside
    /// market hours). HTTP and parse failures are errors.
    #[instrument(skip(self))]
    pub async fn fetch_quote(&self, ticker: &str) -> Result<Option<Quote>> {
        let url = format!("{}/v7/finance/quote?symbols={}", self.base_url, ticker);
        debug!("Fetching quote from: {}", url);

        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(BridgeError::InvalidResponse(format!(
                "Quote API returned status {}: {}",
                status, body
            )));
        }

        let envelope: QuoteEnvelope = response.json().await?;
        let Some(doc) = envelope.quote_response.result.into_iter().next() else {
            debug!("No quote document for {}", ticker);
            return Ok(None);
        };

        match (doc.ask, doc.bid) {
            (Some(ask), Some(bid)) if !ask.is_zero() && !bid.is_zero() => {
                Ok(Some(Quote::new(doc.symbol, ask, bid)))
            }
            _ => {
                debug!("Quote for {} has no valid bid/ask", ticker);
                Ok(None)
            }
        }
    }
}

#[async_trait]
impl QuoteSource for QuoteRestClient {
    async fn get_quote(&self, ticker: &str) -> Result<Option<Quote>> {
        self.fetch_quote(ticker).await
    }
}
