//! HTTP clients for the provider and for the relay gateway.

use async_trait::async_trait;
use serde::de::IgnoredAny;
use serde_json::Value;
use tracing::debug;

use crate::error::Result;
use crate::models::query::UpstreamRequest;
use crate::models::{QueryRequest, RelayRequest};
use crate::services::market_data::DailyQuoteSource;

/// Talks to the provider directly, attaching the secret token.
///
/// Only the gateway should hold one of these.
pub struct TushareClient {
    base_url: String,
    token: String,
    http: reqwest::Client,
}

impl TushareClient {
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        Self::with_client(base_url, token, reqwest::Client::new())
    }

    pub fn with_client(
        base_url: impl Into<String>,
        token: impl Into<String>,
        http: reqwest::Client,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            token: token.into(),
            http,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Forward a request and return the provider's body as received.
    ///
    /// The body is checked to be JSON but otherwise left byte-for-byte intact.
    pub async fn relay(&self, request: &RelayRequest) -> Result<String> {
        let body = UpstreamRequest {
            token: &self.token,
            request,
        };

        let response = self.http.post(&self.base_url).json(&body).send().await?;
        let status = response.status();
        let text = response.text().await?;
        serde_json::from_str::<IgnoredAny>(&text)?;

        debug!(status = %status, bytes = text.len(), "Upstream response received");
        Ok(text)
    }
}

/// Talks to the relay gateway; carries no credential.
pub struct GatewayClient {
    url: String,
    http: reqwest::Client,
}

impl GatewayClient {
    pub fn new(url: impl Into<String>) -> Self {
        Self::with_client(url, reqwest::Client::new())
    }

    pub fn with_client(url: impl Into<String>, http: reqwest::Client) -> Self {
        Self {
            url: url.into(),
            http,
        }
    }
}

#[async_trait]
impl DailyQuoteSource for GatewayClient {
    async fn query(&self, request: &QueryRequest) -> Result<Value> {
        debug!(
            ts_code = %request.params.ts_code,
            start_date = %request.params.start_date,
            end_date = %request.params.end_date,
            "Querying gateway"
        );
        let text = self
            .http
            .post(&self.url)
            .json(request)
            .send()
            .await?
            .text()
            .await?;
        Ok(serde_json::from_str(&text)?)
    }
}
