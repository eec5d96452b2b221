//! HTTP client for the Synapse bridge API.
//!
//! Endpoints:
//! - GET /bridge?fromChain=..&toChain=..&fromToken=..&toToken=..&amount=..&originUserAddress=..&destAddress=..

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};
use std::time::Duration;
use synapse_types::{BridgeError, Result};
use tracing::debug;

use crate::{routes_from_body, QuoteQuery, QuoteSource, Route};

pub const SYNAPSE_API_URL: &str = "https://api.synapseprotocol.com";

/// Synapse API client.
#[derive(Debug, Clone)]
pub struct SynapseClient {
    base_url: String,
    client: reqwest::Client,
}

impl SynapseClient {
    /// Build a client with JSON default headers.
    ///
    /// `timeout_ms = None` keeps the transport default.
    pub fn new(base_url: &str, timeout_ms: Option<u64>) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let mut builder = reqwest::Client::builder().default_headers(headers);
        if let Some(ms) = timeout_ms {
            builder = builder.timeout(Duration::from_millis(ms));
        }

        Ok(Self::with_client(base_url, builder.build()?))
    }

    /// Use a caller-configured `reqwest::Client`.
    pub fn with_client(base_url: &str, client: reqwest::Client) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch candidate routes.
    ///
    /// GET /bridge
    pub async fn get_bridge_routes(&self, query: &QuoteQuery) -> Result<Vec<Route>> {
        let url = format!("{}/bridge", self.base_url);

        debug!(
            from_chain = query.from_chain,
            to_chain = query.to_chain,
            amount = %query.amount,
            "requesting synapse bridge quote"
        );

        let resp = self.client.get(&url).query(query).send().await?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            return Err(BridgeError::UpstreamStatus { status, body });
        }

        // Body read failures are transport errors; only decoding is a malformed response.
        let bytes = resp.bytes().await?;
        let body: serde_json::Value = serde_json::from_slice(&bytes).map_err(|e| {
            BridgeError::MalformedResponse(format!("failed to parse synapse response: {}", e))
        })?;

        let routes = routes_from_body(&body)?;
        debug!(count = routes.len(), "received synapse routes");
        Ok(routes)
    }
}

#[async_trait]
impl QuoteSource for SynapseClient {
    async fn fetch_routes(&self, query: &QuoteQuery) -> Result<Vec<Route>> {
        self.get_bridge_routes(query).await
    }
}
