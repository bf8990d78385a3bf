use std::time::Duration;

use bytes::Bytes;
use reqwest::Client;
use tracing::debug;

use crate::config::SourceConfig;
use crate::error::TransportError;

/// Client for the upstream trending endpoint. Cheap to clone; all clones
/// share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct TrendingClient {
    client: Client,
    endpoint: String,
    request_limit: u32,
    request_timeout: Duration,
}

impl TrendingClient {
    pub fn new(client: Client, config: &SourceConfig) -> Self {
        Self {
            client,
            endpoint: config.endpoint.clone(),
            request_limit: config.request_limit,
            request_timeout: config.request_timeout(),
        }
    }

    /// One GET against the trending endpoint, returning the raw body.
    /// Timeouts and non-2xx statuses surface as `TransportError`; retrying
    /// is the caller's decision.
    pub async fn fetch(&self) -> Result<Bytes, TransportError> {
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[("limit", self.request_limit)])
            .timeout(self.request_timeout)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::Status(status));
        }

        let body = response.bytes().await?;
        debug!(bytes = body.len(), "fetched trending payload");
        Ok(body)
    }
}
