//! reqwest-backed [`HttpTransport`].
//!
//! Every request is bounded by the configured timeout. Non-2xx responses are
//! returned as-is; deciding whether a status is a failure is the probe's job.

use async_trait::async_trait;
use capcheck_core::ports::{HttpResponse, HttpTransport, TransportError};
use tracing::{trace, warn};

use crate::config::ProbeConfig;

/// Production transport over a shared `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Build a client with the configured timeout and user agent.
    ///
    /// Falls back to reqwest's default client if the builder fails.
    pub fn new(config: &ProbeConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(config.http_timeout())
            .user_agent(config.user_agent())
            .build()
            .unwrap_or_else(|e| {
                warn!(error = %e, "Failed to build configured HTTP client; using defaults");
                reqwest::Client::new()
            });
        Self { client }
    }

    /// Wrap an existing client.
    pub const fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl Default for ReqwestTransport {
    fn default() -> Self {
        Self::new(&ProbeConfig::default())
    }
}

fn map_error(url: &str, error: &reqwest::Error) -> TransportError {
    if error.is_timeout() {
        TransportError::Timeout {
            url: url.to_string(),
        }
    } else {
        TransportError::Connection {
            url: url.to_string(),
            reason: error.to_string(),
        }
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn get(&self, url: &str) -> Result<HttpResponse, TransportError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| map_error(url, &e))?;

        let status = response.status().as_u16();
        let body = response.bytes().await.map_err(|e| map_error(url, &e))?;
        trace!(url, status, bytes = body.len(), "HTTP GET complete");

        Ok(HttpResponse::new(status, body.to_vec()))
    }
}
