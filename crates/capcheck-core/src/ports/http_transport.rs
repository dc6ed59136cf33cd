//! HTTP transport port used by the network and identity probes.
//!
//! The transport is injected into the assembler at construction time so tests
//! can substitute canned responses without touching any process-wide client.

use async_trait::async_trait;
use thiserror::Error;

/// Errors raised by an HTTP transport.
///
/// Probes never propagate these; they are logged and mapped to defaults.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The request did not complete within the transport's timeout.
    #[error("Request to {url} timed out")]
    Timeout { url: String },

    /// Connection, TLS or protocol failure.
    #[error("Request to {url} failed: {reason}")]
    Connection { url: String, reason: String },

    /// Server answered with a non-success status.
    #[error("Request to {url} returned status {status}")]
    Status { url: String, status: u16 },
}

/// Raw HTTP response: status and fully read body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub const fn new(status: u16, body: Vec<u8>) -> Self {
        Self { status, body }
    }

    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }

    /// Convert a non-2xx response into [`TransportError::Status`].
    pub fn ensure_success(self, url: &str) -> Result<Self, TransportError> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(TransportError::Status {
                url: url.to_string(),
                status: self.status,
            })
        }
    }
}

/// Port for issuing HTTP GET requests.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Fetch `url` and read the complete body.
    ///
    /// Implementations return `Ok` for any status code; callers decide what
    /// counts as success.
    async fn get(&self, url: &str) -> Result<HttpResponse, TransportError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_range() {
        assert!(HttpResponse::new(200, vec![]).is_success());
        assert!(HttpResponse::new(204, vec![]).is_success());
        assert!(!HttpResponse::new(301, vec![]).is_success());
        assert!(!HttpResponse::new(503, vec![]).is_success());
    }

    #[test]
    fn test_ensure_success_maps_status() {
        let err = HttpResponse::new(429, vec![])
            .ensure_success("https://example.test/")
            .unwrap_err();
        assert!(matches!(err, TransportError::Status { status: 429, .. }));
        assert!(err.to_string().contains("429"));
    }
}
