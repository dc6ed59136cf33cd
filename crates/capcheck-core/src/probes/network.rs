//! Network quality probe.
//!
//! Latency is the round trip of a small cache-busted request. Throughput is
//! taken from the host's connection hint when one exists; active measurement
//! is noisy, so the timed transfer of a larger payload is only the fallback.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::time::Instant;
use tracing::{debug, warn};

use crate::domain::{MIN_DOWNLOAD_MBPS, NetworkInfo, UNKNOWN};
use crate::ports::{ConnectionHint, HttpTransport, TransportError};

/// Default small endpoint used for latency.
pub const DEFAULT_LATENCY_URL: &str = "https://speed.cloudflare.com/__down?bytes=0";

/// Default payload endpoint used for throughput (~2 MB).
pub const DEFAULT_THROUGHPUT_URL: &str = "https://speed.cloudflare.com/__down?bytes=2000000";

/// Endpoints used by [`NetworkProbe`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkProbeConfig {
    pub latency_url: String,
    pub throughput_url: String,
}

impl Default for NetworkProbeConfig {
    fn default() -> Self {
        Self {
            latency_url: DEFAULT_LATENCY_URL.to_string(),
            throughput_url: DEFAULT_THROUGHPUT_URL.to_string(),
        }
    }
}

/// Compute throughput in Mbps from a transfer size and its duration.
///
/// Returns `None` for a zero duration, which cannot yield a meaningful rate.
#[allow(clippy::cast_precision_loss)] // payload sizes are far below 2^52 bytes
pub fn throughput_mbps(bytes: usize, elapsed: Duration) -> Option<f64> {
    let secs = elapsed.as_secs_f64();
    (secs > 0.0).then(|| (bytes as f64 * 8.0) / secs / 1e6)
}

/// Clamp a bandwidth estimate to the documented floor.
pub fn floor_mbps(mbps: f64) -> f64 {
    if mbps.is_finite() && mbps > MIN_DOWNLOAD_MBPS {
        mbps
    } else {
        MIN_DOWNLOAD_MBPS
    }
}

/// Append a unique query parameter so intermediaries cannot serve a cached copy.
fn cache_busted(url: &str) -> String {
    let sep = if url.contains('?') { '&' } else { '?' };
    format!("{url}{sep}_={}", Utc::now().timestamp_millis())
}

/// Measures latency and downstream bandwidth over an injected transport.
pub struct NetworkProbe {
    transport: Arc<dyn HttpTransport>,
    config: NetworkProbeConfig,
}

impl NetworkProbe {
    pub fn new(transport: Arc<dyn HttpTransport>, config: NetworkProbeConfig) -> Self {
        Self { transport, config }
    }

    /// Measure network quality. Never fails.
    ///
    /// On transport failure latency is 0 and bandwidth falls back to the
    /// hint, or to [`MIN_DOWNLOAD_MBPS`] when there is none.
    pub async fn measure(&self, hint: Option<ConnectionHint>) -> NetworkInfo {
        let hint = hint.unwrap_or_default();
        let hinted_mbps = hint
            .downlink_mbps
            .filter(|mbps| mbps.is_finite() && *mbps > 0.0);

        let (latency_ms, download_mbps) = match self.run(hinted_mbps).await {
            Ok(measured) => measured,
            Err(e) => {
                warn!(error = %e, "Network probe failed; using fallback bandwidth");
                (0, hinted_mbps.unwrap_or(MIN_DOWNLOAD_MBPS))
            }
        };

        let non_empty = |s: Option<String>| {
            s.filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| UNKNOWN.to_string())
        };

        NetworkInfo {
            download_mbps: floor_mbps(download_mbps),
            latency_ms,
            connection_type: non_empty(hint.connection_type),
            effective_type: non_empty(hint.effective_type),
        }
    }

    async fn run(&self, hinted_mbps: Option<f64>) -> Result<(u64, f64), TransportError> {
        let (latency, _) = self.timed_get(&self.config.latency_url).await?;
        let latency_ms = u64::try_from(latency.as_millis()).unwrap_or(u64::MAX);

        if let Some(mbps) = hinted_mbps {
            debug!(latency_ms, mbps, "Using host downlink hint");
            return Ok((latency_ms, mbps));
        }

        let (elapsed, bytes) = self.timed_get(&self.config.throughput_url).await?;
        let mbps = throughput_mbps(bytes, elapsed).unwrap_or(MIN_DOWNLOAD_MBPS);
        debug!(latency_ms, bytes, ?elapsed, mbps, "Timed payload transfer");
        Ok((latency_ms, mbps))
    }

    async fn timed_get(&self, url: &str) -> Result<(Duration, usize), TransportError> {
        let url = cache_busted(url);
        let started = Instant::now();
        let response = self.transport.get(&url).await?.ensure_success(&url)?;
        Ok((started.elapsed(), response.body.len()))
    }
}
