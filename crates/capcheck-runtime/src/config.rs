//! Probe configuration for the runtime adapters.
//!
//! Built programmatically with the `with_*` methods or read from the
//! process environment with [`ProbeConfig::from_env`].

use std::time::Duration;

use capcheck_core::ports::ScreenMetrics;
use capcheck_core::probes::{DEFAULT_LATENCY_URL, DEFAULT_THROUGHPUT_URL, NetworkProbeConfig};
use thiserror::Error;
use url::Url;

use crate::providers::{IPAPI_CO_URL, IPAPI_IS_URL};

pub const ENV_LATENCY_URL: &str = "CAPCHECK_LATENCY_URL";
pub const ENV_THROUGHPUT_URL: &str = "CAPCHECK_THROUGHPUT_URL";
pub const ENV_PRIMARY_IDENTITY_URL: &str = "CAPCHECK_PRIMARY_IDENTITY_URL";
pub const ENV_FALLBACK_IDENTITY_URL: &str = "CAPCHECK_FALLBACK_IDENTITY_URL";
pub const ENV_HTTP_TIMEOUT_SECS: &str = "CAPCHECK_HTTP_TIMEOUT_SECS";
pub const ENV_USER_AGENT: &str = "CAPCHECK_USER_AGENT";
pub const ENV_SCREEN: &str = "CAPCHECK_SCREEN";

/// Default per-request HTTP timeout.
pub const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(10);

/// Invalid configuration value.
#[derive(Debug, Error)]
pub enum ProbeConfigError {
    #[error("{var} is not a valid URL ({value}): {source}")]
    InvalidUrl {
        var: &'static str,
        value: String,
        #[source]
        source: url::ParseError,
    },

    #[error("{var} must use http or https, got '{scheme}'")]
    UnsupportedScheme { var: &'static str, scheme: String },

    #[error("{var} must be a positive number of seconds, got '{value}'")]
    InvalidTimeout { var: &'static str, value: String },

    #[error("{var} must look like WIDTHxHEIGHT or WIDTHxHEIGHT@RATIO, got '{value}'")]
    InvalidScreen { var: &'static str, value: String },
}

/// Configuration for the HTTP transport, identity providers and native host.
///
/// # Example
///
/// ```
/// use capcheck_runtime::ProbeConfig;
/// use std::time::Duration;
///
/// let config = ProbeConfig::new()
///     .with_http_timeout(Duration::from_secs(5))
///     .with_user_agent("onboarding-check/1.0");
/// ```
#[derive(Debug, Clone)]
pub struct ProbeConfig {
    pub(crate) latency_url: String,
    pub(crate) throughput_url: String,
    pub(crate) primary_identity_url: String,
    pub(crate) fallback_identity_url: String,
    pub(crate) http_timeout: Duration,
    pub(crate) user_agent: String,
    pub(crate) screen: Option<ScreenMetrics>,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            latency_url: DEFAULT_LATENCY_URL.to_string(),
            throughput_url: DEFAULT_THROUGHPUT_URL.to_string(),
            primary_identity_url: IPAPI_IS_URL.to_string(),
            fallback_identity_url: IPAPI_CO_URL.to_string(),
            http_timeout: DEFAULT_HTTP_TIMEOUT,
            user_agent: concat!("capcheck/", env!("CARGO_PKG_VERSION")).to_string(),
            screen: None,
        }
    }
}

impl ProbeConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Read overrides from the process environment.
    ///
    /// Unset or blank variables keep their defaults.
    pub fn from_env() -> Result<Self, ProbeConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Like [`ProbeConfig::from_env`] but with an injectable variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ProbeConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        if let Some(value) = get(ENV_LATENCY_URL) {
            config.latency_url = parse_url(ENV_LATENCY_URL, &value)?;
        }
        if let Some(value) = get(ENV_THROUGHPUT_URL) {
            config.throughput_url = parse_url(ENV_THROUGHPUT_URL, &value)?;
        }
        if let Some(value) = get(ENV_PRIMARY_IDENTITY_URL) {
            config.primary_identity_url = parse_url(ENV_PRIMARY_IDENTITY_URL, &value)?;
        }
        if let Some(value) = get(ENV_FALLBACK_IDENTITY_URL) {
            config.fallback_identity_url = parse_url(ENV_FALLBACK_IDENTITY_URL, &value)?;
        }
        if let Some(value) = get(ENV_HTTP_TIMEOUT_SECS) {
            config.http_timeout = parse_timeout(&value)?;
        }
        if let Some(value) = get(ENV_USER_AGENT) {
            config.user_agent = value.trim().to_string();
        }
        if let Some(value) = get(ENV_SCREEN) {
            config.screen = Some(parse_screen(&value)?);
        }

        Ok(config)
    }

    #[must_use]
    pub fn with_latency_url(mut self, url: impl Into<String>) -> Self {
        self.latency_url = url.into();
        self
    }

    #[must_use]
    pub fn with_throughput_url(mut self, url: impl Into<String>) -> Self {
        self.throughput_url = url.into();
        self
    }

    /// Defaults to `https://api.ipapi.is/`.
    #[must_use]
    pub fn with_primary_identity_url(mut self, url: impl Into<String>) -> Self {
        self.primary_identity_url = url.into();
        self
    }

    /// Defaults to `https://ipapi.co/json/`.
    #[must_use]
    pub fn with_fallback_identity_url(mut self, url: impl Into<String>) -> Self {
        self.fallback_identity_url = url.into();
        self
    }

    /// Per-request timeout. Defaults to 10 seconds.
    #[must_use]
    pub const fn with_http_timeout(mut self, timeout: Duration) -> Self {
        self.http_timeout = timeout;
        self
    }

    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Screen geometry reported by the native host, which cannot read it.
    #[must_use]
    pub fn with_screen(mut self, screen: ScreenMetrics) -> Self {
        self.screen = Some(screen);
        self
    }

    pub fn latency_url(&self) -> &str {
        &self.latency_url
    }

    pub fn throughput_url(&self) -> &str {
        &self.throughput_url
    }

    pub fn primary_identity_url(&self) -> &str {
        &self.primary_identity_url
    }

    pub fn fallback_identity_url(&self) -> &str {
        &self.fallback_identity_url
    }

    pub const fn http_timeout(&self) -> Duration {
        self.http_timeout
    }

    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    pub const fn screen(&self) -> Option<&ScreenMetrics> {
        self.screen.as_ref()
    }

    /// Endpoints for the network probe.
    pub fn network(&self) -> NetworkProbeConfig {
        NetworkProbeConfig {
            latency_url: self.latency_url.clone(),
            throughput_url: self.throughput_url.clone(),
        }
    }
}

fn parse_url(var: &'static str, value: &str) -> Result<String, ProbeConfigError> {
    let value = value.trim();
    let url = Url::parse(value).map_err(|source| ProbeConfigError::InvalidUrl {
        var,
        value: value.to_string(),
        source,
    })?;
    match url.scheme() {
        "http" | "https" => Ok(url.into()),
        other => Err(ProbeConfigError::UnsupportedScheme {
            var,
            scheme: other.to_string(),
        }),
    }
}

fn parse_timeout(value: &str) -> Result<Duration, ProbeConfigError> {
    value
        .trim()
        .parse::<u64>()
        .ok()
        .filter(|secs| *secs > 0)
        .map(Duration::from_secs)
        .ok_or_else(|| ProbeConfigError::InvalidTimeout {
            var: ENV_HTTP_TIMEOUT_SECS,
            value: value.to_string(),
        })
}

/// Parse `WIDTHxHEIGHT[@RATIO]`, e.g. `2560x1440@2`.
pub fn parse_screen(value: &str) -> Result<ScreenMetrics, ProbeConfigError> {
    let invalid = || ProbeConfigError::InvalidScreen {
        var: ENV_SCREEN,
        value: value.to_string(),
    };

    let trimmed = value.trim();
    let (geometry, ratio) = match trimmed.split_once('@') {
        Some((geometry, ratio)) => (geometry, Some(ratio)),
        None => (trimmed, None),
    };
    let (width, height) = geometry
        .split_once(['x', 'X'])
        .ok_or_else(invalid)?;
    let width: u32 = width.trim().parse().map_err(|_| invalid())?;
    let height: u32 = height.trim().parse().map_err(|_| invalid())?;
    let ratio = match ratio {
        Some(r) => r
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|r| r.is_finite() && *r > 0.0)
            .ok_or_else(invalid)?,
        None => 1.0,
    };

    if width == 0 || height == 0 {
        return Err(invalid());
    }
    Ok(ScreenMetrics::new(width, height, ratio))
}
