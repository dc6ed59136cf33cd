//! Identity/geo probe with two-tier provider fallback.
//!
//! The primary provider reports anonymizer flags, the fallback only coarse
//! geo. VPN detection is a bonus signal; IP and geo are the minimum this
//! probe tries to guarantee.

use std::sync::Arc;

use chrono::{Local, Offset};
use thiserror::Error;
use tracing::{debug, warn};

use crate::domain::{IdentityInfo, UNKNOWN};
use crate::ports::{HttpTransport, IdentityProvider, ProviderParseError, TransportError};

#[derive(Debug, Error)]
enum LookupError {
    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error(transparent)]
    Parse(#[from] ProviderParseError),
}

/// Timezone label derived from the local clock offset, e.g. `UTC+02:00`.
pub fn clock_offset_timezone() -> String {
    let seconds = Local::now().offset().fix().local_minus_utc();
    let sign = if seconds < 0 { '-' } else { '+' };
    let minutes = seconds.abs() / 60;
    format!("UTC{sign}{:02}:{:02}", minutes / 60, minutes % 60)
}

/// Replace blank strings with `unknown` and upper-case the country code.
///
/// A blank provider timezone takes the host's local timezone when known.
fn normalize(mut info: IdentityInfo, local_timezone: Option<&str>) -> IdentityInfo {
    if info.timezone.trim().is_empty() {
        if let Some(tz) = local_timezone {
            info.timezone = tz.to_string();
        }
    }
    for field in [
        &mut info.ip,
        &mut info.city,
        &mut info.region,
        &mut info.country,
        &mut info.timezone,
        &mut info.isp,
    ] {
        let trimmed = field.trim();
        *field = if trimmed.is_empty() {
            UNKNOWN.to_string()
        } else {
            trimmed.to_string()
        };
    }
    if info.country != UNKNOWN {
        info.country = info.country.to_ascii_uppercase();
    }
    info
}

/// Looks up public IP identity through a primary and a fallback provider.
pub struct IdentityProbe {
    transport: Arc<dyn HttpTransport>,
    primary: Arc<dyn IdentityProvider>,
    fallback: Arc<dyn IdentityProvider>,
}

impl IdentityProbe {
    pub fn new(
        transport: Arc<dyn HttpTransport>,
        primary: Arc<dyn IdentityProvider>,
        fallback: Arc<dyn IdentityProvider>,
    ) -> Self {
        Self {
            transport,
            primary,
            fallback,
        }
    }

    /// Resolve the caller's identity. Never fails.
    ///
    /// When both providers fail the record is all `unknown`, with the
    /// timezone taken from `local_timezone` or, failing that, the clock offset.
    pub async fn lookup(&self, local_timezone: Option<String>) -> IdentityInfo {
        let local_timezone = local_timezone.filter(|tz| !tz.trim().is_empty());
        for provider in [&self.primary, &self.fallback] {
            match self.query(provider.as_ref()).await {
                Ok(info) => {
                    debug!(provider = provider.name(), country = %info.country, "Identity resolved");
                    return normalize(info, local_timezone.as_deref());
                }
                Err(e) => {
                    warn!(provider = provider.name(), error = %e, "Identity provider failed");
                }
            }
        }

        let timezone = local_timezone.unwrap_or_else(clock_offset_timezone);
        IdentityInfo::unknown(timezone)
    }

    async fn query(&self, provider: &dyn IdentityProvider) -> Result<IdentityInfo, LookupError> {
        let url = provider.url();
        let response = self.transport.get(url).await?.ensure_success(url)?;
        Ok(provider.parse(&response.body)?)
    }
}
