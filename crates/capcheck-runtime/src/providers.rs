//! IP-intelligence provider parsers.
//!
//! Each provider deserializes into a private wire struct with every field
//! optional, then maps it onto [`IdentityInfo`]. Schema drift in optional
//! fields degrades to blanks (normalized to `unknown` by the probe); only a
//! missing IP or an explicit provider error rejects the body.

use capcheck_core::domain::IdentityInfo;
use capcheck_core::ports::{IdentityProvider, ProviderParseError};
use serde::Deserialize;
use serde::de::DeserializeOwned;

pub const IPAPI_IS_URL: &str = "https://api.ipapi.is/";
pub const IPAPI_CO_URL: &str = "https://ipapi.co/json/";

fn decode<T: DeserializeOwned>(provider: &str, body: &[u8]) -> Result<T, ProviderParseError> {
    serde_json::from_slice(body).map_err(|source| ProviderParseError::Json {
        provider: provider.to_string(),
        source,
    })
}

fn require_ip(provider: &str, ip: Option<String>) -> Result<String, ProviderParseError> {
    ip.filter(|ip| !ip.trim().is_empty())
        .ok_or_else(|| ProviderParseError::MissingField {
            provider: provider.to_string(),
            field: "ip".to_string(),
        })
}

// ============================================================================
// ipapi.is (primary, anonymizer flags)
// ============================================================================

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct IpApiIsBody {
    ip: Option<String>,
    error: Option<String>,
    is_vpn: bool,
    is_proxy: bool,
    is_tor: bool,
    is_datacenter: bool,
    location: Option<IpApiIsLocation>,
    asn: Option<IpApiIsOrg>,
    company: Option<IpApiIsOrg>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct IpApiIsLocation {
    city: Option<String>,
    state: Option<String>,
    country_code: Option<String>,
    timezone: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct IpApiIsOrg {
    org: Option<String>,
    name: Option<String>,
}

/// Primary provider: reports VPN, proxy and datacenter flags.
#[derive(Debug, Clone)]
pub struct IpApiIsProvider {
    url: String,
}

impl IpApiIsProvider {
    pub const NAME: &'static str = "ipapi.is";

    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

impl Default for IpApiIsProvider {
    fn default() -> Self {
        Self::new(IPAPI_IS_URL)
    }
}

impl IdentityProvider for IpApiIsProvider {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn url(&self) -> &str {
        &self.url
    }

    fn parse(&self, body: &[u8]) -> Result<IdentityInfo, ProviderParseError> {
        let body: IpApiIsBody = decode(Self::NAME, body)?;
        if let Some(message) = body.error {
            return Err(ProviderParseError::ProviderFailure {
                provider: Self::NAME.to_string(),
                message,
            });
        }

        let isp = body
            .asn
            .and_then(|asn| asn.org)
            .or_else(|| body.company.and_then(|company| company.name))
            .unwrap_or_default();
        let location = body.location.unwrap_or_default();

        Ok(IdentityInfo {
            ip: require_ip(Self::NAME, body.ip)?,
            city: location.city.unwrap_or_default(),
            region: location.state.unwrap_or_default(),
            country: location.country_code.unwrap_or_default(),
            timezone: location.timezone.unwrap_or_default(),
            isp,
            is_vpn: body.is_vpn,
            // Tor exits are reported as proxies.
            is_proxy: body.is_proxy || body.is_tor,
            is_hosting: body.is_datacenter,
        })
    }
}

// ============================================================================
// ipapi.co (fallback, geo only)
// ============================================================================

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct IpApiCoBody {
    ip: Option<String>,
    error: bool,
    reason: Option<String>,
    city: Option<String>,
    region: Option<String>,
    country_code: Option<String>,
    country: Option<String>,
    timezone: Option<String>,
    org: Option<String>,
}

/// Fallback provider: coarse geo without anonymizer detection.
#[derive(Debug, Clone)]
pub struct IpApiCoProvider {
    url: String,
}

impl IpApiCoProvider {
    pub const NAME: &'static str = "ipapi.co";

    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

impl Default for IpApiCoProvider {
    fn default() -> Self {
        Self::new(IPAPI_CO_URL)
    }
}

impl IdentityProvider for IpApiCoProvider {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn url(&self) -> &str {
        &self.url
    }

    fn parse(&self, body: &[u8]) -> Result<IdentityInfo, ProviderParseError> {
        let body: IpApiCoBody = decode(Self::NAME, body)?;
        if body.error {
            return Err(ProviderParseError::ProviderFailure {
                provider: Self::NAME.to_string(),
                message: body.reason.unwrap_or_else(|| "unspecified".to_string()),
            });
        }

        Ok(IdentityInfo {
            ip: require_ip(Self::NAME, body.ip)?,
            city: body.city.unwrap_or_default(),
            region: body.region.unwrap_or_default(),
            country: body.country_code.or(body.country).unwrap_or_default(),
            timezone: body.timezone.unwrap_or_default(),
            isp: body.org.unwrap_or_default(),
            is_vpn: false,
            is_proxy: false,
            is_hosting: false,
        })
    }
}
