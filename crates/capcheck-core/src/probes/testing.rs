//! Fake port implementations shared by probe and service unit tests.

use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use crate::domain::IdentityInfo;
use crate::ports::{
    ConnectionHint, HostEnvironment, HttpResponse, HttpTransport, IdentityProvider,
    MediaDeviceInfo, MediaDeviceSource, MediaError, ProviderParseError, ScreenMetrics,
    TransportError,
};

/// Host whose facts are plain fields.
#[derive(Debug, Clone, Default)]
pub struct FakeHost {
    pub logical_cores: Option<u32>,
    pub memory_gb: Option<f64>,
    pub platform: Option<String>,
    pub user_agent: Option<String>,
    pub screen: Option<ScreenMetrics>,
    pub language: Option<String>,
    pub languages: Vec<String>,
    pub cookies_enabled: Option<bool>,
    pub do_not_track: Option<String>,
    pub online: Option<bool>,
    pub connection_hint: Option<ConnectionHint>,
    pub timezone: Option<String>,
}

impl HostEnvironment for FakeHost {
    fn logical_cores(&self) -> Option<u32> {
        self.logical_cores
    }

    fn memory_gb(&self) -> Option<f64> {
        self.memory_gb
    }

    fn platform(&self) -> Option<String> {
        self.platform.clone()
    }

    fn user_agent(&self) -> Option<String> {
        self.user_agent.clone()
    }

    fn screen(&self) -> Option<ScreenMetrics> {
        self.screen.clone()
    }

    fn language(&self) -> Option<String> {
        self.language.clone()
    }

    fn languages(&self) -> Vec<String> {
        self.languages.clone()
    }

    fn cookies_enabled(&self) -> Option<bool> {
        self.cookies_enabled
    }

    fn do_not_track(&self) -> Option<String> {
        self.do_not_track.clone()
    }

    fn online(&self) -> Option<bool> {
        self.online
    }

    fn connection_hint(&self) -> Option<ConnectionHint> {
        self.connection_hint.clone()
    }

    fn timezone(&self) -> Option<String> {
        self.timezone.clone()
    }
}

/// Canned outcome for requests whose URL contains a pattern.
#[derive(Debug, Clone)]
pub enum FakeRoute {
    Respond {
        status: u16,
        body: Vec<u8>,
        delay: Duration,
    },
    Fail {
        delay: Duration,
    },
}

impl FakeRoute {
    pub fn ok(body: impl Into<Vec<u8>>) -> Self {
        Self::Respond {
            status: 200,
            body: body.into(),
            delay: Duration::ZERO,
        }
    }

    pub fn status(status: u16) -> Self {
        Self::Respond {
            status,
            body: Vec::new(),
            delay: Duration::ZERO,
        }
    }

    #[must_use]
    pub fn delayed(self, by: Duration) -> Self {
        match self {
            Self::Respond { status, body, .. } => Self::Respond {
                status,
                body,
                delay: by,
            },
            Self::Fail { .. } => Self::Fail { delay: by },
        }
    }
}

/// Transport answering from a route table. Unrouted URLs fail to connect.
#[derive(Debug, Default)]
pub struct FakeTransport {
    routes: Vec<(String, FakeRoute)>,
    requested: Mutex<Vec<String>>,
}

impl FakeTransport {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn route(mut self, url_contains: &str, route: FakeRoute) -> Self {
        self.routes.push((url_contains.to_string(), route));
        self
    }

    pub fn requested(&self) -> Vec<String> {
        self.requested.lock().unwrap().clone()
    }
}

#[async_trait]
impl HttpTransport for FakeTransport {
    async fn get(&self, url: &str) -> Result<HttpResponse, TransportError> {
        self.requested.lock().unwrap().push(url.to_string());

        let route = self
            .routes
            .iter()
            .find(|(pattern, _)| url.contains(pattern.as_str()))
            .map(|(_, route)| route.clone());

        match route {
            Some(FakeRoute::Respond {
                status,
                body,
                delay,
            }) => {
                tokio::time::sleep(delay).await;
                Ok(HttpResponse::new(status, body))
            }
            Some(FakeRoute::Fail { delay }) => {
                tokio::time::sleep(delay).await;
                Err(TransportError::Connection {
                    url: url.to_string(),
                    reason: "connection reset".to_string(),
                })
            }
            None => Err(TransportError::Connection {
                url: url.to_string(),
                reason: "no route".to_string(),
            }),
        }
    }
}

/// Provider that parses `"ip,country,vpn"` bodies.
pub struct FakeProvider {
    pub name: &'static str,
    pub url: &'static str,
    pub reports_vpn: bool,
}

impl IdentityProvider for FakeProvider {
    fn name(&self) -> &str {
        self.name
    }

    fn url(&self) -> &str {
        self.url
    }

    fn parse(&self, body: &[u8]) -> Result<IdentityInfo, ProviderParseError> {
        let text = String::from_utf8_lossy(body);
        let fields: Vec<&str> = text.split(',').collect();
        // `ip,country,vpn[,timezone]`
        let (ip, country, vpn, timezone) = match fields.as_slice() {
            [ip, country, vpn] => (*ip, *country, *vpn, "America/Chicago"),
            [ip, country, vpn, timezone] => (*ip, *country, *vpn, *timezone),
            _ => {
                return Err(ProviderParseError::MissingField {
                    provider: self.name.to_string(),
                    field: "ip".to_string(),
                });
            }
        };

        Ok(IdentityInfo {
            ip: ip.to_string(),
            city: String::new(),
            region: "Region".to_string(),
            country: country.to_string(),
            timezone: timezone.to_string(),
            isp: "FakeNet".to_string(),
            is_vpn: self.reports_vpn && vpn == "vpn",
            is_proxy: false,
            is_hosting: false,
        })
    }
}

/// Media source returning a fixed result after an optional delay.
pub struct FakeMedia {
    pub devices: Option<Vec<MediaDeviceInfo>>,
    pub delay: Duration,
}

impl FakeMedia {
    pub const fn with_devices(devices: Vec<MediaDeviceInfo>) -> Self {
        Self {
            devices: Some(devices),
            delay: Duration::ZERO,
        }
    }

    pub const fn denied() -> Self {
        Self {
            devices: None,
            delay: Duration::ZERO,
        }
    }
}

#[async_trait]
impl MediaDeviceSource for FakeMedia {
    async fn enumerate(&self) -> Result<Vec<MediaDeviceInfo>, MediaError> {
        tokio::time::sleep(self.delay).await;
        self.devices.clone().ok_or(MediaError::PermissionDenied)
    }
}
