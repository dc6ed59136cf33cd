//! Host environment port for synchronous introspection.
//!
//! The host is whatever exposes the client's platform facts: the native OS
//! the engine runs on, or a report collected by a browser and posted back.
//! Every getter is optional because not every host exposes every fact; an
//! absent value is a capability gap, not an error.

use serde::{Deserialize, Serialize};

/// Screen geometry as reported by the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScreenMetrics {
    pub width: u32,
    pub height: u32,
    pub avail_width: u32,
    pub avail_height: u32,
    pub color_depth: u32,
    pub pixel_ratio: f64,
    pub orientation: Option<String>,
}

impl ScreenMetrics {
    /// Full-screen metrics with no reserved area and 24-bit color.
    pub const fn new(width: u32, height: u32, pixel_ratio: f64) -> Self {
        Self {
            width,
            height,
            avail_width: width,
            avail_height: height,
            color_depth: 24,
            pixel_ratio,
            orientation: None,
        }
    }

    /// The smaller of width and height.
    pub fn short_edge(&self) -> u32 {
        self.width.min(self.height)
    }
}

/// Native connection-quality hint, when the host exposes one.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionHint {
    /// Downlink estimate in Mbps.
    pub downlink_mbps: Option<f64>,
    pub connection_type: Option<String>,
    pub effective_type: Option<String>,
}

/// Port for synchronous platform introspection.
pub trait HostEnvironment: Send + Sync {
    /// Logical processor count.
    fn logical_cores(&self) -> Option<u32>;

    /// Memory estimate in GB.
    fn memory_gb(&self) -> Option<f64>;

    /// Platform string (OS and architecture).
    fn platform(&self) -> Option<String>;

    /// User-agent string identifying the client.
    fn user_agent(&self) -> Option<String>;

    /// Screen geometry. `None` for headless hosts.
    fn screen(&self) -> Option<ScreenMetrics>;

    /// Primary locale, e.g. `en-US`.
    fn language(&self) -> Option<String>;

    /// Preferred locales, most preferred first.
    fn languages(&self) -> Vec<String>;

    fn cookies_enabled(&self) -> Option<bool>;

    /// Raw do-not-track preference (`"1"`, `"0"`, `"unspecified"`...).
    fn do_not_track(&self) -> Option<String>;

    fn online(&self) -> Option<bool>;

    fn connection_hint(&self) -> Option<ConnectionHint>;

    /// IANA timezone name of the host clock.
    fn timezone(&self) -> Option<String>;
}
