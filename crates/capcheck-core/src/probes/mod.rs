//! Probe functions: one collector per category of environment data.
//!
//! Every probe is infallible from the caller's point of view. I/O failures
//! and missing host capabilities are logged and replaced by the documented
//! defaults, so one degraded source never aborts the others.
//!
//! | Probe    | I/O                         | Entry point                    |
//! |----------|-----------------------------|--------------------------------|
//! | Network  | HTTP (latency + payload)    | [`NetworkProbe::measure`]      |
//! | Identity | HTTP (primary + fallback)   | [`IdentityProbe::lookup`]      |
//! | Media    | device enumeration          | [`probe_media`]                |
//! | Hardware | none                        | [`probe_hardware`]             |
//! | Display  | none                        | [`probe_display`]              |
//! | Browser  | none                        | [`probe_browser`]              |

mod browser;
mod display;
mod hardware;
mod identity;
mod media;
mod network;

#[cfg(test)]
pub(crate) mod testing;

pub use browser::{UNKNOWN_BROWSER, parse_user_agent, probe_browser};
pub use display::probe_display;
pub use hardware::{
    DeviceClass, MOBILE_UA_PATTERNS, TABLET_MIN_SHORT_EDGE_PX, classify_device, probe_hardware,
};
pub use identity::{IdentityProbe, clock_offset_timezone};
pub use media::{classify_devices, probe_media};
pub use network::{
    DEFAULT_LATENCY_URL, DEFAULT_THROUGHPUT_URL, NetworkProbe, NetworkProbeConfig, floor_mbps,
    throughput_mbps,
};
