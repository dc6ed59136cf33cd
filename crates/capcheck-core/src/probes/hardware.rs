//! Hardware probe and device-class heuristics.

use crate::domain::{HardwareInfo, UNKNOWN};
use crate::ports::{HostEnvironment, ScreenMetrics};

/// User-agent fragments identifying handheld devices (matched case-insensitively).
pub const MOBILE_UA_PATTERNS: &[&str] = &[
    "android",
    "webos",
    "iphone",
    "ipad",
    "ipod",
    "blackberry",
    "iemobile",
    "opera mini",
    "mobile",
];

/// A mobile UA whose smaller screen edge exceeds this (CSS px) is a tablet.
pub const TABLET_MIN_SHORT_EDGE_PX: u32 = 600;

/// Coarse device class derived from the user agent and screen size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceClass {
    Desktop,
    Phone,
    Tablet,
}

/// Classify a device from its user agent and (optional) screen geometry.
///
/// A mobile UA is a phone unless the screen's short edge exceeds
/// [`TABLET_MIN_SHORT_EDGE_PX`]; without screen data it stays a phone.
pub fn classify_device(user_agent: &str, screen: Option<&ScreenMetrics>) -> DeviceClass {
    let ua = user_agent.to_ascii_lowercase();
    if !MOBILE_UA_PATTERNS.iter().any(|p| ua.contains(p)) {
        return DeviceClass::Desktop;
    }

    match screen {
        Some(s) if s.short_edge() > TABLET_MIN_SHORT_EDGE_PX => DeviceClass::Tablet,
        _ => DeviceClass::Phone,
    }
}

/// Read processor, memory and platform facts from the host.
///
/// Never fails: a missing or zero core count becomes 1, a missing or
/// non-positive memory estimate stays `None`.
pub fn probe_hardware(host: &dyn HostEnvironment) -> HardwareInfo {
    let cpu_cores = host.logical_cores().filter(|c| *c > 0).unwrap_or(1);
    let ram_gb = host.memory_gb().filter(|gb| gb.is_finite() && *gb > 0.0);
    let platform = host
        .platform()
        .filter(|p| !p.trim().is_empty())
        .unwrap_or_else(|| UNKNOWN.to_string());

    let screen = host.screen();
    let class = host.user_agent().map_or(DeviceClass::Desktop, |ua| {
        classify_device(&ua, screen.as_ref())
    });

    HardwareInfo {
        cpu_cores,
        ram_gb,
        platform,
        is_mobile: class == DeviceClass::Phone,
        is_tablet: class == DeviceClass::Tablet,
    }
}
