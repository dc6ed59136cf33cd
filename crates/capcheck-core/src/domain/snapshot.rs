//! Capability snapshot value types.
//!
//! A snapshot is the merged, write-once result of one assembly run. Every
//! field is populated; facts the environment could not provide carry the
//! documented defaults from this module instead of being omitted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Placeholder for any string fact the environment could not provide.
pub const UNKNOWN: &str = "unknown";

/// Lowest download speed a snapshot may report, in Mbps.
pub const MIN_DOWNLOAD_MBPS: f64 = 1.0;

/// Network quality measured by the network probe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkInfo {
    /// Estimated downstream throughput, floored at [`MIN_DOWNLOAD_MBPS`].
    pub download_mbps: f64,
    /// Round-trip latency of a small request; 0 when the request failed.
    pub latency_ms: u64,
    /// Physical connection type reported by the host (e.g. "wifi").
    pub connection_type: String,
    /// Effective connection class reported by the host (e.g. "4g").
    pub effective_type: String,
}

impl Default for NetworkInfo {
    fn default() -> Self {
        Self {
            download_mbps: MIN_DOWNLOAD_MBPS,
            latency_ms: 0,
            connection_type: UNKNOWN.to_string(),
            effective_type: UNKNOWN.to_string(),
        }
    }
}

/// Public IP address, coarse geolocation and anonymizer flags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentityInfo {
    pub ip: String,
    pub city: String,
    pub region: String,
    /// ISO 3166-1 alpha-2 country code when known.
    pub country: String,
    pub timezone: String,
    pub isp: String,
    pub is_vpn: bool,
    pub is_proxy: bool,
    pub is_hosting: bool,
}

impl IdentityInfo {
    /// Identity record used when no provider answered.
    pub fn unknown(timezone: impl Into<String>) -> Self {
        Self {
            ip: UNKNOWN.to_string(),
            city: UNKNOWN.to_string(),
            region: UNKNOWN.to_string(),
            country: UNKNOWN.to_string(),
            timezone: timezone.into(),
            isp: UNKNOWN.to_string(),
            is_vpn: false,
            is_proxy: false,
            is_hosting: false,
        }
    }
}

/// Processor, memory and device-class facts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HardwareInfo {
    /// Logical core count, never below 1.
    pub cpu_cores: u32,
    /// Memory estimate in GB. `None` when the host does not expose it.
    #[serde(rename = "ramGB")]
    pub ram_gb: Option<f64>,
    pub platform: String,
    pub is_mobile: bool,
    pub is_tablet: bool,
}

impl Default for HardwareInfo {
    fn default() -> Self {
        Self {
            cpu_cores: 1,
            ram_gb: None,
            platform: UNKNOWN.to_string(),
            is_mobile: false,
            is_tablet: false,
        }
    }
}

/// Screen geometry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayInfo {
    pub width: u32,
    pub height: u32,
    pub avail_width: u32,
    pub avail_height: u32,
    pub color_depth: u32,
    pub pixel_ratio: f64,
    pub orientation: String,
}

impl DisplayInfo {
    /// Display record for a host without any screen.
    pub fn headless() -> Self {
        Self {
            width: 0,
            height: 0,
            avail_width: 0,
            avail_height: 0,
            color_depth: 0,
            pixel_ratio: 1.0,
            orientation: UNKNOWN.to_string(),
        }
    }
}

/// User agent identification and locale/privacy flags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrowserInfo {
    pub name: String,
    pub version: String,
    pub language: String,
    /// Preferred languages, most preferred first.
    pub languages: Vec<String>,
    pub cookies_enabled: bool,
    pub do_not_track: bool,
    pub online: bool,
}

/// Presence of attached capture and playback devices.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaDevices {
    pub has_webcam: bool,
    pub has_microphone: bool,
    pub has_speakers: bool,
}

/// Probe outputs waiting to be merged into a [`CapabilitySnapshot`].
#[derive(Debug, Clone)]
pub struct SnapshotParts {
    pub network: NetworkInfo,
    pub identity: IdentityInfo,
    pub hardware: HardwareInfo,
    pub display: DisplayInfo,
    pub browser: BrowserInfo,
    pub media_devices: MediaDevices,
}

/// Immutable record of a single capability-probe run.
///
/// Fields are private; the only way to obtain a snapshot is through
/// [`CapabilitySnapshot::from_parts`] (used by the assembler) or by
/// deserializing a previously persisted one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CapabilitySnapshot {
    network: NetworkInfo,
    identity: IdentityInfo,
    hardware: HardwareInfo,
    display: DisplayInfo,
    browser: BrowserInfo,
    media_devices: MediaDevices,
    taken_at: DateTime<Utc>,
    assembly_duration_ms: u64,
}

impl CapabilitySnapshot {
    /// Merge probe outputs and stamp them with time and duration.
    pub fn from_parts(
        parts: SnapshotParts,
        taken_at: DateTime<Utc>,
        assembly_duration_ms: u64,
    ) -> Self {
        let SnapshotParts {
            network,
            identity,
            hardware,
            display,
            browser,
            media_devices,
        } = parts;

        Self {
            network,
            identity,
            hardware,
            display,
            browser,
            media_devices,
            taken_at,
            assembly_duration_ms,
        }
    }

    pub const fn network(&self) -> &NetworkInfo {
        &self.network
    }

    pub const fn identity(&self) -> &IdentityInfo {
        &self.identity
    }

    pub const fn hardware(&self) -> &HardwareInfo {
        &self.hardware
    }

    pub const fn display(&self) -> &DisplayInfo {
        &self.display
    }

    pub const fn browser(&self) -> &BrowserInfo {
        &self.browser
    }

    pub const fn media_devices(&self) -> &MediaDevices {
        &self.media_devices
    }

    pub const fn taken_at(&self) -> DateTime<Utc> {
        self.taken_at
    }

    pub const fn assembly_duration_ms(&self) -> u64 {
        self.assembly_duration_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    fn sample() -> CapabilitySnapshot {
        CapabilitySnapshot::from_parts(
            SnapshotParts {
                network: NetworkInfo::default(),
                identity: IdentityInfo::unknown("UTC"),
                hardware: HardwareInfo::default(),
                display: DisplayInfo::headless(),
                browser: BrowserInfo {
                    name: "Unknown".to_string(),
                    version: UNKNOWN.to_string(),
                    language: UNKNOWN.to_string(),
                    languages: vec![],
                    cookies_enabled: false,
                    do_not_track: false,
                    online: false,
                },
                media_devices: MediaDevices::default(),
            },
            Utc::now(),
            12,
        )
    }

    #[test]
    fn test_null_ram_is_serialized_not_omitted() {
        let json = serde_json::to_value(sample()).unwrap();
        let hardware = json.get("hardware").and_then(Value::as_object).unwrap();
        assert!(hardware.contains_key("ramGB"));
        assert!(hardware["ramGB"].is_null());
    }

    #[test]
    fn test_json_round_trip_preserves_snapshot() {
        let snapshot = sample();
        let text = serde_json::to_string(&snapshot).unwrap();
        let restored: CapabilitySnapshot = serde_json::from_str(&text).unwrap();
        assert_eq!(restored, snapshot);
    }

    #[test]
    fn test_defaults_respect_documented_bounds() {
        assert!(NetworkInfo::default().download_mbps >= MIN_DOWNLOAD_MBPS);
        assert_eq!(HardwareInfo::default().cpu_cores, 1);
        assert!(DisplayInfo::headless().pixel_ratio > 0.0);
        assert_eq!(IdentityInfo::unknown("UTC").country, UNKNOWN);
    }
}
