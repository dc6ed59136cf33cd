//! Media device probe.

use tracing::{debug, warn};

use crate::domain::MediaDevices;
use crate::ports::{MediaDeviceInfo, MediaDeviceKind, MediaDeviceSource};

/// Reduce an enumeration to presence flags per device kind.
pub fn classify_devices(devices: &[MediaDeviceInfo]) -> MediaDevices {
    let has = |kind| devices.iter().any(|d| d.kind == kind);
    MediaDevices {
        has_webcam: has(MediaDeviceKind::VideoInput),
        has_microphone: has(MediaDeviceKind::AudioInput),
        has_speakers: has(MediaDeviceKind::AudioOutput),
    }
}

/// Enumerate devices; denial or lack of support yields all-false.
pub async fn probe_media(source: &dyn MediaDeviceSource) -> MediaDevices {
    match source.enumerate().await {
        Ok(devices) => {
            debug!(count = devices.len(), "Enumerated media devices");
            classify_devices(&devices)
        }
        Err(e) => {
            warn!(error = %e, "Media device enumeration failed; assuming no devices");
            MediaDevices::default()
        }
    }
}
