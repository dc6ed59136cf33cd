//! Media device enumeration port.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Device kinds as reported by media-device enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MediaDeviceKind {
    #[serde(rename = "videoinput")]
    VideoInput,
    #[serde(rename = "audioinput")]
    AudioInput,
    #[serde(rename = "audiooutput")]
    AudioOutput,
    /// Any kind this engine does not classify.
    #[serde(other)]
    Other,
}

/// One enumerated device.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaDeviceInfo {
    pub kind: MediaDeviceKind,
    #[serde(default)]
    pub label: String,
}

impl MediaDeviceInfo {
    pub fn new(kind: MediaDeviceKind, label: impl Into<String>) -> Self {
        Self {
            kind,
            label: label.into(),
        }
    }
}

/// Enumeration failures. All of them degrade to "no devices".
#[derive(Debug, Error)]
pub enum MediaError {
    #[error("Media device access denied")]
    PermissionDenied,

    #[error("Media device enumeration is not supported on this host")]
    Unsupported,

    #[error("Media device enumeration failed: {0}")]
    Backend(String),
}

/// Port for listing attached audio and video devices.
#[async_trait]
pub trait MediaDeviceSource: Send + Sync {
    async fn enumerate(&self) -> Result<Vec<MediaDeviceInfo>, MediaError>;
}
