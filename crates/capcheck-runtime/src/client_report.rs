//! Host backed by facts a browser collected and posted back as JSON.
//!
//! A web front-end reads `navigator`, `screen` and `mediaDevices` on the
//! client and submits them as a [`ClientReport`]. The engine then runs its
//! local probes against the report while measuring network and identity
//! itself. Every key is optional.

use async_trait::async_trait;
use capcheck_core::ports::{
    ConnectionHint, HostEnvironment, MediaDeviceInfo, MediaDeviceSource, MediaError,
    ScreenMetrics,
};
use serde::{Deserialize, Serialize};

/// `screen` as reported by the browser.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ReportedScreen {
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub avail_width: Option<u32>,
    pub avail_height: Option<u32>,
    pub color_depth: Option<u32>,
    pub pixel_ratio: Option<f64>,
    pub orientation: Option<String>,
}

impl ReportedScreen {
    /// Full metrics, or `None` unless both dimensions are known and non-zero.
    fn metrics(&self) -> Option<ScreenMetrics> {
        let width = self.width.filter(|&w| w > 0)?;
        let height = self.height.filter(|&h| h > 0)?;
        let mut metrics = ScreenMetrics::new(width, height, self.pixel_ratio.unwrap_or(1.0));
        metrics.avail_width = self.avail_width.unwrap_or(width);
        metrics.avail_height = self.avail_height.unwrap_or(height);
        if let Some(depth) = self.color_depth {
            metrics.color_depth = depth;
        }
        metrics.orientation.clone_from(&self.orientation);
        Some(metrics)
    }
}

/// `navigator.connection` as reported by the browser.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ReportedConnection {
    pub downlink: Option<f64>,
    #[serde(rename = "type")]
    pub connection_type: Option<String>,
    pub effective_type: Option<String>,
}

/// Raw client facts. Field names follow the browser APIs they come from.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ClientReport {
    pub user_agent: Option<String>,
    pub hardware_concurrency: Option<u32>,
    pub device_memory: Option<f64>,
    pub platform: Option<String>,
    pub screen: Option<ReportedScreen>,
    pub language: Option<String>,
    pub languages: Vec<String>,
    pub cookie_enabled: Option<bool>,
    pub do_not_track: Option<String>,
    pub on_line: Option<bool>,
    pub connection: Option<ReportedConnection>,
    pub timezone: Option<String>,
    /// `None` when the client could not enumerate devices at all.
    pub media_devices: Option<Vec<MediaDeviceInfo>>,
    /// DOMException name from a failed enumeration, e.g. `NotAllowedError`.
    pub media_error: Option<String>,
}

/// [`HostEnvironment`] and [`MediaDeviceSource`] over a [`ClientReport`].
#[derive(Debug, Clone, Default)]
pub struct ClientReportHost {
    report: ClientReport,
}

impl ClientReportHost {
    pub const fn new(report: ClientReport) -> Self {
        Self { report }
    }

    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text).map(Self::new)
    }

    pub const fn report(&self) -> &ClientReport {
        &self.report
    }
}

impl HostEnvironment for ClientReportHost {
    fn logical_cores(&self) -> Option<u32> {
        self.report.hardware_concurrency
    }

    fn memory_gb(&self) -> Option<f64> {
        self.report.device_memory
    }

    fn platform(&self) -> Option<String> {
        self.report.platform.clone()
    }

    fn user_agent(&self) -> Option<String> {
        self.report.user_agent.clone()
    }

    fn screen(&self) -> Option<ScreenMetrics> {
        self.report.screen.as_ref().and_then(ReportedScreen::metrics)
    }

    fn language(&self) -> Option<String> {
        self.report.language.clone()
    }

    fn languages(&self) -> Vec<String> {
        self.report.languages.clone()
    }

    fn cookies_enabled(&self) -> Option<bool> {
        self.report.cookie_enabled
    }

    fn do_not_track(&self) -> Option<String> {
        self.report.do_not_track.clone()
    }

    fn online(&self) -> Option<bool> {
        self.report.on_line
    }

    fn connection_hint(&self) -> Option<ConnectionHint> {
        self.report.connection.as_ref().map(|c| ConnectionHint {
            downlink_mbps: c.downlink,
            connection_type: c.connection_type.clone(),
            effective_type: c.effective_type.clone(),
        })
    }

    fn timezone(&self) -> Option<String> {
        self.report.timezone.clone()
    }
}

#[async_trait]
impl MediaDeviceSource for ClientReportHost {
    async fn enumerate(&self) -> Result<Vec<MediaDeviceInfo>, MediaError> {
        match (&self.report.media_error, &self.report.media_devices) {
            (Some(name), _) if name == "NotAllowedError" || name == "SecurityError" => {
                Err(MediaError::PermissionDenied)
            }
            (Some(name), _) => Err(MediaError::Backend(name.clone())),
            (None, Some(devices)) => Ok(devices.clone()),
            (None, None) => Err(MediaError::Unsupported),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use capcheck_core::ports::MediaDeviceKind;

    const IPAD_REPORT: &str = r#"{
        "userAgent": "Mozilla/5.0 (iPad; CPU OS 17_2 like Mac OS X) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.2 Mobile/15E148 Safari/604.1",
        "hardwareConcurrency": 6,
        "platform": "iPad",
        "screen": {"width": 820, "height": 1180, "colorDepth": 32, "pixelRatio": 2, "orientation": "portrait-primary"},
        "language": "en-AU",
        "languages": ["en-AU", "en"],
        "cookieEnabled": true,
        "doNotTrack": "1",
        "onLine": true,
        "connection": {"downlink": 7.5, "type": "wifi", "effectiveType": "4g"},
        "timezone": "Australia/Sydney",
        "mediaDevices": [
            {"kind": "videoinput", "label": "Front Camera"},
            {"kind": "audioinput", "label": ""},
            {"kind": "audiooutput"}
        ]
    }"#;

    #[test]
    fn test_full_report() {
        let host = ClientReportHost::from_json(IPAD_REPORT).unwrap();
        assert_eq!(host.logical_cores(), Some(6));
        assert_eq!(host.memory_gb(), None);
        assert_eq!(host.platform().as_deref(), Some("iPad"));

        let screen = host.screen().unwrap();
        assert_eq!((screen.width, screen.height), (820, 1180));
        assert_eq!((screen.avail_width, screen.avail_height), (820, 1180));
        assert_eq!(screen.color_depth, 32);
        assert_eq!(screen.orientation.as_deref(), Some("portrait-primary"));

        let hint = host.connection_hint().unwrap();
        assert_eq!(hint.downlink_mbps, Some(7.5));
        assert_eq!(hint.connection_type.as_deref(), Some("wifi"));
        assert_eq!(host.do_not_track().as_deref(), Some("1"));
        assert_eq!(host.timezone().as_deref(), Some("Australia/Sydney"));
    }

    #[tokio::test]
    async fn test_media_devices_from_report() {
        let host = ClientReportHost::from_json(IPAD_REPORT).unwrap();
        let devices = host.enumerate().await.unwrap();
        let kinds: Vec<MediaDeviceKind> = devices.iter().map(|d| d.kind).collect();
        assert_eq!(
            kinds,
            vec![
                MediaDeviceKind::VideoInput,
                MediaDeviceKind::AudioInput,
                MediaDeviceKind::AudioOutput
            ]
        );
    }

    #[tokio::test]
    async fn test_media_errors() {
        let denied = ClientReportHost::from_json(r#"{"mediaError": "NotAllowedError"}"#).unwrap();
        assert!(matches!(
            denied.enumerate().await,
            Err(MediaError::PermissionDenied)
        ));

        let absent = ClientReportHost::from_json("{}").unwrap();
        assert!(matches!(absent.enumerate().await, Err(MediaError::Unsupported)));

        let broken = ClientReportHost::from_json(r#"{"mediaError": "AbortError"}"#).unwrap();
        assert!(matches!(broken.enumerate().await, Err(MediaError::Backend(name)) if name == "AbortError"));
    }

    #[test]
    fn test_empty_report_exposes_nothing() {
        let host = ClientReportHost::from_json("{}").unwrap();
        assert_eq!(host.logical_cores(), None);
        assert_eq!(host.screen(), None);
        assert!(host.languages().is_empty());
        assert_eq!(host.connection_hint(), None);
    }

    #[test]
    fn test_partial_screen_is_ignored() {
        let host = ClientReportHost::from_json(r#"{"screen": {"width": 1024}}"#).unwrap();
        assert_eq!(host.screen(), None);
    }

    #[test]
    fn test_zero_dimension_is_headless() {
        let host =
            ClientReportHost::from_json(r#"{"screen": {"width": 0, "height": 768}}"#).unwrap();
        assert_eq!(host.screen(), None);
        let host =
            ClientReportHost::from_json(r#"{"screen": {"width": 1024, "height": 0}}"#).unwrap();
        assert_eq!(host.screen(), None);
    }

    #[test]
    fn test_unknown_device_kind_tolerated() {
        let host = ClientReportHost::from_json(
            r#"{"mediaDevices": [{"kind": "videooutput", "label": "Projector"}]}"#,
        )
        .unwrap();
        let devices = tokio_test::block_on(host.enumerate()).unwrap();
        assert_eq!(devices[0].kind, MediaDeviceKind::Other);
    }
}
