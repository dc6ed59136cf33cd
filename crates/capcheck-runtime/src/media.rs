//! OS media device enumeration.
//!
//! Linux exposes capture devices as `/dev/video*` nodes and ALSA PCM
//! streams in `/proc/asound/pcm`. Other platforms report
//! [`MediaError::Unsupported`].

use std::io;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use capcheck_core::ports::{MediaDeviceInfo, MediaDeviceKind, MediaDeviceSource, MediaError};
use tracing::debug;

#[derive(Debug, Clone)]
struct MediaPaths {
    dev_dir: PathBuf,
    pcm_file: PathBuf,
}

/// Enumerates media devices from the local device tree.
#[derive(Debug, Clone)]
pub struct SystemMediaDevices {
    paths: Option<MediaPaths>,
}

impl SystemMediaDevices {
    /// Standard locations on Linux; unsupported elsewhere.
    pub fn new() -> Self {
        let paths = cfg!(target_os = "linux").then(|| MediaPaths {
            dev_dir: PathBuf::from("/dev"),
            pcm_file: PathBuf::from("/proc/asound/pcm"),
        });
        Self { paths }
    }

    /// Scan an alternative device directory and PCM listing.
    pub fn with_paths(dev_dir: impl Into<PathBuf>, pcm_file: impl Into<PathBuf>) -> Self {
        Self {
            paths: Some(MediaPaths {
                dev_dir: dev_dir.into(),
                pcm_file: pcm_file.into(),
            }),
        }
    }
}

impl Default for SystemMediaDevices {
    fn default() -> Self {
        Self::new()
    }
}

fn io_to_media(error: &io::Error) -> MediaError {
    if error.kind() == io::ErrorKind::PermissionDenied {
        MediaError::PermissionDenied
    } else {
        MediaError::Backend(error.to_string())
    }
}

/// Parse ALSA's PCM listing.
///
/// Lines look like `00-00: ALC892 Analog : ALC892 Analog : playback 1 : capture 1`.
pub fn parse_pcm_listing(listing: &str) -> Vec<MediaDeviceInfo> {
    let mut devices = Vec::new();
    for line in listing.lines() {
        let mut fields = line.split(':').map(str::trim);
        let Some(_id) = fields.next() else { continue };
        let label = fields.next().unwrap_or_default().to_string();

        for field in fields {
            if field.starts_with("capture") {
                devices.push(MediaDeviceInfo::new(MediaDeviceKind::AudioInput, label.clone()));
            } else if field.starts_with("playback") {
                devices.push(MediaDeviceInfo::new(MediaDeviceKind::AudioOutput, label.clone()));
            }
        }
    }
    devices
}

async fn video_nodes(dev_dir: &Path) -> Result<Vec<MediaDeviceInfo>, MediaError> {
    let mut entries = tokio::fs::read_dir(dev_dir)
        .await
        .map_err(|e| io_to_media(&e))?;
    let mut devices = Vec::new();
    while let Some(entry) = entries.next_entry().await.map_err(|e| io_to_media(&e))? {
        let name = entry.file_name().to_string_lossy().into_owned();
        let is_video_node = name
            .strip_prefix("video")
            .is_some_and(|n| !n.is_empty() && n.chars().all(|c| c.is_ascii_digit()));
        if is_video_node {
            devices.push(MediaDeviceInfo::new(MediaDeviceKind::VideoInput, name));
        }
    }
    devices.sort_by(|a, b| a.label.cmp(&b.label));
    Ok(devices)
}

#[async_trait]
impl MediaDeviceSource for SystemMediaDevices {
    async fn enumerate(&self) -> Result<Vec<MediaDeviceInfo>, MediaError> {
        let Some(paths) = &self.paths else {
            return Err(MediaError::Unsupported);
        };

        let mut devices = video_nodes(&paths.dev_dir).await?;

        match tokio::fs::read_to_string(&paths.pcm_file).await {
            Ok(listing) => devices.extend(parse_pcm_listing(&listing)),
            // No sound subsystem loaded: no audio devices.
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %paths.pcm_file.display(), "No PCM listing");
            }
            Err(e) => return Err(io_to_media(&e)),
        }

        debug!(count = devices.len(), "Enumerated media devices");
        Ok(devices)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const PCM: &str = "\
00-00: ALC3246 Analog : ALC3246 Analog : playback 1 : capture 1
00-03: HDMI 0 : HDMI 0 : playback 1
01-00: USB Audio : USB Audio : capture 1
";

    fn fake_tree(video_nodes: &[&str], pcm: Option<&str>) -> TempDir {
        let dir = TempDir::new().unwrap();
        let dev = dir.path().join("dev");
        fs::create_dir(&dev).unwrap();
        for node in video_nodes {
            fs::write(dev.join(node), b"").unwrap();
        }
        if let Some(pcm) = pcm {
            fs::write(dir.path().join("pcm"), pcm).unwrap();
        }
        dir
    }

    fn source(dir: &TempDir) -> SystemMediaDevices {
        SystemMediaDevices::with_paths(dir.path().join("dev"), dir.path().join("pcm"))
    }

    #[test]
    fn test_parse_pcm_listing() {
        let devices = parse_pcm_listing(PCM);
        let count = |kind: MediaDeviceKind| devices.iter().filter(|d| d.kind == kind).count();
        assert_eq!(count(MediaDeviceKind::AudioOutput), 2);
        assert_eq!(count(MediaDeviceKind::AudioInput), 2);
        assert_eq!(devices[0].label, "ALC3246 Analog");
    }

    #[test]
    fn test_parse_empty_listing() {
        assert!(parse_pcm_listing("").is_empty());
    }

    #[tokio::test]
    async fn test_enumerates_video_and_audio() {
        let dir = fake_tree(&["video0", "video1", "videodev", "null", "tty0"], Some(PCM));
        let devices = source(&dir).enumerate().await.unwrap();

        let video: Vec<&str> = devices
            .iter()
            .filter(|d| d.kind == MediaDeviceKind::VideoInput)
            .map(|d| d.label.as_str())
            .collect();
        assert_eq!(video, vec!["video0", "video1"]);
        assert_eq!(devices.len(), 6);
    }

    #[tokio::test]
    async fn test_missing_pcm_means_no_audio() {
        let dir = fake_tree(&["video0"], None);
        let devices = source(&dir).enumerate().await.unwrap();
        assert_eq!(devices.len(), 1);
        assert_eq!(devices[0].kind, MediaDeviceKind::VideoInput);
    }

    #[tokio::test]
    async fn test_missing_dev_dir_is_backend_error() {
        let dir = TempDir::new().unwrap();
        let err = source(&dir).enumerate().await.unwrap_err();
        assert!(matches!(err, MediaError::Backend(_)));
    }
}
