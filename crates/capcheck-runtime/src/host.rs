//! Native [`HostEnvironment`] backed by the operating system.
//!
//! Cores come from `num_cpus`, memory and network interfaces from `sysinfo`,
//! locale and privacy flags from the standard POSIX environment variables.
//! A native process has no screen API, so screen metrics are whatever the
//! configuration supplies.

use std::path::Path;
use std::sync::Arc;

use capcheck_core::ports::{ConnectionHint, HostEnvironment, ScreenMetrics};
use sysinfo::{Networks, System};
use tracing::debug;

use crate::config::ProbeConfig;

const BYTES_PER_GB: f64 = 1024.0 * 1024.0 * 1024.0;

type EnvLookup = Arc<dyn Fn(&str) -> Option<String> + Send + Sync>;

/// Host facts read from the local machine on every call.
#[derive(Clone)]
pub struct SystemHost {
    screen: Option<ScreenMetrics>,
    env: EnvLookup,
    localtime_path: &'static str,
    timezone_path: &'static str,
}

impl std::fmt::Debug for SystemHost {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SystemHost")
            .field("screen", &self.screen)
            .finish_non_exhaustive()
    }
}

impl SystemHost {
    pub fn new(config: &ProbeConfig) -> Self {
        Self {
            screen: config.screen().cloned(),
            env: Arc::new(|key| std::env::var(key).ok()),
            localtime_path: "/etc/localtime",
            timezone_path: "/etc/timezone",
        }
    }

    /// Replace the environment variable source.
    #[must_use]
    pub fn with_env<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String> + Send + Sync + 'static,
    {
        self.env = Arc::new(lookup);
        self
    }

    fn var(&self, key: &str) -> Option<String> {
        (self.env)(key).filter(|v| !v.trim().is_empty())
    }

    fn locale(&self) -> Option<String> {
        ["LC_ALL", "LC_MESSAGES", "LANG"]
            .iter()
            .find_map(|key| self.var(key))
    }
}

/// Convert a POSIX locale (`en_US.UTF-8`) into a language tag (`en-US`).
///
/// Returns `None` for the `C`/`POSIX` locales, which carry no language.
pub fn locale_to_language_tag(locale: &str) -> Option<String> {
    let base = locale
        .split(['.', '@'])
        .next()
        .unwrap_or_default()
        .trim();
    if base.is_empty() || base.eq_ignore_ascii_case("C") || base.eq_ignore_ascii_case("POSIX") {
        return None;
    }
    Some(base.replace('_', "-"))
}

/// IANA zone name from a `/etc/localtime` symlink target.
pub fn timezone_from_zoneinfo_path(path: &Path) -> Option<String> {
    let text = path.to_str()?;
    let (_, zone) = text.split_once("zoneinfo/")?;
    let zone = zone.trim_start_matches("posix/").trim_start_matches("right/");
    (!zone.is_empty()).then(|| zone.to_string())
}

/// Loopback interfaces: `lo` on Linux, `lo0` on macOS and the BSDs.
pub fn is_loopback(name: &str) -> bool {
    name.strip_prefix("lo")
        .is_some_and(|rest| rest.chars().all(|c| c.is_ascii_digit()))
}

/// Connection class suggested by an interface name, if any.
pub fn interface_connection_type(name: &str) -> Option<&'static str> {
    let name = name.to_ascii_lowercase();
    if name.starts_with("wl") || name.starts_with("wifi") || name.starts_with("ath") {
        Some("wifi")
    } else if name.starts_with("eth") || name.starts_with("en") {
        Some("ethernet")
    } else if name.starts_with("wwan") || name.starts_with("rmnet") || name.starts_with("ppp") {
        Some("cellular")
    } else {
        None
    }
}

impl HostEnvironment for SystemHost {
    fn logical_cores(&self) -> Option<u32> {
        u32::try_from(num_cpus::get()).ok()
    }

    #[allow(clippy::cast_precision_loss)] // physical memory is far below 2^52 bytes
    fn memory_gb(&self) -> Option<f64> {
        let mut sys = System::new();
        sys.refresh_memory();
        let total = sys.total_memory();
        (total > 0).then(|| (total as f64 / BYTES_PER_GB * 10.0).round() / 10.0)
    }

    fn platform(&self) -> Option<String> {
        let os = System::name().unwrap_or_else(|| std::env::consts::OS.to_string());
        Some(format!("{os} {}", std::env::consts::ARCH))
    }

    fn user_agent(&self) -> Option<String> {
        None
    }

    fn screen(&self) -> Option<ScreenMetrics> {
        self.screen.clone()
    }

    fn language(&self) -> Option<String> {
        self.locale()
            .and_then(|locale| locale_to_language_tag(&locale))
            .or_else(|| self.languages().into_iter().next())
    }

    fn languages(&self) -> Vec<String> {
        self.var("LANGUAGE")
            .map(|list| {
                list.split(':')
                    .filter_map(locale_to_language_tag)
                    .collect()
            })
            .unwrap_or_default()
    }

    fn cookies_enabled(&self) -> Option<bool> {
        None
    }

    fn do_not_track(&self) -> Option<String> {
        self.var("DO_NOT_TRACK")
    }

    fn online(&self) -> Option<bool> {
        let networks = Networks::new_with_refreshed_list();
        Some(
            networks
                .iter()
                .any(|(name, data)| !is_loopback(name) && data.total_received() > 0),
        )
    }

    fn connection_hint(&self) -> Option<ConnectionHint> {
        let networks = Networks::new_with_refreshed_list();
        let busiest = networks
            .iter()
            .filter_map(|(name, data)| {
                interface_connection_type(name).map(|kind| (kind, data.total_received()))
            })
            .max_by_key(|(_, received)| *received)
            .filter(|(_, received)| *received > 0);

        busiest.map(|(kind, _)| {
            debug!(connection_type = kind, "Classified active network interface");
            ConnectionHint {
                downlink_mbps: None,
                connection_type: Some(kind.to_string()),
                effective_type: None,
            }
        })
    }

    fn timezone(&self) -> Option<String> {
        if let Some(tz) = self.var("TZ") {
            return Some(tz.trim_start_matches(':').to_string());
        }
        if let Ok(contents) = std::fs::read_to_string(self.timezone_path) {
            let tz = contents.trim();
            if !tz.is_empty() {
                return Some(tz.to_string());
            }
        }
        std::fs::read_link(self.localtime_path)
            .ok()
            .and_then(|target| timezone_from_zoneinfo_path(&target))
    }
}
