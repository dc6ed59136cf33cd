//! Requirement evaluator.
//!
//! Pure function from a snapshot and a sparse spec to an ordered report.
//! Fields are visited in a fixed order so reports render identically for
//! identical inputs; the order has no effect on the verdict.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::domain::{CapabilitySnapshot, CriterionResult, EvaluationReport, RequirementSpec};

pub const CRITERION_INTERNET_SPEED: &str = "Internet Speed";
pub const CRITERION_RAM: &str = "RAM";
pub const CRITERION_CPU_CORES: &str = "CPU Cores";
pub const CRITERION_SCREEN_WIDTH: &str = "Screen Width";
pub const CRITERION_SCREEN_HEIGHT: &str = "Screen Height";
pub const CRITERION_WEBCAM: &str = "Webcam";
pub const CRITERION_MICROPHONE: &str = "Microphone";
pub const CRITERION_VPN: &str = "VPN/Proxy";
pub const CRITERION_COUNTRY: &str = "Country";

/// How a RAM minimum is judged when the snapshot's memory is unknown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnknownRamPolicy {
    /// Leave the criterion out of the verdict and list it as undetermined.
    #[default]
    Undetermined,
    /// Record a failing criterion.
    Fail,
}

/// Tunables for [`RequirementEvaluator`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluationPolicy {
    pub unknown_ram: UnknownRamPolicy,
}

/// Evaluates snapshots against requirement specs.
#[derive(Debug, Clone, Copy, Default)]
pub struct RequirementEvaluator {
    policy: EvaluationPolicy,
}

/// Evaluate with the default policy.
pub fn evaluate(snapshot: &CapabilitySnapshot, spec: &RequirementSpec) -> EvaluationReport {
    RequirementEvaluator::new().evaluate(snapshot, spec)
}

impl RequirementEvaluator {
    pub fn new() -> Self {
        Self::default()
    }

    pub const fn with_policy(policy: EvaluationPolicy) -> Self {
        Self { policy }
    }

    pub const fn policy(&self) -> EvaluationPolicy {
        self.policy
    }

    /// Produce one criterion per field present in `spec`, in fixed order.
    pub fn evaluate(&self, snapshot: &CapabilitySnapshot, spec: &RequirementSpec) -> EvaluationReport {
        let mut criteria = Vec::new();
        let mut undetermined = Vec::new();

        let network = snapshot.network();
        let hardware = snapshot.hardware();
        let display = snapshot.display();
        let media = snapshot.media_devices();
        let identity = snapshot.identity();

        if let Some(min) = spec.min_internet_speed_mbps {
            criteria.push(CriterionResult::new(
                CRITERION_INTERNET_SPEED,
                format!(">= {} Mbps", fmt_threshold(min)),
                format!("{:.1} Mbps", network.download_mbps),
                network.download_mbps >= min,
            ));
        }

        if let Some(min) = spec.min_ram_gb {
            match (hardware.ram_gb, self.policy.unknown_ram) {
                (Some(ram), _) => criteria.push(CriterionResult::new(
                    CRITERION_RAM,
                    format!(">= {} GB", fmt_threshold(min)),
                    format!("{ram:.1} GB"),
                    ram >= min,
                )),
                (None, UnknownRamPolicy::Fail) => criteria.push(CriterionResult::new(
                    CRITERION_RAM,
                    format!(">= {} GB", fmt_threshold(min)),
                    "unknown",
                    false,
                )),
                (None, UnknownRamPolicy::Undetermined) => {
                    undetermined.push(CRITERION_RAM.to_string());
                }
            }
        }

        if let Some(min) = spec.min_cpu_cores {
            criteria.push(CriterionResult::new(
                CRITERION_CPU_CORES,
                format!(">= {min} cores"),
                format!("{} cores", hardware.cpu_cores),
                hardware.cpu_cores >= min,
            ));
        }

        if let Some(min) = spec.min_screen_width {
            criteria.push(CriterionResult::new(
                CRITERION_SCREEN_WIDTH,
                format!(">= {min} px"),
                format!("{} px", display.width),
                display.width >= min,
            ));
        }

        if let Some(min) = spec.min_screen_height {
            criteria.push(CriterionResult::new(
                CRITERION_SCREEN_HEIGHT,
                format!(">= {min} px"),
                format!("{} px", display.height),
                display.height >= min,
            ));
        }

        if let Some(required) = spec.requires_webcam {
            criteria.push(device_criterion(CRITERION_WEBCAM, required, media.has_webcam));
        }

        if let Some(required) = spec.requires_microphone {
            criteria.push(device_criterion(
                CRITERION_MICROPHONE,
                required,
                media.has_microphone,
            ));
        }

        if let Some(disallow) = spec.disallow_vpn {
            let actual = match (identity.is_vpn, identity.is_proxy) {
                (true, true) => "VPN and proxy detected",
                (true, false) => "VPN detected",
                (false, true) => "proxy detected",
                (false, false) => "none detected",
            };
            criteria.push(CriterionResult::new(
                CRITERION_VPN,
                if disallow { "no VPN or proxy" } else { "VPN allowed" },
                actual,
                !disallow || !(identity.is_vpn || identity.is_proxy),
            ));
        }

        if let Some(ref allowed) = spec.allowed_countries {
            criteria.push(country_criterion(allowed, &identity.country));
        }

        EvaluationReport::new(criteria, undetermined)
    }
}

fn device_criterion(name: &str, required: bool, present: bool) -> CriterionResult {
    CriterionResult::new(
        name,
        if required { "required" } else { "not required" },
        if present { "detected" } else { "not detected" },
        !required || present,
    )
}

fn country_criterion(allowed: &BTreeSet<String>, country: &str) -> CriterionResult {
    let allowed: Vec<&str> = allowed
        .iter()
        .map(|c| c.trim())
        .filter(|c| !c.is_empty())
        .collect();

    if allowed.is_empty() {
        return CriterionResult::new(CRITERION_COUNTRY, "any country", country, true);
    }

    let passed = allowed.iter().any(|c| c.eq_ignore_ascii_case(country));
    CriterionResult::new(
        CRITERION_COUNTRY,
        format!("one of {}", allowed.join(", ")),
        country,
        passed,
    )
}

/// Render a threshold without a trailing `.0` for whole numbers.
fn fmt_threshold(value: f64) -> String {
    if value.fract().abs() < f64::EPSILON && value.abs() < 1e15 {
        format!("{value:.0}")
    } else {
        format!("{value}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        BrowserInfo, DisplayInfo, HardwareInfo, IdentityInfo, MediaDevices, NetworkInfo,
        SnapshotParts,
    };
    use chrono::Utc;

    fn snapshot_with(
        network: NetworkInfo,
        hardware: HardwareInfo,
        identity: IdentityInfo,
        media: MediaDevices,
    ) -> CapabilitySnapshot {
        CapabilitySnapshot::from_parts(
            SnapshotParts {
                network,
                identity,
                hardware,
                display: DisplayInfo {
                    width: 1920,
                    height: 1080,
                    avail_width: 1920,
                    avail_height: 1040,
                    color_depth: 24,
                    pixel_ratio: 1.0,
                    orientation: "landscape-primary".to_string(),
                },
                browser: BrowserInfo {
                    name: "Firefox".to_string(),
                    version: "121.0".to_string(),
                    language: "en-US".to_string(),
                    languages: vec!["en-US".to_string()],
                    cookies_enabled: true,
                    do_not_track: false,
                    online: true,
                },
                media_devices: media,
            },
            Utc::now(),
            250,
        )
    }

    fn sample() -> CapabilitySnapshot {
        let mut identity = IdentityInfo::unknown("America/New_York");
        identity.country = "US".to_string();
        snapshot_with(
            NetworkInfo {
                download_mbps: 35.0,
                latency_ms: 20,
                ..NetworkInfo::default()
            },
            HardwareInfo {
                cpu_cores: 4,
                ram_gb: Some(8.0),
                ..HardwareInfo::default()
            },
            identity,
            MediaDevices {
                has_webcam: true,
                has_microphone: false,
                has_speakers: true,
            },
        )
    }

    #[test]
    fn test_empty_spec_passes_with_no_criteria() {
        let report = evaluate(&sample(), &RequirementSpec::new());
        assert!(report.criteria.is_empty());
        assert!(report.overall_passed);
    }

    #[test]
    fn test_end_to_end_all_pass() {
        let spec = RequirementSpec::new()
            .with_min_internet_speed_mbps(25.0)
            .with_min_cpu_cores(2)
            .with_requires_webcam(true);
        let report = evaluate(&sample(), &spec);

        assert_eq!(report.criteria.len(), 3);
        assert!(report.criteria.iter().all(|c| c.passed));
        assert!(report.overall_passed);
        let names: Vec<_> = report.criteria.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec![CRITERION_INTERNET_SPEED, CRITERION_CPU_CORES, CRITERION_WEBCAM]);
    }

    #[test]
    fn test_end_to_end_speed_failure() {
        let spec = RequirementSpec::new().with_min_internet_speed_mbps(50.0);
        let report = evaluate(&sample(), &spec);
        assert_eq!(report.criteria.len(), 1);
        assert!(!report.criteria[0].passed);
        assert!(!report.overall_passed);
        assert_eq!(report.criteria[0].required_description, ">= 50 Mbps");
        assert_eq!(report.criteria[0].actual_description, "35.0 Mbps");
    }

    #[test]
    fn test_fixed_order_regardless_of_construction_order() {
        let spec = RequirementSpec::new()
            .with_allowed_countries(["US"])
            .with_disallow_vpn(true)
            .with_requires_microphone(false)
            .with_requires_webcam(true)
            .with_min_screen_height(720)
            .with_min_screen_width(1280)
            .with_min_cpu_cores(2)
            .with_min_ram_gb(4.0)
            .with_min_internet_speed_mbps(10.0);

        let names: Vec<_> = evaluate(&sample(), &spec)
            .criteria
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(
            names,
            vec![
                CRITERION_INTERNET_SPEED,
                CRITERION_RAM,
                CRITERION_CPU_CORES,
                CRITERION_SCREEN_WIDTH,
                CRITERION_SCREEN_HEIGHT,
                CRITERION_WEBCAM,
                CRITERION_MICROPHONE,
                CRITERION_VPN,
                CRITERION_COUNTRY,
            ]
        );
    }

    #[test]
    fn test_country_allow_list() {
        let spec = RequirementSpec::new().with_allowed_countries(["US"]);
        assert!(evaluate(&sample(), &spec).overall_passed);

        let mut identity = IdentityInfo::unknown("America/Mexico_City");
        identity.country = "MX".to_string();
        let mexico = snapshot_with(
            NetworkInfo::default(),
            HardwareInfo::default(),
            identity,
            MediaDevices::default(),
        );
        let report = evaluate(&mexico, &spec);
        assert!(!report.overall_passed);
        assert_eq!(report.criteria[0].actual_description, "MX");
    }

    #[test]
    fn test_country_match_is_case_insensitive() {
        let spec = RequirementSpec::new().with_allowed_countries(["us", "ca"]);
        let report = evaluate(&sample(), &spec);
        assert!(report.overall_passed);
        assert_eq!(report.criteria[0].required_description, "one of ca, us");
    }

    #[test]
    fn test_empty_allow_list_is_any_country() {
        let spec = RequirementSpec::new().with_allowed_countries(Vec::<String>::new());
        let report = evaluate(&sample(), &spec);
        assert_eq!(report.criteria.len(), 1);
        assert!(report.overall_passed);
    }

    #[test]
    fn test_vpn_gate() {
        let spec = RequirementSpec::new().with_disallow_vpn(true);
        let with_flags = |vpn: bool, proxy: bool| {
            let mut identity = IdentityInfo::unknown("UTC");
            identity.is_vpn = vpn;
            identity.is_proxy = proxy;
            snapshot_with(
                NetworkInfo::default(),
                HardwareInfo::default(),
                identity,
                MediaDevices::default(),
            )
        };

        assert!(!evaluate(&with_flags(true, false), &spec).overall_passed);
        assert!(!evaluate(&with_flags(false, true), &spec).overall_passed);
        assert!(evaluate(&with_flags(false, false), &spec).overall_passed);

        let allowed = RequirementSpec::new().with_disallow_vpn(false);
        assert!(evaluate(&with_flags(true, true), &allowed).overall_passed);
    }

    #[test]
    fn test_capability_flag_false_is_not_a_constraint() {
        let spec = RequirementSpec::new().with_requires_microphone(false);
        let report = evaluate(&sample(), &spec);
        assert_eq!(report.criteria.len(), 1);
        assert!(report.criteria[0].passed);
        assert_eq!(report.criteria[0].required_description, "not required");
    }

    #[test]
    fn test_unknown_ram_undetermined_by_default() {
        let snapshot = snapshot_with(
            NetworkInfo::default(),
            HardwareInfo::default(),
            IdentityInfo::unknown("UTC"),
            MediaDevices::default(),
        );
        let spec = RequirementSpec::new().with_min_ram_gb(8.0);

        let report = evaluate(&snapshot, &spec);
        assert!(report.criteria.is_empty());
        assert!(report.overall_passed);
        assert_eq!(report.undetermined, vec![CRITERION_RAM.to_string()]);
    }

    #[test]
    fn test_unknown_ram_fail_policy() {
        let snapshot = snapshot_with(
            NetworkInfo::default(),
            HardwareInfo::default(),
            IdentityInfo::unknown("UTC"),
            MediaDevices::default(),
        );
        let spec = RequirementSpec::new().with_min_ram_gb(8.0);
        let evaluator = RequirementEvaluator::with_policy(EvaluationPolicy {
            unknown_ram: UnknownRamPolicy::Fail,
        });

        let report = evaluator.evaluate(&snapshot, &spec);
        assert_eq!(report.criteria.len(), 1);
        assert_eq!(report.criteria[0].actual_description, "unknown");
        assert!(!report.overall_passed);
        assert!(report.undetermined.is_empty());
    }

    #[test]
    fn test_threshold_formatting() {
        assert_eq!(fmt_threshold(25.0), "25");
        assert_eq!(fmt_threshold(2.5), "2.5");
    }

    #[test]
    fn test_evaluation_is_deterministic() {
        let spec = RequirementSpec::new()
            .with_min_ram_gb(16.0)
            .with_allowed_countries(["US", "GB"]);
        let snapshot = sample();
        assert_eq!(evaluate(&snapshot, &spec), evaluate(&snapshot, &spec));
    }
}
