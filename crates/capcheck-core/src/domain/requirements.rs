//! Opportunity requirement specification.
//!
//! A `RequirementSpec` is sparse: every field is optional and an absent field
//! imposes no constraint. Specs arrive as JSON authored elsewhere, so unknown
//! keys are ignored and missing keys default to `None`.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Sparse set of named thresholds an opportunity imposes on a snapshot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RequirementSpec {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_internet_speed_mbps: Option<f64>,

    #[serde(rename = "minRamGB", skip_serializing_if = "Option::is_none")]
    pub min_ram_gb: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_cpu_cores: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_screen_width: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_screen_height: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub requires_webcam: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub requires_microphone: Option<bool>,

    /// Reject snapshots flagged as VPN or proxy.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disallow_vpn: Option<bool>,

    /// Country codes the agent may be located in.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allowed_countries: Option<BTreeSet<String>>,
}

impl RequirementSpec {
    /// Create a spec with no constraints.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a spec from its JSON representation.
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Whether the spec carries no constraint at all.
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    #[must_use]
    pub const fn with_min_internet_speed_mbps(mut self, mbps: f64) -> Self {
        self.min_internet_speed_mbps = Some(mbps);
        self
    }

    #[must_use]
    pub const fn with_min_ram_gb(mut self, gb: f64) -> Self {
        self.min_ram_gb = Some(gb);
        self
    }

    #[must_use]
    pub const fn with_min_cpu_cores(mut self, cores: u32) -> Self {
        self.min_cpu_cores = Some(cores);
        self
    }

    #[must_use]
    pub const fn with_min_screen_width(mut self, width: u32) -> Self {
        self.min_screen_width = Some(width);
        self
    }

    #[must_use]
    pub const fn with_min_screen_height(mut self, height: u32) -> Self {
        self.min_screen_height = Some(height);
        self
    }

    #[must_use]
    pub const fn with_requires_webcam(mut self, required: bool) -> Self {
        self.requires_webcam = Some(required);
        self
    }

    #[must_use]
    pub const fn with_requires_microphone(mut self, required: bool) -> Self {
        self.requires_microphone = Some(required);
        self
    }

    #[must_use]
    pub const fn with_disallow_vpn(mut self, disallow: bool) -> Self {
        self.disallow_vpn = Some(disallow);
        self
    }

    #[must_use]
    pub fn with_allowed_countries<I, S>(mut self, countries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed_countries = Some(countries.into_iter().map(Into::into).collect());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_json_is_empty_spec() {
        let spec = RequirementSpec::from_json("{}").unwrap();
        assert!(spec.is_empty());
    }

    #[test]
    fn test_partial_json_fills_only_given_fields() {
        let spec = RequirementSpec::from_json(
            r#"{"minInternetSpeedMbps": 25, "minRamGB": 8, "allowedCountries": ["US", "CA"]}"#,
        )
        .unwrap();

        assert_eq!(spec.min_internet_speed_mbps, Some(25.0));
        assert_eq!(spec.min_ram_gb, Some(8.0));
        assert_eq!(spec.min_cpu_cores, None);
        assert_eq!(spec.requires_webcam, None);
        let countries = spec.allowed_countries.unwrap();
        assert!(countries.contains("US"));
        assert!(countries.contains("CA"));
    }

    #[test]
    fn test_unknown_keys_are_ignored() {
        let spec = RequirementSpec::from_json(r#"{"minCpuCores": 2, "dressCode": "casual"}"#)
            .unwrap();
        assert_eq!(spec, RequirementSpec::new().with_min_cpu_cores(2));
    }

    #[test]
    fn test_serialization_omits_absent_fields() {
        let spec = RequirementSpec::new().with_requires_webcam(true);
        let json = serde_json::to_string(&spec).unwrap();
        assert_eq!(json, r#"{"requiresWebcam":true}"#);
    }
}
