//! Evaluate command handler.
//!
//! Gates a snapshot against an opportunity's requirement spec. The snapshot
//! comes from a file, from the store, or from a fresh probe.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use capcheck_core::services::RequirementEvaluator;
use capcheck_core::{AgentId, CapabilitySnapshot, EvaluationReport, RequirementSpec};

use crate::bootstrap::{CliContext, evaluation_policy};
use crate::error::CliError;
use crate::presentation::{Palette, render_report};

/// Where the snapshot under evaluation comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SnapshotSource {
    /// A snapshot JSON file, e.g. one produced by `check --json`.
    File(PathBuf),
    /// The snapshot stored for an agent.
    Stored(AgentId),
    /// A fresh probe, optionally against a client report.
    Probe { client_report: Option<PathBuf> },
}

impl SnapshotSource {
    /// Resolve the mutually exclusive command-line flags.
    pub fn from_flags(
        snapshot: Option<PathBuf>,
        agent: Option<AgentId>,
        client_report: Option<PathBuf>,
    ) -> Self {
        match (snapshot, agent) {
            (Some(path), _) => Self::File(path),
            (None, Some(agent)) => Self::Stored(agent),
            (None, None) => Self::Probe { client_report },
        }
    }
}

async fn read_input(path: &Path, what: &str) -> Result<String> {
    tokio::fs::read_to_string(path)
        .await
        .map_err(CliError::from)
        .with_context(|| format!("Failed to read {what} {}", path.display()))
}

async fn load_requirements(path: &Path) -> Result<RequirementSpec> {
    let text = read_input(path, "requirements").await?;
    RequirementSpec::from_json(&text)
        .map_err(|e| CliError::Data(e.to_string()))
        .with_context(|| format!("Failed to parse requirements {}", path.display()))
}

async fn load_snapshot(path: &Path) -> Result<CapabilitySnapshot> {
    let text = read_input(path, "snapshot").await?;
    serde_json::from_str(&text)
        .map_err(|e| CliError::Data(e.to_string()))
        .with_context(|| format!("Failed to parse snapshot {}", path.display()))
}

/// Produce the evaluation report without printing it.
pub async fn run(
    ctx: &CliContext,
    requirements: &Path,
    source: &SnapshotSource,
    fail_unknown_ram: bool,
) -> Result<EvaluationReport> {
    let spec = load_requirements(requirements).await?;
    let policy = evaluation_policy(fail_unknown_ram);

    match source {
        SnapshotSource::File(path) => {
            let snapshot = load_snapshot(path).await?;
            Ok(RequirementEvaluator::with_policy(policy).evaluate(&snapshot, &spec))
        }
        SnapshotSource::Stored(agent) => {
            let service = ctx.service(None, policy).await?;
            Ok(service.gate(agent, &spec).await.map_err(CliError::from)?)
        }
        SnapshotSource::Probe { client_report } => {
            let service = ctx.service(client_report.as_deref(), policy).await?;
            let snapshot = service.run_check().await;
            Ok(service.evaluator().evaluate(&snapshot, &spec))
        }
    }
}

/// Execute the evaluate command.
///
/// Prints the report, then fails with [`CliError::RequirementsNotMet`] when
/// the overall verdict is negative.
pub async fn execute(
    ctx: &CliContext,
    requirements: &Path,
    source: &SnapshotSource,
    fail_unknown_ram: bool,
    json: bool,
) -> Result<()> {
    let report = run(ctx, requirements, source, fail_unknown_ram).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", render_report(&report, Palette::for_stdout()));
    }

    if report.overall_passed {
        Ok(())
    } else {
        Err(CliError::RequirementsNotMet {
            failed: report.failures().count(),
            total: report.criteria.len(),
        }
        .into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bootstrap::{CliConfig, bootstrap};
    use crate::error::exit_code_for;
    use capcheck_core::SnapshotStore;
    use capcheck_core::services::{CRITERION_CPU_CORES, CRITERION_RAM};
    use capcheck_runtime::ProbeConfig;
    use tempfile::TempDir;

    const SNAPSHOT: &str = r#"{
        "network": {"downloadMbps": 32.5, "latencyMs": 41, "connectionType": "wifi", "effectiveType": "4g"},
        "identity": {"ip": "203.0.113.7", "city": "Toronto", "region": "Ontario", "country": "CA",
                     "timezone": "America/Toronto", "isp": "Example Telecom",
                     "isVpn": false, "isProxy": false, "isHosting": false},
        "hardware": {"cpuCores": 8, "ramGB": null, "platform": "Win32", "isMobile": false, "isTablet": false},
        "display": {"width": 1920, "height": 1080, "availWidth": 1920, "availHeight": 1040,
                    "colorDepth": 24, "pixelRatio": 1.0, "orientation": "landscape-primary"},
        "browser": {"name": "Chrome", "version": "120.0", "language": "en-CA", "languages": ["en-CA"],
                    "cookiesEnabled": true, "doNotTrack": false, "online": true},
        "mediaDevices": {"hasWebcam": true, "hasMicrophone": true, "hasSpeakers": true},
        "takenAt": "2024-02-01T15:00:00Z",
        "assemblyDurationMs": 950
    }"#;

    struct Fixture {
        dir: TempDir,
        ctx: CliContext,
    }

    impl Fixture {
        fn new() -> Self {
            let dir = TempDir::new().unwrap();
            let ctx = bootstrap(CliConfig {
                store_dir: dir.path().join("snapshots"),
                probe: ProbeConfig::default(),
            });
            Self { dir, ctx }
        }

        fn write(&self, name: &str, contents: &str) -> PathBuf {
            let path = self.dir.path().join(name);
            std::fs::write(&path, contents).unwrap();
            path
        }
    }

    #[test]
    fn test_source_from_flags() {
        let agent = AgentId::new("a1").unwrap();
        assert_eq!(
            SnapshotSource::from_flags(Some("s.json".into()), None, None),
            SnapshotSource::File("s.json".into())
        );
        assert_eq!(
            SnapshotSource::from_flags(None, Some(agent.clone()), None),
            SnapshotSource::Stored(agent)
        );
        assert_eq!(
            SnapshotSource::from_flags(None, None, Some("r.json".into())),
            SnapshotSource::Probe {
                client_report: Some("r.json".into())
            }
        );
    }

    #[tokio::test]
    async fn test_snapshot_file_meets_requirements() {
        let fx = Fixture::new();
        let snapshot = fx.write("snapshot.json", SNAPSHOT);
        let requirements = fx.write(
            "req.json",
            r#"{"minInternetSpeedMbps": 25, "minCpuCores": 4, "requiresWebcam": true,
                "disallowVpn": true, "allowedCountries": ["CA", "US"]}"#,
        );

        let report = run(&fx.ctx, &requirements, &SnapshotSource::File(snapshot), false)
            .await
            .unwrap();
        assert!(report.overall_passed);
        assert_eq!(report.criteria.len(), 5);

        let snapshot = fx.dir.path().join("snapshot.json");
        execute(&fx.ctx, &requirements, &SnapshotSource::File(snapshot), false, true)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_failed_verdict_exits_one() {
        let fx = Fixture::new();
        let snapshot = fx.write("snapshot.json", SNAPSHOT);
        let requirements = fx.write("req.json", r#"{"minCpuCores": 16}"#);

        let err = execute(&fx.ctx, &requirements, &SnapshotSource::File(snapshot), false, false)
            .await
            .unwrap_err();
        assert_eq!(exit_code_for(&err), 1);
        assert!(err.to_string().contains("1 of 1"));
    }

    #[tokio::test]
    async fn test_unknown_ram_policy_flag() {
        let fx = Fixture::new();
        let snapshot = fx.write("snapshot.json", SNAPSHOT);
        let requirements = fx.write("req.json", r#"{"minRamGB": 8, "minCpuCores": 2}"#);
        let source = SnapshotSource::File(snapshot);

        let lenient = run(&fx.ctx, &requirements, &source, false).await.unwrap();
        assert!(lenient.overall_passed);
        assert_eq!(lenient.undetermined, vec![CRITERION_RAM.to_string()]);
        assert!(lenient.criterion(CRITERION_CPU_CORES).is_some());

        let strict = run(&fx.ctx, &requirements, &source, true).await.unwrap();
        assert!(!strict.overall_passed);
        assert_eq!(strict.criterion(CRITERION_RAM).map(|c| c.passed), Some(false));
    }

    #[tokio::test]
    async fn test_stored_snapshot_gate() {
        let fx = Fixture::new();
        let snapshot: CapabilitySnapshot = serde_json::from_str(SNAPSHOT).unwrap();
        let agent = AgentId::new("agent-ca").unwrap();
        fx.ctx.store.save(&agent, &snapshot).await.unwrap();
        let requirements = fx.write("req.json", r#"{"allowedCountries": ["DE"]}"#);

        let report = run(&fx.ctx, &requirements, &SnapshotSource::Stored(agent), false)
            .await
            .unwrap();
        assert!(!report.overall_passed);
        assert_eq!(report.criteria[0].actual_description, "CA");
    }

    #[tokio::test]
    async fn test_missing_stored_snapshot_is_data_error() {
        let fx = Fixture::new();
        let requirements = fx.write("req.json", "{}");
        let agent = AgentId::new("nobody").unwrap();

        let err = run(&fx.ctx, &requirements, &SnapshotSource::Stored(agent), false)
            .await
            .unwrap_err();
        assert_eq!(exit_code_for(&err), 65);
    }

    #[tokio::test]
    async fn test_bad_inputs() {
        let fx = Fixture::new();
        let snapshot = fx.write("snapshot.json", SNAPSHOT);
        let source = SnapshotSource::File(snapshot);

        let missing = fx.dir.path().join("absent.json");
        let err = run(&fx.ctx, &missing, &source, false).await.unwrap_err();
        assert_eq!(exit_code_for(&err), 74);

        let malformed = fx.write("req.json", r#"{"minCpuCores": "lots"}"#);
        let err = run(&fx.ctx, &malformed, &source, false).await.unwrap_err();
        assert_eq!(exit_code_for(&err), 65);

        let requirements = fx.write("ok.json", "{}");
        let truncated = fx.write("snap2.json", r#"{"network": {"#);
        let err = run(&fx.ctx, &requirements, &SnapshotSource::File(truncated), false)
            .await
            .unwrap_err();
        assert_eq!(exit_code_for(&err), 65);
    }
}
