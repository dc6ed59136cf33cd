//! CLI bootstrap - the composition root.
//!
//! This module is the ONLY place where adapters are wired together for the
//! CLI. All concrete implementations are instantiated here:
//! - Probe configuration from the environment (via capcheck-runtime)
//! - Native or client-report snapshot assembler (via capcheck-runtime)
//! - JSON-file snapshot store (via capcheck-runtime)
//! - Capability service (via capcheck-core)
//!
//! Command handlers receive the composed [`CliContext`] and delegate to it.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use capcheck_core::services::{
    CapabilityService, EvaluationPolicy, RequirementEvaluator, SnapshotAssembler,
};
use capcheck_core::{SnapshotStore, UnknownRamPolicy};
use capcheck_runtime::{
    ClientReportHost, JsonFileSnapshotStore, ProbeConfig, client_report_assembler,
    native_assembler,
};
use tracing::debug;

use crate::error::CliError;

/// Store directory used when neither `--store-dir` nor the environment name one.
pub const DEFAULT_STORE_DIR: &str = ".capcheck/snapshots";

/// Bootstrap configuration for the CLI.
#[derive(Debug, Clone)]
pub struct CliConfig {
    /// Directory holding one JSON snapshot per agent.
    pub store_dir: PathBuf,
    /// Endpoints, timeouts and host overrides for the probes.
    pub probe: ProbeConfig,
}

impl CliConfig {
    /// Read probe settings from `CAPCHECK_*` variables.
    pub fn from_env(store_dir: Option<PathBuf>) -> Result<Self, CliError> {
        Ok(Self {
            store_dir: store_dir.unwrap_or_else(|| PathBuf::from(DEFAULT_STORE_DIR)),
            probe: ProbeConfig::from_env()?,
        })
    }
}

/// Fully composed context for CLI commands.
pub struct CliContext {
    /// Probe configuration shared by every assembler built here.
    pub probe: ProbeConfig,
    /// Snapshot persistence.
    pub store: Arc<dyn SnapshotStore>,
}

/// Compose the CLI context from configuration.
pub fn bootstrap(config: CliConfig) -> CliContext {
    debug!(store_dir = %config.store_dir.display(), "Bootstrapping CLI context");
    CliContext {
        probe: config.probe,
        store: Arc::new(JsonFileSnapshotStore::new(config.store_dir)),
    }
}

impl CliContext {
    /// Assembler for this machine, or for a client report file when given.
    pub async fn assembler(&self, client_report: Option<&Path>) -> Result<SnapshotAssembler> {
        match client_report {
            None => Ok(native_assembler(&self.probe)),
            Some(path) => {
                let host = load_client_report(path).await?;
                Ok(client_report_assembler(&self.probe, host))
            }
        }
    }

    /// Capability service over the selected assembler and the store.
    pub async fn service(
        &self,
        client_report: Option<&Path>,
        policy: EvaluationPolicy,
    ) -> Result<CapabilityService> {
        let assembler = self.assembler(client_report).await?;
        Ok(
            CapabilityService::new(Arc::new(assembler), Arc::clone(&self.store))
                .with_evaluator(RequirementEvaluator::with_policy(policy)),
        )
    }
}

/// Evaluation policy selected by command-line flags.
pub const fn evaluation_policy(fail_unknown_ram: bool) -> EvaluationPolicy {
    EvaluationPolicy {
        unknown_ram: if fail_unknown_ram {
            UnknownRamPolicy::Fail
        } else {
            UnknownRamPolicy::Undetermined
        },
    }
}

async fn load_client_report(path: &Path) -> Result<ClientReportHost> {
    let text = tokio::fs::read_to_string(path)
        .await
        .map_err(CliError::from)
        .with_context(|| format!("Failed to read client report {}", path.display()))?;
    ClientReportHost::from_json(&text)
        .map_err(|e| CliError::Data(e.to_string()))
        .with_context(|| format!("Failed to parse client report {}", path.display()))
}
