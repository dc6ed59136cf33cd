//! Capability service - onboarding checks and opportunity gating.

use std::sync::Arc;

use tracing::{debug, info};

use super::{RequirementEvaluator, SnapshotAssembler};
use crate::domain::{AgentId, CapabilitySnapshot, EvaluationReport, RequirementSpec};
use crate::ports::{CoreError, SnapshotStore};

/// Service tying snapshot assembly and evaluation to stored agent snapshots.
pub struct CapabilityService {
    assembler: Arc<SnapshotAssembler>,
    evaluator: RequirementEvaluator,
    store: Arc<dyn SnapshotStore>,
}

impl CapabilityService {
    /// Create a service with the default evaluation policy.
    pub fn new(assembler: Arc<SnapshotAssembler>, store: Arc<dyn SnapshotStore>) -> Self {
        Self {
            assembler,
            evaluator: RequirementEvaluator::new(),
            store,
        }
    }

    #[must_use]
    pub fn with_evaluator(mut self, evaluator: RequirementEvaluator) -> Self {
        self.evaluator = evaluator;
        self
    }

    pub const fn evaluator(&self) -> &RequirementEvaluator {
        &self.evaluator
    }

    /// Assemble a fresh snapshot without persisting it.
    pub async fn run_check(&self) -> CapabilitySnapshot {
        self.assembler.assemble().await
    }

    /// Onboarding flow: assemble a snapshot and store it for `agent`.
    pub async fn check_and_store(&self, agent: &AgentId) -> Result<CapabilitySnapshot, CoreError> {
        let snapshot = self.assembler.assemble().await;
        self.store.save(agent, &snapshot).await?;
        info!(agent = %agent, "Stored capability snapshot");
        Ok(snapshot)
    }

    /// Snapshot previously stored for `agent`.
    pub async fn stored_snapshot(&self, agent: &AgentId) -> Result<CapabilitySnapshot, CoreError> {
        self.store
            .load(agent)
            .await?
            .ok_or_else(|| CoreError::SnapshotNotFound(agent.clone()))
    }

    /// Evaluate the stored snapshot for `agent` against `spec`.
    pub async fn gate(
        &self,
        agent: &AgentId,
        spec: &RequirementSpec,
    ) -> Result<EvaluationReport, CoreError> {
        let snapshot = self.stored_snapshot(agent).await?;
        let report = self.evaluator.evaluate(&snapshot, spec);
        debug!(
            agent = %agent,
            passed = report.overall_passed,
            criteria = report.criteria.len(),
            "Gated agent against requirements"
        );
        Ok(report)
    }
}
