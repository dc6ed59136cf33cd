//! Evaluation report types.

use serde::{Deserialize, Serialize};

/// Outcome of one named constraint check.
///
/// Shaped for direct tabular rendering: name / required / actual / passed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CriterionResult {
    pub name: String,
    pub required_description: String,
    pub actual_description: String,
    pub passed: bool,
}

impl CriterionResult {
    pub fn new(
        name: impl Into<String>,
        required_description: impl Into<String>,
        actual_description: impl Into<String>,
        passed: bool,
    ) -> Self {
        Self {
            name: name.into(),
            required_description: required_description.into(),
            actual_description: actual_description.into(),
            passed,
        }
    }
}

/// Ordered per-criterion results plus the overall verdict.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationReport {
    pub criteria: Vec<CriterionResult>,
    /// Conjunction of every criterion; `true` when there are none.
    pub overall_passed: bool,
    /// Requested criteria the snapshot had no data to judge.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub undetermined: Vec<String>,
}

impl EvaluationReport {
    /// Build a report, deriving the overall verdict from the criteria.
    pub fn new(criteria: Vec<CriterionResult>, undetermined: Vec<String>) -> Self {
        let overall_passed = criteria.iter().all(|c| c.passed);
        Self {
            criteria,
            overall_passed,
            undetermined,
        }
    }

    /// Criteria that did not pass, in report order.
    pub fn failures(&self) -> impl Iterator<Item = &CriterionResult> {
        self.criteria.iter().filter(|c| !c.passed)
    }

    /// Look up a criterion by name.
    pub fn criterion(&self, name: &str) -> Option<&CriterionResult> {
        self.criteria.iter().find(|c| c.name == name)
    }
}
