//! Agent identity used as the snapshot store key.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Maximum accepted length of an agent identifier.
pub const MAX_AGENT_ID_LEN: usize = 128;

/// Validation failures for domain inputs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Agent id must not be empty")]
    EmptyAgentId,

    #[error("Agent id exceeds {MAX_AGENT_ID_LEN} characters")]
    AgentIdTooLong,

    #[error("Agent id '{0}' contains characters outside [A-Za-z0-9_.-] or starts with '.'")]
    InvalidAgentId(String),
}

/// Validated identifier of the agent a snapshot belongs to.
///
/// Restricted to `[A-Za-z0-9_.-]` without a leading dot so that store
/// adapters can use it directly as a key or file name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AgentId(String);

impl AgentId {
    pub fn new(raw: impl Into<String>) -> Result<Self, ValidationError> {
        let raw = raw.into();
        if raw.is_empty() {
            return Err(ValidationError::EmptyAgentId);
        }
        if raw.len() > MAX_AGENT_ID_LEN {
            return Err(ValidationError::AgentIdTooLong);
        }
        let valid_chars = raw
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'));
        if !valid_chars || raw.starts_with('.') {
            return Err(ValidationError::InvalidAgentId(raw));
        }
        Ok(Self(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AgentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for AgentId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for AgentId {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<AgentId> for String {
    fn from(id: AgentId) -> Self {
        id.0
    }
}
