//! Domain value types for capability verification.
//!
//! These types contain no I/O. Snapshots and reports are plain serializable
//! data so callers can persist or render them without knowing the engine.

mod agent;
mod report;
mod requirements;
mod snapshot;

pub use agent::{AgentId, MAX_AGENT_ID_LEN, ValidationError};
pub use report::{CriterionResult, EvaluationReport};
pub use requirements::RequirementSpec;
pub use snapshot::{
    BrowserInfo, CapabilitySnapshot, DisplayInfo, HardwareInfo, IdentityInfo, MIN_DOWNLOAD_MBPS,
    MediaDevices, NetworkInfo, SnapshotParts, UNKNOWN,
};
