//! Command handlers that delegate to the capability service.
//!
//! Handlers follow the canonical pattern:
//! - Signature: `pub async fn execute(ctx: &CliContext, ...) -> Result<()>`
//! - Thin wrappers that:
//!   1. Load CLI-specific input (requirement and snapshot files)
//!   2. Call `CapabilityService` methods
//!   3. Format output for the terminal or as JSON
//!
//! Handlers should NOT:
//! - Access the snapshot store directly
//! - Recompute verdicts

pub mod check;
pub mod evaluate;
pub mod show;
