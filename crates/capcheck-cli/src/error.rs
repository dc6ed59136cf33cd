//! CLI-specific error types and mappings.
//!
//! Maps core and runtime errors onto exit codes and user-facing messages.

use capcheck_core::{CoreError, StoreError};
use capcheck_runtime::ProbeConfigError;
use thiserror::Error;

/// CLI-specific error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Malformed input file or stored snapshot.
    #[error("Invalid data: {0}")]
    Data(String),

    /// IO error (file not found, permission denied, etc.).
    #[error("IO error: {0}")]
    Io(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Snapshot assembly exceeded the caller's deadline.
    #[error("Capability check timed out after {0}s")]
    Timeout(u64),

    /// Evaluation completed and at least one criterion failed.
    #[error("Requirements not met ({failed} of {total} criteria failed)")]
    RequirementsNotMet { failed: usize, total: usize },
}

impl CliError {
    /// Map error to appropriate exit code.
    ///
    /// Exit codes follow Unix conventions:
    /// - 0: Success
    /// - 1: Requirements not met
    /// - 2: Misuse of shell command (reported by clap before dispatch)
    /// - 64-78: Reserved for specific error categories (see sysexits.h)
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::RequirementsNotMet { .. } => 1,
            Self::Data(_) => 65,     // EX_DATAERR
            Self::Io(_) => 74,       // EX_IOERR
            Self::Timeout(_) => 75,  // EX_TEMPFAIL
            Self::Config(_) => 78,   // EX_CONFIG
        }
    }
}

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Store(StoreError::Serialization(msg)) => Self::Data(msg),
            CoreError::Store(StoreError::Storage(msg)) => Self::Io(msg),
            err @ CoreError::SnapshotNotFound(_) => Self::Data(err.to_string()),
        }
    }
}

impl From<ProbeConfigError> for CliError {
    fn from(err: ProbeConfigError) -> Self {
        Self::Config(err.to_string())
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

/// Exit code for an error chain, `1` unless a [`CliError`] is inside.
pub fn exit_code_for(err: &anyhow::Error) -> i32 {
    err.chain()
        .find_map(|cause| cause.downcast_ref::<CliError>())
        .map_or(1, CliError::exit_code)
}
