//! Port definitions (trait abstractions) for external systems.
//!
//! Ports define the interfaces that the core expects from infrastructure.
//! They contain no implementation details and use only domain types.
//!
//! # Design Rules
//!
//! - No `reqwest` or OS types in any signature
//! - Probes receive ports through constructors, never through globals
//! - Port errors are typed; probes decide how to degrade them

pub mod host_environment;
pub mod http_transport;
pub mod identity_provider;
pub mod media_devices;
pub mod snapshot_store;

use thiserror::Error;

use crate::domain::AgentId;

pub use host_environment::{ConnectionHint, HostEnvironment, ScreenMetrics};
pub use http_transport::{HttpResponse, HttpTransport, TransportError};
pub use identity_provider::{IdentityProvider, ProviderParseError};
pub use media_devices::{MediaDeviceInfo, MediaDeviceKind, MediaDeviceSource, MediaError};
pub use snapshot_store::{SnapshotStore, StoreError};

/// Core error type for the capability service.
///
/// Probing and evaluation never fail; only storage access surfaces errors
/// to callers.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Store operation failed.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// No snapshot has been stored for the agent.
    #[error("No capability snapshot stored for agent '{0}'")]
    SnapshotNotFound(AgentId),
}
