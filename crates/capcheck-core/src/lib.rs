#![doc = include_str!("../README.md")]
#![deny(unused_crate_dependencies)]

pub mod domain;
pub mod ports;
pub mod probes;
pub mod services;
pub mod store;

// Re-export commonly used types for convenience
pub use domain::{
    AgentId, BrowserInfo, CapabilitySnapshot, CriterionResult, DisplayInfo, EvaluationReport,
    HardwareInfo, IdentityInfo, MIN_DOWNLOAD_MBPS, MediaDevices, NetworkInfo, RequirementSpec,
    SnapshotParts, UNKNOWN, ValidationError,
};
pub use ports::{
    ConnectionHint, CoreError, HostEnvironment, HttpResponse, HttpTransport, IdentityProvider,
    MediaDeviceInfo, MediaDeviceKind, MediaDeviceSource, MediaError, ProviderParseError,
    ScreenMetrics, SnapshotStore, StoreError, TransportError,
};
pub use probes::NetworkProbeConfig;
pub use services::{
    AssemblerDeps, CapabilityService, EvaluationPolicy, RequirementEvaluator, SnapshotAssembler,
    UnknownRamPolicy, evaluate,
};
pub use store::InMemorySnapshotStore;

// Property tests live in tests/
#[cfg(test)]
use proptest as _;
