//! Wiring of runtime adapters into a [`SnapshotAssembler`].

use std::sync::Arc;

use capcheck_core::ports::{HostEnvironment, MediaDeviceSource};
use capcheck_core::services::{AssemblerDeps, SnapshotAssembler};

use crate::client_report::ClientReportHost;
use crate::config::ProbeConfig;
use crate::host::SystemHost;
use crate::http::ReqwestTransport;
use crate::media::SystemMediaDevices;
use crate::providers::{IpApiCoProvider, IpApiIsProvider};

/// Production dependencies for the given host and media source.
pub fn assembler_deps(
    config: &ProbeConfig,
    host: Arc<dyn HostEnvironment>,
    media: Arc<dyn MediaDeviceSource>,
) -> AssemblerDeps {
    AssemblerDeps {
        transport: Arc::new(ReqwestTransport::new(config)),
        host,
        media,
        primary_identity: Arc::new(IpApiIsProvider::new(config.primary_identity_url())),
        fallback_identity: Arc::new(IpApiCoProvider::new(config.fallback_identity_url())),
        network: config.network(),
    }
}

/// Assembler probing the machine this process runs on.
pub fn native_assembler(config: &ProbeConfig) -> SnapshotAssembler {
    SnapshotAssembler::new(assembler_deps(
        config,
        Arc::new(SystemHost::new(config)),
        Arc::new(SystemMediaDevices::new()),
    ))
}

/// Assembler probing a browser-collected report.
///
/// Network and identity are still measured from this process.
pub fn client_report_assembler(config: &ProbeConfig, report: ClientReportHost) -> SnapshotAssembler {
    let report = Arc::new(report);
    SnapshotAssembler::new(assembler_deps(config, report.clone(), report))
}
