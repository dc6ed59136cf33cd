//! Snapshot assembler - runs every probe once and merges the results.
//!
//! The three I/O-bound probes (network, identity, media) run concurrently and
//! are joined at a single barrier; the synchronous probes run inline. Each
//! probe already degrades to defaults on failure, so the barrier always
//! completes with a full set of parts and no partial snapshot can escape.
//!
//! No timeout is imposed here. A caller with a latency budget races
//! [`SnapshotAssembler::assemble`] against a timer and discards the result.

use std::sync::Arc;

use chrono::Utc;
use tokio::time::Instant;
use tracing::{debug, info};

use crate::domain::{CapabilitySnapshot, SnapshotParts};
use crate::ports::{HostEnvironment, HttpTransport, IdentityProvider, MediaDeviceSource};
use crate::probes::{
    IdentityProbe, NetworkProbe, NetworkProbeConfig, probe_browser, probe_display,
    probe_hardware, probe_media,
};

/// Everything the assembler needs, injected at construction.
#[derive(Clone)]
pub struct AssemblerDeps {
    /// Transport shared by the network and identity probes.
    pub transport: Arc<dyn HttpTransport>,
    /// Source of synchronous platform facts.
    pub host: Arc<dyn HostEnvironment>,
    /// Source of attached media devices.
    pub media: Arc<dyn MediaDeviceSource>,
    /// Identity provider with anonymizer flags.
    pub primary_identity: Arc<dyn IdentityProvider>,
    /// Geo-only identity provider used when the primary fails.
    pub fallback_identity: Arc<dyn IdentityProvider>,
    /// Speed-test endpoints.
    pub network: NetworkProbeConfig,
}

/// Orchestrates the probes into one [`CapabilitySnapshot`].
pub struct SnapshotAssembler {
    host: Arc<dyn HostEnvironment>,
    media: Arc<dyn MediaDeviceSource>,
    network: NetworkProbe,
    identity: IdentityProbe,
}

impl SnapshotAssembler {
    pub fn new(deps: AssemblerDeps) -> Self {
        let AssemblerDeps {
            transport,
            host,
            media,
            primary_identity,
            fallback_identity,
            network,
        } = deps;

        Self {
            network: NetworkProbe::new(Arc::clone(&transport), network),
            identity: IdentityProbe::new(transport, primary_identity, fallback_identity),
            host,
            media,
        }
    }

    /// Run all probes and merge their outputs. Never fails.
    ///
    /// Every call probes afresh; environment facts are expected to change
    /// between runs and are never cached.
    pub async fn assemble(&self) -> CapabilitySnapshot {
        let started = Instant::now();
        let host = self.host.as_ref();

        let (network, identity, media_devices) = tokio::join!(
            self.network.measure(host.connection_hint()),
            self.identity.lookup(host.timezone()),
            probe_media(self.media.as_ref()),
        );
        debug!(?network, "Network probe settled");
        debug!(?identity, "Identity probe settled");
        debug!(?media_devices, "Media probe settled");

        let hardware = probe_hardware(host);
        let display = probe_display(host);
        let browser = probe_browser(host);

        let parts = SnapshotParts {
            network,
            identity,
            hardware,
            display,
            browser,
            media_devices,
        };

        let duration_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
        info!(duration_ms, "Capability snapshot assembled");
        CapabilitySnapshot::from_parts(parts, Utc::now(), duration_ms)
    }
}
