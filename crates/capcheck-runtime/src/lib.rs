#![doc = include_str!("../README.md")]
#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]

mod bootstrap;
mod client_report;
mod config;
mod host;
mod http;
mod media;
mod providers;
mod store;

// ============================================================================
// Public API
// ============================================================================

// Wiring
pub use bootstrap::{assembler_deps, client_report_assembler, native_assembler};

// Configuration
pub use config::{
    DEFAULT_HTTP_TIMEOUT, ENV_FALLBACK_IDENTITY_URL, ENV_HTTP_TIMEOUT_SECS, ENV_LATENCY_URL,
    ENV_PRIMARY_IDENTITY_URL, ENV_SCREEN, ENV_THROUGHPUT_URL, ENV_USER_AGENT, ProbeConfig,
    ProbeConfigError, parse_screen,
};

// Adapters
pub use client_report::{ClientReport, ClientReportHost, ReportedConnection, ReportedScreen};
pub use host::{SystemHost, interface_connection_type, is_loopback, locale_to_language_tag};
pub use http::ReqwestTransport;
pub use media::{SystemMediaDevices, parse_pcm_listing};
pub use providers::{IPAPI_CO_URL, IPAPI_IS_URL, IpApiCoProvider, IpApiIsProvider};
pub use store::JsonFileSnapshotStore;
