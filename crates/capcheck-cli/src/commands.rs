//! Main commands enum.
//!
//! This module defines the available commands for the CLI tool.

use std::path::PathBuf;

use capcheck_core::AgentId;
use clap::Subcommand;

/// Available commands for the capability verification tool.
#[derive(Subcommand)]
pub enum Commands {
    /// Probe this machine (or a client report) and print the capability snapshot
    Check {
        /// Print the snapshot as JSON instead of a summary
        #[arg(long)]
        json: bool,
        /// Store the snapshot under this agent ID
        #[arg(long)]
        agent: Option<AgentId>,
        /// Probe facts from a browser-collected JSON report instead of this machine
        #[arg(long = "client-report", value_name = "FILE")]
        client_report: Option<PathBuf>,
        /// Abort when assembly takes longer than this many seconds
        #[arg(long = "timeout-secs", value_name = "N")]
        timeout_secs: Option<u64>,
    },

    /// Evaluate a snapshot against an opportunity's requirement spec
    Evaluate {
        /// Requirement spec JSON file
        #[arg(short, long, value_name = "FILE")]
        requirements: PathBuf,
        /// Evaluate a snapshot JSON file instead of probing
        #[arg(long, value_name = "FILE", conflicts_with_all = ["agent", "client_report"])]
        snapshot: Option<PathBuf>,
        /// Evaluate the snapshot stored for this agent instead of probing
        #[arg(long, conflicts_with = "client_report")]
        agent: Option<AgentId>,
        /// Probe facts from a browser-collected JSON report instead of this machine
        #[arg(long = "client-report", value_name = "FILE")]
        client_report: Option<PathBuf>,
        /// Print the report as JSON instead of a table
        #[arg(long)]
        json: bool,
        /// Fail a RAM minimum when the snapshot's memory is unknown
        #[arg(long = "fail-unknown-ram")]
        fail_unknown_ram: bool,
    },

    /// Show the snapshot stored for an agent
    Show {
        /// Agent whose snapshot to show
        #[arg(long)]
        agent: AgentId,
        /// Print the snapshot as JSON instead of a summary
        #[arg(long)]
        json: bool,
    },
}
