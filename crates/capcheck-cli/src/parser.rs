//! Main CLI parser and top-level argument handling.
//!
//! This module defines the root CLI structure with global options.

use std::path::PathBuf;

use clap::Parser;

use crate::commands::Commands;

/// Environment variable naming the snapshot store directory.
pub const ENV_STORE_DIR: &str = "CAPCHECK_STORE_DIR";

/// Command-line interface definition for the capability verification tool.
///
/// This is the top-level parser that handles global options and dispatches
/// to subcommands.
#[derive(Parser)]
#[command(name = "capcheck")]
#[command(about = "Probe client capabilities and gate them against requirements")]
#[command(version)]
pub struct Cli {
    /// Directory holding stored snapshots
    #[arg(long = "store-dir", env = ENV_STORE_DIR, global = true, value_name = "DIR")]
    pub store_dir: Option<PathBuf>,

    /// Enable verbose/debug output
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}
