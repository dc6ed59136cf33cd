//! CLI entry point.
//!
//! Parses arguments, composes the context via bootstrap and routes each
//! command to its handler. Errors are printed to stderr and mapped to an
//! exit code.

use clap::Parser;
use tracing_subscriber::EnvFilter;

use capcheck_cli::handlers::evaluate::SnapshotSource;
use capcheck_cli::{Cli, CliConfig, Commands, bootstrap, exit_code_for, handlers};

/// `RUST_LOG` wins; otherwise `info`, or `debug` with `--verbose`.
fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if verbose { "debug" } else { "info" }));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let ctx = bootstrap(CliConfig::from_env(cli.store_dir)?);

    match cli.command {
        Commands::Check {
            json,
            agent,
            client_report,
            timeout_secs,
        } => {
            handlers::check::execute(
                &ctx,
                agent.as_ref(),
                client_report.as_deref(),
                timeout_secs,
                json,
            )
            .await
        }
        Commands::Evaluate {
            requirements,
            snapshot,
            agent,
            client_report,
            json,
            fail_unknown_ram,
        } => {
            let source = SnapshotSource::from_flags(snapshot, agent, client_report);
            handlers::evaluate::execute(&ctx, &requirements, &source, fail_unknown_ram, json).await
        }
        Commands::Show { agent, json } => handlers::show::execute(&ctx, &agent, json).await,
    }
}

#[tokio::main]
async fn main() {
    // Load .env before clap reads env-backed flags
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(err) = run(cli).await {
        eprintln!("Error: {err:#}");
        std::process::exit(exit_code_for(&err));
    }
}
