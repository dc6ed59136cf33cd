//! Check command handler.
//!
//! Assembles a fresh capability snapshot and optionally stores it for an
//! agent (the onboarding flow).

use std::path::Path;
use std::time::Duration;

use anyhow::Result;
use capcheck_core::services::EvaluationPolicy;
use capcheck_core::{AgentId, CapabilitySnapshot};

use crate::bootstrap::CliContext;
use crate::error::CliError;
use crate::presentation::{Palette, render_snapshot};

/// Assemble a snapshot, storing it when `agent` is given.
///
/// Fails with [`CliError::Timeout`] when `timeout_secs` elapses first. The
/// snapshot is not stored in that case.
pub async fn run(
    ctx: &CliContext,
    agent: Option<&AgentId>,
    client_report: Option<&Path>,
    timeout_secs: Option<u64>,
) -> Result<CapabilitySnapshot> {
    let service = ctx
        .service(client_report, EvaluationPolicy::default())
        .await?;

    let work = async {
        match agent {
            Some(agent) => service.check_and_store(agent).await,
            None => Ok(service.run_check().await),
        }
    };

    let outcome = match timeout_secs {
        Some(secs) => tokio::time::timeout(Duration::from_secs(secs), work)
            .await
            .map_err(|_| CliError::Timeout(secs))?,
        None => work.await,
    };

    Ok(outcome.map_err(CliError::from)?)
}

/// Execute the check command.
pub async fn execute(
    ctx: &CliContext,
    agent: Option<&AgentId>,
    client_report: Option<&Path>,
    timeout_secs: Option<u64>,
    json: bool,
) -> Result<()> {
    let snapshot = run(ctx, agent, client_report, timeout_secs).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
        return Ok(());
    }

    print!("{}", render_snapshot(&snapshot, Palette::for_stdout()));
    if let Some(agent) = agent {
        println!();
        println!("Snapshot stored for agent '{agent}'.");
    }
    Ok(())
}
