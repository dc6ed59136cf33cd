//! Show command handler.

use anyhow::Result;
use capcheck_core::AgentId;
use capcheck_core::services::EvaluationPolicy;

use crate::bootstrap::CliContext;
use crate::error::CliError;
use crate::presentation::{Palette, render_snapshot};

/// Execute the show command.
///
/// # Errors
///
/// Fails with a data error (exit 65) when no snapshot is stored for `agent`.
pub async fn execute(ctx: &CliContext, agent: &AgentId, json: bool) -> Result<()> {
    let service = ctx.service(None, EvaluationPolicy::default()).await?;
    let snapshot = service
        .stored_snapshot(agent)
        .await
        .map_err(CliError::from)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
    } else {
        println!("Agent: {agent}");
        print!("{}", render_snapshot(&snapshot, Palette::for_stdout()));
    }
    Ok(())
}
