//! Command handlers. Each translates parsed arguments into core options,
//! calls the generator and displays the outcome.

pub mod components;
pub mod config;
pub mod library;
pub mod projects;
pub mod tailwind;

use serde_json::json;
use tracing::info;

use maui_adapters::FsTree;
use maui_core::application::ports::Tree;
use maui_core::domain::GenerationPlan;

use crate::{cli::OutputFormat, error::CliResult, output::OutputManager};

/// Show a plan, then commit it and run its pending actions unless
/// `dry_run` is set.
pub(crate) fn apply_plan(
    mut tree: FsTree,
    plan: GenerationPlan,
    dry_run: bool,
    output: &OutputManager,
) -> CliResult<()> {
    // human output is silenced in JSON mode, so both paths can print
    if output.format() == OutputFormat::Json {
        output.json(&json!({
            "dryRun": dry_run,
            "changes": tree.list_changes(),
            "pendingActions": plan.pending_actions,
            "report": plan.report,
        }))?;
    }
    output.report(&plan.report)?;

    if dry_run {
        output.changes(&tree.list_changes())?;
        output.pending_actions(&plan.pending_actions)?;
        output.info("Dry run: no files were written and no commands were run")?;
        return Ok(());
    }

    let changes = tree.commit()?;
    info!(files = changes.len(), "Changes committed");
    output.changes(&changes)?;

    let ran = maui_adapters::default_runner().execute(tree.root(), &plan.pending_actions)?;
    info!(actions = ran, "Pending actions completed");
    Ok(())
}
