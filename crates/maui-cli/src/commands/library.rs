//! Implementation of the `maui library` command.
//!
//! Responsibility: merge CLI arguments over the configured defaults into
//! [`LibraryOptions`], plan the run over the workspace and apply it.

use tracing::{debug, instrument};

use maui_adapters::FsTree;
use maui_core::domain::LibraryOptions;

use crate::{
    cli::{LibraryArgs, global::GlobalArgs},
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

#[instrument(skip_all, fields(workspace = %global.workspace.display()))]
pub fn execute(
    args: LibraryArgs,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    let dry_run = args.dry_run;
    let options = build_options(args, &config);
    debug!(?options, "Library options resolved");

    let generator = maui_adapters::default_generator(config.templates.local_path.as_deref());
    let mut tree = FsTree::open(&global.workspace)?;

    output.header(&format!("Generating library '{}'", options.library_name))?;
    let plan = generator.generate_library(&mut tree, &options)?;
    super::apply_plan(tree, plan, dry_run, &output)?;

    if !dry_run {
        output.success(&format!("Library '{}' is ready", options.library_name))?;
    }
    Ok(())
}

/// CLI flags win over configuration; switches only ever turn a skip on.
pub(crate) fn build_options(args: LibraryArgs, config: &AppConfig) -> LibraryOptions {
    let generator = &config.generator;
    LibraryOptions {
        library_name: args.name.unwrap_or_else(|| generator.library_name.clone()),
        project: args.project,
        theme: args.theme.theme.map_or(config.theme.color, Into::into),
        color_mode: args.theme.color_mode.map_or(config.theme.mode, Into::into),
        skip_install: args.skip_install || generator.skip_install,
        skip_components: args.skip_components,
        tool: args.generator.tool.unwrap_or_else(|| generator.tool.clone()),
        component_kind: args
            .generator
            .kind
            .unwrap_or_else(|| generator.component_kind.clone()),
        component_name: generator.component_name.clone(),
    }
}
