//! Implementation of the `maui tailwind` command.

use tracing::instrument;

use maui_adapters::FsTree;
use maui_core::domain::TailwindOptions;

use crate::{
    cli::{TailwindArgs, global::GlobalArgs},
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

#[instrument(skip_all, fields(project = %args.project))]
pub fn execute(
    args: TailwindArgs,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    let dry_run = args.dry_run;
    let options = build_options(args, &config);

    let generator = maui_adapters::default_generator(config.templates.local_path.as_deref());
    let mut tree = FsTree::open(&global.workspace)?;

    output.header(&format!("Setting up Tailwind for '{}'", options.project))?;
    let plan = generator.setup_tailwind(&mut tree, &options)?;
    let clean = plan.report.is_clean();
    super::apply_plan(tree, plan, dry_run, &output)?;

    if !dry_run {
        if clean {
            output.success(&format!("Tailwind is set up for '{}'", options.project))?;
        } else {
            output.warning("Tailwind setup finished with skipped steps")?;
        }
    }
    Ok(())
}

fn build_options(args: TailwindArgs, config: &AppConfig) -> TailwindOptions {
    TailwindOptions {
        skip_tailwind_config: args.skip_tailwind_config,
        skip_styles_update: args.skip_styles_update,
        theme: args.theme.theme.map_or(config.theme.color, Into::into),
        color_mode: args.theme.color_mode.map_or(config.theme.mode, Into::into),
        skip_install: args.skip_install || config.generator.skip_install,
        ..TailwindOptions::new(args.project)
    }
}
