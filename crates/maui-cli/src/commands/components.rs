//! Implementation of the `maui components` command: one direct invocation
//! of the external component generator.

use tracing::instrument;

use maui_core::domain::{ExternalToolInvocation, LibraryOptions, PendingAction};

use crate::{
    cli::{ComponentsArgs, OutputFormat, global::GlobalArgs},
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

#[instrument(skip_all)]
pub fn execute(
    args: ComponentsArgs,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    let dry_run = args.dry_run;
    let invocation = build_invocation(args, &config)?;
    let action = PendingAction::InvokeExternalTool(invocation);

    if output.format() == OutputFormat::Json {
        output.json(&action)?;
    }
    if dry_run {
        output.pending_actions(std::slice::from_ref(&action))?;
        return Ok(());
    }

    maui_adapters::default_runner().execute(&global.workspace, std::slice::from_ref(&action))?;
    output.success("Components generated")?;
    Ok(())
}

fn build_invocation(args: ComponentsArgs, config: &AppConfig) -> CliResult<ExternalToolInvocation> {
    let generator = &config.generator;
    let name = args.name.unwrap_or_else(|| generator.component_name.clone());
    let directory = args.directory.unwrap_or_else(|| {
        LibraryOptions {
            library_name: generator.library_name.clone(),
            ..LibraryOptions::default()
        }
        .components_directory()
    });
    let tool = args.generator.tool.unwrap_or_else(|| generator.tool.clone());
    let kind = args
        .generator
        .kind
        .unwrap_or_else(|| generator.component_kind.clone());

    for (option, value) in [("--name", &name), ("--directory", &directory), ("--tool", &tool)] {
        if value.trim().is_empty() {
            return Err(CliError::InvalidInput {
                message: format!("{option} must not be empty"),
            });
        }
    }

    Ok(ExternalToolInvocation::new(tool, kind, name, directory))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{Cli, Commands};
    use clap::Parser;

    fn components_args(argv: &[&str]) -> ComponentsArgs {
        let cli = Cli::parse_from(["maui", "components"].iter().chain(argv));
        match cli.command {
            Commands::Components(args) => args,
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn defaults_target_the_library_components_directory() {
        let mut config = AppConfig::default();
        config.generator.library_name = "ui-kit".into();

        let invocation = build_invocation(components_args(&[]), &config).unwrap();
        assert_eq!(
            invocation.command_line(),
            "npx nx generate @spartan-ng/cli:ui --name=all --directory=ui-kit/src/lib/spartanui"
        );
    }

    #[test]
    fn explicit_arguments_win() {
        let invocation = build_invocation(
            components_args(&["--name", "dialog", "--directory", "libs/ui", "--tool", "nx"]),
            &AppConfig::default(),
        )
        .unwrap();
        assert_eq!(
            invocation.argv(),
            [
                "nx",
                "generate",
                "@spartan-ng/cli:ui",
                "--name=dialog",
                "--directory=libs/ui"
            ]
        );
    }

    #[test]
    fn blank_name_is_rejected() {
        let err = build_invocation(components_args(&["--name", " "]), &AppConfig::default())
            .unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }
}
