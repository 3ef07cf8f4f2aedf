//! Implementation of the `maui projects` command.

use maui_adapters::FsTree;
use maui_core::domain::ProjectConfiguration;

use crate::{
    cli::{ListFormat, OutputFormat, ProjectsArgs, global::GlobalArgs},
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

pub fn execute(
    args: ProjectsArgs,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    let tree = FsTree::open(&global.workspace)?;
    let generator = maui_adapters::default_generator(config.templates.local_path.as_deref());
    let projects = generator.list_projects(&tree)?;

    let format = match output.format() {
        OutputFormat::Json => ListFormat::Json,
        _ => args.format,
    };

    match format {
        ListFormat::Table => {
            if projects.is_empty() {
                output.info("No projects found")?;
                return Ok(());
            }
            output.header("Projects:")?;
            for project in &projects {
                output.print(&table_row(project))?;
            }
        }
        ListFormat::List => {
            for project in &projects {
                output.print(&project.name)?;
            }
        }
        // Serialised as a JSON array to stdout, parseable even in quiet mode.
        ListFormat::Json => output.json(&projects)?,
    }

    Ok(())
}

fn table_row(project: &ProjectConfiguration) -> String {
    let kind = project.project_type.map_or("-", |t| t.as_str());
    format!("  {:<24} {:<12} {}", project.name, kind, project.root)
}
