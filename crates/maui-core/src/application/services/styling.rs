//! Tailwind wiring of a target project: `tailwind.config.js`, the global
//! stylesheet and the root tags of `index.html`.
//!
//! Every step here is recoverable. A failure is logged with the project and
//! phase, recorded in the report, and the run moves on.

use tracing::{debug, error, info, warn};

use crate::{
    application::{ApplicationError, ports::Tree},
    domain::{
        ColorMode, ConfigDocument, GenerationPhase, GenerationReport, ProjectConfiguration,
        ThemeBlock, ThemeColor, merge_config_source, merge_styles, parse_imports,
        update_root_tags,
    },
    error::{MauiError, MauiResult},
};

use super::GeneratorService;

pub const TAILWIND_CONFIG_FILE: &str = "tailwind.config.js";
pub const STYLES_FILE: &str = "src/styles.css";
pub const INDEX_HTML_FILE: &str = "src/index.html";

pub const TAILWIND_CONFIG_TEMPLATE: &str = "tailwind/tailwind.config.js.template";
pub const IMPORTS_TEMPLATE: &str = "tailwind/tailwind.imports.css";

/// Resource holding a theme's CSS variables.
pub fn theme_template(theme: ThemeColor) -> String {
    format!("tailwind/themes/{}", theme.stylesheet_name())
}

/// Which styling steps to run, and for whom.
#[derive(Debug, Clone, Copy)]
pub(super) struct StylingSteps<'a> {
    pub project: &'a str,
    pub theme: ThemeColor,
    pub color_mode: ColorMode,
    pub config: bool,
    pub styles: bool,
}

impl GeneratorService {
    /// Run the `ConfigMerged` and `StylesMerged` phases for one project.
    pub(super) fn apply_styling(
        &self,
        tree: &mut dyn Tree,
        steps: &StylingSteps<'_>,
        report: &mut GenerationReport,
    ) {
        let project = match self.registry().read(tree, steps.project) {
            Ok(project) => project,
            Err(err) => {
                record_failure(report, GenerationPhase::ConfigMerged, steps.project, &err);
                report.advance(GenerationPhase::ConfigMerged);
                report.advance(GenerationPhase::StylesMerged);
                return;
            }
        };

        if steps.config {
            if let Err(err) = self.merge_tailwind_config(tree, &project, report) {
                record_failure(report, GenerationPhase::ConfigMerged, steps.project, &err);
            }
        } else {
            debug!(project = %steps.project, "Tailwind config update skipped");
        }
        report.advance(GenerationPhase::ConfigMerged);

        if steps.styles {
            if let Err(err) = self.merge_stylesheet(tree, &project, steps.theme) {
                record_failure(report, GenerationPhase::StylesMerged, steps.project, &err);
            }
            if let Err(err) = update_index_html(tree, &project, steps.color_mode, steps.theme) {
                record_failure(report, GenerationPhase::StylesMerged, steps.project, &err);
            }
        } else {
            debug!(project = %steps.project, "Stylesheet update skipped");
        }
        report.advance(GenerationPhase::StylesMerged);
    }

    /// Merge the generated config into the project's, or write it fresh.
    ///
    /// An existing config that cannot be merged is overwritten; the fallback
    /// is logged and recorded.
    fn merge_tailwind_config(
        &self,
        tree: &mut dyn Tree,
        project: &ProjectConfiguration,
        report: &mut GenerationReport,
    ) -> MauiResult<()> {
        let path = project.path(TAILWIND_CONFIG_FILE);
        let template = self.templates().file(TAILWIND_CONFIG_TEMPLATE)?;
        let incoming = ConfigDocument::parse(&template, self.known_callables())?;
        let existing = tree.read_to_string(&path)?;

        let merged = match merge_config_source(existing.as_deref(), &incoming, self.known_callables())
        {
            Ok(text) => text,
            Err(err) if err.is_merge_failure() => {
                warn!(
                    project = %project.name,
                    path = %path,
                    error = %err,
                    "Existing Tailwind config cannot be merged, overwriting it"
                );
                report.recover(
                    GenerationPhase::ConfigMerged,
                    Some(project.name.as_str()),
                    format!("{path} overwritten: {err}"),
                );
                incoming.render()
            }
            Err(err) => return Err(err.into()),
        };

        write_if_changed(tree, &path, existing.as_deref(), &merged)
    }

    fn merge_stylesheet(
        &self,
        tree: &mut dyn Tree,
        project: &ProjectConfiguration,
        theme: ThemeColor,
    ) -> MauiResult<()> {
        let path = project.path(STYLES_FILE);
        let imports = parse_imports(&self.templates().file(IMPORTS_TEMPLATE)?);
        let css = self.templates().file(&theme_template(theme))?;
        let block = ThemeBlock::new(theme.as_str(), css);

        let existing = tree.read_to_string(&path)?;
        let merged = merge_styles(existing.as_deref(), &imports, &block)?;
        write_if_changed(tree, &path, existing.as_deref(), &merged)
    }
}

fn update_index_html(
    tree: &mut dyn Tree,
    project: &ProjectConfiguration,
    color_mode: ColorMode,
    theme: ThemeColor,
) -> MauiResult<()> {
    let path = project.path(INDEX_HTML_FILE);
    let html = tree
        .read_to_string(&path)?
        .ok_or_else(|| ApplicationError::MissingFile { path: path.clone() })?;
    let updated = update_root_tags(&html, color_mode, theme);
    write_if_changed(tree, &path, Some(&html), &updated)
}

fn write_if_changed(
    tree: &mut dyn Tree,
    path: &str,
    existing: Option<&str>,
    content: &str,
) -> MauiResult<()> {
    if existing == Some(content) {
        debug!(path = %path, "Unchanged");
        return Ok(());
    }
    tree.write_string(path, content)?;
    info!(path = %path, "Updated");
    Ok(())
}

fn record_failure(
    report: &mut GenerationReport,
    phase: GenerationPhase,
    project: &str,
    err: &MauiError,
) {
    if err.is_recoverable() {
        warn!(project = %project, phase = %phase, error = %err, "Step skipped");
    } else {
        error!(project = %project, phase = %phase, error = %err, "Step failed, continuing");
    }
    report.recover(phase, Some(project), err.to_string());
}
