//! Generator Service - plans a generation run.
//!
//! A run mutates the staged [`Tree`] and returns the side effects to perform
//! once the tree is committed:
//!
//! ```text
//! Init → DependenciesDeclared → ProjectRegistered → FilesTemplated
//!      → ConfigMerged → StylesMerged → Formatted → Done
//! ```
//!
//! Failures up to `FilesTemplated` abort the run. Failures while updating a
//! target project's config, stylesheet or `index.html` are logged, recorded
//! in the report and the run continues.

use tracing::{info, instrument, warn};

use crate::{
    application::ports::{
        Dependency, Formatter, PackageManifest, ProjectRegistry, TemplateSource, Tree,
    },
    domain::{
        ExternalToolInvocation, GenerationPhase, GenerationPlan, GenerationReport, KnownCallables,
        LibraryOptions, PackageManager, PendingAction, ProjectConfiguration, ProjectType,
        RenderContext, TailwindOptions, TargetConfiguration,
    },
    error::MauiResult,
};

use super::styling::StylingSteps;

pub const LIBRARY_DEPENDENCIES: [Dependency; 6] = [
    ("@spartan-ng/ui-core", "latest"),
    ("@ng-icons/core", "^25.1.0"),
    ("@ng-icons/lucide", "^26.3.0"),
    ("@swimlane/ngx-charts", "^20.5.0"),
    ("@ngneat/overview", "^6.1.0"),
    ("@ngxpert/cmdk", "^2.0.0"),
];

pub const LIBRARY_DEV_DEPENDENCIES: [Dependency; 1] = [("@spartan-ng/cli", "latest")];

pub const TAILWIND_DEV_DEPENDENCIES: [Dependency; 3] = [
    ("tailwindcss", "^3.3.0"),
    ("postcss", "^8.4.21"),
    ("autoprefixer", "^10.4.14"),
];

/// Template set rendered into the library root.
pub const LIBRARY_TEMPLATES: &str = "lib";
/// Template set rendered into `<root>/src/lib`.
pub const COMPONENT_TEMPLATES: &str = "components";

/// Plans library and Tailwind generation runs.
pub struct GeneratorService {
    registry: Box<dyn ProjectRegistry>,
    manifest: Box<dyn PackageManifest>,
    templates: Box<dyn TemplateSource>,
    formatter: Box<dyn Formatter>,
    known_callables: KnownCallables,
}

impl GeneratorService {
    /// Create a generator service with the given adapters.
    pub fn new(
        registry: Box<dyn ProjectRegistry>,
        manifest: Box<dyn PackageManifest>,
        templates: Box<dyn TemplateSource>,
        formatter: Box<dyn Formatter>,
    ) -> Self {
        Self {
            registry,
            manifest,
            templates,
            formatter,
            known_callables: KnownCallables::default(),
        }
    }

    /// Replace the callables accepted inside configuration modules.
    pub fn with_known_callables(mut self, known: KnownCallables) -> Self {
        self.known_callables = known;
        self
    }

    /// Plan the component library generation.
    ///
    /// Declares dependencies, registers and templates the library, wires
    /// Tailwind into `options.project` when given, and queues the install
    /// and the external component generator.
    #[instrument(
        skip_all,
        fields(
            library = %options.library_name,
            project = options.project.as_deref().unwrap_or("-"),
        )
    )]
    pub fn generate_library(
        &self,
        tree: &mut dyn Tree,
        options: &LibraryOptions,
    ) -> MauiResult<GenerationPlan> {
        options.validate()?;
        let mut report = GenerationReport::new();

        // 1. Dependencies
        let changed = if options.project.is_some() {
            let dev: Vec<Dependency> = LIBRARY_DEV_DEPENDENCIES
                .iter()
                .chain(TAILWIND_DEV_DEPENDENCIES.iter())
                .copied()
                .collect();
            self.manifest
                .add_dependencies(tree, &LIBRARY_DEPENDENCIES, &dev)?
        } else {
            self.manifest
                .add_dependencies(tree, &LIBRARY_DEPENDENCIES, &LIBRARY_DEV_DEPENDENCIES)?
        };
        info!(changed, "Dependencies declared");
        report.advance(GenerationPhase::DependenciesDeclared);

        // 2. Registration
        let invocation = ExternalToolInvocation::new(
            &options.tool,
            &options.component_kind,
            &options.component_name,
            options.components_directory(),
        );
        let descriptor = library_descriptor(options, &invocation);
        self.registry.register(tree, &descriptor)?;
        info!(root = %descriptor.root, "Library registered");
        report.advance(GenerationPhase::ProjectRegistered);

        // 3. Templates
        let written = self.template_library(tree, &descriptor)?;
        info!(files = written, "Library files templated");
        report.advance(GenerationPhase::FilesTemplated);

        // 4. Styling of the consuming application
        match &options.project {
            Some(project) => {
                let steps = StylingSteps {
                    project,
                    theme: options.theme,
                    color_mode: options.color_mode,
                    config: true,
                    styles: true,
                };
                self.apply_styling(tree, &steps, &mut report);
            }
            None => {
                let message = "No project specified; skipping Tailwind setup";
                warn!("{}", message);
                report.warn(message);
            }
        }

        // 5. Formatting and queued side effects
        let mut pending_actions = self.finish(tree, &mut report, options.skip_install)?;
        if !options.skip_components {
            pending_actions.push(PendingAction::InvokeExternalTool(invocation));
        }
        report.advance(GenerationPhase::Done);

        info!(
            actions = pending_actions.len(),
            recovered = report.recovered().len(),
            "Library generation planned"
        );
        Ok(GenerationPlan {
            pending_actions,
            report,
        })
    }

    /// Plan the standalone Tailwind setup of an existing project.
    #[instrument(skip_all, fields(project = %options.project))]
    pub fn setup_tailwind(
        &self,
        tree: &mut dyn Tree,
        options: &TailwindOptions,
    ) -> MauiResult<GenerationPlan> {
        options.validate()?;
        let mut report = GenerationReport::new();

        self.manifest
            .add_dependencies(tree, &[], &TAILWIND_DEV_DEPENDENCIES)?;
        report.advance(GenerationPhase::DependenciesDeclared);

        let steps = StylingSteps {
            project: &options.project,
            theme: options.theme,
            color_mode: options.color_mode,
            config: !options.skip_tailwind_config,
            styles: !options.skip_styles_update,
        };
        self.apply_styling(tree, &steps, &mut report);

        let pending_actions = self.finish(tree, &mut report, options.skip_install)?;
        report.advance(GenerationPhase::Done);

        info!(
            actions = pending_actions.len(),
            recovered = report.recovered().len(),
            "Tailwind setup planned"
        );
        Ok(GenerationPlan {
            pending_actions,
            report,
        })
    }

    /// List the projects registered in the workspace.
    pub fn list_projects(&self, tree: &dyn Tree) -> MauiResult<Vec<ProjectConfiguration>> {
        self.registry.list(tree)
    }

    // -------------------------------------------------------------------------
    // Internal Helpers
    // -------------------------------------------------------------------------

    pub(super) fn templates(&self) -> &dyn TemplateSource {
        self.templates.as_ref()
    }

    pub(super) fn registry(&self) -> &dyn ProjectRegistry {
        self.registry.as_ref()
    }

    pub(super) fn known_callables(&self) -> &KnownCallables {
        &self.known_callables
    }

    /// Render the `lib` set into the root and `components` into `src/lib`.
    fn template_library(
        &self,
        tree: &mut dyn Tree,
        descriptor: &ProjectConfiguration,
    ) -> MauiResult<usize> {
        let ctx = RenderContext::for_project(&descriptor.name, &descriptor.root);
        let components_root = descriptor.path("src/lib");

        let mut written = 0;
        for (set, destination) in [
            (LIBRARY_TEMPLATES, descriptor.root.clone()),
            (COMPONENT_TEMPLATES, components_root),
        ] {
            for file in self.templates.files(set)? {
                let rendered = ctx.render_file(&file, &destination);
                tree.write_string(&rendered.path, &rendered.content)?;
                written += 1;
            }
        }
        Ok(written)
    }

    /// Format, then queue the install unless skipped.
    fn finish(
        &self,
        tree: &mut dyn Tree,
        report: &mut GenerationReport,
        skip_install: bool,
    ) -> MauiResult<Vec<PendingAction>> {
        let formatted = self.formatter.format(tree)?;
        info!(files = formatted, "Workspace formatted");
        report.advance(GenerationPhase::Formatted);

        let mut actions = Vec::new();
        if !skip_install {
            let package_manager = PackageManager::detect(|file| tree.exists(file));
            actions.push(PendingAction::InstallDependencies { package_manager });
        }
        Ok(actions)
    }
}

/// Descriptor registered for the generated library.
pub fn library_descriptor(
    options: &LibraryOptions,
    invocation: &ExternalToolInvocation,
) -> ProjectConfiguration {
    let root = options.library_name.as_str();
    let build = TargetConfiguration::new("@nx/js:tsc")
        .with_output("{options.outputPath}")
        .with_option("outputPath", format!("dist/{root}"))
        .with_option("main", format!("{root}/src/index.ts"))
        .with_option("tsConfig", format!("{root}/tsconfig.lib.json"))
        .with_option("assets", vec![format!("{root}/*.md")]);

    let mut descriptor = ProjectConfiguration::new(root, root, ProjectType::Library)
        .with_target("build", build)
        .with_target(
            "generate-components",
            TargetConfiguration::run_commands(invocation.command_line()),
        );

    if let Some(project) = &options.project {
        descriptor = descriptor.with_target(
            "setup-tailwindcss",
            TargetConfiguration::run_commands(format!("maui tailwind --project={project}")),
        );
    }
    descriptor
}
