//! Project registry over `project.json` descriptors.

use tracing::{debug, info, instrument, warn};

use maui_core::application::{
    ApplicationError,
    ports::{ProjectRegistry, Tree},
};
use maui_core::domain::ProjectConfiguration;
use maui_core::domain::entities::common::{file_name, join_path};
use maui_core::error::{MauiError, MauiResult};

pub const PROJECT_FILE: &str = "project.json";

/// Directories never scanned for descriptors.
pub const SKIPPED_DIRS: [&str; 5] = ["node_modules", "dist", ".git", ".nx", "tmp"];

/// Discovers projects by scanning the tree for `project.json` files.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonProjectRegistry;

impl JsonProjectRegistry {
    pub fn new() -> Self {
        Self
    }

    fn descriptor_paths(tree: &dyn Tree) -> Vec<String> {
        let mut found = Vec::new();
        let mut pending = vec![String::new()];
        while let Some(dir) = pending.pop() {
            for child in tree.children(&dir) {
                let path = join_path(&dir, &child);
                if tree.is_file(&path) {
                    if child == PROJECT_FILE {
                        found.push(path);
                    }
                } else if !SKIPPED_DIRS.contains(&child.as_str()) {
                    pending.push(path);
                }
            }
        }
        found.sort();
        found
    }

    fn load(tree: &dyn Tree, path: &str) -> MauiResult<ProjectConfiguration> {
        let text = tree
            .read_to_string(path)?
            .ok_or_else(|| ApplicationError::MissingFile { path: path.into() })?;
        let mut project: ProjectConfiguration =
            serde_json::from_str(&text).map_err(|e| registry_error(path, e))?;

        let dir = path.strip_suffix(PROJECT_FILE).unwrap_or("").trim_end_matches('/');
        if project.root.is_empty() {
            project.root = dir.to_string();
        }
        if project.name.is_empty() {
            project.name = file_name(dir).to_string();
        }
        Ok(project)
    }

    fn store(tree: &mut dyn Tree, project: &ProjectConfiguration) -> MauiResult<()> {
        let path = project.path(PROJECT_FILE);
        let mut json = serde_json::to_string_pretty(project).map_err(|e| registry_error(&path, e))?;
        json.push('\n');
        tree.write_string(&path, &json)?;
        debug!(path = %path, "Descriptor written");
        Ok(())
    }
}

impl ProjectRegistry for JsonProjectRegistry {
    #[instrument(skip_all, fields(project = %project.name, root = %project.root))]
    fn register(&self, tree: &mut dyn Tree, project: &ProjectConfiguration) -> MauiResult<()> {
        let projects = self.list(tree)?;

        if let Some(owner) = projects
            .iter()
            .find(|p| p.root == project.root && p.name != project.name)
        {
            return Err(ApplicationError::ProjectExists {
                existing: owner.name.clone(),
                root: project.root.clone(),
            }
            .into());
        }

        match projects.into_iter().find(|p| p.name == project.name) {
            Some(existing) => {
                info!("Project already registered, updating");
                let merged = merge_descriptor(existing, project);
                Self::store(tree, &merged)
            }
            None => {
                info!("Registering project");
                Self::store(tree, project)
            }
        }
    }

    fn read(&self, tree: &dyn Tree, name: &str) -> MauiResult<ProjectConfiguration> {
        self.list(tree)?
            .into_iter()
            .find(|p| p.name == name)
            .ok_or_else(|| ApplicationError::MissingProject { name: name.into() }.into())
    }

    fn update(&self, tree: &mut dyn Tree, project: &ProjectConfiguration) -> MauiResult<()> {
        let existing = self.read(tree, &project.name)?;
        if existing.root != project.root {
            // Moving a project is not an update; the old descriptor would linger.
            warn!(
                project = %project.name,
                from = %existing.root,
                to = %project.root,
                "Descriptor root changed"
            );
        }
        Self::store(tree, project)
    }

    fn list(&self, tree: &dyn Tree) -> MauiResult<Vec<ProjectConfiguration>> {
        Self::descriptor_paths(tree)
            .iter()
            .map(|path| Self::load(tree, path))
            .collect()
    }
}

/// Layer `incoming` over an existing descriptor, keeping fields and targets
/// it does not mention.
fn merge_descriptor(
    mut existing: ProjectConfiguration,
    incoming: &ProjectConfiguration,
) -> ProjectConfiguration {
    existing.root = incoming.root.clone();
    if incoming.schema.is_some() {
        existing.schema = incoming.schema.clone();
    }
    if incoming.source_root.is_some() {
        existing.source_root = incoming.source_root.clone();
    }
    if incoming.project_type.is_some() {
        existing.project_type = incoming.project_type;
    }
    for (name, target) in &incoming.targets {
        existing.targets.insert(name.clone(), target.clone());
    }
    for tag in &incoming.tags {
        if !existing.tags.contains(tag) {
            existing.tags.push(tag.clone());
        }
    }
    for (key, value) in &incoming.extra {
        existing.extra.insert(key.clone(), value.clone());
    }
    existing
}

fn registry_error(path: &str, e: serde_json::Error) -> MauiError {
    ApplicationError::RegistryError {
        reason: format!("{path}: {e}"),
    }
    .into()
}
