//! In-memory port fakes for service tests.

use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use serde_json::Value;

use crate::application::ApplicationError;
use crate::application::ports::{
    ChangeKind, Dependency, FileChange, Formatter, PackageManifest, ProjectRegistry,
    TemplateSource, Tree,
};
use crate::domain::{ProjectConfiguration, TemplateFile};
use crate::error::{MauiError, MauiResult};

pub(crate) const INDEX_HTML: &str = "<!doctype html>\n<html lang=\"en\">\n<head></head>\n<body>\n  <app-root></app-root>\n</body>\n</html>\n";

pub(crate) const TAILWIND_CONFIG: &str = "const { join } = require('path');\n\n\
    module.exports = {\n\
    \x20 darkMode: 'class',\n\
    \x20 presets: [require('@spartan-ng/ui-core/hlm-tailwind-preset')],\n\
    \x20 content: [join(__dirname, 'src/**/*.{ts,html}')],\n\
    \x20 theme: {\n\
    \x20   extend: {}\n\
    \x20 },\n\
    \x20 plugins: []\n\
    };\n";

/// A workspace with an application `shop` at `apps/shop`.
pub(crate) fn workspace() -> FakeTree {
    let mut tree = FakeTree::default();
    tree.insert("package.json", "{\n  \"name\": \"ws\"\n}\n");
    tree.insert(
        "apps/shop/project.json",
        "{\n  \"name\": \"shop\",\n  \"root\": \"apps/shop\",\n  \"projectType\": \"application\"\n}\n",
    );
    tree.insert("apps/shop/src/styles.css", "body { margin: 0; }\n");
    tree.insert("apps/shop/src/index.html", INDEX_HTML);
    tree
}

#[derive(Debug, Default)]
pub(crate) struct FakeTree {
    files: BTreeMap<String, Vec<u8>>,
    changes: BTreeMap<String, ChangeKind>,
}

impl FakeTree {
    /// Seed a file without recording a change.
    pub(crate) fn insert(&mut self, path: &str, content: &str) {
        self.files.insert(path.to_string(), content.as_bytes().to_vec());
    }

    pub(crate) fn remove(&mut self, path: &str) {
        self.files.remove(path);
    }

    pub(crate) fn snapshot(&self) -> BTreeMap<String, Vec<u8>> {
        self.files.clone()
    }
}

impl Tree for FakeTree {
    fn root(&self) -> &Path {
        Path::new("/ws")
    }

    fn read(&self, path: &str) -> MauiResult<Option<Vec<u8>>> {
        Ok(self.files.get(path).cloned())
    }

    fn write(&mut self, path: &str, content: &[u8]) -> MauiResult<()> {
        let kind = if self.files.contains_key(path) {
            ChangeKind::Update
        } else {
            ChangeKind::Create
        };
        self.changes.entry(path.to_string()).or_insert(kind);
        self.files.insert(path.to_string(), content.to_vec());
        Ok(())
    }

    fn delete(&mut self, path: &str) -> MauiResult<()> {
        if self.files.remove(path).is_some() {
            self.changes.insert(path.to_string(), ChangeKind::Delete);
        }
        Ok(())
    }

    fn exists(&self, path: &str) -> bool {
        let prefix = format!("{path}/");
        self.files.contains_key(path) || self.files.keys().any(|k| k.starts_with(&prefix))
    }

    fn is_file(&self, path: &str) -> bool {
        self.files.contains_key(path)
    }

    fn children(&self, path: &str) -> Vec<String> {
        let prefix = if path.is_empty() {
            String::new()
        } else {
            format!("{path}/")
        };
        let mut names: Vec<String> = self
            .files
            .keys()
            .filter_map(|k| k.strip_prefix(&prefix))
            .map(|rest| rest.split('/').next().unwrap_or(rest).to_string())
            .collect();
        names.dedup();
        names
    }

    fn list_changes(&self) -> Vec<FileChange> {
        self.changes
            .iter()
            .map(|(path, kind)| FileChange {
                path: path.clone(),
                kind: *kind,
            })
            .collect()
    }

    fn commit(&mut self) -> MauiResult<Vec<FileChange>> {
        let changes = self.list_changes();
        self.changes.clear();
        Ok(changes)
    }
}

/// Registry over `project.json` files found anywhere in the tree.
pub(crate) struct FakeRegistry;

impl FakeRegistry {
    fn descriptors(tree: &dyn Tree, dir: &str, out: &mut Vec<String>) {
        for child in tree.children(dir) {
            let path = if dir.is_empty() {
                child
            } else {
                format!("{dir}/{child}")
            };
            if tree.is_file(&path) {
                if path.ends_with("project.json") {
                    out.push(path);
                }
            } else {
                Self::descriptors(tree, &path, out);
            }
        }
    }
}

impl ProjectRegistry for FakeRegistry {
    fn register(&self, tree: &mut dyn Tree, project: &ProjectConfiguration) -> MauiResult<()> {
        self.update(tree, project)
    }

    fn read(&self, tree: &dyn Tree, name: &str) -> MauiResult<ProjectConfiguration> {
        self.list(tree)?
            .into_iter()
            .find(|p| p.name == name)
            .ok_or_else(|| ApplicationError::MissingProject { name: name.into() }.into())
    }

    fn update(&self, tree: &mut dyn Tree, project: &ProjectConfiguration) -> MauiResult<()> {
        let json = serde_json::to_string_pretty(project).map_err(registry_error)?;
        tree.write_string(&project.path("project.json"), &json)
    }

    fn list(&self, tree: &dyn Tree) -> MauiResult<Vec<ProjectConfiguration>> {
        let mut paths = Vec::new();
        Self::descriptors(tree, "", &mut paths);
        paths
            .iter()
            .map(|path| {
                let text = tree.read_to_string(path)?.unwrap_or_default();
                serde_json::from_str(&text).map_err(registry_error)
            })
            .collect()
    }
}

fn registry_error(e: serde_json::Error) -> MauiError {
    ApplicationError::RegistryError {
        reason: e.to_string(),
    }
    .into()
}

/// Adds missing entries to `package.json`.
pub(crate) struct FakeManifest;

impl PackageManifest for FakeManifest {
    fn add_dependencies(
        &self,
        tree: &mut dyn Tree,
        dependencies: &[Dependency],
        dev_dependencies: &[Dependency],
    ) -> MauiResult<bool> {
        let text = tree.read_to_string("package.json")?.unwrap_or_default();
        let mut json: Value = serde_json::from_str(&text).map_err(registry_error)?;
        let mut changed = false;
        for (section, deps) in [
            ("dependencies", dependencies),
            ("devDependencies", dev_dependencies),
        ] {
            if deps.is_empty() {
                continue;
            }
            let entry = json
                .as_object_mut()
                .map(|o| o.entry(section).or_insert_with(|| Value::Object(Default::default())));
            if let Some(Value::Object(map)) = entry {
                for (name, version) in deps {
                    if !map.contains_key(*name) {
                        map.insert(name.to_string(), Value::from(*version));
                        changed = true;
                    }
                }
            }
        }
        if changed {
            let out = serde_json::to_string_pretty(&json).map_err(registry_error)?;
            tree.write_string("package.json", &out)?;
        }
        Ok(changed)
    }
}

/// Template resources keyed by path.
pub(crate) struct StaticTemplates {
    resources: HashMap<String, String>,
}

impl StaticTemplates {
    pub(crate) fn complete() -> Self {
        let mut resources = HashMap::new();
        for (path, content) in [
            ("lib/src/index.ts.template", "export * from './lib/{{FILE_NAME}}';\n"),
            ("lib/README.md.template", "# {{NAME}}\n"),
            ("components/button/button.ts.template", "export class {{CLASS_NAME}}Button {}\n"),
            ("tailwind/tailwind.config.js.template", TAILWIND_CONFIG),
            (
                "tailwind/tailwind.imports.css",
                "@tailwind base;\n@tailwind components;\n@tailwind utilities;\n",
            ),
        ] {
            resources.insert(path.to_string(), content.to_string());
        }
        for theme in crate::domain::ThemeColor::ALL {
            resources.insert(
                super::styling::theme_template(theme),
                format!(":root {{ --primary: {}; }}\n", theme.as_str()),
            );
        }
        Self { resources }
    }

    /// Everything except resources under `prefix/`.
    pub(crate) fn without(prefix: &str) -> Self {
        let mut templates = Self::complete();
        let prefix = format!("{prefix}/");
        templates.resources.retain(|path, _| !path.starts_with(&prefix));
        templates
    }
}

impl TemplateSource for StaticTemplates {
    fn files(&self, set: &str) -> MauiResult<Vec<TemplateFile>> {
        let prefix = format!("{set}/");
        let mut files: Vec<TemplateFile> = self
            .resources
            .iter()
            .filter_map(|(path, content)| {
                path.strip_prefix(&prefix)
                    .map(|rel| TemplateFile::new(rel, content.clone()))
            })
            .collect();
        if files.is_empty() {
            return Err(ApplicationError::MissingTemplate { name: set.into() }.into());
        }
        files.sort_by(|a, b| a.path.cmp(&b.path));
        Ok(files)
    }

    fn file(&self, path: &str) -> MauiResult<String> {
        self.resources
            .get(path)
            .cloned()
            .ok_or_else(|| ApplicationError::MissingTemplate { name: path.into() }.into())
    }
}

pub(crate) struct NoopFormatter;

impl Formatter for NoopFormatter {
    fn format(&self, _tree: &mut dyn Tree) -> MauiResult<usize> {
        Ok(0)
    }
}
