//! Template files and the variables substituted into them.
//!
//! ## Substitution
//!
//! | Where | Syntax | Example |
//! |-------|--------|---------|
//! | file content | `{{VAR}}` | `export * from './lib/{{FILE_NAME}}';` |
//! | path segment | `__VAR__` | `src/lib/__FILE_NAME__.ts` |
//!
//! A trailing `.template` suffix on a file name is stripped after
//! substitution, so `package.json.template` lands as `package.json`.

use indexmap::IndexMap;

use crate::domain::names::{Names, offset_from_root};

pub const TEMPLATE_SUFFIX: &str = ".template";

/// One file of a template set, path relative to the set's root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateFile {
    pub path: String,
    pub content: String,
}

impl TemplateFile {
    pub fn new(path: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
        }
    }
}

/// Variables for one rendering pass.
#[derive(Debug, Clone, Default)]
pub struct RenderContext {
    variables: IndexMap<String, String>,
}

impl RenderContext {
    /// Name variants of `name` plus `OFFSET_FROM_ROOT` for `project_root`.
    pub fn for_project(name: &str, project_root: &str) -> Self {
        let names = Names::new(name);
        let mut ctx = Self::default();
        for (key, value) in names.variables() {
            ctx.variables.insert(key.to_string(), value.to_string());
        }
        ctx.variables
            .insert("OFFSET_FROM_ROOT".to_string(), offset_from_root(project_root));
        ctx
    }

    pub fn with_variable(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.variables.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.variables.get(key).map(String::as_str)
    }

    /// Replace `{{VAR}}` placeholders. Unknown placeholders are left as is.
    pub fn render(&self, template: &str) -> String {
        let mut result = template.to_string();
        for (key, value) in &self.variables {
            let placeholder = format!("{{{{{key}}}}}");
            result = result.replace(&placeholder, value);
        }
        result
    }

    /// Replace `__VAR__` in a relative path and strip the `.template` suffix.
    pub fn render_path(&self, path: &str) -> String {
        let mut result = path.to_string();
        for (key, value) in &self.variables {
            result = result.replace(&format!("__{key}__"), value);
        }
        match result.strip_suffix(TEMPLATE_SUFFIX) {
            Some(stripped) => stripped.to_string(),
            None => result,
        }
    }

    /// Render `file` for placement under `destination`.
    pub fn render_file(&self, file: &TemplateFile, destination: &str) -> TemplateFile {
        let relative = self.render_path(&file.path);
        let path = if destination.is_empty() || destination == "." {
            relative
        } else {
            format!("{}/{relative}", destination.trim_end_matches('/'))
        };
        TemplateFile::new(path, self.render(&file.content))
    }
}
