//! Template sets compiled into the binary.
//!
//! ```text
//! templates/
//! ├── lib/          ← rendered into <root>
//! ├── components/   ← rendered into <root>/src/lib
//! └── tailwind/
//!     ├── tailwind.config.js.template
//!     ├── tailwind.imports.css
//!     └── themes/theme-<colour>.css
//! ```

use include_dir::{Dir, include_dir};

use maui_core::application::{ApplicationError, ports::TemplateSource};
use maui_core::domain::TemplateFile;
use maui_core::error::MauiResult;

static TEMPLATES: Dir = include_dir!("$CARGO_MANIFEST_DIR/templates");

/// The templates that ship with maui.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinTemplates;

impl BuiltinTemplates {
    pub fn new() -> Self {
        Self
    }
}

fn collect(dir: &Dir<'static>, set_root: &str, out: &mut Vec<TemplateFile>) -> MauiResult<()> {
    for file in dir.files() {
        let full = file.path().to_string_lossy().replace('\\', "/");
        let relative = full
            .strip_prefix(set_root)
            .map(|rest| rest.trim_start_matches('/'))
            .unwrap_or(&full);
        let content = file
            .contents_utf8()
            .ok_or_else(|| ApplicationError::MissingTemplate {
                name: format!("{full} (not UTF-8)"),
            })?;
        out.push(TemplateFile::new(relative, content));
    }
    for sub in dir.dirs() {
        collect(sub, set_root, out)?;
    }
    Ok(())
}

impl TemplateSource for BuiltinTemplates {
    fn files(&self, set: &str) -> MauiResult<Vec<TemplateFile>> {
        let missing = || ApplicationError::MissingTemplate { name: set.into() };
        let dir = TEMPLATES.get_dir(set).ok_or_else(missing)?;

        let mut files = Vec::new();
        collect(dir, set, &mut files)?;
        if files.is_empty() {
            return Err(missing().into());
        }
        files.sort_by(|a, b| a.path.cmp(&b.path));
        Ok(files)
    }

    fn file(&self, path: &str) -> MauiResult<String> {
        TEMPLATES
            .get_file(path)
            .and_then(|f| f.contents_utf8())
            .map(String::from)
            .ok_or_else(|| ApplicationError::MissingTemplate { name: path.into() }.into())
    }
}
