//! Templates from a user directory, laid out like the built-in ones.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, instrument, warn};
use walkdir::WalkDir;

use maui_core::application::{ApplicationError, ports::TemplateSource};
use maui_core::domain::TemplateFile;
use maui_core::error::MauiResult;

/// Reads template sets from `root`, deferring to `fallback` for sets and
/// resources the directory does not provide.
pub struct DirectoryTemplates {
    root: PathBuf,
    fallback: Option<Box<dyn TemplateSource>>,
}

impl DirectoryTemplates {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            fallback: None,
        }
    }

    pub fn with_fallback(mut self, fallback: Box<dyn TemplateSource>) -> Self {
        self.fallback = Some(fallback);
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn read_set(&self, dir: &Path) -> MauiResult<Vec<TemplateFile>> {
        let mut files = Vec::new();
        for entry in WalkDir::new(dir).follow_links(true) {
            let entry = entry.map_err(|e| {
                ApplicationError::filesystem(dir.display().to_string(), e.to_string())
            })?;
            if !entry.file_type().is_file() {
                continue;
            }
            let Ok(relative) = entry.path().strip_prefix(dir) else {
                continue;
            };
            let content = fs::read_to_string(entry.path()).map_err(|e| {
                ApplicationError::filesystem(entry.path().display().to_string(), e.to_string())
            })?;
            let relative = relative.to_string_lossy().replace('\\', "/");
            files.push(TemplateFile::new(relative, content));
        }
        files.sort_by(|a, b| a.path.cmp(&b.path));
        Ok(files)
    }
}

impl TemplateSource for DirectoryTemplates {
    #[instrument(skip_all, fields(set = %set, root = %self.root.display()))]
    fn files(&self, set: &str) -> MauiResult<Vec<TemplateFile>> {
        let dir = self.root.join(set);
        if dir.is_dir() {
            let files = self.read_set(&dir)?;
            if !files.is_empty() {
                debug!(files = files.len(), "Template set loaded from directory");
                return Ok(files);
            }
            warn!("Template set directory is empty");
        }
        match &self.fallback {
            Some(fallback) => fallback.files(set),
            None => Err(ApplicationError::MissingTemplate { name: set.into() }.into()),
        }
    }

    fn file(&self, path: &str) -> MauiResult<String> {
        let on_disk = self.root.join(path);
        if on_disk.is_file() {
            return fs::read_to_string(&on_disk).map_err(|e| {
                ApplicationError::filesystem(on_disk.display().to_string(), e.to_string()).into()
            });
        }
        match &self.fallback {
            Some(fallback) => fallback.file(path),
            None => Err(ApplicationError::MissingTemplate { name: path.into() }.into()),
        }
    }
}
