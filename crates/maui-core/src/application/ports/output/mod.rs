//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what a generation run needs from the workspace and
//! the outside world. The `maui-adapters` crate provides implementations.
//!
//! All workspace paths are `/`-separated and relative to the workspace root.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::domain::{ProjectConfiguration, TemplateFile};
use crate::error::MauiResult;

/// Kind of a staged change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeKind {
    Create,
    Update,
    Delete,
}

impl fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Create => "CREATE",
            Self::Update => "UPDATE",
            Self::Delete => "DELETE",
        })
    }
}

/// One staged change, as reported by [`Tree::list_changes`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileChange {
    pub path: String,
    pub kind: ChangeKind,
}

/// Port for the workspace file tree.
///
/// Writes are staged: reads observe them immediately, the underlying
/// storage only once [`Tree::commit`] is called.
///
/// Implemented by:
/// - `maui_adapters::tree::MemoryTree` (testing, dry runs)
/// - `maui_adapters::tree::FsTree` (disk-backed staging)
pub trait Tree: Send + Sync {
    /// Workspace root on disk; processes run from here.
    fn root(&self) -> &Path;

    /// File content, `None` when absent.
    fn read(&self, path: &str) -> MauiResult<Option<Vec<u8>>>;

    /// UTF-8 file content, `None` when absent.
    fn read_to_string(&self, path: &str) -> MauiResult<Option<String>> {
        match self.read(path)? {
            None => Ok(None),
            Some(bytes) => String::from_utf8(bytes).map(Some).map_err(|e| {
                crate::application::ApplicationError::filesystem(path, e).into()
            }),
        }
    }

    /// Stage a file write, creating parents implicitly.
    fn write(&mut self, path: &str, content: &[u8]) -> MauiResult<()>;

    /// Stage a text write.
    fn write_string(&mut self, path: &str, content: &str) -> MauiResult<()> {
        self.write(path, content.as_bytes())
    }

    /// Stage a deletion. Deleting an absent file is a no-op.
    fn delete(&mut self, path: &str) -> MauiResult<()>;

    fn exists(&self, path: &str) -> bool;

    fn is_file(&self, path: &str) -> bool;

    /// Names of the direct children of a directory, sorted.
    fn children(&self, path: &str) -> Vec<String>;

    /// Staged changes in path order.
    fn list_changes(&self) -> Vec<FileChange>;

    /// Flush staged changes to the underlying storage.
    fn commit(&mut self) -> MauiResult<Vec<FileChange>>;
}

/// Port for the workspace project registry.
///
/// Implemented by:
/// - `maui_adapters::registry::JsonProjectRegistry` (`project.json` files)
pub trait ProjectRegistry: Send + Sync {
    /// Add a project. A project already registered under the same name is
    /// updated in place.
    fn register(&self, tree: &mut dyn Tree, project: &ProjectConfiguration) -> MauiResult<()>;

    /// Fails with `MissingProject` when no descriptor has this name.
    fn read(&self, tree: &dyn Tree, name: &str) -> MauiResult<ProjectConfiguration>;

    fn update(&self, tree: &mut dyn Tree, project: &ProjectConfiguration) -> MauiResult<()>;

    fn list(&self, tree: &dyn Tree) -> MauiResult<Vec<ProjectConfiguration>>;
}

/// A `name@version` pair to declare in the package manifest.
pub type Dependency = (&'static str, &'static str);

/// Port for the workspace package manifest.
///
/// Implemented by:
/// - `maui_adapters::manifest::PackageJson`
pub trait PackageManifest: Send + Sync {
    /// Declare dependencies. Existing entries are left untouched.
    ///
    /// Returns whether the manifest changed.
    fn add_dependencies(
        &self,
        tree: &mut dyn Tree,
        dependencies: &[Dependency],
        dev_dependencies: &[Dependency],
    ) -> MauiResult<bool>;
}

/// Port for template resources.
///
/// Implemented by:
/// - `maui_adapters::templates::BuiltinTemplates` (embedded in the binary)
/// - `maui_adapters::templates::DirectoryTemplates` (user directory)
pub trait TemplateSource: Send + Sync {
    /// Every file of a template set, paths relative to the set.
    ///
    /// Fails with `MissingTemplate` when the set is absent or empty.
    fn files(&self, set: &str) -> MauiResult<Vec<TemplateFile>>;

    /// A single resource. Fails with `MissingTemplate` when absent.
    fn file(&self, path: &str) -> MauiResult<String>;
}

/// Port for the formatting pass over staged changes.
pub trait Formatter: Send + Sync {
    /// Format every changed file. Returns the number of files rewritten.
    fn format(&self, tree: &mut dyn Tree) -> MauiResult<usize>;
}

/// A process to spawn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub program: String,
    pub args: Vec<String>,
    pub cwd: PathBuf,
}

impl CommandSpec {
    /// Split `argv` into program and arguments. `None` for an empty argv.
    pub fn from_argv(argv: Vec<String>, cwd: impl Into<PathBuf>) -> Option<Self> {
        let mut argv = argv.into_iter();
        let program = argv.next()?;
        Some(Self {
            program,
            args: argv.collect(),
            cwd: cwd.into(),
        })
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// Exit status of a finished process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandStatus {
    /// `None` when the process was killed by a signal.
    pub code: Option<i32>,
}

impl CommandStatus {
    pub const SUCCESS: Self = Self { code: Some(0) };

    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

/// Port for spawning external processes.
///
/// Implemented by:
/// - `maui_adapters::process::ShellCommandRunner`
#[cfg_attr(test, mockall::automock)]
pub trait CommandRunner: Send + Sync {
    /// Run to completion with inherited stdio.
    ///
    /// Errors only when the process cannot be started.
    fn run(&self, command: &CommandSpec) -> MauiResult<CommandStatus>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_spec_from_argv() {
        let spec = CommandSpec::from_argv(
            vec!["npx".into(), "nx".into(), "generate".into()],
            "/ws",
        )
        .unwrap();
        assert_eq!(spec.program, "npx");
        assert_eq!(spec.args, ["nx", "generate"]);
        assert_eq!(spec.to_string(), "npx nx generate");
        assert!(CommandSpec::from_argv(Vec::new(), "/ws").is_none());
    }

    #[test]
    fn status_success_needs_zero() {
        assert!(CommandStatus::SUCCESS.success());
        assert!(!CommandStatus { code: Some(1) }.success());
        assert!(!CommandStatus { code: None }.success());
    }
}
