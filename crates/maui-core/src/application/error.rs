//! Application layer errors.
//!
//! These errors represent failures in orchestration and in the external
//! collaborators behind the ports, not in the text transformations.
//! Transformation errors are `DomainError` from `crate::domain`.

use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur during a generation run.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ApplicationError {
    /// The named project is not registered in the workspace.
    #[error("Project '{name}' not found in the workspace")]
    MissingProject { name: String },

    /// A required template or theme resource is absent.
    #[error("Template resource '{name}' not found")]
    MissingTemplate { name: String },

    /// A file the run expected to update does not exist.
    #[error("File not found: {path}")]
    MissingFile { path: String },

    /// Another project already owns the root directory.
    #[error("Project '{existing}' already uses root '{root}'")]
    ProjectExists { existing: String, root: String },

    /// A post-generation command failed to start or exited non-zero.
    #[error("External command failed: {command} ({reason})")]
    ExternalToolFailure { command: String, reason: String },

    /// Reading or writing the workspace failed.
    #[error("Filesystem error at {path}: {reason}")]
    FilesystemError { path: String, reason: String },

    /// The package manifest could not be read or updated.
    #[error("Package manifest error at {path}: {reason}")]
    ManifestError { path: String, reason: String },

    /// A project descriptor could not be read or written.
    #[error("Project registry error: {reason}")]
    RegistryError { reason: String },
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::MissingProject { name } => vec![
                format!("No project.json declares a project named '{}'", name),
                "Check the name with: maui projects".into(),
                "Run from the workspace root or pass --workspace".into(),
            ],
            Self::MissingTemplate { name } => vec![
                format!("Missing resource: {}", name),
                "Check the 'templates.directory' setting, or unset it to use the built-in templates"
                    .into(),
            ],
            Self::MissingFile { path } => vec![
                format!("Expected file: {}", path),
                "Create it, or skip this step with the matching --skip flag".into(),
            ],
            Self::ProjectExists { existing, root } => vec![
                format!("'{}' is already the root of project '{}'", root, existing),
                "Choose a different library name with --name".into(),
            ],
            Self::ExternalToolFailure { command, .. } => vec![
                format!("Command: {}", command),
                "Run the command by hand to see its full output".into(),
                "The workspace files were already written; only this step needs repeating".into(),
            ],
            Self::FilesystemError { path, .. } => vec![
                format!("Failed to access: {}", path),
                "Check that you have write permissions".into(),
            ],
            Self::ManifestError { path, .. } => vec![
                format!("Check that {} is valid JSON", path),
                "A workspace needs a package.json at its root".into(),
            ],
            Self::RegistryError { .. } => vec![
                "Check that every project.json in the workspace is valid JSON".into(),
            ],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::MissingProject { .. } | Self::MissingTemplate { .. } | Self::MissingFile { .. } => {
                ErrorCategory::NotFound
            }
            Self::ProjectExists { .. } => ErrorCategory::Validation,
            Self::ExternalToolFailure { .. } => ErrorCategory::External,
            Self::ManifestError { .. } | Self::RegistryError { .. } => ErrorCategory::Configuration,
            Self::FilesystemError { .. } => ErrorCategory::Internal,
        }
    }

    pub fn filesystem(path: impl Into<String>, reason: impl ToString) -> Self {
        Self::FilesystemError {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}
