//! Unified error handling for the core.
//!
//! Wraps domain and application errors behind one type with user-actionable
//! suggestions and a display category.

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::DomainError;

/// Root error type for core operations.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum MauiError {
    /// Errors from the domain layer (invalid input or unmergeable content).
    #[error("{0}")]
    Domain(#[from] DomainError),

    /// Errors from the application layer (orchestration and collaborators).
    #[error("{0}")]
    Application(#[from] ApplicationError),

    /// Configuration or setup errors.
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Unexpected internal errors (bugs).
    #[error("Internal error: {message}. This is a bug, please report it.")]
    Internal { message: String },
}

impl MauiError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Domain(e) => e.suggestions(),
            Self::Application(e) => e.suggestions(),
            Self::Configuration { message } => vec![
                format!("Configuration issue: {}", message),
                "Check your setup and try again".into(),
            ],
            Self::Internal { .. } => vec![
                "This appears to be a bug in maui".into(),
                "Please report this issue at: https://github.com/mantistechio/maui/issues".into(),
            ],
        }
    }

    /// Get error category for display/styling purposes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Domain(e) => match e.category() {
                crate::domain::ErrorCategory::Validation => ErrorCategory::Validation,
                crate::domain::ErrorCategory::Content => ErrorCategory::Validation,
            },
            Self::Application(e) => e.category(),
            Self::Configuration { .. } => ErrorCategory::Configuration,
            Self::Internal { .. } => ErrorCategory::Internal,
        }
    }

    /// Whether a run may log this error and carry on.
    ///
    /// Merge failures and missing projects, templates or files only affect
    /// one per-project step. Everything else aborts the run.
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::Domain(e) => e.is_merge_failure(),
            Self::Application(e) => matches!(
                e,
                ApplicationError::MissingProject { .. }
                    | ApplicationError::MissingTemplate { .. }
                    | ApplicationError::MissingFile { .. }
            ),
            Self::Configuration { .. } | Self::Internal { .. } => false,
        }
    }
}

/// Error categories for UI display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    NotFound,
    Configuration,
    External,
    Internal,
}

/// Convenient result type alias.
pub type MauiResult<T> = Result<T, MauiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recoverability_follows_policy() {
        let merge: MauiError = DomainError::MalformedConfig { reason: "x".into() }.into();
        assert!(merge.is_recoverable());

        let missing: MauiError = ApplicationError::MissingProject { name: "app".into() }.into();
        assert!(missing.is_recoverable());

        let tool: MauiError = ApplicationError::ExternalToolFailure {
            command: "nx".into(),
            reason: "exit 1".into(),
        }
        .into();
        assert!(!tool.is_recoverable());
        assert_eq!(tool.category(), ErrorCategory::External);

        let invalid: MauiError = DomainError::InvalidName {
            name: "".into(),
            reason: "empty".into(),
        }
        .into();
        assert!(!invalid.is_recoverable());
    }
}
