// ============================================================================
// domain/error.rs - PURE LOGIC FAILURES
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (collected into run reports)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Configuration module errors
    // ========================================================================
    /// The source does not have the single `module.exports = { ... }` shape,
    /// or the object literal itself is syntactically broken.
    #[error("Malformed config module: {reason}")]
    MalformedConfig { reason: String },

    /// The literal contains an expression outside the recognised data grammar.
    #[error("Unsupported expression at offset {offset}: {expression}")]
    UnsupportedExpression { expression: String, offset: usize },

    // ========================================================================
    // Stylesheet errors
    // ========================================================================
    #[error("Malformed stylesheet: {reason}")]
    MalformedStylesheet { reason: String },

    // ========================================================================
    // Input validation
    // ========================================================================
    #[error("Invalid name '{name}': {reason}")]
    InvalidName { name: String, reason: String },

    #[error("Invalid option '{option}': {reason}")]
    InvalidOption { option: String, reason: String },

    #[error("Invalid workspace path '{path}': {reason}")]
    InvalidPath { path: String, reason: String },
}

impl DomainError {
    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedConfig {
            reason: reason.into(),
        }
    }

    pub(crate) fn unsupported(expression: impl Into<String>, offset: usize) -> Self {
        Self::UnsupportedExpression {
            expression: expression.into(),
            offset,
        }
    }

    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::MalformedConfig { reason } => vec![
                format!("Details: {}", reason),
                "The file must assign a single object literal to module.exports".into(),
                "The generated configuration was written instead of a merge".into(),
            ],
            Self::UnsupportedExpression { expression, .. } => vec![
                format!("'{}' cannot be merged safely", expression),
                "Only literals, arrays, objects, require(), join() and \
                 createGlobPatternsForDependencies() are understood"
                    .into(),
                "Move computed values into a separate module and require() it".into(),
            ],
            Self::MalformedStylesheet { reason } => vec![
                format!("Details: {}", reason),
                "Check that every '/* maui:theme */' marker has a matching end marker".into(),
            ],
            Self::InvalidName { name, reason } => vec![
                format!("'{}' is invalid: {}", name, reason),
                "Use letters, digits, hyphens and underscores".into(),
            ],
            Self::InvalidOption { option, .. } => vec![
                format!("Check the value passed for '{}'", option),
                "Use --help to list accepted values".into(),
            ],
            Self::InvalidPath { .. } => vec![
                "Paths are relative to the workspace root".into(),
                "Remove leading '/' and any '..' segments".into(),
            ],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::MalformedConfig { .. }
            | Self::UnsupportedExpression { .. }
            | Self::MalformedStylesheet { .. } => ErrorCategory::Content,
            Self::InvalidName { .. } | Self::InvalidOption { .. } | Self::InvalidPath { .. } => {
                ErrorCategory::Validation
            }
        }
    }

    /// Whether this failure only affects a best-effort merge step.
    pub fn is_merge_failure(&self) -> bool {
        matches!(self.category(), ErrorCategory::Content)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Content,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsupported_expression_mentions_whitelist() {
        let err = DomainError::unsupported("colors.blue", 12);
        assert!(err.suggestions().iter().any(|s| s.contains("require()")));
        assert!(err.to_string().contains("offset 12"));
    }

    #[test]
    fn merge_failures_are_content_errors() {
        assert!(DomainError::malformed("no export").is_merge_failure());
        assert!(
            DomainError::MalformedStylesheet {
                reason: "x".into()
            }
            .is_merge_failure()
        );
        assert!(
            !DomainError::InvalidName {
                name: "..".into(),
                reason: "x".into()
            }
            .is_merge_failure()
        );
    }
}
