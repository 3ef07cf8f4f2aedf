//! Application layer for maui.
//!
//! This layer contains:
//! - **Services**: Use case orchestration (GeneratorService, PostGenerationRunner)
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Errors**: Application-specific error types
//!
//! The application layer sequences the domain transformations but contains
//! no text manipulation itself. All merge rules live in `crate::domain`.

pub mod error;
pub mod ports;
pub mod services;

pub use services::{GeneratorService, PostGenerationRunner};

// Re-export port traits (for adapter implementation)
pub use ports::{
    ChangeKind, CommandRunner, CommandSpec, CommandStatus, Dependency, FileChange, Formatter,
    PackageManifest, ProjectRegistry, TemplateSource, Tree,
};

pub use error::ApplicationError;
