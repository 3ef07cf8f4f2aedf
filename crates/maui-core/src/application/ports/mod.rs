//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `maui-adapters` implement these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `Tree`: Staged workspace file access
//!   - `ProjectRegistry`: Project descriptors
//!   - `PackageManifest`: Dependency declarations
//!   - `TemplateSource`: Template sets and theme resources
//!   - `Formatter`: Post-write formatting
//!   - `CommandRunner`: External processes, after commit
//!
//! - **Driving (Input) Ports**: Called by external world, implemented by application
//!   - (Defined in CLI layer, implemented by services)

pub mod output;

pub use output::{
    ChangeKind, CommandRunner, CommandSpec, CommandStatus, Dependency, FileChange, Formatter,
    PackageManifest, ProjectRegistry, TemplateSource, Tree,
};

#[cfg(test)]
pub use output::MockCommandRunner;
