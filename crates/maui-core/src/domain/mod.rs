// ============================================================================
//  CLEAN MODULE BOUNDARIES
// ============================================================================

//! Core domain layer.
//!
//! Pure text and data transformations with no I/O: configuration-module
//! merging, stylesheet merging, root tag rewriting, naming and the value types
//! that describe a generation run. Everything that touches the workspace goes
//! through the ports of the application layer.
//!
//! - **No I/O**: inputs are strings already read from the tree
//! - **Deterministic**: same inputs, same output text
//! - **Idempotent merges**: re-running a merge with the same input is a no-op
pub mod config_module;
pub mod entities;
pub mod error;
pub mod names;
pub mod root_tags;
pub mod stylesheet;
pub mod value_objects;

pub use config_module::{
    ConfigDocument, ConfigMap, ConfigValue, KnownCallables, MergePolicy, PlaceholderCall,
    merge_config_source,
};
pub use entities::{
    ExternalToolInvocation, GenerationPhase, GenerationPlan, GenerationReport, LibraryOptions,
    PendingAction, ProjectConfiguration, RecoveredFailure, RenderContext, TailwindOptions,
    TargetConfiguration, TemplateFile,
};
pub use error::{DomainError, ErrorCategory};
pub use names::{Names, offset_from_root, validate_project_name};
pub use root_tags::update_root_tags;
pub use stylesheet::{ThemeBlock, merge_styles, parse_imports};
pub use value_objects::{ColorMode, PackageManager, ProjectType, ThemeColor};
