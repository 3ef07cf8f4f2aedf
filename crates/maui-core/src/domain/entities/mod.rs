pub mod common;
pub mod options;
pub mod plan;
pub mod project;
pub mod template;

pub use crate::domain::DomainError;
pub use options::{LibraryOptions, TailwindOptions};
pub use plan::{
    ExternalToolInvocation, GenerationPhase, GenerationPlan, GenerationReport, PendingAction,
    RecoveredFailure,
};
pub use project::{ProjectConfiguration, TargetConfiguration};
pub use template::{RenderContext, TemplateFile};
