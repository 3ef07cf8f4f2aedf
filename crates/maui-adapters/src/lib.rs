//! Infrastructure adapters for maui.
//!
//! This crate implements the ports defined in `maui_core::application::ports`.
//! It contains all disk and process I/O.

pub mod formatter;
pub mod manifest;
pub mod process;
pub mod registry;
pub mod templates;
pub mod tree;

// Re-export commonly used adapters
pub use formatter::WhitespaceFormatter;
pub use manifest::PackageJson;
pub use process::ShellCommandRunner;
pub use registry::JsonProjectRegistry;
pub use templates::{BuiltinTemplates, DirectoryTemplates};
pub use tree::{FsTree, MemoryTree};

use maui_core::application::{GeneratorService, PostGenerationRunner, ports::TemplateSource};

/// A generator wired to the production adapters.
///
/// `template_dir` overrides built-in templates resource by resource.
pub fn default_generator(template_dir: Option<&std::path::Path>) -> GeneratorService {
    let templates: Box<dyn TemplateSource> = match template_dir {
        Some(dir) => {
            Box::new(DirectoryTemplates::new(dir).with_fallback(Box::new(BuiltinTemplates)))
        }
        None => Box::new(BuiltinTemplates),
    };
    GeneratorService::new(
        Box::new(JsonProjectRegistry),
        Box::new(PackageJson::new()),
        templates,
        Box::new(WhitespaceFormatter),
    )
}

/// A post-generation runner that spawns real processes.
pub fn default_runner() -> PostGenerationRunner {
    PostGenerationRunner::new(Box::new(ShellCommandRunner))
}
