//! Template source adapters.

mod builtin;
mod directory;

pub use builtin::BuiltinTemplates;
pub use directory::DirectoryTemplates;
