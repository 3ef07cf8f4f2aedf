//! Tree adapters.

mod fs;
mod memory;
mod overlay;

pub use fs::FsTree;
pub use memory::MemoryTree;
