//! Process adapters.

mod shell;

pub use shell::ShellCommandRunner;
