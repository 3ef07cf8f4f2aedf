//! Process runner over `std::process`.

use std::process::{Command, Stdio};

use tracing::{debug, instrument};

use maui_core::application::{
    ApplicationError,
    ports::{CommandRunner, CommandSpec, CommandStatus},
};
use maui_core::error::MauiResult;

/// Spawns commands with inherited stdio and waits for them.
///
/// On Windows the command goes through `cmd /C` so that `npx`, `npm` and
/// friends resolve to their `.cmd` shims.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShellCommandRunner;

impl ShellCommandRunner {
    pub fn new() -> Self {
        Self
    }

    fn command(spec: &CommandSpec) -> Command {
        let mut command = if cfg!(windows) {
            let mut c = Command::new("cmd");
            c.arg("/C").arg(&spec.program);
            c
        } else {
            Command::new(&spec.program)
        };
        command
            .args(&spec.args)
            .current_dir(&spec.cwd)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());
        command
    }
}

impl CommandRunner for ShellCommandRunner {
    #[instrument(skip_all, fields(command = %spec))]
    fn run(&self, spec: &CommandSpec) -> MauiResult<CommandStatus> {
        let status = Self::command(spec)
            .status()
            .map_err(|e| ApplicationError::ExternalToolFailure {
                command: spec.to_string(),
                reason: format!("failed to start: {e}"),
            })?;
        debug!(code = ?status.code(), "Process exited");
        Ok(CommandStatus {
            code: status.code(),
        })
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn spec(program: &str, args: &[&str]) -> CommandSpec {
        CommandSpec {
            program: program.into(),
            args: args.iter().map(|s| s.to_string()).collect(),
            cwd: PathBuf::from("."),
        }
    }

    #[test]
    fn reports_exit_codes() {
        let runner = ShellCommandRunner::new();
        assert!(runner.run(&spec("true", &[])).unwrap().success());
        assert_eq!(
            runner.run(&spec("sh", &["-c", "exit 3"])).unwrap().code,
            Some(3)
        );
    }

    #[test]
    fn missing_program_is_external_failure() {
        let err = ShellCommandRunner::new()
            .run(&spec("maui-no-such-program", &[]))
            .unwrap_err();
        assert!(err.to_string().contains("failed to start"));
    }
}
