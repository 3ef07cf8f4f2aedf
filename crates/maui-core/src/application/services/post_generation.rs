//! Runs the side effects a plan queued, after the tree is committed.

use std::path::Path;

use tracing::{info, instrument};

use crate::{
    application::{
        ApplicationError,
        ports::{CommandRunner, CommandSpec},
    },
    domain::PendingAction,
    error::MauiResult,
};

/// Executes pending actions in order through a [`CommandRunner`].
pub struct PostGenerationRunner {
    runner: Box<dyn CommandRunner>,
}

impl PostGenerationRunner {
    pub fn new(runner: Box<dyn CommandRunner>) -> Self {
        Self { runner }
    }

    /// Run every action from `workspace_root`.
    ///
    /// The first failure stops the remaining actions and is returned as
    /// `ExternalToolFailure`. Returns the number of actions run.
    #[instrument(skip_all, fields(actions = actions.len(), cwd = %workspace_root.display()))]
    pub fn execute(&self, workspace_root: &Path, actions: &[PendingAction]) -> MauiResult<usize> {
        for (index, action) in actions.iter().enumerate() {
            let command = CommandSpec::from_argv(action.argv(), workspace_root).ok_or_else(|| {
                ApplicationError::ExternalToolFailure {
                    command: action.to_string(),
                    reason: "empty command".into(),
                }
            })?;

            info!(step = index + 1, command = %command, "Running");
            let status = self.runner.run(&command)?;
            if !status.success() {
                let reason = match status.code {
                    Some(code) => format!("exit status {code}"),
                    None => "terminated by signal".to_string(),
                };
                return Err(ApplicationError::ExternalToolFailure {
                    command: command.to_string(),
                    reason,
                }
                .into());
            }
        }

        info!("All post-generation actions completed");
        Ok(actions.len())
    }
}
