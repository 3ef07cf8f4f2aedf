//! The output of a generation run: phases reached, recovered failures and the
//! side effects to perform once the tree is committed.

use std::fmt;

use serde::Serialize;

use crate::domain::value_objects::PackageManager;

/// Workflow states, in the only order they can be reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum GenerationPhase {
    Init,
    DependenciesDeclared,
    ProjectRegistered,
    FilesTemplated,
    ConfigMerged,
    StylesMerged,
    Formatted,
    Done,
}

impl GenerationPhase {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Init => "init",
            Self::DependenciesDeclared => "dependencies-declared",
            Self::ProjectRegistered => "project-registered",
            Self::FilesTemplated => "files-templated",
            Self::ConfigMerged => "config-merged",
            Self::StylesMerged => "styles-merged",
            Self::Formatted => "formatted",
            Self::Done => "done",
        }
    }
}

impl fmt::Display for GenerationPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `<tool> generate <kind> --name=<name> --directory=<directory>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExternalToolInvocation {
    /// Launcher, possibly several words (`npx nx`).
    pub tool: String,
    pub kind: String,
    pub name: String,
    pub directory: String,
}

impl ExternalToolInvocation {
    pub fn new(
        tool: impl Into<String>,
        kind: impl Into<String>,
        name: impl Into<String>,
        directory: impl Into<String>,
    ) -> Self {
        Self {
            tool: tool.into(),
            kind: kind.into(),
            name: name.into(),
            directory: directory.into(),
        }
    }

    pub fn args(&self) -> Vec<String> {
        vec![
            "generate".to_string(),
            self.kind.clone(),
            format!("--name={}", self.name),
            format!("--directory={}", self.directory),
        ]
    }

    /// Program followed by every argument, the tool's extra words first.
    pub fn argv(&self) -> Vec<String> {
        self.tool
            .split_whitespace()
            .map(String::from)
            .chain(self.args())
            .collect()
    }

    pub fn command_line(&self) -> String {
        self.argv().join(" ")
    }
}

/// A side effect queued for after the tree is committed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "kebab-case")]
pub enum PendingAction {
    InstallDependencies { package_manager: PackageManager },
    InvokeExternalTool(ExternalToolInvocation),
}

impl PendingAction {
    pub fn argv(&self) -> Vec<String> {
        match self {
            Self::InstallDependencies { package_manager } => {
                let (program, args) = package_manager.install_command();
                std::iter::once(program)
                    .chain(args.iter().copied())
                    .map(String::from)
                    .collect()
            }
            Self::InvokeExternalTool(invocation) => invocation.argv(),
        }
    }
}

impl fmt::Display for PendingAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InstallDependencies { package_manager } => {
                write!(f, "install dependencies ({package_manager})")
            }
            Self::InvokeExternalTool(invocation) => f.write_str(&invocation.command_line()),
        }
    }
}

/// A failure that was logged and skipped instead of aborting the run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecoveredFailure {
    pub phase: GenerationPhase,
    pub project: Option<String>,
    pub message: String,
}

/// What a run did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenerationReport {
    phases: Vec<GenerationPhase>,
    recovered: Vec<RecoveredFailure>,
    warnings: Vec<String>,
}

impl Default for GenerationReport {
    fn default() -> Self {
        Self::new()
    }
}

impl GenerationReport {
    pub fn new() -> Self {
        Self {
            phases: vec![GenerationPhase::Init],
            recovered: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Record reaching `phase`. Phases only move forward; going back is ignored.
    pub fn advance(&mut self, phase: GenerationPhase) {
        if self.phases.last().is_none_or(|last| phase > *last) {
            self.phases.push(phase);
        }
    }

    pub fn recover(
        &mut self,
        phase: GenerationPhase,
        project: Option<&str>,
        message: impl Into<String>,
    ) {
        self.recovered.push(RecoveredFailure {
            phase,
            project: project.map(String::from),
            message: message.into(),
        });
    }

    pub fn warn(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }

    pub fn phases(&self) -> &[GenerationPhase] {
        &self.phases
    }

    pub fn current_phase(&self) -> GenerationPhase {
        self.phases.last().copied().unwrap_or(GenerationPhase::Init)
    }

    pub fn reached(&self, phase: GenerationPhase) -> bool {
        self.phases.contains(&phase)
    }

    pub fn recovered(&self) -> &[RecoveredFailure] {
        &self.recovered
    }

    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    pub fn is_clean(&self) -> bool {
        self.recovered.is_empty()
    }
}

/// Result of planning: run `pending_actions` in order after committing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenerationPlan {
    pub pending_actions: Vec<PendingAction>,
    pub report: GenerationReport,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spartan() -> ExternalToolInvocation {
        ExternalToolInvocation::new("npx nx", "@spartan-ng/cli:ui", "all", "maui/src/lib/spartanui")
    }

    #[test]
    fn invocation_command_line() {
        assert_eq!(
            spartan().command_line(),
            "npx nx generate @spartan-ng/cli:ui --name=all --directory=maui/src/lib/spartanui"
        );
        assert_eq!(spartan().argv()[0], "npx");
    }

    #[test]
    fn install_action_argv() {
        let action = PendingAction::InstallDependencies {
            package_manager: PackageManager::Pnpm,
        };
        assert_eq!(action.argv(), ["pnpm", "install"]);
        assert_eq!(action.to_string(), "install dependencies (pnpm)");
    }

    #[test]
    fn report_phases_only_move_forward() {
        let mut report = GenerationReport::new();
        report.advance(GenerationPhase::DependenciesDeclared);
        report.advance(GenerationPhase::FilesTemplated);
        report.advance(GenerationPhase::ProjectRegistered);
        assert_eq!(
            report.phases(),
            [
                GenerationPhase::Init,
                GenerationPhase::DependenciesDeclared,
                GenerationPhase::FilesTemplated
            ]
        );
        assert_eq!(report.current_phase(), GenerationPhase::FilesTemplated);
        assert!(!report.reached(GenerationPhase::ProjectRegistered));
    }

    #[test]
    fn recovered_failures_make_report_unclean() {
        let mut report = GenerationReport::default();
        assert!(report.is_clean());
        report.recover(GenerationPhase::ConfigMerged, Some("app"), "bad config");
        assert!(!report.is_clean());
        assert_eq!(report.recovered()[0].project.as_deref(), Some("app"));
    }
}
