//! Output management and formatting.

use std::io::{self, IsTerminal};

use console::Term;
use owo_colors::OwoColorize;
use serde::Serialize;

use maui_core::application::ports::{ChangeKind, FileChange};
use maui_core::domain::{GenerationReport, PendingAction};

use crate::cli::global::{GlobalArgs, OutputFormat};
use crate::config::AppConfig;

/// Manages CLI output based on configuration.
pub struct OutputManager {
    resolved_format: OutputFormat,
    quiet: bool,
    no_color: bool,
    term: Term,
}

impl OutputManager {
    /// Build an `OutputManager` from parsed CLI flags and loaded config.
    pub fn new(args: &GlobalArgs, config: &AppConfig) -> Self {
        // Auto → Human (TTY) or Plain (piped/redirected).
        let resolved_format = if args.output_format == OutputFormat::Auto {
            if io::stdout().is_terminal() {
                OutputFormat::Human
            } else {
                OutputFormat::Plain
            }
        } else {
            args.output_format
        };

        let no_color = args.no_color
            || config.output.no_color
            || resolved_format != OutputFormat::Human;

        Self {
            resolved_format,
            // JSON mode keeps stdout to the JSON document
            quiet: args.quiet || resolved_format == OutputFormat::Json,
            no_color,
            term: Term::stdout(),
        }
    }

    // ── Public write methods ───────────────────────────────────────────────

    /// Generic message; suppressed in quiet mode.
    pub fn print(&self, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        self.term.write_line(msg)
    }

    /// Success indicator: `✓ <msg>`.
    pub fn success(&self, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let line = if self.no_color {
            format!("\u{2713} {msg}") // ✓
        } else {
            format!("{} {}", "\u{2713}".green().bold(), msg.green())
        };
        self.term.write_line(&line)
    }

    /// Warning indicator: `⚠ <msg>`.
    pub fn warning(&self, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let line = if self.no_color {
            format!("\u{26a0} {msg}") // ⚠
        } else {
            format!("{} {}", "\u{26a0}".yellow().bold(), msg.yellow())
        };
        self.term.write_line(&line)
    }

    /// Informational indicator: `ℹ <msg>`.
    pub fn info(&self, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let line = if self.no_color {
            format!("\u{2139} {msg}") // ℹ
        } else {
            format!("{} {}", "\u{2139}".blue().bold(), msg.blue())
        };
        self.term.write_line(&line)
    }

    /// Bold cyan header line.
    pub fn header(&self, text: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let line = if self.no_color {
            text.to_owned()
        } else {
            text.cyan().bold().to_string()
        };
        self.term.write_line(&line)
    }

    /// Pretty JSON on stdout. Printed even in quiet mode so pipes stay
    /// parseable.
    pub fn json<T: Serialize>(&self, value: &T) -> io::Result<()> {
        let text = serde_json::to_string_pretty(value).map_err(io::Error::other)?;
        self.term.write_line(&text)
    }

    // ── Generation output ─────────────────────────────────────────────────

    /// One line per staged change: `CREATE path`.
    pub fn changes(&self, changes: &[FileChange]) -> io::Result<()> {
        for change in changes {
            self.print(&self.change_line(change))?;
        }
        Ok(())
    }

    /// Commands queued for after the commit, in run order.
    pub fn pending_actions(&self, actions: &[PendingAction]) -> io::Result<()> {
        if actions.is_empty() {
            return Ok(());
        }
        self.header("Pending actions:")?;
        for action in actions {
            self.print(&format!("  {}", action.argv().join(" ")))?;
        }
        Ok(())
    }

    /// Recovered failures and warnings of a run.
    pub fn report(&self, report: &GenerationReport) -> io::Result<()> {
        for failure in report.recovered() {
            let project = failure.project.as_deref().unwrap_or("-");
            self.warning(&format!(
                "{} skipped for '{}': {}",
                failure.phase, project, failure.message
            ))?;
        }
        for warning in report.warnings() {
            self.warning(warning)?;
        }
        Ok(())
    }

    fn change_line(&self, change: &FileChange) -> String {
        let kind = format!("{:<6}", change.kind.to_string());
        if self.no_color {
            return format!("{kind} {}", change.path);
        }
        let kind = match change.kind {
            ChangeKind::Create => kind.green().to_string(),
            ChangeKind::Update => kind.yellow().to_string(),
            ChangeKind::Delete => kind.red().to_string(),
        };
        format!("{kind} {}", change.path)
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    /// `true` if ANSI colours are enabled.
    pub fn supports_color(&self) -> bool {
        !self.no_color
    }

    /// The resolved (non-Auto) output format.
    pub fn format(&self) -> OutputFormat {
        self.resolved_format
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────
