//! Flags shared by every `maui` subcommand.

use clap::Args;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct GlobalArgs {
    /// Workspace root the generators read from and write to.
    #[arg(
        short = 'w',
        long = "workspace",
        global = true,
        value_name = "DIR",
        default_value = ".",
        help = "Workspace root directory"
    )]
    pub workspace: PathBuf,

    /// Explicit configuration file. When given it must exist; otherwise the
    /// user file and `.maui.toml` are picked up if present.
    #[arg(
        short = 'c',
        long = "config",
        global = true,
        value_name = "FILE",
        help = "Read configuration from FILE"
    )]
    pub config: Option<PathBuf>,

    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        global = true,
        help = "Log more (-v, -vv, -vvv)",
        long_help = "Log level on stderr:
    (none)  - warnings and errors
    -v      - generation phases
    -vv     - files, merges and commands
    -vvv    - everything"
    )]
    pub verbose: u8,

    /// Only errors reach the terminal.
    #[arg(
        short = 'q',
        long = "quiet",
        global = true,
        conflicts_with = "verbose",
        help = "Print errors only"
    )]
    pub quiet: bool,

    /// Also enabled by a non-empty `NO_COLOR`.
    #[arg(
        long = "no-color",
        global = true,
        env = "NO_COLOR",
        help = "Disable colored output"
    )]
    pub no_color: bool,

    #[arg(
        long = "output-format",
        global = true,
        value_enum,
        default_value = "auto",
        help = "How results are printed"
    )]
    pub output_format: OutputFormat,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// `human` on a terminal, `plain` when piped.
    #[default]
    Auto,
    /// Coloured, with status symbols.
    Human,
    /// No colours.
    Plain,
    /// A single JSON document on stdout.
    Json,
}
