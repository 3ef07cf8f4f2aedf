//! Argument definitions for `maui`. Values are converted to core options in
//! the command handlers.

use clap::{Args, Parser, Subcommand, ValueEnum};

use maui_core::domain::{ColorMode, ThemeColor};

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "maui",
    bin_name = "maui",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Workspace generators for the MAUI component library",
    long_about = "maui registers a shared UI library in an Nx workspace, wires \
                  Tailwind into an application and runs the component generator.",
    after_help = "EXAMPLES:\n\
        \x20 maui library --project shop --theme orange --color-mode dark\n\
        \x20 maui tailwind --project admin --skip-styles-update\n\
        \x20 maui components --name button --directory maui/src/lib/spartanui\n\
        \x20 maui projects --format json",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Register the UI library and set up the target application.
    #[command(
        visible_alias = "lib",
        about = "Generate the UI library",
        after_help = "EXAMPLES:\n\
            \x20 maui library\n\
            \x20 maui library --project shop --theme zinc\n\
            \x20 maui library --name ui-kit --skip-install --dry-run"
    )]
    Library(LibraryArgs),

    /// Add Tailwind config, stylesheet and root tags to an application.
    #[command(
        about = "Set up Tailwind in an application",
        after_help = "EXAMPLES:\n\
            \x20 maui tailwind --project shop\n\
            \x20 maui tailwind --project shop --theme red --color-mode dark"
    )]
    Tailwind(TailwindArgs),

    /// Run the external component generator directly.
    #[command(
        about = "Generate components with the external generator",
        after_help = "EXAMPLES:\n\
            \x20 maui components\n\
            \x20 maui components --name dialog --directory maui/src/lib/spartanui"
    )]
    Components(ComponentsArgs),

    /// List the projects registered in the workspace.
    #[command(visible_alias = "ls", about = "List workspace projects")]
    Projects(ProjectsArgs),

    /// Inspect the resolved configuration.
    #[command(
        about = "Configuration inspection",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 maui config get generator.library_name\n\
            \x20 maui config list\n\
            \x20 maui config path"
    )]
    Config(ConfigCommands),
}

// ── library ───────────────────────────────────────────────────────────────────

/// Arguments for `maui library`.
#[derive(Debug, Args)]
pub struct LibraryArgs {
    /// Library project name; also its root directory.
    #[arg(short = 'n', long = "name", value_name = "NAME", help = "Library name")]
    pub name: Option<String>,

    /// Application to wire Tailwind and the theme into.
    #[arg(
        short = 'p',
        long = "project",
        value_name = "PROJECT",
        help = "Application project to set up"
    )]
    pub project: Option<String>,

    #[command(flatten)]
    pub theme: ThemeArgs,

    /// Do not queue a package installation.
    #[arg(long = "skip-install", help = "Skip installing dependencies")]
    pub skip_install: bool,

    /// Do not queue the external component generator.
    #[arg(long = "skip-components", help = "Skip generating components")]
    pub skip_components: bool,

    #[command(flatten)]
    pub generator: GeneratorArgs,

    /// Preview what would change without writing any files.
    #[arg(long = "dry-run", help = "Show changes without writing them")]
    pub dry_run: bool,
}

// ── tailwind ──────────────────────────────────────────────────────────────────

/// Arguments for `maui tailwind`.
#[derive(Debug, Args)]
pub struct TailwindArgs {
    /// Application to set up.
    #[arg(
        short = 'p',
        long = "project",
        value_name = "PROJECT",
        help = "Application project to set up"
    )]
    pub project: String,

    #[arg(long = "skip-tailwind-config", help = "Leave tailwind.config.js alone")]
    pub skip_tailwind_config: bool,

    #[arg(long = "skip-styles-update", help = "Leave the stylesheet and index.html alone")]
    pub skip_styles_update: bool,

    #[command(flatten)]
    pub theme: ThemeArgs,

    #[arg(long = "skip-install", help = "Skip installing dependencies")]
    pub skip_install: bool,

    #[arg(long = "dry-run", help = "Show changes without writing them")]
    pub dry_run: bool,
}

// ── components ────────────────────────────────────────────────────────────────

/// Arguments for `maui components`.
#[derive(Debug, Args)]
pub struct ComponentsArgs {
    /// Component (or `all`) to generate.
    #[arg(long = "name", value_name = "NAME", help = "Component name")]
    pub name: Option<String>,

    /// Output directory, relative to the workspace root.
    #[arg(
        long = "directory",
        value_name = "DIR",
        help = "Directory the components are written to"
    )]
    pub directory: Option<String>,

    #[command(flatten)]
    pub generator: GeneratorArgs,

    #[arg(long = "dry-run", help = "Print the command without running it")]
    pub dry_run: bool,
}

// ── projects ──────────────────────────────────────────────────────────────────

/// Arguments for `maui projects`.
#[derive(Debug, Args)]
pub struct ProjectsArgs {
    #[arg(
        long = "format",
        value_enum,
        default_value = "table",
        help = "Output format"
    )]
    pub format: ListFormat,
}

/// Output format for the `projects` command.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ListFormat {
    /// Human-readable table.
    Table,
    /// One name per line.
    List,
    /// JSON array of project descriptors.
    Json,
}

// ── shared groups ─────────────────────────────────────────────────────────────

/// Theme selection; unset values come from the configuration.
#[derive(Debug, Args)]
pub struct ThemeArgs {
    #[arg(short = 't', long = "theme", value_enum, help = "Theme colour")]
    pub theme: Option<Theme>,

    #[arg(long = "color-mode", value_enum, help = "Colour mode")]
    pub color_mode: Option<Mode>,
}

/// External component generator overrides.
#[derive(Debug, Args)]
pub struct GeneratorArgs {
    /// Launcher of the external generator, e.g. `npx nx`.
    #[arg(long = "tool", value_name = "COMMAND", help = "Generator launcher")]
    pub tool: Option<String>,

    #[arg(long = "kind", value_name = "GENERATOR", help = "Generator to invoke")]
    pub kind: Option<String>,
}

// ── config subcommands ────────────────────────────────────────────────────────

/// Subcommands for `maui config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `theme.color`.
        key: String,
    },
    /// Print all configuration values.
    List,
    /// Print the path to the configuration file in use.
    Path,
}

// ── value enums ───────────────────────────────────────────────────────────────

/// Built-in themes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum Theme {
    Green,
    Blue,
    Red,
    Zinc,
    Orange,
}

impl From<Theme> for ThemeColor {
    fn from(theme: Theme) -> Self {
        match theme {
            Theme::Green => Self::Green,
            Theme::Blue => Self::Blue,
            Theme::Red => Self::Red,
            Theme::Zinc => Self::Zinc,
            Theme::Orange => Self::Orange,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum Mode {
    Light,
    Dark,
}

impl From<Mode> for ColorMode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Light => Self::Light,
            Mode::Dark => Self::Dark,
        }
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────
