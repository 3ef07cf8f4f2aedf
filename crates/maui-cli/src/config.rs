//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value.  The
//! CLI layer owns config; the core crate only sees the options built from it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. Environment variables: `MAUI_<SECTION>__<KEY>`, e.g.
//!    `MAUI_THEME__COLOR=theme-zinc`
//! 3. Config file: `--config <FILE>`, otherwise `.maui.toml` in the current
//!    directory layered over the platform config file
//! 4. Built-in defaults (always present)

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use tracing::debug;

use maui_core::domain::{ColorMode, LibraryOptions, ThemeColor};

/// File name of the per-workspace configuration.
pub const LOCAL_CONFIG_FILE: &str = ".maui.toml";

const ENV_PREFIX: &str = "MAUI";

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Library generator defaults.
    pub generator: GeneratorConfig,
    /// Default theme.
    pub theme: ThemeConfig,
    /// Template settings.
    pub templates: TemplateConfig,
    /// Output settings.
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub library_name: String,
    /// Launcher of the external component generator.
    pub tool: String,
    pub component_kind: String,
    pub component_name: String,
    pub skip_install: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        let options = LibraryOptions::default();
        Self {
            library_name: options.library_name,
            tool: options.tool,
            component_kind: options.component_kind,
            component_name: options.component_name,
            skip_install: options.skip_install,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    pub color: ThemeColor,
    pub mode: ColorMode,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateConfig {
    /// Directory whose files override the built-in templates.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub local_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub no_color: bool,
}

impl AppConfig {
    /// Load configuration from defaults, files and the environment.
    ///
    /// An explicit `config_file` must exist; the implicit locations are
    /// optional.
    pub fn load(config_file: Option<&PathBuf>) -> anyhow::Result<Self> {
        let defaults = Config::try_from(&Self::default())
            .context("Failed to build default configuration")?;
        let mut builder = Config::builder().add_source(defaults);

        match config_file {
            Some(path) => {
                debug!(path = %path.display(), "Loading configuration file");
                builder = builder.add_source(
                    File::from(path.as_path())
                        .format(FileFormat::Toml)
                        .required(true),
                );
            }
            None => {
                let global = Self::config_path();
                builder = builder
                    .add_source(
                        File::from(global.as_path())
                            .format(FileFormat::Toml)
                            .required(false),
                    )
                    .add_source(
                        File::from(Path::new(LOCAL_CONFIG_FILE))
                            .format(FileFormat::Toml)
                            .required(false),
                    );
            }
        }

        let config = builder
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .context("Failed to read configuration")?;

        config
            .try_deserialize()
            .context("Invalid configuration values")
    }

    /// Path to the user-level configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `.maui.toml` in the current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("io", "mantistech", "maui")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(LOCAL_CONFIG_FILE))
    }

    /// The file `load` read for `config_file`, if any.
    pub fn active_path(config_file: Option<&PathBuf>) -> Option<PathBuf> {
        if let Some(path) = config_file {
            return Some(path.clone());
        }
        let local = PathBuf::from(LOCAL_CONFIG_FILE);
        if local.is_file() {
            return Some(local);
        }
        Some(Self::config_path()).filter(|p| p.is_file())
    }
}
