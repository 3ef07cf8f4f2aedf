//! `maui config`: inspect the resolved configuration.

use serde_json::Value;

use crate::{
    cli::{ConfigCommands, global::GlobalArgs},
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

/// Dispatch to the correct config subcommand.
pub fn execute(
    cmd: ConfigCommands,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    match cmd {
        ConfigCommands::Get { key } => {
            let value = get_config_value(&config, &key)?;
            output.print(&value)?;
        }

        ConfigCommands::List => {
            let serialised =
                toml::to_string_pretty(&config).map_err(|e| CliError::ConfigError {
                    message: format!("Failed to serialise config: {e}"),
                    source: Some(Box::new(e)),
                })?;
            output.print(serialised.trim_end())?;
        }

        ConfigCommands::Path => match AppConfig::active_path(global.config.as_ref()) {
            Some(path) => output.print(&path.display().to_string())?,
            None => output.info(&format!(
                "No configuration file found; defaults apply (user file: {})",
                AppConfig::config_path().display()
            ))?,
        },
    }

    Ok(())
}

// ── helpers ───────────────────────────────────────────────────────────────────

/// Look up a dotted key such as `theme.color`.
fn get_config_value(config: &AppConfig, key: &str) -> CliResult<String> {
    let unknown = || CliError::ConfigError {
        message: format!("Unknown config key: '{key}'"),
        source: None,
    };

    let root = serde_json::to_value(config).map_err(|e| CliError::ConfigError {
        message: format!("Failed to serialise config: {e}"),
        source: Some(Box::new(e)),
    })?;
    let value = key
        .split('.')
        .try_fold(&root, |node, segment| node.get(segment))
        .ok_or_else(unknown)?;

    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Object(_) => Err(CliError::ConfigError {
            message: format!("'{key}' is a section, not a value"),
            source: None,
        }),
        other => Ok(other.to_string()),
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────
