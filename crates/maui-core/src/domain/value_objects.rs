//! Domain value objects: ThemeColor, ColorMode, ProjectType, PackageManager.
//!
//! # Design
//!
//! These are pure value types: `Copy`, equality-by-value, no identity.
//! Each has a canonical string form (`as_str`) that matches what the workspace
//! files and the command line use, and a `FromStr` parser.

use crate::domain::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ── ThemeColor ───────────────────────────────────────────────────────────────

/// The UI theme applied to the target application.
///
/// The string form doubles as the CSS class put on `<html>` and as the name
/// of the built-in theme stylesheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ThemeColor {
    #[serde(rename = "theme-green")]
    Green,
    #[default]
    #[serde(rename = "theme-blue")]
    Blue,
    #[serde(rename = "theme-red")]
    Red,
    #[serde(rename = "theme-zinc")]
    Zinc,
    #[serde(rename = "theme-orange")]
    Orange,
}

impl ThemeColor {
    pub const ALL: [ThemeColor; 5] = [
        Self::Green,
        Self::Blue,
        Self::Red,
        Self::Zinc,
        Self::Orange,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Green => "theme-green",
            Self::Blue => "theme-blue",
            Self::Red => "theme-red",
            Self::Zinc => "theme-zinc",
            Self::Orange => "theme-orange",
        }
    }

    /// Built-in stylesheet holding this theme's CSS variables.
    pub fn stylesheet_name(&self) -> String {
        format!("{}.css", self.as_str())
    }
}

impl fmt::Display for ThemeColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ThemeColor {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.to_ascii_lowercase();
        let bare = normalized.strip_prefix("theme-").unwrap_or(&normalized);
        match bare {
            "green" => Ok(Self::Green),
            "blue" => Ok(Self::Blue),
            "red" => Ok(Self::Red),
            "zinc" => Ok(Self::Zinc),
            "orange" => Ok(Self::Orange),
            _ => Err(DomainError::InvalidOption {
                option: "theme".into(),
                reason: format!(
                    "unknown theme '{s}' (expected one of: {})",
                    Self::ALL.map(|t| t.as_str()).join(", ")
                ),
            }),
        }
    }
}

// ── ColorMode ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    #[default]
    Light,
    Dark,
}

impl ColorMode {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    pub const fn is_dark(self) -> bool {
        matches!(self, Self::Dark)
    }
}

impl fmt::Display for ColorMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ColorMode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            other => Err(DomainError::InvalidOption {
                option: "color-mode".into(),
                reason: format!("unknown color mode '{other}' (expected light or dark)"),
            }),
        }
    }
}

// ── ProjectType ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectType {
    Application,
    Library,
}

impl ProjectType {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Application => "application",
            Self::Library => "library",
        }
    }
}

impl fmt::Display for ProjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── PackageManager ───────────────────────────────────────────────────────────

/// Package manager used for the deferred install step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PackageManager {
    #[default]
    Npm,
    Yarn,
    Pnpm,
}

impl PackageManager {
    /// Lockfiles checked at the workspace root, in priority order.
    pub const LOCKFILES: [(&'static str, PackageManager); 3] = [
        ("pnpm-lock.yaml", Self::Pnpm),
        ("yarn.lock", Self::Yarn),
        ("package-lock.json", Self::Npm),
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Npm => "npm",
            Self::Yarn => "yarn",
            Self::Pnpm => "pnpm",
        }
    }

    /// Pick the manager whose lockfile exists; npm when none does.
    pub fn detect(has_file: impl Fn(&str) -> bool) -> Self {
        Self::LOCKFILES
            .iter()
            .find(|(lockfile, _)| has_file(lockfile))
            .map(|(_, pm)| *pm)
            .unwrap_or_default()
    }

    /// Program and arguments of the install command.
    pub fn install_command(&self) -> (&'static str, &'static [&'static str]) {
        (self.as_str(), &["install"])
    }
}

impl fmt::Display for PackageManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PackageManager {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "npm" => Ok(Self::Npm),
            "yarn" => Ok(Self::Yarn),
            "pnpm" => Ok(Self::Pnpm),
            other => Err(DomainError::InvalidOption {
                option: "package-manager".into(),
                reason: format!("unknown package manager '{other}'"),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn theme_color_accepts_bare_and_prefixed_names() {
        assert_eq!("blue".parse::<ThemeColor>().unwrap(), ThemeColor::Blue);
        assert_eq!(
            "theme-orange".parse::<ThemeColor>().unwrap(),
            ThemeColor::Orange
        );
        assert_eq!("Theme-Zinc".parse::<ThemeColor>().unwrap(), ThemeColor::Zinc);
        assert!("purple".parse::<ThemeColor>().is_err());
    }

    #[test]
    fn theme_color_serde_uses_class_name() {
        let json = serde_json::to_string(&ThemeColor::Red).unwrap();
        assert_eq!(json, "\"theme-red\"");
        let back: ThemeColor = serde_json::from_str("\"theme-green\"").unwrap();
        assert_eq!(back, ThemeColor::Green);
    }

    #[test]
    fn theme_stylesheet_name() {
        assert_eq!(ThemeColor::Zinc.stylesheet_name(), "theme-zinc.css");
    }

    #[test]
    fn color_mode_parsing() {
        assert_eq!("DARK".parse::<ColorMode>().unwrap(), ColorMode::Dark);
        assert!(ColorMode::Dark.is_dark());
        assert!(!ColorMode::default().is_dark());
        assert!("dim".parse::<ColorMode>().is_err());
    }

    #[test]
    fn package_manager_detection_prefers_pnpm() {
        let pm = PackageManager::detect(|f| f == "pnpm-lock.yaml" || f == "package-lock.json");
        assert_eq!(pm, PackageManager::Pnpm);
        assert_eq!(PackageManager::detect(|f| f == "yarn.lock"), PackageManager::Yarn);
        assert_eq!(PackageManager::detect(|_| false), PackageManager::Npm);
    }
}
