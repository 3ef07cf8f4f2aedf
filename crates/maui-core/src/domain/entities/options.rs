use crate::domain::error::DomainError;
use crate::domain::names::validate_project_name;
use crate::domain::value_objects::{ColorMode, ThemeColor};

pub const DEFAULT_LIBRARY_NAME: &str = "maui";
pub const DEFAULT_TOOL: &str = "npx nx";
pub const DEFAULT_COMPONENT_KIND: &str = "@spartan-ng/cli:ui";
pub const DEFAULT_COMPONENT_NAME: &str = "all";

/// Options of the library generator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LibraryOptions {
    pub library_name: String,
    /// Application whose config, stylesheet and `index.html` are updated.
    pub project: Option<String>,
    pub theme: ThemeColor,
    pub color_mode: ColorMode,
    pub skip_install: bool,
    pub skip_components: bool,
    pub tool: String,
    pub component_kind: String,
    pub component_name: String,
}

impl Default for LibraryOptions {
    fn default() -> Self {
        Self {
            library_name: DEFAULT_LIBRARY_NAME.to_string(),
            project: None,
            theme: ThemeColor::default(),
            color_mode: ColorMode::default(),
            skip_install: false,
            skip_components: false,
            tool: DEFAULT_TOOL.to_string(),
            component_kind: DEFAULT_COMPONENT_KIND.to_string(),
            component_name: DEFAULT_COMPONENT_NAME.to_string(),
        }
    }
}

impl LibraryOptions {
    pub fn validate(&self) -> Result<(), DomainError> {
        validate_project_name(&self.library_name)?;
        if let Some(project) = &self.project {
            validate_project_name(project)?;
        }
        require_non_empty("tool", &self.tool)?;
        require_non_empty("component-kind", &self.component_kind)?;
        require_non_empty("component-name", &self.component_name)
    }

    /// Directory the external component generator writes into.
    pub fn components_directory(&self) -> String {
        format!("{}/src/lib/spartanui", self.library_name)
    }
}

/// Options of the standalone Tailwind setup generator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TailwindOptions {
    pub project: String,
    pub skip_tailwind_config: bool,
    pub skip_styles_update: bool,
    pub theme: ThemeColor,
    pub color_mode: ColorMode,
    pub skip_install: bool,
}

impl TailwindOptions {
    pub fn new(project: impl Into<String>) -> Self {
        Self {
            project: project.into(),
            skip_tailwind_config: false,
            skip_styles_update: false,
            theme: ThemeColor::default(),
            color_mode: ColorMode::default(),
            skip_install: false,
        }
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        validate_project_name(&self.project)
    }
}

fn require_non_empty(option: &str, value: &str) -> Result<(), DomainError> {
    if value.trim().is_empty() {
        return Err(DomainError::InvalidOption {
            option: option.to_string(),
            reason: "must not be empty".to_string(),
        });
    }
    Ok(())
}
