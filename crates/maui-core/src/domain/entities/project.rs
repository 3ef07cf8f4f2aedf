use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::value_objects::ProjectType;

/// A project descriptor as stored in `<root>/project.json`.
///
/// Fields this tool does not manage are kept in `extra` so that a
/// read-modify-write cycle never drops them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectConfiguration {
    #[serde(rename = "$schema", default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,

    #[serde(default)]
    pub name: String,

    pub root: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_root: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_type: Option<ProjectType>,

    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub targets: IndexMap<String, TargetConfiguration>,

    #[serde(default)]
    pub tags: Vec<String>,

    #[serde(flatten)]
    pub extra: IndexMap<String, Value>,
}

impl ProjectConfiguration {
    pub fn new(name: impl Into<String>, root: impl Into<String>, kind: ProjectType) -> Self {
        let root = root.into();
        Self {
            schema: None,
            name: name.into(),
            source_root: Some(format!("{root}/src")),
            root,
            project_type: Some(kind),
            targets: IndexMap::new(),
            tags: Vec::new(),
            extra: IndexMap::new(),
        }
    }

    pub fn with_schema(mut self, schema: impl Into<String>) -> Self {
        self.schema = Some(schema.into());
        self
    }

    pub fn with_target(mut self, name: impl Into<String>, target: TargetConfiguration) -> Self {
        self.targets.insert(name.into(), target);
        self
    }

    /// `sourceRoot`, falling back to `<root>/src`.
    pub fn source_root(&self) -> String {
        self.source_root
            .clone()
            .unwrap_or_else(|| format!("{}/src", self.root))
    }

    /// Path of a file relative to the project root.
    pub fn path(&self, relative: &str) -> String {
        if self.root.is_empty() || self.root == "." {
            relative.to_string()
        } else {
            format!("{}/{relative}", self.root.trim_end_matches('/'))
        }
    }
}

/// One entry of a descriptor's `targets` map.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetConfiguration {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub executor: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub outputs: Vec<String>,

    #[serde(default, skip_serializing_if = "serde_json::Map::is_empty")]
    pub options: serde_json::Map<String, Value>,

    #[serde(flatten)]
    pub extra: IndexMap<String, Value>,
}

impl TargetConfiguration {
    pub fn new(executor: impl Into<String>) -> Self {
        Self {
            executor: Some(executor.into()),
            ..Self::default()
        }
    }

    /// An `nx:run-commands` target running a single shell command.
    pub fn run_commands(command: impl Into<String>) -> Self {
        Self::new("nx:run-commands").with_option("command", command.into())
    }

    pub fn with_output(mut self, output: impl Into<String>) -> Self {
        self.outputs.push(output.into());
        self
    }

    pub fn with_option(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.options.insert(key.into(), value.into());
        self
    }

    pub fn command(&self) -> Option<&str> {
        self.options.get("command").and_then(Value::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn serializes_camel_case_and_skips_empty() {
        let project = ProjectConfiguration::new("maui", "maui", ProjectType::Library)
            .with_target("lint", TargetConfiguration::new("@nx/eslint:lint"));
        let value = serde_json::to_value(&project).unwrap();
        assert_eq!(
            value,
            json!({
                "name": "maui",
                "root": "maui",
                "sourceRoot": "maui/src",
                "projectType": "library",
                "targets": { "lint": { "executor": "@nx/eslint:lint" } },
                "tags": []
            })
        );
    }

    #[test]
    fn unknown_fields_survive_a_round_trip() {
        let raw = json!({
            "$schema": "../node_modules/nx/schemas/project-schema.json",
            "name": "app",
            "root": "apps/app",
            "prefix": "app",
            "targets": {
                "serve": { "executor": "@angular-devkit/build-angular:dev-server", "defaultConfiguration": "development" }
            },
            "implicitDependencies": ["maui"]
        });
        let project: ProjectConfiguration = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(project.extra["prefix"], json!("app"));
        assert_eq!(
            project.targets["serve"].extra["defaultConfiguration"],
            json!("development")
        );
        assert_eq!(project.source_root(), "apps/app/src");

        let back = serde_json::to_value(&project).unwrap();
        assert_eq!(back["implicitDependencies"], json!(["maui"]));
        assert_eq!(back["$schema"], raw["$schema"]);
    }

    #[test]
    fn run_commands_target_exposes_command() {
        let target = TargetConfiguration::run_commands("npx nx g x --name=all");
        assert_eq!(target.executor.as_deref(), Some("nx:run-commands"));
        assert_eq!(target.command(), Some("npx nx g x --name=all"));
    }

    #[test]
    fn path_joins_under_root() {
        let project = ProjectConfiguration::new("app", "apps/app/", ProjectType::Application);
        assert_eq!(project.path("tailwind.config.js"), "apps/app/tailwind.config.js");
        let root = ProjectConfiguration::new("app", ".", ProjectType::Application);
        assert_eq!(root.path("src/styles.css"), "src/styles.css");
    }
}
