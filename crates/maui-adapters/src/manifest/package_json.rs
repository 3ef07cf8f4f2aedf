//! `package.json` dependency declarations.

use serde_json::{Map, Value};
use tracing::{debug, info, instrument};

use maui_core::application::{
    ApplicationError,
    ports::{Dependency, PackageManifest, Tree},
};
use maui_core::error::{MauiError, MauiResult};

pub const MANIFEST_FILE: &str = "package.json";

/// Adds dependencies to the workspace `package.json`.
///
/// Entries already present keep their version. Touched sections are kept
/// sorted by package name.
#[derive(Debug, Clone)]
pub struct PackageJson {
    path: String,
}

impl PackageJson {
    /// The manifest at the workspace root.
    pub fn new() -> Self {
        Self::at(MANIFEST_FILE)
    }

    pub fn at(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }

    fn error(&self, reason: impl Into<String>) -> MauiError {
        ApplicationError::ManifestError {
            path: self.path.clone(),
            reason: reason.into(),
        }
        .into()
    }
}

impl Default for PackageJson {
    fn default() -> Self {
        Self::new()
    }
}

impl PackageManifest for PackageJson {
    #[instrument(skip_all, fields(path = %self.path))]
    fn add_dependencies(
        &self,
        tree: &mut dyn Tree,
        dependencies: &[Dependency],
        dev_dependencies: &[Dependency],
    ) -> MauiResult<bool> {
        let text = tree
            .read_to_string(&self.path)?
            .ok_or_else(|| self.error("file not found"))?;
        let mut json: Value =
            serde_json::from_str(&text).map_err(|e| self.error(e.to_string()))?;
        let root = json
            .as_object_mut()
            .ok_or_else(|| self.error("top level is not an object"))?;

        let mut added = 0;
        for (section, wanted) in [
            ("dependencies", dependencies),
            ("devDependencies", dev_dependencies),
        ] {
            if wanted.is_empty() {
                continue;
            }
            added += add_to_section(root, section, wanted).map_err(|r| self.error(r))?;
        }

        if added == 0 {
            debug!("All dependencies already declared");
            return Ok(false);
        }

        let mut out = serde_json::to_string_pretty(&json).map_err(|e| self.error(e.to_string()))?;
        out.push('\n');
        tree.write_string(&self.path, &out)?;
        info!(added, "Dependencies added");
        Ok(true)
    }
}

/// Insert missing entries, then re-sort the section. Returns how many were added.
fn add_to_section(
    root: &mut Map<String, Value>,
    section: &str,
    wanted: &[Dependency],
) -> Result<usize, String> {
    let entry = root
        .entry(section)
        .or_insert_with(|| Value::Object(Map::new()));
    let Value::Object(current) = entry else {
        return Err(format!("'{section}' is not an object"));
    };

    let mut added = 0;
    for (name, version) in wanted {
        if !current.contains_key(*name) {
            current.insert((*name).to_string(), Value::from(*version));
            added += 1;
        }
    }

    if added > 0 {
        let mut sorted: Vec<(String, Value)> = std::mem::take(current).into_iter().collect();
        sorted.sort_by(|a, b| a.0.cmp(&b.0));
        current.extend(sorted);
    }
    Ok(added)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::MemoryTree;

    const MANIFEST: &str = r#"{
  "name": "ws",
  "dependencies": {
    "@angular/core": "~17.0.0",
    "@ng-icons/core": "^24.0.0"
  },
  "scripts": {}
}
"#;

    #[test]
    fn adds_missing_sorted_and_keeps_existing_versions() {
        let mut tree = MemoryTree::new().with_file("package.json", MANIFEST);
        let changed = PackageJson::new()
            .add_dependencies(
                &mut tree,
                &[("@ng-icons/core", "^25.1.0"), ("@ngxpert/cmdk", "^2.0.0")],
                &[("tailwindcss", "^3.3.0")],
            )
            .unwrap();
        assert!(changed);

        let json: Value =
            serde_json::from_str(&tree.read_to_string("package.json").unwrap().unwrap()).unwrap();
        let deps: Vec<&String> = json["dependencies"].as_object().unwrap().keys().collect();
        assert_eq!(deps, ["@angular/core", "@ng-icons/core", "@ngxpert/cmdk"]);
        assert_eq!(json["dependencies"]["@ng-icons/core"], "^24.0.0");
        assert_eq!(json["devDependencies"]["tailwindcss"], "^3.3.0");

        // top-level key order is preserved
        let keys: Vec<&String> = json.as_object().unwrap().keys().collect();
        assert_eq!(keys, ["name", "dependencies", "scripts", "devDependencies"]);
    }

    #[test]
    fn nothing_to_add_leaves_file_alone() {
        let mut tree = MemoryTree::new().with_file("package.json", MANIFEST);
        let changed = PackageJson::new()
            .add_dependencies(&mut tree, &[("@angular/core", "latest")], &[])
            .unwrap();
        assert!(!changed);
        assert!(tree.list_changes().is_empty());
    }

    #[test]
    fn missing_manifest_is_an_error() {
        let mut tree = MemoryTree::new();
        let err = PackageJson::new()
            .add_dependencies(&mut tree, &[("a", "1")], &[])
            .unwrap_err();
        assert!(matches!(
            err,
            MauiError::Application(ApplicationError::ManifestError { .. })
        ));
    }
}
