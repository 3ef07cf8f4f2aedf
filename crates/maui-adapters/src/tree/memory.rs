//! In-memory tree for tests and dry runs.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use maui_core::application::ports::{FileChange, Tree};
use maui_core::error::MauiResult;

use super::overlay::{Overlay, Staged, tree_key};

/// A workspace held entirely in memory.
///
/// Committing moves staged changes into the committed file map.
#[derive(Debug, Clone)]
pub struct MemoryTree {
    root: PathBuf,
    committed: BTreeMap<String, Vec<u8>>,
    overlay: Overlay,
}

impl MemoryTree {
    /// Create an empty tree rooted at `.`.
    pub fn new() -> Self {
        Self::with_root(".")
    }

    /// Create an empty tree that reports `root` as its on-disk location.
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            committed: BTreeMap::new(),
            overlay: Overlay::default(),
        }
    }

    /// Seed a committed file (builder style). `path` must already be
    /// normalised.
    pub fn with_file(mut self, path: &str, content: impl AsRef<[u8]>) -> Self {
        self.committed
            .insert(path.to_string(), content.as_ref().to_vec());
        self
    }

    /// Committed content, ignoring staged changes.
    pub fn committed(&self, path: &str) -> Option<&[u8]> {
        self.committed.get(path).map(Vec::as_slice)
    }

    /// Every committed path.
    pub fn committed_paths(&self) -> Vec<String> {
        self.committed.keys().cloned().collect()
    }

    fn base_children(&self, dir: &str) -> Vec<String> {
        let prefix = if dir.is_empty() {
            String::new()
        } else {
            format!("{dir}/")
        };
        let mut names: Vec<String> = self
            .committed
            .keys()
            .filter_map(|k| k.strip_prefix(&prefix))
            .filter_map(|rest| rest.split('/').next())
            .map(String::from)
            .collect();
        names.dedup();
        names
    }

    fn base_is_dir(&self, path: &str) -> bool {
        let prefix = format!("{path}/");
        self.committed.keys().any(|k| k.starts_with(&prefix))
    }
}

impl Default for MemoryTree {
    fn default() -> Self {
        Self::new()
    }
}

impl Tree for MemoryTree {
    fn root(&self) -> &Path {
        &self.root
    }

    fn read(&self, path: &str) -> MauiResult<Option<Vec<u8>>> {
        let key = tree_key(path)?;
        Ok(match self.overlay.get(&key) {
            Some(Staged::Write(content)) => Some(content.clone()),
            Some(Staged::Delete) => None,
            None => self.committed.get(&key).cloned(),
        })
    }

    fn write(&mut self, path: &str, content: &[u8]) -> MauiResult<()> {
        let key = tree_key(path)?;
        self.overlay.write(key, content.to_vec());
        Ok(())
    }

    fn delete(&mut self, path: &str) -> MauiResult<()> {
        let key = tree_key(path)?;
        self.overlay.delete(key);
        Ok(())
    }

    fn exists(&self, path: &str) -> bool {
        let Ok(key) = tree_key(path) else {
            return false;
        };
        if key.is_empty() {
            return true;
        }
        match self.overlay.get(&key) {
            Some(Staged::Write(_)) => true,
            Some(Staged::Delete) => false,
            None => {
                self.committed.contains_key(&key)
                    || self.base_is_dir(&key)
                    || self.overlay.has_written_under(&key)
            }
        }
    }

    fn is_file(&self, path: &str) -> bool {
        let Ok(key) = tree_key(path) else {
            return false;
        };
        match self.overlay.get(&key) {
            Some(Staged::Write(_)) => true,
            Some(Staged::Delete) => false,
            None => self.committed.contains_key(&key),
        }
    }

    fn children(&self, path: &str) -> Vec<String> {
        let Ok(key) = tree_key(path) else {
            return Vec::new();
        };
        self.overlay.children(&key, self.base_children(&key))
    }

    fn list_changes(&self) -> Vec<FileChange> {
        self.overlay.changes(|p| self.committed.contains_key(p))
    }

    fn commit(&mut self) -> MauiResult<Vec<FileChange>> {
        let changes = self.list_changes();
        for (path, staged) in self.overlay.drain() {
            match staged {
                Staged::Write(content) => {
                    self.committed.insert(path, content);
                }
                Staged::Delete => {
                    self.committed.remove(&path);
                }
            }
        }
        Ok(changes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use maui_core::application::ports::ChangeKind;

    #[test]
    fn reads_see_staged_writes_before_commit() {
        let mut tree = MemoryTree::new().with_file("package.json", "{}");
        tree.write_string("maui/src/index.ts", "export {};\n").unwrap();

        assert_eq!(
            tree.read_to_string("maui/src/index.ts").unwrap().as_deref(),
            Some("export {};\n")
        );
        assert!(tree.committed("maui/src/index.ts").is_none());
        assert!(tree.exists("maui"));
        assert!(tree.exists("maui/src"));
        assert!(!tree.is_file("maui"));
        assert_eq!(tree.children(""), ["maui", "package.json"]);
    }

    #[test]
    fn commit_applies_and_reports_changes() {
        let mut tree = MemoryTree::new()
            .with_file("package.json", "{}")
            .with_file("old.txt", "x");
        tree.write_string("package.json", "{\"a\":1}").unwrap();
        tree.write_string("new.txt", "y").unwrap();
        tree.delete("old.txt").unwrap();

        let changes = tree.commit().unwrap();
        let kinds: Vec<(&str, ChangeKind)> =
            changes.iter().map(|c| (c.path.as_str(), c.kind)).collect();
        assert_eq!(
            kinds,
            [
                ("new.txt", ChangeKind::Create),
                ("old.txt", ChangeKind::Delete),
                ("package.json", ChangeKind::Update),
            ]
        );
        assert!(tree.list_changes().is_empty());
        assert_eq!(tree.committed_paths(), ["new.txt", "package.json"]);
    }

    #[test]
    fn paths_are_normalised() {
        let mut tree = MemoryTree::new();
        tree.write_string("./maui//README.md", "# maui").unwrap();
        assert!(tree.is_file("maui/README.md"));
        assert!(tree.write_string("../escape", "").is_err());
        assert!(!tree.exists("/etc/passwd"));
    }
}
