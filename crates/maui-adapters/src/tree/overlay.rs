//! Staged writes and deletions layered over a base store.

use std::collections::{BTreeMap, BTreeSet};

use maui_core::application::ports::{ChangeKind, FileChange};
use maui_core::domain::entities::common::normalize_path;
use maui_core::error::MauiResult;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Staged {
    Write(Vec<u8>),
    Delete,
}

/// Pending changes keyed by normalised path.
#[derive(Debug, Clone, Default)]
pub(crate) struct Overlay {
    entries: BTreeMap<String, Staged>,
}

impl Overlay {
    pub(crate) fn get(&self, path: &str) -> Option<&Staged> {
        self.entries.get(path)
    }

    pub(crate) fn write(&mut self, path: String, content: Vec<u8>) {
        self.entries.insert(path, Staged::Write(content));
    }

    pub(crate) fn delete(&mut self, path: String) {
        self.entries.insert(path, Staged::Delete);
    }

    /// Whether a staged write lives at or below `path`.
    pub(crate) fn has_written_under(&self, path: &str) -> bool {
        let prefix = format!("{path}/");
        self.entries.iter().any(|(p, staged)| {
            matches!(staged, Staged::Write(_)) && (p == path || p.starts_with(&prefix))
        })
    }

    /// Merge the base listing of `dir` with staged entries.
    pub(crate) fn children(&self, dir: &str, base: Vec<String>) -> Vec<String> {
        let prefix = if dir.is_empty() {
            String::new()
        } else {
            format!("{dir}/")
        };

        let mut names: BTreeSet<String> = base
            .into_iter()
            .filter(|name| {
                !matches!(
                    self.entries.get(&format!("{prefix}{name}")),
                    Some(Staged::Delete)
                )
            })
            .collect();

        for (path, staged) in &self.entries {
            if let (Staged::Write(_), Some(rest)) = (staged, path.strip_prefix(&prefix)) {
                if let Some(first) = rest.split('/').next().filter(|s| !s.is_empty()) {
                    names.insert(first.to_string());
                }
            }
        }
        names.into_iter().collect()
    }

    /// Staged changes, classified against the base store.
    pub(crate) fn changes(&self, in_base: impl Fn(&str) -> bool) -> Vec<FileChange> {
        self.entries
            .iter()
            .filter_map(|(path, staged)| {
                let kind = match (staged, in_base(path.as_str())) {
                    (Staged::Write(_), true) => ChangeKind::Update,
                    (Staged::Write(_), false) => ChangeKind::Create,
                    (Staged::Delete, true) => ChangeKind::Delete,
                    (Staged::Delete, false) => return None,
                };
                Some(FileChange {
                    path: path.clone(),
                    kind,
                })
            })
            .collect()
    }

    pub(crate) fn drain(&mut self) -> std::collections::btree_map::IntoIter<String, Staged> {
        std::mem::take(&mut self.entries).into_iter()
    }
}

/// Normalise a tree path. The empty path and `.` name the root.
pub(crate) fn tree_key(path: &str) -> MauiResult<String> {
    if path.is_empty() || path == "." || path == "./" {
        return Ok(String::new());
    }
    Ok(normalize_path(path)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn children_merge_base_and_staged() {
        let mut overlay = Overlay::default();
        overlay.write("apps/new/project.json".into(), b"{}".to_vec());
        overlay.delete("apps/old".into());

        let children = overlay.children("apps", vec!["old".into(), "shop".into()]);
        assert_eq!(children, ["new", "shop"]);
    }

    #[test]
    fn deleting_an_unknown_file_is_not_a_change() {
        let mut overlay = Overlay::default();
        overlay.delete("ghost.txt".into());
        overlay.write("a.txt".into(), Vec::new());
        overlay.write("b.txt".into(), Vec::new());

        let changes = overlay.changes(|p| p == "b.txt");
        assert_eq!(changes.len(), 2);
        assert_eq!(changes[0].kind, ChangeKind::Create);
        assert_eq!(changes[1].kind, ChangeKind::Update);
    }

    #[test]
    fn root_aliases() {
        assert_eq!(tree_key("").unwrap(), "");
        assert_eq!(tree_key(".").unwrap(), "");
        assert_eq!(tree_key("./maui/").unwrap(), "maui");
        assert!(tree_key("../x").is_err());
    }
}
