//! Disk-backed tree: reads fall through to the workspace, writes are staged
//! until commit.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument};

use maui_core::application::{
    ApplicationError,
    ports::{FileChange, Tree},
};
use maui_core::error::{MauiError, MauiResult};

use super::overlay::{Overlay, Staged, tree_key};

/// Staging tree over a workspace directory.
#[derive(Debug)]
pub struct FsTree {
    root: PathBuf,
    overlay: Overlay,
}

impl FsTree {
    /// Open the workspace at `root`, which must be an existing directory.
    pub fn open(root: impl Into<PathBuf>) -> MauiResult<Self> {
        let root = root.into();
        if !root.is_dir() {
            return Err(ApplicationError::FilesystemError {
                path: root.display().to_string(),
                reason: "workspace root is not a directory".into(),
            }
            .into());
        }
        Ok(Self {
            root,
            overlay: Overlay::default(),
        })
    }

    fn disk_path(&self, key: &str) -> PathBuf {
        if key.is_empty() {
            self.root.clone()
        } else {
            self.root.join(key)
        }
    }

    fn disk_children(&self, key: &str) -> Vec<String> {
        let Ok(entries) = fs::read_dir(self.disk_path(key)) else {
            return Vec::new();
        };
        entries
            .filter_map(Result::ok)
            .filter_map(|entry| entry.file_name().into_string().ok())
            .collect()
    }
}

impl Tree for FsTree {
    fn root(&self) -> &Path {
        &self.root
    }

    fn read(&self, path: &str) -> MauiResult<Option<Vec<u8>>> {
        let key = tree_key(path)?;
        match self.overlay.get(&key) {
            Some(Staged::Write(content)) => return Ok(Some(content.clone())),
            Some(Staged::Delete) => return Ok(None),
            None => {}
        }

        let disk = self.disk_path(&key);
        if disk.is_dir() {
            return Ok(None);
        }
        match fs::read(&disk) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(map_io_error(&disk, e, "read file")),
        }
    }

    fn write(&mut self, path: &str, content: &[u8]) -> MauiResult<()> {
        let key = tree_key(path)?;
        debug!(path = %key, bytes = content.len(), "Staged write");
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
        match self.overlay.get(&key) {
            Some(Staged::Write(_)) => true,
            Some(Staged::Delete) => false,
            None => self.disk_path(&key).exists() || self.overlay.has_written_under(&key),
        }
    }

    fn is_file(&self, path: &str) -> bool {
        let Ok(key) = tree_key(path) else {
            return false;
        };
        match self.overlay.get(&key) {
            Some(Staged::Write(_)) => true,
            Some(Staged::Delete) => false,
            None => self.disk_path(&key).is_file(),
        }
    }

    fn children(&self, path: &str) -> Vec<String> {
        let Ok(key) = tree_key(path) else {
            return Vec::new();
        };
        self.overlay.children(&key, self.disk_children(&key))
    }

    fn list_changes(&self) -> Vec<FileChange> {
        self.overlay.changes(|p| self.disk_path(p).is_file())
    }

    #[instrument(skip_all, fields(root = %self.root.display()))]
    fn commit(&mut self) -> MauiResult<Vec<FileChange>> {
        let changes = self.list_changes();
        for (key, staged) in self.overlay.drain() {
            let disk = self.root.join(&key);
            match staged {
                Staged::Write(content) => {
                    if let Some(parent) = disk.parent() {
                        fs::create_dir_all(parent)
                            .map_err(|e| map_io_error(parent, e, "create directory"))?;
                    }
                    fs::write(&disk, content).map_err(|e| map_io_error(&disk, e, "write file"))?;
                }
                Staged::Delete => match fs::remove_file(&disk) {
                    Ok(()) => {}
                    Err(e) if e.kind() == io::ErrorKind::NotFound => {}
                    Err(e) => return Err(map_io_error(&disk, e, "remove file")),
                },
            }
        }
        info!(files = changes.len(), "Changes committed");
        Ok(changes)
    }
}

fn map_io_error(path: &Path, e: io::Error, operation: &str) -> MauiError {
    ApplicationError::FilesystemError {
        path: path.display().to_string(),
        reason: format!("Failed to {}: {}", operation, e),
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use maui_core::application::ports::ChangeKind;
    use tempfile::TempDir;

    #[test]
    fn nothing_reaches_disk_before_commit() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("package.json"), "{}").unwrap();

        let mut tree = FsTree::open(dir.path()).unwrap();
        tree.write_string("maui/src/index.ts", "export {};\n").unwrap();
        tree.write_string("package.json", "{\"a\":1}").unwrap();

        assert!(!dir.path().join("maui").exists());
        assert_eq!(
            tree.read_to_string("package.json").unwrap().as_deref(),
            Some("{\"a\":1}")
        );
        assert_eq!(
            fs::read_to_string(dir.path().join("package.json")).unwrap(),
            "{}"
        );

        let changes = tree.commit().unwrap();
        assert_eq!(changes.len(), 2);
        assert_eq!(changes[0].kind, ChangeKind::Create);
        assert_eq!(changes[1].kind, ChangeKind::Update);
        assert_eq!(
            fs::read_to_string(dir.path().join("maui/src/index.ts")).unwrap(),
            "export {};\n"
        );
    }

    #[test]
    fn staged_delete_hides_disk_file() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("old.css"), "a {}").unwrap();

        let mut tree = FsTree::open(dir.path()).unwrap();
        tree.delete("old.css").unwrap();
        assert!(!tree.exists("old.css"));
        assert_eq!(tree.read("old.css").unwrap(), None);
        assert!(tree.children("").is_empty());

        tree.commit().unwrap();
        assert!(!dir.path().join("old.css").exists());
    }

    #[test]
    fn open_requires_a_directory() {
        let dir = TempDir::new().unwrap();
        let err = FsTree::open(dir.path().join("missing")).unwrap_err();
        assert!(err.to_string().contains("not a directory"));
    }
}
