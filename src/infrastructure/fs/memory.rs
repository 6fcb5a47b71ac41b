//! In-memory file system for tests
//!
//! Uses `Arc<Mutex<>>` internally so it can be cloned and shared.

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::domain::ports::file_system::{EntryKind, FileSystem, FsError, FsResult};
use crate::domain::value_objects::path::normalize;

#[derive(Debug, Default)]
struct Tree {
    files: BTreeMap<PathBuf, String>,
    dirs: BTreeSet<PathBuf>,
}

#[derive(Debug, Clone, Default)]
pub struct MemoryFs {
    tree: Arc<Mutex<Tree>>,
}

impl MemoryFs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style file insertion; parent directories are implied.
    pub fn with_file(self, path: impl AsRef<Path>, content: &str) -> Self {
        self.insert(path.as_ref(), content);
        self
    }

    pub fn with_dir(self, path: impl AsRef<Path>) -> Self {
        self.tree
            .lock()
            .unwrap()
            .dirs
            .insert(normalize(path.as_ref()));
        self
    }

    pub fn insert(&self, path: &Path, content: &str) {
        self.tree
            .lock()
            .unwrap()
            .files
            .insert(normalize(path), content.to_string());
    }

    /// Snapshot of a file's content
    pub fn contents(&self, path: impl AsRef<Path>) -> Option<String> {
        self.tree
            .lock()
            .unwrap()
            .files
            .get(&normalize(path.as_ref()))
            .cloned()
    }

    fn is_dir(tree: &Tree, path: &Path) -> bool {
        tree.dirs.iter().any(|d| d.starts_with(path))
            || tree
                .files
                .keys()
                .any(|f| f.starts_with(path) && f.as_path() != path)
    }
}

impl FileSystem for MemoryFs {
    fn read(&self, path: &Path) -> FsResult<String> {
        self.contents(path)
            .ok_or_else(|| FsError::NotFound(path.to_path_buf()))
    }

    fn write(&self, path: &Path, content: &str) -> FsResult<()> {
        self.insert(path, content);
        Ok(())
    }

    fn kind(&self, path: &Path) -> Option<EntryKind> {
        let path = normalize(path);
        let tree = self.tree.lock().unwrap();
        if tree.files.contains_key(&path) {
            Some(EntryKind::File)
        } else if Self::is_dir(&tree, &path) {
            Some(EntryKind::Directory)
        } else {
            None
        }
    }

    fn list_dir(&self, path: &Path) -> FsResult<Vec<PathBuf>> {
        let dir = normalize(path);
        let tree = self.tree.lock().unwrap();
        if !Self::is_dir(&tree, &dir) {
            return Err(FsError::NotFound(dir));
        }

        let names: BTreeSet<PathBuf> = tree
            .files
            .keys()
            .chain(tree.dirs.iter())
            .filter_map(|p| p.strip_prefix(&dir).ok())
            .filter_map(|rest| rest.components().next())
            .map(|c| PathBuf::from(c.as_os_str()))
            .collect();
        Ok(names.into_iter().collect())
    }

    fn create_dir_all(&self, path: &Path) -> FsResult<()> {
        self.tree.lock().unwrap().dirs.insert(normalize(path));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn implied_directories_are_listed() {
        let fs = MemoryFs::new()
            .with_file("/p/a.css", "a")
            .with_file("/p/lib/b.css", "b");

        assert_eq!(fs.kind(Path::new("/p/lib")), Some(EntryKind::Directory));
        assert_eq!(fs.kind(Path::new("/p/a.css")), Some(EntryKind::File));
        assert_eq!(
            fs.list_dir(Path::new("/p")).unwrap(),
            vec![PathBuf::from("a.css"), PathBuf::from("lib")]
        );
    }

    #[test]
    fn write_then_read() {
        let fs = MemoryFs::new();
        fs.write(Path::new("/out/app.css"), ".a{}").unwrap();
        assert_eq!(fs.read(Path::new("/out/app.css")).unwrap(), ".a{}");
        assert!(fs.read(Path::new("/out/missing.css")).is_err());
    }
}
