//! FileSet resolution
//!
//! Turns the configured input patterns into the concrete, ordered list of
//! stylesheet sources for one output:
//!
//! 1. expand every pattern (zero hits overall is `NoFilesFound`)
//! 2. walk matched directories depth-first, files only
//! 3. drop duplicates, first occurrence wins
//! 4. drop the output path
//! 5. keep recognized stylesheet extensions only
//!
//! Emptiness is only checked after step 1. A pattern that hits nothing but
//! the output (or only non-stylesheet files) resolves to an empty set, and
//! the compile step reports it.

use std::path::{Path, PathBuf};

use crate::domain::entities::FileSet;
use crate::domain::ports::{EntryKind, FileSystem};
use crate::domain::services::glob;
use crate::domain::value_objects::is_stylesheet;
use crate::domain::value_objects::path::same_path;
use crate::error::{PlumeError, PlumeResult};

/// Resolves input patterns against a project root
pub struct FileSetResolver<'a, F: FileSystem + ?Sized> {
    fs: &'a F,
    root: &'a Path,
}

impl<'a, F: FileSystem + ?Sized> FileSetResolver<'a, F> {
    pub fn new(fs: &'a F, root: &'a Path) -> Self {
        Self { fs, root }
    }

    pub fn resolve(&self, inputs: &[String], output: &Path) -> PlumeResult<FileSet> {
        let matched = self.expand_all(inputs)?;
        if matched.is_empty() {
            return Err(PlumeError::NoFilesFound);
        }

        let mut files = Vec::new();
        for entry in matched {
            if self.kind(&entry) == Some(EntryKind::Directory) {
                self.walk(&entry, &mut files);
            } else {
                files.push(entry);
            }
        }

        let mut unique: Vec<PathBuf> = Vec::with_capacity(files.len());
        for file in files {
            if !unique.iter().any(|seen| same_path(seen, &file)) {
                unique.push(file);
            }
        }

        if let Some(index) = unique.iter().position(|f| same_path(f, output)) {
            unique.remove(index);
        }

        let inputs: Vec<PathBuf> = unique.into_iter().filter(|f| is_stylesheet(f)).collect();

        tracing::debug!(
            count = inputs.len(),
            output = %output.display(),
            "resolved file set"
        );
        Ok(FileSet::new(inputs, output))
    }

    fn expand_all(&self, patterns: &[String]) -> PlumeResult<Vec<PathBuf>> {
        let mut matched: Vec<PathBuf> = Vec::new();
        for pattern in patterns {
            for hit in glob::expand(self.fs, self.root, pattern)? {
                if !matched.contains(&hit) {
                    matched.push(hit);
                }
            }
        }
        Ok(matched)
    }

    fn walk(&self, dir: &Path, files: &mut Vec<PathBuf>) {
        let names = match self.fs.list_dir(&self.root.join(dir)) {
            Ok(names) => names,
            Err(e) => {
                tracing::warn!(dir = %dir.display(), error = %e, "skipping unreadable directory");
                return;
            }
        };

        for name in names {
            let entry = dir.join(name);
            if self.kind(&entry) == Some(EntryKind::Directory) {
                self.walk(&entry, files);
            } else {
                files.push(entry);
            }
        }
    }

    fn kind(&self, entry: &Path) -> Option<EntryKind> {
        self.fs.kind(&self.root.join(entry))
    }
}
