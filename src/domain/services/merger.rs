//! Document merging
//!
//! Parses every source in resolution order and splices the trees into one.
//! The first file's tree becomes the root; every later file contributes
//! clones of its top-level nodes, appended in order, so the cascade of the
//! output follows the order of the inputs.

use std::path::{Path, PathBuf};

use crate::domain::entities::Stylesheet;
use crate::domain::ports::{FileSystem, StyleEngine};
use crate::domain::value_objects::ProcessingOptions;
use crate::error::{PlumeError, PlumeResult};

pub struct DocumentMerger<'a, F: ?Sized, E: ?Sized> {
    fs: &'a F,
    engine: &'a E,
    root: &'a Path,
}

impl<'a, F, E> DocumentMerger<'a, F, E>
where
    F: FileSystem + ?Sized,
    E: StyleEngine + ?Sized,
{
    pub fn new(fs: &'a F, engine: &'a E, root: &'a Path) -> Self {
        Self { fs, engine, root }
    }

    /// Merge `files` into one tree.
    ///
    /// `options.sourcemaps.from` is pointed at each file before it is parsed,
    /// so a multi-file map attributes every node to its origin.
    pub fn merge(
        &self,
        files: &[PathBuf],
        options: &mut ProcessingOptions,
    ) -> PlumeResult<Stylesheet> {
        let mut root: Option<Stylesheet> = None;

        for file in files {
            let source = self.fs.read(&self.root.join(file))?;
            options.set_sourcemap_from(file);

            let parsed = self
                .engine
                .parse(&source, options)
                .map_err(|e| PlumeError::from_engine(file.clone(), e))?;
            tracing::trace!(file = %file.display(), nodes = parsed.len(), "parsed source");

            match root.as_mut() {
                None => root = Some(parsed),
                Some(tree) => {
                    for node in parsed.nodes() {
                        tree.append(node.clone());
                    }
                }
            }
        }

        Ok(root.unwrap_or_default())
    }
}
