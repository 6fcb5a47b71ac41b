//! Compile use case
//!
//! Merges a FileSet, hands the tree to the engine, and writes the output
//! (plus `<output>.map` for non-inline source maps). Any failure past the
//! emptiness check is a `Compilation` error, which callers report and
//! recover from.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::domain::entities::{CompileResult, FileSet};
use crate::domain::ports::{FileSystem, Reporter, StyleEngine};
use crate::domain::services::DocumentMerger;
use crate::domain::value_objects::path::to_slash;
use crate::domain::value_objects::ProcessingOptions;
use crate::error::{PlumeError, PlumeResult};

/// Path of the separate source map for `output`
pub fn map_path(output: &Path) -> PathBuf {
    let mut name = OsString::from(output.as_os_str());
    name.push(".map");
    PathBuf::from(name)
}

pub struct CompileEngine<F, E> {
    fs: F,
    engine: E,
    root: PathBuf,
    options: ProcessingOptions,
}

impl<F: FileSystem, E: StyleEngine> CompileEngine<F, E> {
    pub fn new(fs: F, engine: E, root: impl Into<PathBuf>, options: ProcessingOptions) -> Self {
        Self {
            fs,
            engine,
            root: root.into(),
            options,
        }
    }

    pub fn fs(&self) -> &F {
        &self.fs
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn options(&self) -> &ProcessingOptions {
        &self.options
    }

    /// Compile `file_set` and write the result.
    pub fn compile(&self, file_set: &FileSet) -> PlumeResult<CompileResult> {
        if file_set.is_empty() {
            return Err(PlumeError::NoFilesFound);
        }
        self.build(file_set).map_err(PlumeError::compilation)
    }

    /// Compile and report the outcome.
    ///
    /// Compilation errors are reported and swallowed; fatal errors are
    /// returned unreported.
    pub fn compile_reported<R: Reporter + ?Sized>(
        &self,
        file_set: &FileSet,
        reporter: &R,
    ) -> PlumeResult<()> {
        self.run_reported(file_set, reporter, || {
            format!(
                "Compile {} file(s) [{}] to {}",
                file_set.len(),
                file_set.joined_inputs(),
                file_set.output().display()
            )
        })
    }

    /// Same as [`compile_reported`](Self::compile_reported), after a change to `changed`.
    pub fn recompile<R: Reporter + ?Sized>(
        &self,
        file_set: &FileSet,
        changed: &Path,
        reporter: &R,
    ) -> PlumeResult<()> {
        self.run_reported(file_set, reporter, || {
            format!("Recompiled file {}", to_slash(changed))
        })
    }

    fn run_reported<R: Reporter + ?Sized>(
        &self,
        file_set: &FileSet,
        reporter: &R,
        success: impl FnOnce() -> String,
    ) -> PlumeResult<()> {
        match self.compile(file_set) {
            Ok(_) => {
                reporter.success(&success());
                Ok(())
            }
            Err(e) if !e.is_fatal() => {
                tracing::debug!(error = %e, "compile failed");
                reporter.error(&e.to_string());
                Ok(())
            }
            Err(e) => Err(e),
        }
    }

    fn build(&self, file_set: &FileSet) -> PlumeResult<CompileResult> {
        let mut options = self.options.clone();
        let merged = DocumentMerger::new(&self.fs, &self.engine, &self.root)
            .merge(file_set.inputs(), &mut options)?;

        let result = self
            .engine
            .process(merged, &options)
            .map_err(|e| PlumeError::from_engine(file_set.output().to_path_buf(), e))?;

        let output = self.root.join(file_set.output());
        if let Some(parent) = output.parent() {
            self.fs.create_dir_all(parent)?;
        }
        self.fs.write(&output, &result.css)?;
        tracing::debug!(path = %output.display(), bytes = result.css.len(), "wrote output");

        if options.writes_separate_map() {
            if let Some(map) = &result.map {
                let map_file = map_path(&output);
                self.fs.write(&map_file, map)?;
                tracing::debug!(path = %map_file.display(), "wrote source map");
            }
        }

        Ok(result)
    }
}
