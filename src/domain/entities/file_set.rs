//! FileSet entity - the resolved sources of one compile target

use std::path::{Path, PathBuf};

/// Ordered, deduplicated source files plus the output they compile to.
///
/// Paths are kept as resolved from the user's patterns, usually relative to
/// the project root. `inputs` never contains `output`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSet {
    inputs: Vec<PathBuf>,
    output: PathBuf,
}

impl FileSet {
    pub fn new(inputs: Vec<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Self {
            inputs,
            output: output.into(),
        }
    }

    pub fn inputs(&self) -> &[PathBuf] {
        &self.inputs
    }

    pub fn output(&self) -> &Path {
        &self.output
    }

    pub fn len(&self) -> usize {
        self.inputs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inputs.is_empty()
    }

    /// Inputs joined with `,` for reporting, e.g. `a.css,b.css`.
    pub fn joined_inputs(&self) -> String {
        self.inputs
            .iter()
            .map(|p| p.display().to_string())
            .collect::<Vec<_>>()
            .join(",")
    }
}
