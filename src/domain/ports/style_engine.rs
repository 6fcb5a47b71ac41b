//! StyleEngine port - the external stylesheet processor
//!
//! The core never looks inside a rule. It asks the engine to parse one file
//! into a [`Stylesheet`], splices trees together, then hands the merged tree
//! back for transformation and serialization.

use thiserror::Error;

use crate::domain::entities::{CompileResult, Stylesheet};
use crate::domain::value_objects::ProcessingOptions;

/// Errors raised by a style engine
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// Source text could not be parsed; positions are 1-based
    #[error("{line}:{column}: {message}")]
    Parse {
        line: usize,
        column: usize,
        message: String,
    },

    /// Transformation or serialization failed
    #[error("{0}")]
    Process(String),
}

/// Parse and process stylesheets
pub trait StyleEngine {
    /// Parse one source file.
    ///
    /// `options.sourcemap().from` names the file being parsed when source
    /// maps are enabled; engines use it to tag node origins.
    fn parse(&self, source: &str, options: &ProcessingOptions) -> Result<Stylesheet, EngineError>;

    /// Transform and serialize a (possibly merged) tree.
    fn process(
        &self,
        root: Stylesheet,
        options: &ProcessingOptions,
    ) -> Result<CompileResult, EngineError>;
}

impl<T: StyleEngine + ?Sized> StyleEngine for &T {
    fn parse(&self, source: &str, options: &ProcessingOptions) -> Result<Stylesheet, EngineError> {
        (**self).parse(source, options)
    }

    fn process(
        &self,
        root: Stylesheet,
        options: &ProcessingOptions,
    ) -> Result<CompileResult, EngineError> {
        (**self).process(root, options)
    }
}
