//! Error types for Plume
//!
//! Library errors use `thiserror`; the binary wraps them in `anyhow`.
//! The `Display` text of the user-facing variants is part of the CLI
//! contract and is printed verbatim by the reporter.

use std::path::PathBuf;
use thiserror::Error;

use crate::domain::ports::{EngineError, FsError};

/// Result type alias for Plume operations
pub type PlumeResult<T> = Result<T, PlumeError>;

/// Main error type for Plume operations
#[derive(Error, Debug)]
pub enum PlumeError {
    /// No input specification survived the config merge
    #[error("You must define inputs files")]
    MissingInput,

    /// Input patterns matched nothing, or nothing was left to compile
    #[error("File(s) not found")]
    NoFilesFound,

    /// A glob pattern could not be compiled
    #[error("invalid glob pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },

    /// A source file could not be parsed by the style engine
    #[error("{file}:{line}:{column}: {message}")]
    Parse {
        file: PathBuf,
        line: usize,
        column: usize,
        message: String,
    },

    /// The style engine failed outside of parsing
    #[error("engine error: {0}")]
    Engine(String),

    /// Any failure while merging, transforming or writing
    #[error("Compilation error\n{details}")]
    Compilation { details: String },

    /// File system port error
    #[error(transparent)]
    Fs(#[from] FsError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The change subscription could not be established
    #[error("watch error: {0}")]
    Watch(String),
}

impl PlumeError {
    /// Wrap any error into a reported compilation failure.
    pub fn compilation(err: impl std::fmt::Display) -> Self {
        PlumeError::Compilation {
            details: err.to_string(),
        }
    }

    /// Attach the offending file to an engine error.
    pub fn from_engine(file: PathBuf, err: EngineError) -> Self {
        match err {
            EngineError::Parse {
                line,
                column,
                message,
            } => PlumeError::Parse {
                file,
                line,
                column,
                message,
            },
            EngineError::Process(message) => PlumeError::Engine(message),
        }
    }

    /// Errors that end the invocation with a nonzero exit code.
    ///
    /// Compilation errors are reported and recovered, so they are not fatal.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, PlumeError::Compilation { .. })
    }
}
