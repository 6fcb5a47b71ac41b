//! Plume - stylesheet merge-and-compile orchestrator
//!
//! Plume resolves a set of stylesheet sources (files, directories, globs),
//! merges them in order into one tree, hands the tree to a style engine and
//! writes a single output, optionally with a source map. Watch mode keeps
//! the output current while sources change.

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;

// Re-exports for convenience
pub use application::{CompileEngine, Dispatch, WatchController, WatchOptions};
pub use config::{ConfigResolver, EffectiveConfig, ExplicitArgs};
pub use domain::entities::{CompileResult, FileSet, Stylesheet};
pub use domain::ports::{FileSystem, Reporter, StyleEngine};
pub use domain::services::{DocumentMerger, FileSetResolver};
pub use error::{PlumeError, PlumeResult};
pub use infrastructure::{ConsoleOptions, ConsoleReporter, LocalFs, PlainCssEngine};
