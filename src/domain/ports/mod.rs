//! Domain Ports (Interfaces)
//!
//! These traits define the boundaries of the domain layer.
//! Infrastructure layer provides concrete implementations.

pub mod file_system;
pub mod reporter;
pub mod style_engine;

pub use file_system::{EntryKind, FileSystem, FsError, FsResult};
pub use reporter::{ReportLevel, Reporter};
pub use style_engine::{EngineError, StyleEngine};
