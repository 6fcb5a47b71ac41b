//! Domain Layer
//!
//! The resolution and merge logic, free of concrete I/O.
//!
//! ## Structure
//!
//! - `entities/` - FileSet, Stylesheet, CompileResult
//! - `value_objects/` - ProcessingOptions, extensions, path helpers
//! - `services/` - glob expansion, FileSetResolver, DocumentMerger
//! - `ports/` - FileSystem, StyleEngine and Reporter traits
//!
//! All file access goes through the `FileSystem` port with the project
//! root passed explicitly; nothing here reads the process working directory.

pub mod entities;
pub mod ports;
pub mod services;
pub mod value_objects;
