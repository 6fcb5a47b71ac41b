//! Infrastructure Layer
//!
//! Concrete implementations of domain ports.
//! This layer handles all I/O operations.
//!
//! ## Structure
//!
//! - `fs/` - File system implementations (local disk, in-memory for tests)
//! - `engine/` - Style engine implementations (plain CSS, source maps)
//! - `reporter/` - Reporter implementations (console, in-memory)

pub mod engine;
pub mod fs;
pub mod reporter;

pub use engine::PlainCssEngine;
pub use fs::LocalFs;
pub use reporter::{ConsoleOptions, ConsoleReporter, MemoryReporter};
