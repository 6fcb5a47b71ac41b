//! Application Layer
//!
//! Use cases that orchestrate the domain through its ports:
//! - `CompileEngine` - merge, process and write one FileSet
//! - `WatchController` - recompile the FileSet on every accepted change

pub mod compile;
pub mod watch;

pub use compile::CompileEngine;
pub use watch::{Dispatch, WatchContext, WatchController, WatchOptions};
