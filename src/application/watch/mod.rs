//! Watch mode
//!
//! Continuous recompilation of one FileSet:
//! - Polling subscription on the project root (via `notify`)
//! - Ignore predicate for the output and non-stylesheet files
//! - Debouncing (100ms) so one save yields one recompilation
//!
//! ## Usage
//!
//! ```ignore
//! let mut controller = WatchController::new(engine, file_set, reporter, WatchOptions::default());
//! controller.watch()?;
//! controller.run(&running)?;
//! controller.stop();
//! ```

mod controller;
mod event;

#[cfg(test)]
mod tests;

pub use controller::{Dispatch, WatchController};
pub use event::{WatchContext, WatchOptions, WatcherState, DEBOUNCE_MS};
