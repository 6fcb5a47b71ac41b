//! Reporter implementations

mod console;
mod memory;

pub use console::{ColorMode, ConsoleOptions, ConsoleReporter};
pub use memory::{MemoryReporter, Report};
