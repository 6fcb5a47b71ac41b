//! Configuration module for Plume
//!
//! Precedence, lowest to highest:
//! 1. Built-in defaults (`out = app.min.css`)
//! 2. Command-line inputs and output
//! 3. Project config (`.plumerc`, JSON, deep-merged)

mod loader;
mod types;

pub use loader::{load_overrides, merge_config, ConfigResolver};
pub use types::{EffectiveConfig, ExplicitArgs, CONFIG_FILE_NAME, DEFAULT_OUTPUT};
