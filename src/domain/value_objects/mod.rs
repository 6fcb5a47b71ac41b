//! Domain Value Objects
//!
//! Immutable value types that represent domain concepts.

mod extension;
pub mod path;
mod processing_options;

pub use extension::{is_stylesheet, STYLESHEET_EXTENSIONS};
pub use processing_options::{ProcessingOptions, SourceMapSettings, SOURCEMAPS_KEY};
