//! Style engine implementations

mod plain_css;
mod source_map;

pub use plain_css::PlainCssEngine;
pub use source_map::{SourceMap, SourceMapBuilder};
