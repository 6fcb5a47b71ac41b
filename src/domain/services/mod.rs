//! Domain Services
//!
//! Stateless operations over the domain ports:
//! - `glob` - pattern expansion
//! - `FileSetResolver` - patterns to an ordered, filtered FileSet
//! - `DocumentMerger` - many parsed sources to one tree

mod file_set_resolver;
pub mod glob;
mod merger;

pub use file_set_resolver::FileSetResolver;
pub use merger::DocumentMerger;
