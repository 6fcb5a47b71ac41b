//! Domain Entities
//!
//! - `FileSet` - resolved sources of one compile target
//! - `Stylesheet` - an ordered rule tree, possibly merged from many files
//! - `CompileResult` - serialized output of a compile

mod compile_result;
mod file_set;
mod stylesheet;

pub use compile_result::CompileResult;
pub use file_set::FileSet;
pub use stylesheet::{Node, NodeKind, SourcePosition, Stylesheet};
