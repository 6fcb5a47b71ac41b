//! Recognized stylesheet extensions

use std::path::Path;

/// Extensions accepted as stylesheet sources. Anything else is dropped from
/// the input set and ignored by the watcher.
pub const STYLESHEET_EXTENSIONS: &[&str] = &["css", "scss", "sass", "less", "styl"];

/// Whether `path` ends in a recognized stylesheet extension (case-insensitive).
pub fn is_stylesheet(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            STYLESHEET_EXTENSIONS
                .iter()
                .any(|known| known.eq_ignore_ascii_case(ext))
        })
        .unwrap_or(false)
}
