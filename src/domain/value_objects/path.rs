//! Path helpers shared by resolution, watching and source maps
//!
//! Paths in a [`FileSet`](crate::domain::entities::FileSet) are kept the way
//! the user wrote them (usually relative to the project root), so equality is
//! decided on a lexical normal form rather than on canonicalized disk paths.

use std::path::{Component, Path, PathBuf};

/// Lexically normalize a path: drop `.` components and trailing separators.
///
/// `..` is kept; resolving it would require touching the disk.
pub fn normalize(path: &Path) -> PathBuf {
    let normalized: PathBuf = path
        .components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect();
    normalized
}

/// Compare two paths after normalization.
pub fn same_path(a: &Path, b: &Path) -> bool {
    normalize(a) == normalize(b)
}

/// Render a path with `/` separators regardless of platform.
pub fn to_slash(path: &Path) -> String {
    let parts: Vec<String> = normalize(path)
        .components()
        .map(|c| match c {
            Component::RootDir => String::new(),
            other => other.as_os_str().to_string_lossy().into_owned(),
        })
        .collect();
    if path.has_root() && parts.len() == 1 {
        return "/".to_string();
    }
    parts.join("/")
}

/// Express `path` relative to the directory `base`.
///
/// Both are normalized first. When one is absolute and the other is not,
/// no common ancestor is known and `path` is returned normalized.
pub fn relative_to(path: &Path, base: &Path) -> PathBuf {
    let path = normalize(path);
    let base = normalize(base);
    if path.is_absolute() != base.is_absolute() {
        return path;
    }

    let path_parts: Vec<Component> = path.components().collect();
    let base_parts: Vec<Component> = base.components().collect();
    let common = path_parts
        .iter()
        .zip(base_parts.iter())
        .take_while(|(a, b)| a == b)
        .count();

    let mut relative = PathBuf::new();
    for _ in common..base_parts.len() {
        relative.push("..");
    }
    for part in &path_parts[common..] {
        relative.push(part.as_os_str());
    }
    relative
}
