//! Glob expansion over the FileSystem port
//!
//! Matching itself is delegated to `globset`; this module only decides where
//! to look. A pattern is walked from its literal base directory (the
//! components before the first one holding a metacharacter), as deep as the
//! pattern can reach.

use std::path::{Component, Path, PathBuf};

use globset::{GlobBuilder, GlobMatcher};

use crate::domain::ports::{EntryKind, FileSystem};
use crate::domain::value_objects::path::normalize;
use crate::error::{PlumeError, PlumeResult};

const GLOB_META: &[char] = &['*', '?', '[', '{'];

/// Whether a pattern contains glob metacharacters
pub fn has_magic(pattern: &str) -> bool {
    pattern.contains(GLOB_META)
}

/// Expand one pattern relative to `root`.
///
/// Literal patterns match when the path exists. Results are sorted and
/// expressed the way the pattern was written (relative stays relative).
pub fn expand<F: FileSystem + ?Sized>(
    fs: &F,
    root: &Path,
    pattern: &str,
) -> PlumeResult<Vec<PathBuf>> {
    let literal = normalize(Path::new(pattern));

    if !has_magic(pattern) {
        return Ok(if fs.exists(&on_disk(root, &literal)) {
            vec![literal]
        } else {
            Vec::new()
        });
    }

    let pattern_text = literal.to_string_lossy().into_owned();
    let matcher = compile(&pattern_text)?;
    let (base, depth) = walk_plan(&literal);
    let allow_hidden = names_hidden_component(&literal);

    let mut matches = Vec::new();
    collect(
        fs,
        root,
        &base,
        depth,
        allow_hidden,
        &matcher,
        &mut matches,
    );
    matches.sort();
    tracing::trace!(pattern, count = matches.len(), "expanded glob");
    Ok(matches)
}

fn compile(pattern: &str) -> PlumeResult<GlobMatcher> {
    GlobBuilder::new(pattern)
        .literal_separator(true)
        .build()
        .map(|glob| glob.compile_matcher())
        .map_err(|e| PlumeError::InvalidPattern {
            pattern: pattern.to_string(),
            message: e.kind().to_string(),
        })
}

/// Literal base directory and how many levels below it the pattern reaches
/// (`None` when a `**` component makes it unbounded).
fn walk_plan(pattern: &Path) -> (PathBuf, Option<usize>) {
    let mut base = PathBuf::new();
    let mut rest = 0usize;
    let mut unbounded = false;
    let mut in_magic = false;

    for component in pattern.components() {
        let text = component.as_os_str().to_string_lossy();
        if !in_magic && !has_magic(&text) {
            base.push(component.as_os_str());
            continue;
        }
        in_magic = true;
        rest += 1;
        if text.contains("**") {
            unbounded = true;
        }
    }

    (base, if unbounded { None } else { Some(rest) })
}

fn names_hidden_component(pattern: &Path) -> bool {
    pattern.components().any(|c| match c {
        Component::Normal(name) => name.to_string_lossy().starts_with('.'),
        _ => false,
    })
}

fn on_disk(root: &Path, relative: &Path) -> PathBuf {
    if relative.as_os_str().is_empty() {
        root.to_path_buf()
    } else {
        root.join(relative)
    }
}

fn collect<F: FileSystem + ?Sized>(
    fs: &F,
    root: &Path,
    dir: &Path,
    depth: Option<usize>,
    allow_hidden: bool,
    matcher: &GlobMatcher,
    matches: &mut Vec<PathBuf>,
) {
    if depth == Some(0) {
        return;
    }
    let Ok(names) = fs.list_dir(&on_disk(root, dir)) else {
        return;
    };

    for name in names {
        if !allow_hidden && name.to_string_lossy().starts_with('.') {
            continue;
        }
        let candidate = dir.join(&name);
        if matcher.is_match(&candidate) {
            matches.push(candidate.clone());
        }
        if fs.kind(&on_disk(root, &candidate)) == Some(EntryKind::Directory) {
            collect(
                fs,
                root,
                &candidate,
                depth.map(|d| d - 1),
                allow_hidden,
                matcher,
                matches,
            );
        }
    }
}
