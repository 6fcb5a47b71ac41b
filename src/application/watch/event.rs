//! Watch context, options and debounce state

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use crate::domain::entities::FileSet;
use crate::domain::value_objects::is_stylesheet;
use crate::domain::value_objects::path::{normalize, same_path};

/// Debounce duration in milliseconds
pub const DEBOUNCE_MS: u64 = 100;

/// Watch options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WatchOptions {
    /// How often the poller rescans the project root
    pub poll_interval: Duration,
}

impl Default for WatchOptions {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_millis(100),
        }
    }
}

impl WatchOptions {
    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }
}

/// What every change handler needs: the FileSet resolved at startup and the
/// root it is relative to
#[derive(Debug, Clone)]
pub struct WatchContext {
    pub file_set: FileSet,
    pub root: PathBuf,
}

impl WatchContext {
    pub fn new(file_set: FileSet, root: impl Into<PathBuf>) -> Self {
        Self {
            file_set,
            root: root.into(),
        }
    }

    /// `path` relative to the root, when it lies under it
    pub fn relative(&self, path: &Path) -> PathBuf {
        normalize(path.strip_prefix(&self.root).unwrap_or(path))
    }

    /// Whether a change to `path` should be dropped.
    ///
    /// The root itself is always accepted. The output is rejected so writing
    /// it never triggers another compile, and so is anything that is not a
    /// stylesheet.
    pub fn is_ignored(&self, path: &Path) -> bool {
        let relative = self.relative(path);
        if relative.as_os_str().is_empty() {
            return false;
        }

        let output = self.file_set.output();
        if same_path(&relative, output) || same_path(path, &self.root.join(output)) {
            return true;
        }

        !is_stylesheet(&relative)
    }
}

/// Watcher state for debouncing
#[derive(Debug)]
pub struct WatcherState {
    pending_changes: HashSet<PathBuf>,
    last_change: Option<Instant>,
}

impl Default for WatcherState {
    fn default() -> Self {
        Self::new()
    }
}

impl WatcherState {
    pub fn new() -> Self {
        Self {
            pending_changes: HashSet::new(),
            last_change: None,
        }
    }

    /// Add a file change to pending changes
    pub fn add_change(&mut self, path: PathBuf) {
        self.pending_changes.insert(path);
        self.last_change = Some(Instant::now());
    }

    /// Check if debounce period has passed and we have pending changes
    pub fn should_dispatch(&self) -> bool {
        match self.last_change {
            Some(last) => {
                !self.pending_changes.is_empty()
                    && last.elapsed() >= Duration::from_millis(DEBOUNCE_MS)
            }
            None => false,
        }
    }

    /// Take all pending changes in path order, resetting state
    pub fn take_changes(&mut self) -> Vec<PathBuf> {
        let mut changes: Vec<_> = self.pending_changes.drain().collect();
        changes.sort();
        self.last_change = None;
        changes
    }
}
