//! Watch controller
//!
//! Idle until `watch()`: that compiles once, subscribes to the project root
//! and moves to Watching. `run()` then recompiles the original FileSet for
//! every accepted change until the running flag clears, and `stop()` drops
//! the subscription.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{channel, Receiver, RecvTimeoutError};
use std::time::Duration;

use notify::{Config, Event, EventKind, PollWatcher, RecursiveMode, Watcher};

use crate::application::compile::CompileEngine;
use crate::domain::entities::FileSet;
use crate::domain::ports::{EntryKind, FileSystem, Reporter, StyleEngine};
use crate::error::{PlumeError, PlumeResult};

use super::event::{WatchContext, WatchOptions, WatcherState};

/// Outcome of one change notification
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatch {
    Ignored,
    /// A compile ran; its outcome went to the reporter
    Recompiled(PathBuf),
}

enum State {
    Idle,
    Watching {
        // Dropping the watcher ends the subscription.
        _watcher: PollWatcher,
        events: Receiver<PathBuf>,
    },
}

pub struct WatchController<F, E, R> {
    engine: CompileEngine<F, E>,
    context: WatchContext,
    reporter: R,
    options: WatchOptions,
    state: State,
}

impl<F, E, R> WatchController<F, E, R>
where
    F: FileSystem,
    E: StyleEngine,
    R: Reporter,
{
    pub fn new(
        engine: CompileEngine<F, E>,
        file_set: FileSet,
        reporter: R,
        options: WatchOptions,
    ) -> Self {
        let context = WatchContext::new(file_set, engine.root());
        Self {
            engine,
            context,
            reporter,
            options,
            state: State::Idle,
        }
    }

    pub fn context(&self) -> &WatchContext {
        &self.context
    }

    pub fn is_watching(&self) -> bool {
        matches!(self.state, State::Watching { .. })
    }

    /// Compile once, then subscribe to changes under the root.
    ///
    /// A failed compile is reported and does not prevent watching.
    pub fn watch(&mut self) -> PlumeResult<()> {
        if self.is_watching() {
            return Ok(());
        }

        self.engine
            .compile_reported(&self.context.file_set, &self.reporter)?;

        let (tx, rx) = channel();
        let config = Config::default()
            .with_poll_interval(self.options.poll_interval)
            .with_compare_contents(true);

        let mut watcher = PollWatcher::new(
            move |res: Result<Event, notify::Error>| match res {
                Ok(event) if matches!(event.kind, EventKind::Modify(_)) => {
                    for path in event.paths {
                        let _ = tx.send(path);
                    }
                }
                Ok(_) => {}
                Err(e) => tracing::warn!(error = %e, "watch error"),
            },
            config,
        )
        .map_err(|e| PlumeError::Watch(e.to_string()))?;

        watcher
            .watch(&self.context.root, RecursiveMode::Recursive)
            .map_err(|e| PlumeError::Watch(e.to_string()))?;
        tracing::debug!(root = %self.context.root.display(), "subscribed");

        self.state = State::Watching {
            _watcher: watcher,
            events: rx,
        };
        self.reporter.info("Watcher is running...");
        Ok(())
    }

    /// Handle one change notification.
    ///
    /// Directory events (the root included) only mean an entry was added,
    /// removed or renamed inside them; they never trigger a compile.
    pub fn dispatch(&self, path: &Path) -> Dispatch {
        if self.context.is_ignored(path) {
            tracing::trace!(path = %path.display(), "ignored change");
            return Dispatch::Ignored;
        }

        let changed = self.context.relative(path);
        if changed.as_os_str().is_empty()
            || self.engine.fs().kind(path) == Some(EntryKind::Directory)
        {
            tracing::trace!(path = %path.display(), "directory change");
            return Dispatch::Ignored;
        }

        tracing::debug!(path = %changed.display(), "change detected");
        if let Err(e) = self
            .engine
            .recompile(&self.context.file_set, &changed, &self.reporter)
        {
            self.reporter.error(&e.to_string());
        }
        Dispatch::Recompiled(changed)
    }

    /// Process changes until `running` clears or the subscription ends.
    pub fn run(&self, running: &AtomicBool) -> PlumeResult<()> {
        let State::Watching { events, .. } = &self.state else {
            return Err(PlumeError::Watch("not watching".to_string()));
        };

        let mut state = WatcherState::new();
        while running.load(Ordering::SeqCst) {
            match events.recv_timeout(Duration::from_millis(50)) {
                Ok(path) => state.add_change(path),
                Err(RecvTimeoutError::Timeout) => {}
                Err(RecvTimeoutError::Disconnected) => break,
            }

            if state.should_dispatch() {
                for path in state.take_changes() {
                    self.dispatch(&path);
                }
            }
        }
        Ok(())
    }

    /// Drop the subscription. A compile already running completes first,
    /// since dispatch runs on the same thread.
    pub fn stop(&mut self) {
        if self.is_watching() {
            tracing::debug!("unsubscribed");
        }
        self.state = State::Idle;
    }
}
