//! Tests for the watch module

use super::controller::{Dispatch, WatchController};
use super::event::{WatchContext, WatchOptions, WatcherState, DEBOUNCE_MS};
use crate::application::compile::CompileEngine;
use crate::domain::entities::FileSet;
use crate::domain::ports::ReportLevel;
use crate::domain::value_objects::ProcessingOptions;
use crate::infrastructure::fs::LocalFs;
use crate::infrastructure::reporter::MemoryReporter;
use crate::infrastructure::PlainCssEngine;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tempfile::tempdir;

fn context() -> WatchContext {
    WatchContext::new(
        FileSet::new(vec![PathBuf::from("a.css")], "dist/out.css"),
        "/proj",
    )
}

fn controller<'r>(
    root: &Path,
    inputs: &[&str],
    output: &str,
    reporter: &'r MemoryReporter,
) -> WatchController<LocalFs, PlainCssEngine, &'r MemoryReporter> {
    let engine = CompileEngine::new(
        LocalFs::new(),
        PlainCssEngine::new(),
        root,
        ProcessingOptions::default(),
    );
    let file_set = FileSet::new(inputs.iter().map(PathBuf::from).collect(), output);
    WatchController::new(
        engine,
        file_set,
        reporter,
        WatchOptions::default().with_poll_interval(Duration::from_millis(20)),
    )
}

// === Ignore predicate ===

#[test]
fn test_output_is_ignored() {
    let ctx = context();
    assert!(ctx.is_ignored(Path::new("/proj/dist/out.css")));
    assert!(ctx.is_ignored(Path::new("/proj/./dist/out.css")));
}

#[test]
fn test_foreign_extensions_are_ignored() {
    let ctx = context();
    assert!(ctx.is_ignored(Path::new("/proj/README.md")));
    assert!(ctx.is_ignored(Path::new("/proj/dist/out.css.map")));
    assert!(ctx.is_ignored(Path::new("/proj/styles")));
}

#[test]
fn test_stylesheets_and_root_are_accepted() {
    let ctx = context();
    assert!(!ctx.is_ignored(Path::new("/proj")));
    assert!(!ctx.is_ignored(Path::new("/proj/a.css")));
    assert!(!ctx.is_ignored(Path::new("/proj/sub/theme.SCSS")));
    assert!(!ctx.is_ignored(Path::new("/proj/new.less")));
}

#[test]
fn test_relative_strips_root() {
    let ctx = context();
    assert_eq!(
        ctx.relative(Path::new("/proj/sub/a.css")),
        PathBuf::from("sub/a.css")
    );
    assert_eq!(ctx.relative(Path::new("other/a.css")), PathBuf::from("other/a.css"));
}

// === WatcherState ===

#[test]
fn test_watcher_state_debouncing() {
    let mut state = WatcherState::new();
    assert!(!state.should_dispatch());

    state.add_change(PathBuf::from("a.css"));
    assert!(!state.should_dispatch());

    std::thread::sleep(Duration::from_millis(DEBOUNCE_MS + 10));
    assert!(state.should_dispatch());
}

#[test]
fn test_watcher_state_coalesces_same_path() {
    let mut state = WatcherState::new();
    state.add_change(PathBuf::from("b.css"));
    state.add_change(PathBuf::from("a.css"));
    state.add_change(PathBuf::from("b.css"));

    let changes = state.take_changes();
    assert_eq!(changes, vec![PathBuf::from("a.css"), PathBuf::from("b.css")]);
    assert!(!state.should_dispatch());
    assert!(state.take_changes().is_empty());
}

// === Dispatch ===

#[test]
fn test_ignored_change_does_not_recompile() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a.css"), ".a{}").unwrap();
    let reporter = MemoryReporter::new();
    let controller = controller(dir.path(), &["a.css"], "out.css", &reporter);

    assert_eq!(
        controller.dispatch(&dir.path().join("out.css")),
        Dispatch::Ignored
    );
    assert_eq!(
        controller.dispatch(&dir.path().join("notes.txt")),
        Dispatch::Ignored
    );
    assert!(reporter.reports().is_empty());
    assert!(!dir.path().join("out.css").exists());
}

#[test]
fn test_accepted_change_recompiles_once() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a.css"), ".a{}").unwrap();
    let reporter = MemoryReporter::new();
    let controller = controller(dir.path(), &["a.css"], "out.css", &reporter);

    let outcome = controller.dispatch(&dir.path().join("a.css"));

    assert_eq!(outcome, Dispatch::Recompiled(PathBuf::from("a.css")));
    assert_eq!(
        reporter.messages(ReportLevel::Success),
        vec!["Recompiled file a.css"]
    );
    assert_eq!(reporter.reports().len(), 1);
    assert_eq!(fs::read_to_string(dir.path().join("out.css")).unwrap(), ".a{}");
}

#[test]
fn test_directory_changes_do_not_recompile() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a.css"), ".a{}").unwrap();
    fs::create_dir(dir.path().join("theme.css")).unwrap();
    let reporter = MemoryReporter::new();
    let controller = controller(dir.path(), &["a.css"], "out.css", &reporter);

    assert_eq!(controller.dispatch(dir.path()), Dispatch::Ignored);
    assert_eq!(
        controller.dispatch(&dir.path().join("theme.css")),
        Dispatch::Ignored
    );
    assert!(reporter.reports().is_empty());
    assert!(!dir.path().join("out.css").exists());
}

#[test]
fn test_new_files_are_not_added_to_the_file_set() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a.css"), ".a{}").unwrap();
    fs::write(dir.path().join("b.css"), ".b{}").unwrap();
    let reporter = MemoryReporter::new();
    let controller = controller(dir.path(), &["a.css"], "out.css", &reporter);

    controller.dispatch(&dir.path().join("b.css"));

    assert_eq!(fs::read_to_string(dir.path().join("out.css")).unwrap(), ".a{}");
    assert!(reporter.contains("Recompiled file b.css"));
}

// === Lifecycle ===

#[test]
fn test_watch_then_stop() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a.css"), ".a{}").unwrap();
    let reporter = MemoryReporter::new();
    let mut controller = controller(dir.path(), &["a.css"], "out.css", &reporter);
    assert!(!controller.is_watching());

    controller.watch().unwrap();
    assert!(controller.is_watching());
    assert_eq!(
        reporter.messages(ReportLevel::Success),
        vec!["Compile 1 file(s) [a.css] to out.css"]
    );
    assert_eq!(
        reporter.messages(ReportLevel::Info),
        vec!["Watcher is running..."]
    );

    controller.stop();
    assert!(!controller.is_watching());
}

#[test]
fn test_compile_error_keeps_watching() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("bad.css"), ".a{").unwrap();
    let reporter = MemoryReporter::new();
    let mut controller = controller(dir.path(), &["bad.css"], "out.css", &reporter);

    controller.watch().unwrap();
    assert!(controller.is_watching());
    assert!(reporter.contains("Compilation error"));

    controller.dispatch(&dir.path().join("bad.css"));
    assert!(controller.is_watching());
    assert_eq!(reporter.count(ReportLevel::Error), 2);
}

#[test]
fn test_run_requires_watching() {
    let dir = tempdir().unwrap();
    let reporter = MemoryReporter::new();
    let controller = controller(dir.path(), &["a.css"], "out.css", &reporter);
    let running = AtomicBool::new(true);
    assert!(controller.run(&running).is_err());
}

#[test]
fn test_run_recompiles_on_modification() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("a.css");
    fs::write(&input, ".a{}").unwrap();
    let reporter = MemoryReporter::new();
    let mut controller = controller(dir.path(), &["a.css"], "out.css", &reporter);
    controller.watch().unwrap();

    let running = AtomicBool::new(true);
    std::thread::scope(|scope| {
        scope.spawn(|| {
            std::thread::sleep(Duration::from_millis(300));
            fs::write(&input, ".a{color:red}\n.b{}").unwrap();
            std::thread::sleep(Duration::from_millis(1500));
            running.store(false, Ordering::SeqCst);
        });
        controller.run(&running).unwrap();
    });
    controller.stop();

    assert_eq!(
        reporter.messages(ReportLevel::Success),
        vec!["Compile 1 file(s) [a.css] to out.css", "Recompiled file a.css"]
    );
    assert_eq!(reporter.count(ReportLevel::Error), 0);
    assert!(!reporter
        .messages(ReportLevel::Success)
        .iter()
        .any(|m| m.trim_end() == "Recompiled file"));
    assert_eq!(
        fs::read_to_string(dir.path().join("out.css")).unwrap(),
        ".a{color:red}\n.b{}"
    );
}
