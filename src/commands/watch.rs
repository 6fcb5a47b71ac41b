use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::Result;

use plume::application::{CompileEngine, WatchController, WatchOptions};
use plume::error::PlumeError;
use plume::infrastructure::{LocalFs, PlainCssEngine};

use super::{fail, resolve, Invocation};

pub fn cmd_watch(invocation: &Invocation, args: &[String]) -> Result<()> {
    let reporter = invocation.reporter(true);

    let (config, file_set) = match resolve(&invocation.root, args) {
        Ok(resolved) => resolved,
        Err(e) => fail(&reporter, e),
    };
    if file_set.is_empty() {
        fail(&reporter, PlumeError::NoFilesFound);
    }

    // Set up Ctrl+C handler
    let running = Arc::new(AtomicBool::new(true));
    let running_clone = running.clone();

    ctrlc::set_handler(move || {
        running_clone.store(false, Ordering::SeqCst);
    })
    .expect("Error setting Ctrl+C handler");

    let engine = CompileEngine::new(
        LocalFs::new(),
        PlainCssEngine::new(),
        &invocation.root,
        config.options,
    );
    let mut controller = WatchController::new(engine, file_set, &reporter, WatchOptions::default());

    if let Err(e) = controller.watch() {
        fail(&reporter, e);
    }
    controller.run(&running)?;
    controller.stop();

    Ok(())
}
