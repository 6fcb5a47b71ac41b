use anyhow::Result;

use plume::application::CompileEngine;
use plume::infrastructure::{LocalFs, PlainCssEngine};

use super::{fail, resolve, Invocation};

pub fn cmd_compile(invocation: &Invocation, args: &[String]) -> Result<()> {
    let reporter = invocation.reporter(false);

    let (config, file_set) = match resolve(&invocation.root, args) {
        Ok(resolved) => resolved,
        Err(e) => fail(&reporter, e),
    };

    let engine = CompileEngine::new(
        LocalFs::new(),
        PlainCssEngine::new(),
        &invocation.root,
        config.options,
    );
    if let Err(e) = engine.compile_reported(&file_set, &reporter) {
        fail(&reporter, e);
    }

    Ok(())
}
