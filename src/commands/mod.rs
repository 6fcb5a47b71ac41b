//! Command implementations

mod compile;
mod watch;

use std::path::{Path, PathBuf};

use plume::config::{ConfigResolver, EffectiveConfig, ExplicitArgs};
use plume::domain::entities::FileSet;
use plume::domain::services::FileSetResolver;
use plume::error::{PlumeError, PlumeResult};
use plume::infrastructure::reporter::{ColorMode, ConsoleOptions, ConsoleReporter};
use plume::infrastructure::LocalFs;
use plume::Reporter;

use crate::cli::split_target;

pub use compile::cmd_compile;
pub use watch::cmd_watch;

/// Settings shared by every command
#[derive(Debug, Clone)]
pub struct Invocation {
    /// Absolute project root
    pub root: PathBuf,
    pub json: bool,
    pub color: ColorMode,
}

impl Invocation {
    fn reporter(&self, timestamps: bool) -> ConsoleReporter {
        ConsoleReporter::new(ConsoleOptions::detect(self.json, self.color).with_timestamps(timestamps))
    }
}

/// Config merge followed by file-set resolution
fn resolve(root: &Path, args: &[String]) -> PlumeResult<(EffectiveConfig, FileSet)> {
    let fs = LocalFs::new();
    let (inputs, output) = split_target(args);

    let config = ConfigResolver::new(&fs, root).resolve(&ExplicitArgs::new(inputs, output))?;
    let file_set = FileSetResolver::new(&fs, root).resolve(&config.inputs, &config.output)?;
    Ok((config, file_set))
}

/// Report a fatal error and exit nonzero.
fn fail(reporter: &impl Reporter, err: PlumeError) -> ! {
    reporter.error(&err.to_string());
    std::process::exit(1);
}
