//! Configuration types

use std::path::PathBuf;

use crate::domain::value_objects::ProcessingOptions;

/// Project configuration file, looked up in the project root only.
pub const CONFIG_FILE_NAME: &str = ".plumerc";

/// Output used when neither the command line nor `.plumerc` names one.
pub const DEFAULT_OUTPUT: &str = "app.min.css";

/// Inputs and output as given on the command line
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExplicitArgs {
    pub inputs: Vec<String>,
    pub output: Option<PathBuf>,
}

impl ExplicitArgs {
    pub fn new(inputs: Vec<String>, output: Option<PathBuf>) -> Self {
        Self { inputs, output }
    }
}

/// What one invocation works with after the config merge
#[derive(Debug, Clone, PartialEq)]
pub struct EffectiveConfig {
    /// Patterns, paths or directories, in order
    pub inputs: Vec<String>,
    pub output: PathBuf,
    /// Everything else, handed to the engine
    pub options: ProcessingOptions,
}
