use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use plume::infrastructure::reporter::ColorMode;

/// Separates inputs from the output on the command line.
const TARGET_KEYWORD: &str = "to";

/// Plume - merge stylesheets into one output
#[derive(Parser, Debug)]
#[command(name = "plume")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "Example: plume compile styles/*.css to dist/app.min.css")]
pub struct Cli {
    /// Output format for CI
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// When to use colors
    #[arg(long, value_enum, default_value = "auto", global = true)]
    pub color: ColorWhen,

    /// Project root; patterns, output and .plumerc are relative to it
    #[arg(long, default_value = ".", global = true)]
    pub root: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Merge the inputs into one stylesheet
    Compile {
        /// Files, directories or globs, optionally followed by `to <output>`
        #[arg(value_name = "INPUT")]
        args: Vec<String>,

        /// Keep watching and recompile on change
        #[arg(short, long)]
        watch: bool,
    },

    /// Compile, then recompile whenever a stylesheet changes
    Watch {
        /// Files, directories or globs, optionally followed by `to <output>`
        #[arg(value_name = "INPUT")]
        args: Vec<String>,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColorWhen {
    Auto,
    Always,
    Never,
}

impl From<ColorWhen> for ColorMode {
    fn from(value: ColorWhen) -> Self {
        match value {
            ColorWhen::Auto => ColorMode::Auto,
            ColorWhen::Always => ColorMode::Always,
            ColorWhen::Never => ColorMode::Never,
        }
    }
}

/// Split `a.css b.css to out.css` into inputs and output.
///
/// Only a `to` in second-to-last position is a keyword, so an input that
/// happens to be named `to` still works.
pub fn split_target(args: &[String]) -> (Vec<String>, Option<PathBuf>) {
    match args {
        [inputs @ .., keyword, output] if keyword == TARGET_KEYWORD => {
            (inputs.to_vec(), Some(PathBuf::from(output)))
        }
        _ => (args.to_vec(), None),
    }
}
