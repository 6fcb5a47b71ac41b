//! Plume CLI - stylesheet merge-and-compile orchestrator
//!
//! Usage: plume <COMMAND>
//!
//! Commands:
//!   compile  Merge the inputs into one stylesheet
//!   watch    Compile, then recompile whenever a stylesheet changes

mod cli;
mod commands;
mod logging;

use anyhow::Result;
use clap::Parser;

use cli::{Cli, Commands};
use commands::Invocation;

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    let invocation = Invocation {
        root: std::env::current_dir()?.join(&cli.root),
        json: cli.json,
        color: cli.color.into(),
    };

    match cli.command {
        Commands::Compile { args, watch } => {
            if watch {
                commands::cmd_watch(&invocation, &args)
            } else {
                commands::cmd_compile(&invocation, &args)
            }
        }
        Commands::Watch { args } => commands::cmd_watch(&invocation, &args),
    }
}
