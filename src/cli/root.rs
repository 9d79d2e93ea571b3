use anyhow::Result;
use clap::Parser;

use crate::cli::args::{validate_search_args, Args, SearchArgs};
use crate::cli::commands::run_search_command;
use crate::config::CtxfindConfig;

pub struct RootCommand;

impl RootCommand {
    pub fn execute() -> Result<()> {
        let args = Args::parse();
        init_logging(args.verbosity);

        let search_args = SearchArgs::from(&args);

        if search_args.generate_config {
            println!("{}", CtxfindConfig::generate_default_config());
            return Ok(());
        }

        validate_search_args(&search_args)?;
        run_search_command(search_args)
    }
}

/// `-v` steps the default filter from warn up to trace; `RUST_LOG` still wins.
fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}
