use anyhow::Result;
use std::collections::HashMap;
use std::io::Write;

use crate::cli::args::SearchArgs;
use crate::cli::ui::{colors_enabled, StatusPrinter};
use crate::config::CtxfindConfig;
use crate::runner::SearchRunner;

pub fn run_search_command(args: SearchArgs) -> Result<()> {
    // Load configuration with precedence: CLI args > env vars > config files
    let env_vars: HashMap<String, String> = std::env::vars().collect();
    let config = CtxfindConfig::load_with_precedence(args.config.as_deref(), &args, &env_vars)?;
    log::debug!("Effective configuration: {config:?}");

    let runner = SearchRunner::new(&config, &args, colors_enabled(config.output.color))?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let summary = runner.run(&args.paths, &mut out)?;
    out.flush()?;

    StatusPrinter::new().skipped(&summary.skipped);
    Ok(())
}
