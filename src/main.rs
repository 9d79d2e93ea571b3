use anyhow::Result;

use ctxfind::cli::RootCommand;

fn main() -> Result<()> {
    RootCommand::execute()
}
