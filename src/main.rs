mod cli;

use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli::logging::init(&cli.log_level);
    cli::run(cli)
}
