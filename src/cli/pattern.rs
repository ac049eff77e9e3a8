//! Pattern helpers (`belt pattern ...`).

use std::path::PathBuf;

use anyhow::{Context, Result};
use beltquote::{Pattern, row_sums};
use clap::{Args, Subcommand};

use crate::cli::utils::read_text_arg;

/// Pattern subcommands.
#[derive(Subcommand, Debug)]
pub enum PatternCommand {
    /// Parse a pattern and report its shape.
    Check(PatternInputArgs),
    /// Show the width of every pattern line, flagging bad lines.
    Sums(PatternInputArgs),
}

/// Pattern input shared by the pattern subcommands.
#[derive(Args, Debug)]
pub struct PatternInputArgs {
    /// Pattern text (falls back to stdin if omitted).
    #[arg(long)]
    pub text: Option<String>,
    /// Read pattern from file (`-` for stdin).
    #[arg(long = "from")]
    pub from: Option<PathBuf>,
}

/// Execute a pattern command.
pub fn handle(command: PatternCommand) -> Result<()> {
    match command {
        PatternCommand::Check(args) => check(args),
        PatternCommand::Sums(args) => sums(args),
    }
}

fn check(args: PatternInputArgs) -> Result<()> {
    let text = read_text_arg(args.text, args.from)?;
    let pattern = Pattern::parse(&text).context("invalid pattern")?;
    println!(
        "Pattern OK: {} rows, belt width {} mm",
        pattern.len(),
        pattern.tiled_width()
    );
    let width = pattern.tiled_width();
    for (idx, row) in pattern.rows().iter().enumerate() {
        let sum: i64 = row.iter().sum();
        if sum < width {
            println!(
                "  row {}: {} modules, {} mm ({} mm short)",
                idx + 1,
                row.len(),
                sum,
                width - sum
            );
        } else {
            println!("  row {}: {} modules, {} mm", idx + 1, row.len(), sum);
        }
    }
    Ok(())
}

fn sums(args: PatternInputArgs) -> Result<()> {
    let text = read_text_arg(args.text, args.from)?;
    for line in row_sums(&text) {
        println!("{}", line);
    }
    Ok(())
}
