//! Command-line interface wiring for the `belt` binary.
//!
//! This module owns the clap definitions and delegates execution to
//! specialized submodules that encapsulate each command family.

use anyhow::Result;
use clap::{Parser, Subcommand};

pub mod common;
pub mod layout;
pub mod logging;
pub mod pattern;
pub mod quote;
pub mod supplies;
pub mod utils;

/// Parsed CLI entrypoint for the `belt` binary.
#[derive(Parser, Debug)]
#[command(name = "belt", version, about = "Modular conveyor belt layout and quoting toolkit")]
pub struct Cli {
    /// Log filter used when `RUST_LOG` is not set (e.g. `info`, `beltquote=debug`).
    #[arg(long, global = true, default_value = "warn")]
    pub log_level: String,
    /// Top-level command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// High-level command families made available to end users.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Produce a full bill-of-materials quote.
    Quote(quote::QuoteArgs),
    #[command(subcommand)]
    Layout(layout::LayoutCommand),
    #[command(subcommand)]
    Pattern(pattern::PatternCommand),
    /// Compute pins, rods and caps from row totals.
    Supplies(supplies::SuppliesArgs),
}

/// Execute the requested command.
pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Quote(args) => quote::handle(args),
        Command::Layout(cmd) => layout::handle(cmd),
        Command::Pattern(cmd) => pattern::handle(cmd),
        Command::Supplies(args) => supplies::handle(args),
    }
}
