//! Layout inspection commands (`belt layout ...`).

use std::path::PathBuf;

use anyhow::{Context, Result};
use beltquote::{Quote, RowKind, RowPlan};
use clap::{Args, Subcommand};

use crate::cli::common::{PreviewStyleArg, RequestArgs};
use crate::cli::utils::emit;

/// Available layout subcommands.
#[derive(Subcommand, Debug)]
pub enum LayoutCommand {
    /// Draw the first rows of the belt as ASCII.
    Preview(LayoutPreviewArgs),
    /// List every belt row with the pattern row it uses and its kind.
    Rows(LayoutRowsArgs),
}

/// Args for `belt layout preview`.
#[derive(Args, Debug)]
pub struct LayoutPreviewArgs {
    #[command(flatten)]
    pub request: RequestArgs,
    /// Rendering style.
    #[arg(long, default_value_t = PreviewStyleArg::Widths, value_enum)]
    pub style: PreviewStyleArg,
    /// Output file (`-` for stdout).
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,
}

/// Args for `belt layout rows`.
#[derive(Args, Debug)]
pub struct LayoutRowsArgs {
    #[command(flatten)]
    pub request: RequestArgs,
    /// Only list pusher rows.
    #[arg(long = "pushers-only")]
    pub pushers_only: bool,
}

/// Execute a layout command.
pub fn handle(command: LayoutCommand) -> Result<()> {
    match command {
        LayoutCommand::Preview(args) => preview(args),
        LayoutCommand::Rows(args) => rows(args),
    }
}

fn preview(args: LayoutPreviewArgs) -> Result<()> {
    let request = args.request.into_request()?;
    let quote = Quote::build(&request).context("failed to lay out belt")?;
    let drawing = quote.preview(args.style.into()).to_string();
    emit(args.output.as_deref(), &drawing)
}

fn rows(args: LayoutRowsArgs) -> Result<()> {
    let request = args.request.into_request()?;
    let quote = Quote::build(&request).context("failed to lay out belt")?;
    let period = quote.pattern.len();
    let plan = RowPlan::new(
        &quote.pattern,
        quote.layout.total_rows,
        quote.layout.pusher_row_count,
    );
    let mut output = String::new();
    for row in plan {
        if args.pushers_only && row.kind != RowKind::Pusher {
            continue;
        }
        let kind = match row.kind {
            RowKind::Pusher => "pusher",
            RowKind::Normal => "module",
        };
        let sum: i64 = row.widths.iter().sum();
        output.push_str(&format!(
            "Row {:>5} | pattern row {} | {:<6} | {} mm\n",
            row.index + 1,
            row.index % period + 1,
            kind,
            sum
        ));
    }
    output.push_str(&format!(
        "{} rows: {} pusher, {} module\n",
        quote.layout.total_rows, quote.layout.pusher_row_count, quote.layout.normal_row_count
    ));
    print!("{}", output);
    Ok(())
}
