//! Quote generation (`belt quote`).

use std::path::PathBuf;

use anyhow::{Context, Result};
use beltquote::Quote;
use clap::Args;

use crate::cli::common::{QuoteFormatArg, RequestArgs};
use crate::cli::utils::emit;

/// Arguments for `belt quote`.
#[derive(Args, Debug)]
pub struct QuoteArgs {
    #[command(flatten)]
    pub request: RequestArgs,
    /// Output format.
    #[arg(long, default_value_t = QuoteFormatArg::Text, value_enum)]
    pub format: QuoteFormatArg,
    /// Output file (`-` for stdout).
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,
}

/// Execute a quote command.
pub fn handle(args: QuoteArgs) -> Result<()> {
    let request = args.request.into_request()?;
    let quote = Quote::build(&request).context("failed to build quote")?;
    tracing::info!(
        fingerprint = %quote.fingerprint,
        total_rows = quote.layout.total_rows,
        "quote ready"
    );

    let content = match args.format {
        QuoteFormatArg::Text => {
            format!("{}\n{}", quote.description(), quote.summary_text())
        }
        QuoteFormatArg::Lines => {
            let mut out = quote.line_items().join("\n");
            out.push('\n');
            out
        }
        QuoteFormatArg::Json => {
            let mut out =
                serde_json::to_string_pretty(&quote).context("failed to serialize quote")?;
            out.push('\n');
            out
        }
    };
    emit(args.output.as_deref(), &content)
}
