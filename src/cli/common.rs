//! Shared clap helper types for CLI commands.

use std::path::PathBuf;

use anyhow::Result;
use beltquote::{PreviewStyle, QuoteRequest, RoundingPolicy};
use clap::{Args, ValueEnum};

use crate::cli::utils::{load_request, read_text_arg};

/// Output formats for a quote.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuoteFormatArg {
    /// Narrative summary.
    Text,
    /// Flat line items.
    Lines,
    /// Full quote as JSON.
    Json,
}

/// Preview styles available for ASCII layout drawings.
#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum PreviewStyleArg {
    Widths,
    Marks,
}

impl From<PreviewStyleArg> for PreviewStyle {
    fn from(value: PreviewStyleArg) -> Self {
        match value {
            PreviewStyleArg::Widths => PreviewStyle::Widths,
            PreviewStyleArg::Marks => PreviewStyle::Marks,
        }
    }
}

/// Inputs shared by every command that builds a quote request.
///
/// A `--request` file is loaded first; any flag given on the command line
/// overrides the matching field.
#[derive(Args, Debug, Default)]
pub struct RequestArgs {
    /// JSON quote request to start from.
    #[arg(long)]
    pub request: Option<PathBuf>,
    /// Pattern text, one row per line (e.g. "50,200,50\n100,200").
    #[arg(long)]
    pub pattern: Option<String>,
    /// Read the pattern from a file (`-` for stdin).
    #[arg(long = "pattern-file")]
    pub pattern_file: Option<PathBuf>,
    /// Belt length in millimetres.
    #[arg(long = "length-mm", conflicts_with = "length_cm")]
    pub length_mm: Option<u32>,
    /// Belt length in centimetres.
    #[arg(long = "length-cm")]
    pub length_cm: Option<f64>,
    /// Module height (row pitch) in millimetres.
    #[arg(long = "module-height")]
    pub module_height: Option<u32>,
    /// Add pusher rows on the first row of each pattern period.
    #[arg(long)]
    pub pushers: bool,
    /// Treat pusher row edges as plain modules.
    #[arg(long)]
    pub indentation: bool,
    /// Round the pusher row share up instead of down.
    #[arg(long = "round-up")]
    pub round_up: bool,
    /// Break module counts out by side.
    #[arg(long = "by-side")]
    pub by_side: bool,
    /// Pin stock length in millimetres.
    #[arg(long = "rod-length")]
    pub rod_length: Option<u32>,
    /// Rows drawn in previews (0 for all).
    #[arg(long)]
    pub rows: Option<usize>,
    #[arg(long)]
    pub series: Option<String>,
    #[arg(long = "belt-type")]
    pub belt_type: Option<String>,
    #[arg(long)]
    pub material: Option<String>,
    #[arg(long)]
    pub color: Option<String>,
    /// Pin diameter in millimetres.
    #[arg(long)]
    pub pin: Option<String>,
    #[arg(long = "pusher-type")]
    pub pusher_type: Option<String>,
    #[arg(long = "indentation-type")]
    pub indentation_type: Option<String>,
}

impl RequestArgs {
    /// Resolve the request file and flag overrides into a single request.
    pub fn into_request(self) -> Result<QuoteRequest> {
        let mut req = match &self.request {
            Some(path) => load_request(path)?,
            None => QuoteRequest::default(),
        };

        if self.pattern.is_some() || self.pattern_file.is_some() {
            req.pattern = read_text_arg(self.pattern, self.pattern_file)?;
        }
        if let Some(mm) = self.length_mm {
            req.length_mm = Some(mm);
            req.length_cm = None;
        }
        if let Some(cm) = self.length_cm {
            req.length_cm = Some(cm);
            req.length_mm = None;
        }
        if let Some(h) = self.module_height {
            req.product.module_height_mm = h;
        }
        req.options.with_pushers |= self.pushers;
        req.options.with_indentation |= self.indentation;
        if self.round_up {
            req.options.rounding = RoundingPolicy::Up;
        }
        if self.by_side {
            req.breakdown = beltquote::Breakdown::BySide;
        }
        if let Some(len) = self.rod_length {
            req.rod_length_mm = len;
        }
        if let Some(rows) = self.rows {
            req.rows_to_render = rows;
        }
        if let Some(series) = self.series {
            req.product.series = series;
        }
        if let Some(belt_type) = self.belt_type {
            req.product.belt_type = belt_type;
        }
        if let Some(material) = self.material {
            req.product.material = Some(material);
        }
        if let Some(color) = self.color {
            req.product.color = color;
        }
        if let Some(pin) = self.pin {
            req.product.pin_diameter_mm = pin.trim().replace(',', ".");
        }
        if let Some(pusher_type) = self.pusher_type {
            req.pusher_type = pusher_type;
        }
        if let Some(indentation_type) = self.indentation_type {
            req.indentation_type = indentation_type;
        }
        Ok(req)
    }
}
