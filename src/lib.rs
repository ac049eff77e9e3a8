//! Core library for modular conveyor belt layouts and bill-of-materials quotes.

pub mod core;
mod quote;

pub use crate::core::{
    BeltGeometry, Breakdown, CAP_GIFT, Category, DEFAULT_PATTERN, DEFAULT_ROD_LENGTH_MM,
    Histograms, LayoutOptions, LayoutPreview, LayoutResult, LineCounts, PIN_GIFT, Pattern,
    PatternError, PlannedRow, Position, PreviewStyle, PusherQuota, ReportLine, ReportView,
    RoundingPolicy, RowKind, RowPlan, RowSum, Supplies, Width, WidthHistogram, classify,
    compute_supplies, project, row_sums,
};
pub use quote::{BeltProduct, Quote, QuoteError, QuoteRequest, cm_to_mm};

/// Parses pattern text and tiles it over the belt in one step.
pub fn classify_text(
    text: &str,
    geometry: BeltGeometry,
    options: LayoutOptions,
    rows_to_render: usize,
) -> Result<LayoutResult, PatternError> {
    let pattern = Pattern::parse(text)?;
    Ok(classify(&pattern, geometry, options, rows_to_render))
}
