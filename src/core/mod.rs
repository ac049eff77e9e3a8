//! Core domain primitives: pattern parsing, belt tiling, supplies and report projection.

pub mod layout;
pub mod pattern;
pub mod preview;
pub mod report;
pub mod supplies;

pub use layout::{
    BeltGeometry, Category, Histograms, LayoutOptions, LayoutResult, PlannedRow, Position,
    PusherQuota, RoundingPolicy, RowKind, RowPlan, WidthHistogram, classify,
};
pub use pattern::{DEFAULT_PATTERN, Pattern, PatternError, RowSum, Width, row_sums};
pub use preview::{LayoutPreview, PreviewStyle};
pub use report::{Breakdown, LineCounts, ReportLine, ReportView, project};
pub use supplies::{CAP_GIFT, DEFAULT_ROD_LENGTH_MM, PIN_GIFT, Supplies, compute_supplies};
