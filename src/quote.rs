//! End-to-end quotes: request validation, layout, supplies and the text reports.

use crate::core::layout::{BeltGeometry, LayoutOptions, LayoutResult, classify};
use crate::core::pattern::{DEFAULT_PATTERN, Pattern, PatternError, Width};
use crate::core::preview::{LayoutPreview, PreviewStyle};
use crate::core::report::{Breakdown, LineCounts, ReportView, project};
use crate::core::supplies::{CAP_GIFT, DEFAULT_ROD_LENGTH_MM, PIN_GIFT, Supplies};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt::Write;
use thiserror::Error;

const RULE: &str = "-----------------";
const LIST_RULE: &str = "----------------------------------";

#[derive(Debug, Error)]
pub enum QuoteError {
    #[error(transparent)]
    Pattern(#[from] PatternError),
    #[error("module height must be greater than zero")]
    ZeroModuleHeight,
    #[error("belt length is required (set length_mm or length_cm)")]
    MissingLength,
    #[error("belt length must be greater than zero")]
    ZeroLength,
    #[error("invalid belt length: {0} cm")]
    InvalidLength(f64),
    #[error("failed to serialize quote request: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Catalog attributes of the belt being quoted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BeltProduct {
    pub series: String,
    pub belt_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub material: Option<String>,
    pub color: String,
    /// Pin diameter as entered, e.g. `"4.8"`.
    pub pin_diameter_mm: String,
    pub module_height_mm: u32,
}

impl Default for BeltProduct {
    fn default() -> Self {
        Self {
            series: String::new(),
            belt_type: String::new(),
            material: None,
            color: String::new(),
            pin_diameter_mm: "0".to_string(),
            module_height_mm: 30,
        }
    }
}

/// Everything needed to produce a [`Quote`]. Loadable from JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuoteRequest {
    /// Pattern text, one row per line.
    pub pattern: String,
    pub product: BeltProduct,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub length_mm: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub length_cm: Option<f64>,
    pub options: LayoutOptions,
    pub breakdown: Breakdown,
    pub rod_length_mm: u32,
    /// Rows drawn in a preview; 0 draws all of them.
    pub rows_to_render: usize,
    pub pusher_type: String,
    pub indentation_type: String,
}

impl Default for QuoteRequest {
    fn default() -> Self {
        Self {
            pattern: DEFAULT_PATTERN.to_string(),
            product: BeltProduct::default(),
            length_mm: None,
            length_cm: None,
            options: LayoutOptions::default(),
            breakdown: Breakdown::default(),
            rod_length_mm: DEFAULT_ROD_LENGTH_MM,
            rows_to_render: 10,
            pusher_type: "E-5".to_string(),
            indentation_type: "I-5".to_string(),
        }
    }
}

impl QuoteRequest {
    /// Belt length in millimetres. `length_mm` wins over `length_cm`.
    pub fn resolve_length_mm(&self) -> Result<u32, QuoteError> {
        let mm = match (self.length_mm, self.length_cm) {
            (Some(mm), _) => mm,
            (None, Some(cm)) => cm_to_mm(cm)?,
            (None, None) => return Err(QuoteError::MissingLength),
        };
        if mm == 0 {
            return Err(QuoteError::ZeroLength);
        }
        Ok(mm)
    }

    pub fn geometry(&self) -> Result<BeltGeometry, QuoteError> {
        if self.product.module_height_mm == 0 {
            return Err(QuoteError::ZeroModuleHeight);
        }
        Ok(BeltGeometry::new(
            self.product.module_height_mm,
            self.resolve_length_mm()?,
        ))
    }

    /// SHA-256 over the serialized request.
    pub fn fingerprint(&self) -> Result<String, QuoteError> {
        let bytes = serde_json::to_vec(self)?;
        let digest = Sha256::digest(&bytes);
        Ok(format!("{digest:02x}"))
    }
}

/// Centimetres to whole millimetres, ties to even.
pub fn cm_to_mm(cm: f64) -> Result<u32, QuoteError> {
    let mm = (cm * 10.0).round_ties_even();
    if !mm.is_finite() || mm < 0.0 || mm > f64::from(u32::MAX) {
        return Err(QuoteError::InvalidLength(cm));
    }
    Ok(mm as u32)
}

/// A fully computed quote.
#[derive(Debug, Clone, Serialize)]
pub struct Quote {
    pub generated_at: DateTime<Utc>,
    pub fingerprint: String,
    pub product: BeltProduct,
    pub pattern: Pattern,
    pub geometry: BeltGeometry,
    pub options: LayoutOptions,
    pub pusher_type: String,
    pub indentation_type: String,
    pub layout: LayoutResult,
    pub supplies: Supplies,
    pub report: ReportView,
}

impl Quote {
    pub fn build(request: &QuoteRequest) -> Result<Self, QuoteError> {
        Self::build_at(request, Utc::now())
    }

    pub fn build_at(request: &QuoteRequest, generated_at: DateTime<Utc>) -> Result<Self, QuoteError> {
        let pattern = Pattern::parse(&request.pattern)?;
        let geometry = request.geometry()?;
        let layout = classify(&pattern, geometry, request.options, request.rows_to_render);
        if layout.remainder_mm > 0 {
            tracing::warn!(
                remainder_mm = layout.remainder_mm,
                module_height_mm = geometry.module_height_mm,
                "belt length is not a whole number of rows; the partial row is dropped"
            );
        }
        let supplies = Supplies::for_layout(&layout, request.options, request.rod_length_mm);
        let report = project(&layout.histograms, request.breakdown);

        Ok(Self {
            generated_at,
            fingerprint: request.fingerprint()?,
            product: request.product.clone(),
            pattern,
            geometry,
            options: request.options,
            pusher_type: request.pusher_type.clone(),
            indentation_type: request.indentation_type.clone(),
            layout,
            supplies,
            report,
        })
    }

    pub fn width_m(&self) -> f64 {
        self.layout.tiled_width as f64 / 1000.0
    }

    /// Length actually covered by whole rows.
    pub fn length_m(&self) -> f64 {
        (self.layout.total_rows as f64 * f64::from(self.geometry.module_height_mm)) / 1000.0
    }

    fn rod_length_m(&self) -> f64 {
        f64::from(self.supplies.rod_length_mm) / 1000.0
    }

    /// One-line order description, e.g. `Belt S-900 Flat PP White 0.70m wide x 2.70m long`.
    pub fn description(&self) -> String {
        let p = &self.product;
        let mut out = format!("Belt S-{} {}", p.series, p.belt_type);
        if let Some(material) = p.material.as_deref().filter(|m| !m.is_empty()) {
            out.push(' ');
            out.push_str(material);
        }
        let _ = write!(out, " {} {:.2}m wide", p.color, self.width_m());
        if self.options.with_pushers && self.layout.pusher_row_count > 0 {
            let spacing_cm =
                (self.pattern.len() as f64 * f64::from(self.geometry.module_height_mm)) / 10.0;
            let _ = write!(out, " {} every {:.0}cm", self.pusher_type, spacing_cm);
        }
        if self.options.with_indentation {
            out.push(' ');
            out.push_str(&self.indentation_type);
        }
        let _ = write!(out, " x {:.2}m long", self.length_m());
        out
    }

    /// Narrative summary of rows, module counts and supplies.
    pub fn summary_text(&self) -> String {
        let view = &self.report;
        let mut out = String::new();
        out.push_str(&format!(
            "Pusher rows: {}\nModule rows: {}\n{RULE}\n",
            self.layout.pusher_row_count, self.layout.normal_row_count
        ));

        if self.options.with_pushers {
            out.push_str("Pushers:\n");
            if view.breakdown == Breakdown::BySide {
                out.push_str("(Left / Center / Right):\n");
            }
            for line in &view.pushers {
                out.push_str(&format!("{} mm: {} pcs\n", line.width, counts_text(&line.counts)));
            }
            out.push_str(RULE);
            out.push('\n');
        }

        match view.breakdown {
            Breakdown::BySide => out.push_str("Edge modules (Left / Right):\n"),
            Breakdown::Consolidated => out.push_str("Edge modules total:\n"),
        }
        for line in &view.edges {
            out.push_str(&format!("{} mm: {} pcs\n", line.width, counts_text(&line.counts)));
        }

        out.push_str(&format!("{RULE}\nCenter modules:\n"));
        for line in &view.centers {
            out.push_str(&format!("{} mm: {} pcs\n", line.width, line.counts.total()));
        }

        let s = &self.supplies;
        out.push_str(&format!(
            "{RULE}\nPins required: {} of {}mm (incl. {} spare)\nRods needed: {} pcs ({} m)\nEnd caps: {} (incl. {} spare)\n{RULE}\n",
            s.pins_required,
            self.product.pin_diameter_mm,
            PIN_GIFT,
            s.rods_required,
            self.rod_length_m(),
            s.caps_required,
            CAP_GIFT,
        ));
        out
    }

    /// Flat line items for copying into an order.
    pub fn line_items(&self) -> Vec<String> {
        let view = &self.report;
        let mut items = vec![
            self.description(),
            format!("Pusher rows: {}", self.layout.pusher_row_count),
            format!("Module rows: {}", self.layout.normal_row_count),
            format!("Total rows: {}", self.layout.total_rows),
            LIST_RULE.to_string(),
        ];

        if self.options.with_pushers {
            items.push("==== PUSHERS ====".to_string());
            for line in &view.pushers {
                push_side_items(&mut items, line.width, &line.counts, "pcs");
            }
            items.push(LIST_RULE.to_string());
        }

        items.push("==== EDGE MODULES ====".to_string());
        for line in &view.edges {
            push_side_items(&mut items, line.width, &line.counts, "pcs total");
        }
        items.push(LIST_RULE.to_string());

        items.push("==== CENTER MODULES ====".to_string());
        for line in &view.centers {
            let total = line.counts.total();
            if total > 0 {
                items.push(format!("{} mm: {} pcs", line.width, total));
            }
        }
        items.push(LIST_RULE.to_string());

        let s = &self.supplies;
        items.push(format!(
            "Pins required: {} pcs of {}mm for {:.2} m",
            s.pins_required,
            self.product.pin_diameter_mm,
            self.width_m()
        ));
        items.push(format!(
            "Rods needed: {} pcs ({} m each)",
            s.rods_required,
            self.rod_length_m()
        ));
        items.push(format!(
            "End caps total: {} (incl. {} spare)",
            s.caps_required, CAP_GIFT
        ));
        items
    }

    /// Name offered when saving this schema.
    pub fn suggested_name(&self) -> String {
        format!(
            "Belt_{}_{}_{}mm_L{:.2}m_{}",
            self.product.series,
            self.product.belt_type,
            self.layout.tiled_width,
            self.length_m(),
            self.generated_at.format("%Y%m%d_%H%M")
        )
    }

    pub fn preview(&self, style: PreviewStyle) -> LayoutPreview<'_> {
        LayoutPreview::new(
            &self.pattern,
            &self.layout,
            self.options.with_indentation,
            style,
        )
    }
}

fn counts_text(counts: &LineCounts) -> String {
    match *counts {
        LineCounts::Total(n) => n.to_string(),
        LineCounts::Edges { left, right } => format!("{left} / {right}"),
        LineCounts::Sides {
            left,
            center,
            right,
        } => format!("{left} / {center} / {right}"),
    }
}

fn push_side_items(items: &mut Vec<String>, width: Width, counts: &LineCounts, total_suffix: &str) {
    let sides = match *counts {
        LineCounts::Total(n) => {
            if n > 0 {
                items.push(format!("{width} mm: {n} {total_suffix}"));
            }
            return;
        }
        LineCounts::Edges { left, right } => vec![(left, "left"), (right, "right")],
        LineCounts::Sides {
            left,
            center,
            right,
        } => vec![(left, "left"), (center, "center"), (right, "right")],
    };
    for (n, side) in sides {
        if n > 0 {
            items.push(format!("{width} mm: {n} pcs {side}"));
        }
    }
}
