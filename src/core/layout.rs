//! Tiling of a [`Pattern`] along the belt and per-module classification.
//!
//! The belt is `floor(length / module height)` rows long. Only rows that start a
//! new pattern period may carry pushers, and the pusher quota set by the
//! [`RoundingPolicy`] is handed out to those candidates earliest-first. The
//! [`RowPlan`] iterator is the single place that decision is made; both the
//! counters and the preview renderer walk it.

use crate::core::pattern::{Pattern, Width};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// How the real-valued `rows / period` pusher share is turned into a row count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoundingPolicy {
    /// Fewer pusher rows, more plain rows.
    #[default]
    Down,
    /// More pusher rows, fewer plain rows.
    Up,
}

impl RoundingPolicy {
    /// Pusher rows for `total_rows` rows of a `period`-row pattern.
    pub fn pusher_rows(self, total_rows: usize, period: usize) -> usize {
        if period == 0 {
            return 0;
        }
        match self {
            RoundingPolicy::Down => total_rows / period,
            RoundingPolicy::Up => total_rows.div_ceil(period),
        }
    }
}

impl fmt::Display for RoundingPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoundingPolicy::Down => write!(f, "down"),
            RoundingPolicy::Up => write!(f, "up"),
        }
    }
}

/// Physical belt dimensions in millimetres.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BeltGeometry {
    pub module_height_mm: u32,
    pub belt_length_mm: u32,
}

impl BeltGeometry {
    pub fn new(module_height_mm: u32, belt_length_mm: u32) -> Self {
        Self {
            module_height_mm,
            belt_length_mm,
        }
    }

    /// Whole rows that fit in the belt length. A trailing partial row is dropped.
    pub fn total_rows(&self) -> usize {
        self.belt_length_mm
            .checked_div(self.module_height_mm)
            .unwrap_or(0) as usize
    }

    /// Length left over after the last whole row.
    pub fn remainder_mm(&self) -> u32 {
        self.belt_length_mm
            .checked_rem(self.module_height_mm)
            .unwrap_or(self.belt_length_mm)
    }
}

/// Pusher and indentation switches for a layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutOptions {
    pub with_pushers: bool,
    /// Only has an effect together with `with_pushers`.
    pub with_indentation: bool,
    pub rounding: RoundingPolicy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RowKind {
    Normal,
    Pusher,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Position {
    Left,
    Center,
    Right,
}

impl Position {
    /// Index 0 is checked first, so the single module of a one-wide row is `Left`.
    pub fn of(index: usize, row_len: usize) -> Self {
        if index == 0 {
            Position::Left
        } else if index + 1 == row_len {
            Position::Right
        } else {
            Position::Center
        }
    }

    pub fn is_edge(self) -> bool {
        !matches!(self, Position::Center)
    }
}

/// Bucket a module instance is counted in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Category {
    pub kind: RowKind,
    pub position: Position,
}

impl Category {
    /// Classify the module at `index` of a row drawn as `row_kind`.
    ///
    /// With indentation, the edges of a pusher row are plain modules.
    pub fn of(row_kind: RowKind, index: usize, row_len: usize, with_indentation: bool) -> Self {
        let position = Position::of(index, row_len);
        let kind = match row_kind {
            RowKind::Pusher if with_indentation && position.is_edge() => RowKind::Normal,
            other => other,
        };
        Self { kind, position }
    }
}

/// Earliest-first pusher allowance shared by every consumer of a [`RowPlan`].
#[derive(Debug, Clone, Copy)]
pub struct PusherQuota {
    limit: usize,
    used: usize,
}

impl PusherQuota {
    pub fn new(limit: usize) -> Self {
        Self { limit, used: 0 }
    }

    /// Take one pusher slot if any remain.
    pub fn claim(&mut self) -> bool {
        if self.used < self.limit {
            self.used += 1;
            true
        } else {
            false
        }
    }

    pub fn used(&self) -> usize {
        self.used
    }
}

/// A logical belt row with its resolved kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlannedRow<'a> {
    pub index: usize,
    pub widths: &'a [Width],
    pub kind: RowKind,
}

/// Iterator over all belt rows in order, deciding which ones are pusher rows.
pub struct RowPlan<'a> {
    pattern: &'a Pattern,
    total_rows: usize,
    next: usize,
    quota: PusherQuota,
}

impl<'a> RowPlan<'a> {
    /// `pusher_rows` is the quota; zero yields an all-normal plan.
    pub fn new(pattern: &'a Pattern, total_rows: usize, pusher_rows: usize) -> Self {
        Self {
            pattern,
            total_rows,
            next: 0,
            quota: PusherQuota::new(pusher_rows),
        }
    }

    pub fn pushers_assigned(&self) -> usize {
        self.quota.used()
    }
}

impl<'a> Iterator for RowPlan<'a> {
    type Item = PlannedRow<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.total_rows {
            return None;
        }
        let index = self.next;
        self.next += 1;
        let candidate = index % self.pattern.len() == 0;
        let kind = if candidate && self.quota.claim() {
            RowKind::Pusher
        } else {
            RowKind::Normal
        };
        Some(PlannedRow {
            index,
            widths: self.pattern.row_at(index),
            kind,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.total_rows - self.next;
        (left, Some(left))
    }
}

/// Module counts keyed by width, ascending.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct WidthHistogram(BTreeMap<Width, usize>);

impl WidthHistogram {
    pub fn add(&mut self, width: Width) {
        *self.0.entry(width).or_insert(0) += 1;
    }

    pub fn get(&self, width: Width) -> usize {
        self.0.get(&width).copied().unwrap_or(0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Width, usize)> + '_ {
        self.0.iter().map(|(w, c)| (*w, *c))
    }

    pub fn widths(&self) -> impl Iterator<Item = Width> + '_ {
        self.0.keys().copied()
    }

    pub fn total(&self) -> usize {
        self.0.values().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(Width, usize)> for WidthHistogram {
    fn from_iter<I: IntoIterator<Item = (Width, usize)>>(iter: I) -> Self {
        let mut hist = Self::default();
        for (width, count) in iter {
            *hist.0.entry(width).or_insert(0) += count;
        }
        hist
    }
}

/// The six module buckets produced by [`classify`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Histograms {
    pub normal_left: WidthHistogram,
    pub normal_center: WidthHistogram,
    pub normal_right: WidthHistogram,
    pub pusher_left: WidthHistogram,
    pub pusher_center: WidthHistogram,
    pub pusher_right: WidthHistogram,
}

impl Histograms {
    pub fn bucket(&self, category: Category) -> &WidthHistogram {
        match (category.kind, category.position) {
            (RowKind::Normal, Position::Left) => &self.normal_left,
            (RowKind::Normal, Position::Center) => &self.normal_center,
            (RowKind::Normal, Position::Right) => &self.normal_right,
            (RowKind::Pusher, Position::Left) => &self.pusher_left,
            (RowKind::Pusher, Position::Center) => &self.pusher_center,
            (RowKind::Pusher, Position::Right) => &self.pusher_right,
        }
    }

    fn bucket_mut(&mut self, category: Category) -> &mut WidthHistogram {
        match (category.kind, category.position) {
            (RowKind::Normal, Position::Left) => &mut self.normal_left,
            (RowKind::Normal, Position::Center) => &mut self.normal_center,
            (RowKind::Normal, Position::Right) => &mut self.normal_right,
            (RowKind::Pusher, Position::Left) => &mut self.pusher_left,
            (RowKind::Pusher, Position::Center) => &mut self.pusher_center,
            (RowKind::Pusher, Position::Right) => &mut self.pusher_right,
        }
    }

    /// Total classified module instances across all six buckets.
    pub fn module_count(&self) -> usize {
        [
            &self.normal_left,
            &self.normal_center,
            &self.normal_right,
            &self.pusher_left,
            &self.pusher_center,
            &self.pusher_right,
        ]
        .iter()
        .map(|h| h.total())
        .sum()
    }
}

/// Counts and totals for one tiled belt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LayoutResult {
    pub histograms: Histograms,
    pub total_rows: usize,
    pub pusher_row_count: usize,
    pub normal_row_count: usize,
    pub tiled_width: Width,
    /// Rows a preview should draw; never affects the counts.
    pub rows_rendered: usize,
    /// Belt length not covered by whole rows.
    pub remainder_mm: u32,
}

/// Tile `pattern` over the belt and count every module into its bucket.
///
/// `rows_to_render` of 0 means every row.
pub fn classify(
    pattern: &Pattern,
    geometry: BeltGeometry,
    options: LayoutOptions,
    rows_to_render: usize,
) -> LayoutResult {
    let tiled_width = pattern.tiled_width();
    let total_rows = geometry.total_rows();

    let pusher_row_count = if options.with_pushers {
        options.rounding.pusher_rows(total_rows, pattern.len())
    } else {
        0
    };
    let normal_row_count = total_rows - pusher_row_count;

    let mut histograms = Histograms::default();
    let mut plan = RowPlan::new(pattern, total_rows, pusher_row_count);
    for row in plan.by_ref() {
        for (i, &width) in row.widths.iter().enumerate() {
            let category = Category::of(row.kind, i, row.widths.len(), options.with_indentation);
            histograms.bucket_mut(category).add(width);
        }
    }
    debug_assert_eq!(plan.pushers_assigned(), pusher_row_count);

    let rows_rendered = if rows_to_render == 0 {
        total_rows
    } else {
        rows_to_render.min(total_rows)
    };

    tracing::debug!(
        total_rows,
        pusher_row_count,
        normal_row_count,
        tiled_width,
        rounding = %options.rounding,
        "classified belt layout"
    );

    LayoutResult {
        histograms,
        total_rows,
        pusher_row_count,
        normal_row_count,
        tiled_width,
        rows_rendered,
        remainder_mm: geometry.remainder_mm(),
    }
}
