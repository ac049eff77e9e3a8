//! Projection of the six module buckets into presentation lines.

use crate::core::layout::{Histograms, WidthHistogram};
use crate::core::pattern::Width;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Report granularity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Breakdown {
    /// Left and right (and pusher center) counts summed per width.
    #[default]
    Consolidated,
    /// Left, center and right counts kept apart.
    BySide,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LineCounts {
    Total(usize),
    Edges { left: usize, right: usize },
    Sides { left: usize, center: usize, right: usize },
}

impl LineCounts {
    pub fn total(&self) -> usize {
        match *self {
            LineCounts::Total(n) => n,
            LineCounts::Edges { left, right } => left + right,
            LineCounts::Sides {
                left,
                center,
                right,
            } => left + center + right,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ReportLine {
    pub width: Width,
    pub counts: LineCounts,
}

/// Module lines grouped by section, each sorted by ascending width.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportView {
    pub breakdown: Breakdown,
    pub pushers: Vec<ReportLine>,
    pub edges: Vec<ReportLine>,
    pub centers: Vec<ReportLine>,
}

impl ReportView {
    pub fn pusher_total(&self) -> usize {
        section_total(&self.pushers)
    }

    pub fn edge_total(&self) -> usize {
        section_total(&self.edges)
    }

    pub fn center_total(&self) -> usize {
        section_total(&self.centers)
    }

    pub fn module_total(&self) -> usize {
        self.pusher_total() + self.edge_total() + self.center_total()
    }
}

fn section_total(lines: &[ReportLine]) -> usize {
    lines.iter().map(|line| line.counts.total()).sum()
}

fn widths_of(hists: &[&WidthHistogram]) -> BTreeSet<Width> {
    hists.iter().copied().flat_map(WidthHistogram::widths).collect()
}

/// Build the report lines for `histograms` at the requested granularity.
pub fn project(histograms: &Histograms, breakdown: Breakdown) -> ReportView {
    let h = histograms;

    let pushers = widths_of(&[&h.pusher_left, &h.pusher_center, &h.pusher_right])
        .into_iter()
        .map(|width| {
            let left = h.pusher_left.get(width);
            let center = h.pusher_center.get(width);
            let right = h.pusher_right.get(width);
            let counts = match breakdown {
                Breakdown::BySide => LineCounts::Sides {
                    left,
                    center,
                    right,
                },
                Breakdown::Consolidated => LineCounts::Total(left + center + right),
            };
            ReportLine { width, counts }
        })
        .collect();

    let edges = widths_of(&[&h.normal_left, &h.normal_right])
        .into_iter()
        .map(|width| {
            let left = h.normal_left.get(width);
            let right = h.normal_right.get(width);
            let counts = match breakdown {
                Breakdown::BySide => LineCounts::Edges { left, right },
                Breakdown::Consolidated => LineCounts::Total(left + right),
            };
            ReportLine { width, counts }
        })
        .collect();

    let centers = h
        .normal_center
        .iter()
        .map(|(width, count)| ReportLine {
            width,
            counts: LineCounts::Total(count),
        })
        .collect();

    ReportView {
        breakdown,
        pushers,
        edges,
        centers,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample() -> Histograms {
        Histograms {
            normal_left: [(200, 3), (50, 1)].into_iter().collect(),
            normal_right: [(100, 2), (50, 1)].into_iter().collect(),
            normal_center: [(200, 9)].into_iter().collect(),
            pusher_left: [(50, 2)].into_iter().collect(),
            pusher_center: [(200, 6)].into_iter().collect(),
            pusher_right: [(50, 2)].into_iter().collect(),
        }
    }

    #[test]
    fn consolidated_sums_sides() {
        let view = project(&sample(), Breakdown::Consolidated);
        assert_eq!(
            view.pushers,
            vec![
                ReportLine {
                    width: 50,
                    counts: LineCounts::Total(4)
                },
                ReportLine {
                    width: 200,
                    counts: LineCounts::Total(6)
                },
            ]
        );
        assert_eq!(
            view.edges.iter().map(|l| l.width).collect::<Vec<_>>(),
            vec![50, 100, 200]
        );
        assert_eq!(view.edges[0].counts, LineCounts::Total(2));
    }

    #[test]
    fn by_side_keeps_sides_apart() {
        let view = project(&sample(), Breakdown::BySide);
        assert_eq!(
            view.pushers[0].counts,
            LineCounts::Sides {
                left: 2,
                center: 0,
                right: 2
            }
        );
        assert_eq!(
            view.edges[1].counts,
            LineCounts::Edges { left: 0, right: 2 }
        );
        assert_eq!(view.centers[0].counts, LineCounts::Total(9));
    }

    #[test]
    fn both_views_agree_on_totals() {
        let hist = sample();
        let a = project(&hist, Breakdown::Consolidated);
        let b = project(&hist, Breakdown::BySide);
        assert_eq!(a.pusher_total(), b.pusher_total());
        assert_eq!(a.edge_total(), b.edge_total());
        assert_eq!(a.module_total(), hist.module_count());
        assert_eq!(b.module_total(), hist.module_count());
    }
}
