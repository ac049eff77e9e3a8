use crate::core::layout::{Category, LayoutResult, RowKind, RowPlan};
use crate::core::pattern::{Pattern, Width};
use std::fmt;

/// ASCII preview styles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PreviewStyle {
    /// Every module printed with its width, bracketed by kind.
    #[default]
    Widths,
    /// One character per module.
    Marks,
}

impl fmt::Display for PreviewStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PreviewStyle::Widths => write!(f, "widths"),
            PreviewStyle::Marks => write!(f, "marks"),
        }
    }
}

/// Text drawing of the first `rows_rendered` belt rows.
///
/// Walks the same [`RowPlan`] as the classifier, so a row drawn as a pusher
/// row is exactly a row counted as one. Legend: `[w]` plain module, `{w}`
/// pusher module, `<w>` indented edge, `~n~` n millimetres of missing width.
pub struct LayoutPreview<'a> {
    pattern: &'a Pattern,
    layout: &'a LayoutResult,
    with_indentation: bool,
    style: PreviewStyle,
}

impl<'a> LayoutPreview<'a> {
    pub fn new(
        pattern: &'a Pattern,
        layout: &'a LayoutResult,
        with_indentation: bool,
        style: PreviewStyle,
    ) -> Self {
        Self {
            pattern,
            layout,
            with_indentation,
            style,
        }
    }

    fn cell(&self, row_kind: RowKind, index: usize, row_len: usize, width: Width) -> String {
        let category = Category::of(row_kind, index, row_len, self.with_indentation);
        let indented = row_kind == RowKind::Pusher && category.kind == RowKind::Normal;
        match self.style {
            PreviewStyle::Widths => match (category.kind, indented) {
                (RowKind::Pusher, _) => format!("{{{width}}}"),
                (RowKind::Normal, true) => format!("<{width}>"),
                (RowKind::Normal, false) => format!("[{width}]"),
            },
            PreviewStyle::Marks => match (category.kind, indented) {
                (RowKind::Pusher, _) => "P".to_string(),
                (RowKind::Normal, true) => "I".to_string(),
                (RowKind::Normal, false) => "M".to_string(),
            },
        }
    }
}

impl fmt::Display for LayoutPreview<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let shown = self.layout.rows_rendered;
        let total = self.layout.total_rows;
        if shown < total {
            writeln!(f, "Belt layout (showing {} of {} rows) [{}]", shown, total, self.style)?;
        } else {
            writeln!(f, "Belt layout ({} rows) [{}]", total, self.style)?;
        }
        writeln!(f, "{}", "-".repeat(40))?;

        let plan = RowPlan::new(self.pattern, total, self.layout.pusher_row_count);
        for row in plan.take(shown) {
            let kind = match row.kind {
                RowKind::Pusher => "P",
                RowKind::Normal => " ",
            };
            write!(f, "{:>5} {} |", row.index + 1, kind)?;
            let sep = match self.style {
                PreviewStyle::Widths => " ",
                PreviewStyle::Marks => "",
            };
            for (i, &width) in row.widths.iter().enumerate() {
                f.write_str(sep)?;
                f.write_str(&self.cell(row.kind, i, row.widths.len(), width))?;
            }
            let row_width: Width = row.widths.iter().sum();
            let missing = self.layout.tiled_width - row_width;
            if missing > 0 {
                match self.style {
                    PreviewStyle::Widths => write!(f, " ~{}~", missing)?,
                    PreviewStyle::Marks => f.write_str("x")?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::layout::{BeltGeometry, LayoutOptions, RoundingPolicy, classify};

    fn layout_for(text: &str, options: LayoutOptions, rows: usize) -> (Pattern, LayoutResult) {
        let pattern = Pattern::parse(text).unwrap();
        let layout = classify(&pattern, BeltGeometry::new(10, 50), options, rows);
        (pattern, layout)
    }

    #[test]
    fn widths_style_marks_pushers_and_padding() {
        let options = LayoutOptions {
            with_pushers: true,
            with_indentation: false,
            rounding: RoundingPolicy::Down,
        };
        let (pattern, layout) = layout_for("50,100,50\n100,50", options, 2);
        let text = LayoutPreview::new(&pattern, &layout, false, PreviewStyle::Widths).to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Belt layout (showing 2 of 5 rows) [widths]");
        assert_eq!(lines[2], "    1 P | {50} {100} {50}");
        assert_eq!(lines[3], "    2   | [100] [50] ~50~");
        assert_eq!(lines.len(), 4);
    }

    #[test]
    fn marks_style_shows_indented_edges() {
        let options = LayoutOptions {
            with_pushers: true,
            with_indentation: true,
            rounding: RoundingPolicy::Up,
        };
        let (pattern, layout) = layout_for("50,100,50\n200", options, 0);
        let text = LayoutPreview::new(&pattern, &layout, true, PreviewStyle::Marks).to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Belt layout (5 rows) [marks]");
        assert_eq!(lines[2], "    1 P |IPI");
        assert_eq!(lines[3], "    2   |M");
        assert_eq!(lines[6], "    5 P |IPI");
    }
}
