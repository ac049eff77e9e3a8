use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Module width in millimetres. Signed because the parser accepts any integer.
pub type Width = i64;

/// Four-row layout offered as the starting schema for a new quote.
pub const DEFAULT_PATTERN: &str = "50,200,200,200,50\n200,200,200,100\n100,200,200,200\n200,200,200,100";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PatternError {
    #[error("malformed pattern: line {line} has non-integer value '{token}'")]
    Malformed { line: usize, token: String },
    #[error("pattern has no rows")]
    EmptyPattern,
}

/// One period of the belt cross-section: rows of module widths, repeated along the belt.
///
/// Every row holds at least one width and there is at least one row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<Width>>", into = "Vec<Vec<Width>>")]
pub struct Pattern {
    rows: Vec<Vec<Width>>,
}

impl Pattern {
    /// Parse one row per line, widths separated by commas. Blank lines are skipped.
    pub fn parse(text: &str) -> Result<Self, PatternError> {
        let mut rows = Vec::new();
        for (idx, line) in text.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            rows.push(parse_line(line, idx + 1)?);
        }
        Self::from_rows(rows)
    }

    pub fn from_rows(rows: Vec<Vec<Width>>) -> Result<Self, PatternError> {
        if rows.is_empty() || rows.iter().any(Vec::is_empty) {
            return Err(PatternError::EmptyPattern);
        }
        Ok(Self { rows })
    }

    pub fn rows(&self) -> &[Vec<Width>] {
        &self.rows
    }

    /// Number of rows in one period.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Row used at logical belt row `index`, wrapping around the period.
    pub fn row_at(&self, index: usize) -> &[Width] {
        &self.rows[index % self.rows.len()]
    }

    /// Nominal belt width: the widest row sum. Narrower rows are padded, never stretched.
    pub fn tiled_width(&self) -> Width {
        self.rows
            .iter()
            .map(|row| row.iter().sum::<Width>())
            .max()
            .unwrap_or(0)
    }
}

impl TryFrom<Vec<Vec<Width>>> for Pattern {
    type Error = PatternError;

    fn try_from(rows: Vec<Vec<Width>>) -> Result<Self, Self::Error> {
        Self::from_rows(rows)
    }
}

impl From<Pattern> for Vec<Vec<Width>> {
    fn from(pattern: Pattern) -> Self {
        pattern.rows
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, row) in self.rows.iter().enumerate() {
            if idx > 0 {
                writeln!(f)?;
            }
            let line = row
                .iter()
                .map(Width::to_string)
                .collect::<Vec<_>>()
                .join(",");
            f.write_str(&line)?;
        }
        Ok(())
    }
}

fn parse_line(line: &str, line_no: usize) -> Result<Vec<Width>, PatternError> {
    line.split(',')
        .map(|token| {
            let token = token.trim();
            token.parse::<Width>().map_err(|_| PatternError::Malformed {
                line: line_no,
                token: token.to_string(),
            })
        })
        .collect()
}

/// Sum of a single pattern line, or `None` when the line does not parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowSum {
    pub line: usize,
    pub sum: Option<Width>,
}

impl fmt::Display for RowSum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.sum {
            Some(sum) => write!(f, "Row {}: {} mm", self.line, sum),
            None => write!(f, "Row {}: invalid data", self.line),
        }
    }
}

/// Per-line sums for a pattern being edited. Bad lines are reported, not rejected.
pub fn row_sums(text: &str) -> Vec<RowSum> {
    text.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(idx, line)| RowSum {
            line: idx + 1,
            sum: parse_line(line, idx + 1)
                .ok()
                .map(|row| row.iter().sum()),
        })
        .collect()
}
