use serde::{Deserialize, Serialize};
use std::fmt;

/// A single cell as read from a sheet.
///
/// `Empty` is the only representation of a missing value. Readers convert
/// blank cells and zero-length strings to `Empty` at the grid boundary.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    #[default]
    Empty,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl CellValue {
    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// True when the cell carries no usable value: missing, zero-length text,
    /// or the literal `nan` some exporters write for missing numbers.
    pub fn is_blank_like(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(s) => s.is_empty() || s == "nan",
            _ => false,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Empty => Ok(()),
            CellValue::Bool(b) => write!(f, "{b}"),
            CellValue::Int(i) => write!(f, "{i}"),
            CellValue::Float(v) => write!(f, "{v}"),
            CellValue::Text(s) => write!(f, "{s}"),
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        if s.is_empty() {
            CellValue::Empty
        } else {
            CellValue::Text(s.to_string())
        }
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        if s.is_empty() {
            CellValue::Empty
        } else {
            CellValue::Text(s)
        }
    }
}

impl From<i64> for CellValue {
    fn from(i: i64) -> Self {
        CellValue::Int(i)
    }
}

impl From<f64> for CellValue {
    fn from(v: f64) -> Self {
        CellValue::Float(v)
    }
}

static EMPTY: CellValue = CellValue::Empty;

/// Positional read of one sheet with no header interpretation.
///
/// Always rectangular: short rows are padded with `Empty` on construction.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Grid {
    rows: Vec<Vec<CellValue>>,
    width: usize,
}

impl Grid {
    pub fn from_rows(mut rows: Vec<Vec<CellValue>>) -> Self {
        let width = rows.iter().map(Vec::len).max().unwrap_or(0);
        for row in &mut rows {
            row.resize(width, CellValue::Empty);
        }
        Self { rows, width }
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Cell at `(row, col)`; out-of-range positions read as `Empty`.
    pub fn get(&self, row: usize, col: usize) -> &CellValue {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .unwrap_or(&EMPTY)
    }

    pub fn row(&self, row: usize) -> Option<&[CellValue]> {
        self.rows.get(row).map(Vec::as_slice)
    }

    pub fn rows(&self) -> impl Iterator<Item = &[CellValue]> {
        self.rows.iter().map(Vec::as_slice)
    }

    /// Text of the first column at `row`, trimmed. Non-text cells yield `None`.
    pub fn first_text(&self, row: usize) -> Option<&str> {
        self.get(row, 0).as_text().map(str::trim)
    }
}

/// A sheet read with one row designated as the header.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HeaderedGrid {
    pub headers: Vec<CellValue>,
    pub rows: Vec<Vec<CellValue>>,
}

impl HeaderedGrid {
    /// Split `grid` at `header_row`: everything above it is discarded, the row
    /// itself becomes the headers and everything below becomes data.
    pub fn from_grid(grid: &Grid, header_row: usize) -> Option<Self> {
        let headers = grid.row(header_row)?.to_vec();
        let rows = grid
            .rows()
            .skip(header_row + 1)
            .map(<[CellValue]>::to_vec)
            .collect();
        Some(Self { headers, rows })
    }
}

/// Materialized output table. Every row has exactly `headers.len()` values.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ExtractedTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<CellValue>>,
}

impl ExtractedTable {
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    pub fn column(&self, col: usize) -> impl Iterator<Item = &CellValue> {
        self.rows.iter().map(move |r| &r[col])
    }
}

/// Where an output table came from, for reporting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSource {
    pub sheet: String,
    /// Caption text for tables carved out of a formatted report sheet.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    /// Zero-based row of the caption (formatted) or header (raw).
    pub row: usize,
}

/// A table paired with the file stem it will be written under.
#[derive(Debug, Clone, PartialEq)]
pub struct OutputArtifact {
    pub name: String,
    pub source: TableSource,
    pub table: ExtractedTable,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_pads_short_rows() {
        let grid = Grid::from_rows(vec![vec!["a".into()], vec!["b".into(), 2i64.into()]]);
        assert_eq!(grid.width(), 2);
        assert_eq!(grid.get(0, 1), &CellValue::Empty);
        assert_eq!(grid.get(5, 5), &CellValue::Empty);
    }

    #[test]
    fn display_drops_trailing_zero_on_whole_floats() {
        assert_eq!(CellValue::Float(12.0).to_string(), "12");
        assert_eq!(CellValue::Float(0.25).to_string(), "0.25");
        assert_eq!(CellValue::Empty.to_string(), "");
    }

    #[test]
    fn blank_like_cells() {
        assert!(CellValue::Empty.is_blank_like());
        assert!(CellValue::Text("nan".into()).is_blank_like());
        assert!(CellValue::Text(String::new()).is_blank_like());
        assert!(!CellValue::Text(" ".into()).is_blank_like());
        assert!(!CellValue::Int(0).is_blank_like());
    }

    #[test]
    fn headered_grid_splits_at_row() {
        let grid = Grid::from_rows(vec![
            vec!["title".into()],
            vec!["A".into(), "B".into()],
            vec![1i64.into(), 2i64.into()],
        ]);
        let h = HeaderedGrid::from_grid(&grid, 1).unwrap();
        assert_eq!(h.headers, vec![CellValue::from("A"), CellValue::from("B")]);
        assert_eq!(h.rows.len(), 1);
        assert!(HeaderedGrid::from_grid(&grid, 3).is_none());
    }
}
