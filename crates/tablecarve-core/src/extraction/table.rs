use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::model::Grid;

/// "Table" + whitespace + digits, anchored at the start of the caption.
static CAPTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(Table\s+\d+)").unwrap_or_else(|e| panic!("invalid caption pattern: {e}"))
});

/// A caption row marking the start of a table in a formatted report sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableStart {
    pub row: usize,
    /// Trimmed caption text from the first column.
    pub caption: String,
}

/// Resolved bounds of one table inside a grid.
///
/// Data occupies rows `header_row + 1 .. end_row`, restricted to `columns`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableRegion {
    pub title: String,
    pub caption_row: usize,
    pub header_row: usize,
    pub end_row: usize,
    /// Row that cut the table short, when a footnote came before the next caption.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub footnote_row: Option<usize>,
    pub columns: Vec<usize>,
    pub headers: Vec<String>,
}

impl TableRegion {
    pub fn data_rows(&self) -> std::ops::Range<usize> {
        let first = self.header_row + 1;
        first..self.end_row.max(first)
    }
}

/// Detect if a caption text opens a new table.
pub fn is_table_caption(text: &str) -> bool {
    CAPTION.is_match(text)
}

/// The leading "Table N" token of a caption, if any.
pub fn caption_id(text: &str) -> Option<&str> {
    CAPTION
        .captures(text)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
}

/// Find every caption row in a grid, in sheet order.
///
/// Only text cells in the first column are considered. A caption that appears
/// inside another table still starts a new table.
pub fn find_table_starts(grid: &Grid) -> Vec<TableStart> {
    (0..grid.height())
        .filter_map(|row| {
            let text = grid.first_text(row)?;
            is_table_caption(text).then(|| TableStart {
                row,
                caption: text.to_string(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::CellValue;

    fn grid(first_column: &[&str]) -> Grid {
        Grid::from_rows(first_column.iter().map(|s| vec![CellValue::from(*s)]).collect())
    }

    #[test]
    fn test_is_table_caption() {
        assert!(is_table_caption("Table 1: Age"));
        assert!(is_table_caption("Table  12 Hospitalizations"));
        assert!(is_table_caption("Table\t3"));
        assert!(!is_table_caption("Table: overview"));
        assert!(!is_table_caption("See Table 1"));
        assert!(!is_table_caption("table 1"));
        assert!(!is_table_caption("Table1"));
    }

    #[test]
    fn test_caption_id() {
        assert_eq!(caption_id("Table 10: Sex"), Some("Table 10"));
        assert_eq!(caption_id("Figure 2"), None);
    }

    #[test]
    fn test_find_table_starts() {
        let g = grid(&[
            "Report title",
            "  Table 1: Age",
            "Age",
            "0-4",
            "",
            "Notes",
            "Table 2: Sex ",
            "Sex",
        ]);

        let starts = find_table_starts(&g);
        assert_eq!(
            starts,
            vec![
                TableStart {
                    row: 1,
                    caption: "Table 1: Age".into()
                },
                TableStart {
                    row: 6,
                    caption: "Table 2: Sex".into()
                },
            ]
        );
    }

    #[test]
    fn numeric_first_cells_never_match() {
        let g = Grid::from_rows(vec![vec![CellValue::Int(1)], vec![CellValue::Empty]]);
        assert!(find_table_starts(&g).is_empty());
    }

    #[test]
    fn data_rows_never_reverse() {
        let region = TableRegion {
            title: "Table 1".into(),
            caption_row: 0,
            header_row: 1,
            end_row: 1,
            footnote_row: None,
            columns: vec![0],
            headers: vec!["A".into()],
        };
        assert!(region.data_rows().is_empty());
    }
}
