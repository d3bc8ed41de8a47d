use tracing::debug;

use crate::extraction::forward_fill;
use crate::model::{CellValue, ExtractedTable, HeaderedGrid, OutputArtifact, TableSource};
use crate::sanitize::{clean_header, sanitize_filename};

/// Build the single table of a raw data sheet, named after the sheet.
pub fn extract_raw_table(sheet: &str, data: &HeaderedGrid, header_row: usize) -> OutputArtifact {
    let table = clean_raw_table(data);
    debug!(
        sheet,
        columns = table.column_count(),
        rows = table.row_count(),
        "cleaned raw data table"
    );

    OutputArtifact {
        name: sanitize_filename(sheet),
        source: TableSource {
            sheet: sheet.to_string(),
            caption: None,
            row: header_row,
        },
        table,
    }
}

/// Drop empty and unlabelled columns, then forward-fill the first column.
///
/// A column survives only if some data row has a value in it and its cleaned
/// header is non-empty. Rows are kept as they are otherwise.
pub fn clean_raw_table(data: &HeaderedGrid) -> ExtractedTable {
    let width = data
        .rows
        .iter()
        .map(Vec::len)
        .chain(std::iter::once(data.headers.len()))
        .max()
        .unwrap_or(0);

    let mut columns = Vec::new();
    let mut headers = Vec::new();
    for col in 0..width {
        let has_data = data
            .rows
            .iter()
            .any(|row| row.get(col).is_some_and(|c| !c.is_empty()));
        if !has_data {
            continue;
        }
        let header = data.headers.get(col).map(clean_header).unwrap_or_default();
        if header.is_empty() {
            continue;
        }
        columns.push(col);
        headers.push(header);
    }

    let mut rows: Vec<Vec<CellValue>> = data
        .rows
        .iter()
        .map(|row| {
            columns
                .iter()
                .map(|&col| row.get(col).cloned().unwrap_or_default())
                .collect()
        })
        .collect();

    if !columns.is_empty() {
        forward_fill(&mut rows, 0);
    }

    ExtractedTable { headers, rows }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cell(s: &str) -> CellValue {
        CellValue::from(s)
    }

    fn data(headers: &[&str], rows: &[&[&str]]) -> HeaderedGrid {
        HeaderedGrid {
            headers: headers.iter().map(|s| cell(s)).collect(),
            rows: rows
                .iter()
                .map(|r| r.iter().map(|s| cell(s)).collect())
                .collect(),
        }
    }

    #[test]
    fn drops_columns_without_data() {
        let d = data(
            &["Indicator", "Empty col", "Value"],
            &[&["Visits", "", "10"], &["Stays", "", "4"]],
        );
        let t = clean_raw_table(&d);
        assert_eq!(t.headers, vec!["Indicator", "Value"]);
        assert_eq!(t.rows[1], vec![cell("Stays"), cell("4")]);
    }

    #[test]
    fn drops_columns_without_header() {
        let d = data(&["Indicator", "", "Value"], &[&["Visits", "note", "10"]]);
        let t = clean_raw_table(&d);
        assert_eq!(t.headers, vec!["Indicator", "Value"]);
        assert_eq!(t.rows, vec![vec![cell("Visits"), cell("10")]]);
    }

    #[test]
    fn headers_are_cleaned() {
        let d = data(&["Fiscal\nyear", " Rate  (%) "], &[&["2019", "1.2"]]);
        let t = clean_raw_table(&d);
        assert_eq!(t.headers, vec!["Fiscal year", "Rate (%)"]);
    }

    #[test]
    fn first_column_is_forward_filled() {
        let d = data(
            &["Province", "Sex", "Count"],
            &[
                &["Ontario", "Male", "1"],
                &["", "Female", "2"],
                &["Quebec", "Male", "3"],
                &["", "Female", "4"],
            ],
        );
        let t = clean_raw_table(&d);
        let first: Vec<String> = t.column(0).map(|c| c.to_string()).collect();
        assert_eq!(first, vec!["Ontario", "Ontario", "Quebec", "Quebec"]);
    }

    #[test]
    fn empty_rows_are_kept() {
        let d = data(&["A", "B"], &[&["x", "1"], &["", ""], &["y", "2"]]);
        let t = clean_raw_table(&d);
        assert_eq!(t.row_count(), 3);
        assert_eq!(t.rows[1], vec![cell("x"), CellValue::Empty]);
    }

    #[test]
    fn no_rows_gives_no_columns() {
        let d = data(&["A", "B"], &[]);
        let t = clean_raw_table(&d);
        assert_eq!(t.column_count(), 0);
        assert_eq!(t.row_count(), 0);
    }

    #[test]
    fn artifact_named_after_sheet() {
        let d = data(&["A"], &[&["x"]]);
        let artifact = extract_raw_table("Table 3 DATA (hide)", &d, 1);
        assert_eq!(artifact.name, "Table_3_DATA_(hide)");
        assert_eq!(artifact.source.row, 1);
        assert_eq!(artifact.source.caption, None);
    }
}
