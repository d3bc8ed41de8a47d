use tracing::debug;

use crate::extraction::table::{caption_id, find_table_starts, TableRegion, TableStart};
use crate::extraction::{forward_fill, Extraction};
use crate::model::{CellValue, ExtractedTable, Grid, OutputArtifact, TableSource};
use crate::outcome::SkipReason;
use crate::sanitize::{clean_header, sanitize_filename, MAX_FILENAME_LEN};

/// Carve every captioned table out of a formatted report sheet.
///
/// Returns one entry per caption row, in sheet order. A sheet without
/// captions yields nothing.
pub fn extract_tables(grid: &Grid, sheet: &str, footnote_prefixes: &[String]) -> Vec<Extraction> {
    let starts = find_table_starts(grid);
    debug!(sheet, captions = starts.len(), "scanned for table captions");

    starts
        .iter()
        .enumerate()
        .map(|(i, start)| {
            let next_row = starts.get(i + 1).map(|s| s.row);
            extract_table(grid, sheet, i, start, next_row, footnote_prefixes)
        })
        .collect()
}

/// Carve out the table introduced by `start`.
///
/// `position` is the caption's zero-based index among the sheet's captions,
/// used for naming when the caption carries no "Table N" token.
pub fn extract_table(
    grid: &Grid,
    sheet: &str,
    position: usize,
    start: &TableStart,
    next_row: Option<usize>,
    footnote_prefixes: &[String],
) -> Extraction {
    let name = table_file_name(&start.caption, position);

    let region = match resolve_region(grid, start, next_row, footnote_prefixes) {
        Ok(region) => region,
        Err(reason) => {
            return Extraction::Skipped {
                name,
                caption: start.caption.clone(),
                reason,
            }
        }
    };
    debug!(
        sheet,
        table = %name,
        header_row = region.header_row,
        end_row = region.end_row,
        columns = ?region.columns,
        "resolved table region"
    );

    Extraction::Extracted(OutputArtifact {
        name,
        source: TableSource {
            sheet: sheet.to_string(),
            caption: Some(start.caption.clone()),
            row: start.row,
        },
        table: extract_region(grid, &region),
    })
}

/// Locate header row, valid columns and end boundary for one table.
///
/// The table ends at the first footnote row after the header, or else at
/// `next_row` (the next caption), or else at the bottom of the sheet.
pub fn resolve_region(
    grid: &Grid,
    start: &TableStart,
    next_row: Option<usize>,
    footnote_prefixes: &[String],
) -> Result<TableRegion, SkipReason> {
    let header_row = start.row + 1;
    if header_row >= grid.height() {
        return Err(SkipReason::HeaderRowOutOfRange {
            header_row,
            rows: grid.height(),
        });
    }

    let columns: Vec<usize> = (0..grid.width())
        .filter(|&col| is_valid_header(grid.get(header_row, col)))
        .collect();
    if columns.is_empty() {
        return Err(SkipReason::NoValidColumns { header_row });
    }

    let next_start = next_row.unwrap_or(grid.height());
    let footnote_row = (header_row + 1..next_start).find(|&row| {
        grid.first_text(row)
            .is_some_and(|text| footnote_prefixes.iter().any(|p| text.starts_with(p.as_str())))
    });

    let headers = columns
        .iter()
        .map(|&col| clean_header(grid.get(header_row, col)))
        .collect();

    Ok(TableRegion {
        title: start.caption.clone(),
        caption_row: start.row,
        header_row,
        end_row: footnote_row.unwrap_or(next_start),
        footnote_row,
        columns,
        headers,
    })
}

/// A header cell marks a data column when present and not blank.
fn is_valid_header(cell: &CellValue) -> bool {
    match cell {
        CellValue::Empty => false,
        CellValue::Text(s) => !s.trim().is_empty(),
        _ => true,
    }
}

/// Materialize a resolved region into a clean table.
///
/// The first column is forward-filled to undo merged cells, then rows that
/// are entirely missing are dropped, then rows whose first value is still
/// blank. A spacer row under a category keeps the filled category.
pub fn extract_region(grid: &Grid, region: &TableRegion) -> ExtractedTable {
    let mut rows: Vec<Vec<CellValue>> = region
        .data_rows()
        .map(|row| {
            region
                .columns
                .iter()
                .map(|&col| grid.get(row, col).clone())
                .collect()
        })
        .collect();

    forward_fill(&mut rows, 0);
    rows.retain(|row| !row.iter().all(CellValue::is_empty));
    rows.retain(|row| row.first().is_some_and(|first| !first.is_blank_like()));

    ExtractedTable {
        headers: region.headers.clone(),
        rows,
    }
}

/// File stem for a captioned table: `Table_N_<sanitized caption>`.
///
/// The prefix is dropped when the sanitized caption already starts with it,
/// which is the usual case ("Table 1: Age" gives `Table_1_Age`).
pub fn table_file_name(caption: &str, position: usize) -> String {
    let prefix = caption_id(caption)
        .map(|id| id.replace(' ', "_"))
        .unwrap_or_else(|| format!("Table_{}", position + 1));
    let title = sanitize_filename(caption);

    if title.starts_with(&prefix) {
        title
    } else {
        format!("{prefix}_{title}")
            .chars()
            .take(MAX_FILENAME_LEN)
            .collect()
    }
}
