pub mod formatted;
pub mod raw;
pub mod table;
pub mod xlsx;

use crate::error::CarveError;
use crate::model::{CellValue, Grid, HeaderedGrid, OutputArtifact};
use crate::outcome::SkipReason;

/// Trait for workbook reading backends.
pub trait WorkbookSource {
    /// Sheet names in file order.
    fn sheet_names(&self) -> Vec<String>;

    /// Read a sheet positionally, with no header interpretation.
    fn read_grid(&mut self, sheet: &str) -> Result<Grid, CarveError>;

    /// Read a sheet with the zero-based `header_row` as its header. Rows above
    /// the header are discarded.
    fn read_with_header(
        &mut self,
        sheet: &str,
        header_row: usize,
    ) -> Result<HeaderedGrid, CarveError> {
        let grid = self.read_grid(sheet)?;
        HeaderedGrid::from_grid(&grid, header_row).ok_or_else(|| {
            CarveError::HeaderRowOutOfRange {
                sheet: sheet.to_string(),
                row: header_row,
                rows: grid.height(),
            }
        })
    }

    /// Name of this reading backend (for diagnostics).
    fn backend_name(&self) -> &str;
}

/// Result of carving one table out of a sheet.
#[derive(Debug, Clone, PartialEq)]
pub enum Extraction {
    Extracted(OutputArtifact),
    Skipped {
        name: String,
        caption: String,
        reason: SkipReason,
    },
}

/// Carry the last present value in column `col` down over missing cells.
///
/// Cells before the first present value stay missing.
pub fn forward_fill(rows: &mut [Vec<CellValue>], col: usize) {
    let mut last: Option<CellValue> = None;
    for row in rows.iter_mut() {
        let Some(cell) = row.get_mut(col) else {
            continue;
        };
        if cell.is_empty() {
            if let Some(ref value) = last {
                *cell = value.clone();
            }
        } else {
            last = Some(cell.clone());
        }
    }
}
