use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use calamine::{open_workbook_auto, Data, ExcelDateTime, Range, Reader, Sheets};

use crate::error::CarveError;
use crate::extraction::WorkbookSource;
use crate::model::{CellValue, Grid};

/// Workbook reader backed by calamine. Handles xlsx, xlsm, xlsb, xls and ods.
pub struct CalamineWorkbook {
    workbook: Sheets<BufReader<File>>,
}

impl CalamineWorkbook {
    pub fn open(path: &Path) -> Result<Self, CarveError> {
        let workbook = open_workbook_auto(path)
            .map_err(|e| CarveError::Workbook(format!("{}: {e}", path.display())))?;
        Ok(Self { workbook })
    }
}

impl WorkbookSource for CalamineWorkbook {
    fn sheet_names(&self) -> Vec<String> {
        self.workbook.sheet_names()
    }

    fn read_grid(&mut self, sheet: &str) -> Result<Grid, CarveError> {
        let range = self
            .workbook
            .worksheet_range(sheet)
            .map_err(|e| CarveError::SheetRead {
                sheet: sheet.to_string(),
                reason: e.to_string(),
            })?;
        Ok(range_to_grid(&range))
    }

    fn backend_name(&self) -> &str {
        "calamine"
    }
}

/// Convert a calamine range into a grid anchored at A1.
///
/// calamine ranges start at the first used cell, so leading blank rows and
/// columns are restored here to keep row and column positions absolute.
fn range_to_grid(range: &Range<Data>) -> Grid {
    let (Some((start_row, start_col)), Some((end_row, end_col))) = (range.start(), range.end())
    else {
        return Grid::default();
    };

    let height = end_row as usize + 1;
    let width = end_col as usize + 1;
    let mut rows = vec![vec![CellValue::Empty; width]; height];

    for (r, c, data) in range.used_cells() {
        rows[start_row as usize + r][start_col as usize + c] = cell_from_data(data);
    }

    Grid::from_rows(rows)
}

fn cell_from_data(data: &Data) -> CellValue {
    match data {
        Data::Empty => CellValue::Empty,
        Data::String(s) if s.is_empty() => CellValue::Empty,
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Float(f) => CellValue::Float(*f),
        Data::Int(i) => CellValue::Int(*i),
        Data::Bool(b) => CellValue::Bool(*b),
        Data::DateTime(dt) => CellValue::Text(render_datetime(dt)),
        Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::Text(s.clone()),
        Data::Error(e) => CellValue::Text(e.to_string()),
    }
}

/// Dates render as `YYYY-MM-DD HH:MM:SS`. Durations and serials outside the
/// representable range keep the raw serial number.
fn render_datetime(dt: &ExcelDateTime) -> String {
    if dt.is_datetime() {
        if let Some(datetime) = dt.as_datetime() {
            return datetime.format("%Y-%m-%d %H:%M:%S").to_string();
        }
    }
    dt.to_string()
}
