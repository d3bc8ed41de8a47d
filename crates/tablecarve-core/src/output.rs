use std::fs::File;
use std::io::Write;
use std::path::PathBuf;

use crate::error::CarveError;
use crate::model::ExtractedTable;

/// Trait for output backends that persist extracted tables.
pub trait TableSink {
    /// Make the destination ready for writing. Must be idempotent.
    fn prepare(&mut self) -> Result<(), CarveError>;

    /// Persist `table` under the file stem `name`, returning where it went.
    fn write_table(&mut self, name: &str, table: &ExtractedTable) -> Result<PathBuf, CarveError>;
}

/// Writes each table as `<dir>/<name>.csv`: one header line, then one line
/// per row, comma-separated, with no index column.
#[derive(Debug, Clone)]
pub struct CsvDirectory {
    dir: PathBuf,
}

impl CsvDirectory {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path_for(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{name}.csv"))
    }
}

impl TableSink for CsvDirectory {
    fn prepare(&mut self) -> Result<(), CarveError> {
        std::fs::create_dir_all(&self.dir)?;
        Ok(())
    }

    fn write_table(&mut self, name: &str, table: &ExtractedTable) -> Result<PathBuf, CarveError> {
        let path = self.path_for(name);
        let file = File::create(&path)?;
        write_csv(file, table)?;
        Ok(path)
    }
}

/// Write a table as CSV to any writer.
pub fn write_csv<W: Write>(writer: W, table: &ExtractedTable) -> Result<(), CarveError> {
    let mut csv_writer = csv::WriterBuilder::new()
        .flexible(false)
        .from_writer(writer);

    // A table with no columns has nothing to write, not even a header line.
    if table.column_count() > 0 {
        csv_writer.write_record(&table.headers)?;
        for row in &table.rows {
            csv_writer.write_record(row.iter().map(|c| c.to_string()))?;
        }
    }

    csv_writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::CellValue;

    fn to_string(table: &ExtractedTable) -> String {
        let mut buf = Vec::new();
        write_csv(&mut buf, table).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn writes_header_and_rows() {
        let table = ExtractedTable {
            headers: vec!["Age".into(), "Count".into()],
            rows: vec![
                vec![CellValue::from("0-4"), CellValue::Float(10.0)],
                vec![CellValue::from("5-9"), CellValue::Empty],
            ],
        };
        assert_eq!(to_string(&table), "Age,Count\n0-4,10\n5-9,\n");
    }

    #[test]
    fn quotes_fields_with_commas() {
        let table = ExtractedTable {
            headers: vec!["Rate (per 1,000)".into()],
            rows: vec![vec![CellValue::from("a \"b\"")]],
        };
        assert_eq!(
            to_string(&table),
            "\"Rate (per 1,000)\"\n\"a \"\"b\"\"\"\n"
        );
    }

    #[test]
    fn header_only_table() {
        let table = ExtractedTable {
            headers: vec!["A".into()],
            rows: vec![],
        };
        assert_eq!(to_string(&table), "A\n");
    }

    #[test]
    fn csv_directory_creates_dir_and_file() {
        let tmp = tempfile::tempdir().unwrap();
        let mut sink = CsvDirectory::new(tmp.path().join("nested/out"));
        sink.prepare().unwrap();
        sink.prepare().unwrap();

        let table = ExtractedTable {
            headers: vec!["A".into()],
            rows: vec![vec![CellValue::Int(1)]],
        };
        let path = sink.write_table("Table_1_A", &table).unwrap();
        assert_eq!(path, tmp.path().join("nested/out/Table_1_A.csv"));
        assert_eq!(std::fs::read_to_string(path).unwrap(), "A\n1\n");
    }
}
