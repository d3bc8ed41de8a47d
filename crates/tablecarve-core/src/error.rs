use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum CarveError {
    #[error("input file '{}' not found", path.display())]
    InputNotFound { path: PathBuf },

    #[error("failed to open workbook: {0}")]
    Workbook(String),

    #[error("could not read sheet '{sheet}': {reason}")]
    SheetRead { sheet: String, reason: String },

    #[error("sheet '{sheet}' has no header row {row} (only {rows} rows)")]
    HeaderRowOutOfRange {
        sheet: String,
        row: usize,
        rows: usize,
    },

    #[error("failed to load config from {path}: {reason}")]
    ConfigLoad { path: PathBuf, reason: String },

    #[error("invalid config: {0}")]
    ConfigInvalid(String),

    #[error("output name '{name}' is already used by another table in this run")]
    DuplicateOutput { name: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
