use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

use crate::classify::SheetKind;
use crate::extraction::table::TableRegion;

/// Why a detected table produced no output. Not an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SkipReason {
    /// The caption is on the last row, so there is no header row below it.
    HeaderRowOutOfRange { header_row: usize, rows: usize },
    /// The header row has no present, non-blank cells.
    NoValidColumns { header_row: usize },
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::HeaderRowOutOfRange { header_row, rows } => write!(
                f,
                "header row {header_row} is beyond the sheet ({rows} rows)"
            ),
            SkipReason::NoValidColumns { header_row } => {
                write!(f, "no valid headers found in row {header_row}")
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum TableOutcome {
    Extracted {
        path: PathBuf,
        rows: usize,
        columns: usize,
    },
    Skipped {
        reason: SkipReason,
    },
    Failed {
        error: String,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableReport {
    /// Output file stem (before duplicate resolution).
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    pub outcome: TableOutcome,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SheetStatus {
    /// Skip-listed administrative sheet.
    Skipped,
    /// Formatted report sheet with no caption rows.
    NoTables,
    /// Tables were attempted; see the table reports.
    Processed,
    /// The sheet could not be read or its raw table could not be built.
    Failed { error: String },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SheetReport {
    pub sheet: String,
    pub kind: SheetKind,
    pub status: SheetStatus,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tables: Vec<TableReport>,
}

impl SheetReport {
    pub fn new(sheet: &str, kind: SheetKind) -> Self {
        Self {
            sheet: sheet.to_string(),
            kind,
            status: SheetStatus::Processed,
            tables: Vec::new(),
        }
    }
}

/// Everything that happened during one run.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RunSummary {
    pub input: PathBuf,
    pub output_dir: PathBuf,
    pub sheets: Vec<SheetReport>,
}

impl RunSummary {
    fn tables(&self) -> impl Iterator<Item = &TableReport> {
        self.sheets.iter().flat_map(|s| s.tables.iter())
    }

    pub fn extracted(&self) -> usize {
        self.tables()
            .filter(|t| matches!(t.outcome, TableOutcome::Extracted { .. }))
            .count()
    }

    pub fn skipped(&self) -> usize {
        self.tables()
            .filter(|t| matches!(t.outcome, TableOutcome::Skipped { .. }))
            .count()
    }

    pub fn failed_tables(&self) -> usize {
        self.tables()
            .filter(|t| matches!(t.outcome, TableOutcome::Failed { .. }))
            .count()
    }

    pub fn failed_sheets(&self) -> usize {
        self.sheets
            .iter()
            .filter(|s| matches!(s.status, SheetStatus::Failed { .. }))
            .count()
    }

    /// True when nothing failed. Skips do not count as failures.
    pub fn is_clean(&self) -> bool {
        self.failed_tables() == 0 && self.failed_sheets() == 0
    }
}

/// Dry-run view of one detected table: where its boundaries fall.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableScan {
    pub name: String,
    pub caption: String,
    pub caption_row: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<TableRegion>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skipped: Option<SkipReason>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SheetScan {
    pub sheet: String,
    pub kind: SheetKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tables: Vec<TableScan>,
}
