use crate::config::ExtractionConfig;
use serde::{Deserialize, Serialize};
use std::fmt;

/// How a sheet is handled, decided from its name alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SheetKind {
    /// Administrative sheet with no tables.
    Skip,
    /// One table at a fixed header row.
    RawData,
    /// Zero or more captioned tables amid report formatting.
    FormattedReport,
}

impl fmt::Display for SheetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SheetKind::Skip => write!(f, "skip"),
            SheetKind::RawData => write!(f, "raw data"),
            SheetKind::FormattedReport => write!(f, "formatted report"),
        }
    }
}

/// Classify a sheet by name.
///
/// The skip list is an exact match and wins over the raw markers, which are
/// case-sensitive substring matches.
pub fn classify_sheet(name: &str, config: &ExtractionConfig) -> SheetKind {
    if config.skip_sheets.iter().any(|s| s == name) {
        SheetKind::Skip
    } else if config
        .raw_sheet_markers
        .iter()
        .any(|m| name.contains(m.as_str()))
    {
        SheetKind::RawData
    } else {
        SheetKind::FormattedReport
    }
}
