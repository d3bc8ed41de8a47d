use crate::error::CarveError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_INPUT: &str =
    "data/care-children-youth-with-mental-disorders-data-tables-en.xlsx";
pub const DEFAULT_OUTPUT_DIR: &str = "processed_tables_clean";

/// Administrative sheets that never contain tables.
pub const DEFAULT_SKIP_SHEETS: &[&str] = &[
    "Instructions",
    "Table of contents",
    "Methodology",
    "Contact info",
    "Copyright and acknowledgement",
];

pub const DEFAULT_RAW_SHEET_MARKERS: &[&str] = &["DATA", "hide"];
pub const DEFAULT_FOOTNOTE_PREFIXES: &[&str] = &["Notes", "Sources"];

/// What to do when two tables in one run produce the same file stem.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DuplicateNames {
    /// Append `_2`, `_3`, ... to later tables.
    #[default]
    Suffix,
    /// Later tables replace earlier files.
    Overwrite,
    /// Later tables are reported as failed and not written.
    Error,
}

/// Settings for one extraction run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    pub input: PathBuf,
    pub output_dir: PathBuf,
    /// Sheet names skipped outright (exact match).
    pub skip_sheets: Vec<String>,
    /// A sheet whose name contains any of these (case-sensitive) is a raw data sheet.
    pub raw_sheet_markers: Vec<String>,
    /// Zero-based header row of raw data sheets.
    pub raw_header_row: usize,
    /// First-column prefixes that end a formatted table.
    pub footnote_prefixes: Vec<String>,
    pub duplicate_names: DuplicateNames,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_INPUT),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            skip_sheets: to_strings(DEFAULT_SKIP_SHEETS),
            raw_sheet_markers: to_strings(DEFAULT_RAW_SHEET_MARKERS),
            raw_header_row: 1,
            footnote_prefixes: to_strings(DEFAULT_FOOTNOTE_PREFIXES),
            duplicate_names: DuplicateNames::default(),
        }
    }
}

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Load a config from a JSON file. Missing fields take their defaults.
pub fn load_config(path: &Path) -> Result<ExtractionConfig, CarveError> {
    let content = std::fs::read_to_string(path).map_err(|e| CarveError::ConfigLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    let config: ExtractionConfig =
        serde_json::from_str(&content).map_err(|e| CarveError::ConfigLoad {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
    validate_config(&config)?;
    Ok(config)
}

/// Parse a config from a JSON string (no file path context).
pub fn parse_config_str(json: &str) -> Result<ExtractionConfig, CarveError> {
    let config: ExtractionConfig = serde_json::from_str(json)?;
    validate_config(&config)?;
    Ok(config)
}

pub fn validate_config(config: &ExtractionConfig) -> Result<(), CarveError> {
    if config.output_dir.as_os_str().is_empty() {
        return Err(CarveError::ConfigInvalid(
            "output_dir must not be empty".into(),
        ));
    }

    // An empty marker would match every sheet name.
    if config.raw_sheet_markers.iter().any(String::is_empty) {
        return Err(CarveError::ConfigInvalid(
            "raw_sheet_markers must not contain empty strings".into(),
        ));
    }

    if config.footnote_prefixes.iter().any(String::is_empty) {
        return Err(CarveError::ConfigInvalid(
            "footnote_prefixes must not contain empty strings".into(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_gives_defaults() {
        let config = parse_config_str("{}").unwrap();
        assert_eq!(config, ExtractionConfig::default());
        assert_eq!(config.raw_header_row, 1);
        assert_eq!(config.output_dir, PathBuf::from("processed_tables_clean"));
    }

    #[test]
    fn partial_override() {
        let json = r#"{
            "input": "book.xlsx",
            "footnote_prefixes": ["Notes", "Sources", "Source"],
            "duplicate_names": "overwrite"
        }"#;
        let config = parse_config_str(json).unwrap();
        assert_eq!(config.input, PathBuf::from("book.xlsx"));
        assert_eq!(config.footnote_prefixes.len(), 3);
        assert_eq!(config.duplicate_names, DuplicateNames::Overwrite);
        assert_eq!(config.skip_sheets.len(), 5);
    }

    #[test]
    fn empty_marker_rejected() {
        let json = r#"{ "raw_sheet_markers": ["DATA", ""] }"#;
        assert!(matches!(
            parse_config_str(json),
            Err(CarveError::ConfigInvalid(_))
        ));
    }

    #[test]
    fn empty_output_dir_rejected() {
        assert!(parse_config_str(r#"{ "output_dir": "" }"#).is_err());
    }

    #[test]
    fn unknown_duplicate_policy_rejected() {
        assert!(parse_config_str(r#"{ "duplicate_names": "rename" }"#).is_err());
    }

    #[test]
    fn load_missing_file_reports_path() {
        let err = load_config(Path::new("/nonexistent/tablecarve.json")).unwrap_err();
        assert!(matches!(err, CarveError::ConfigLoad { .. }));
    }
}
