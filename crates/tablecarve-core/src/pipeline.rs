use std::collections::HashMap;
use std::path::PathBuf;

use tracing::{debug, error, info, warn};

use crate::classify::{classify_sheet, SheetKind};
use crate::config::{DuplicateNames, ExtractionConfig};
use crate::error::CarveError;
use crate::extraction::formatted::{extract_tables, resolve_region, table_file_name};
use crate::extraction::raw::extract_raw_table;
use crate::extraction::table::find_table_starts;
use crate::extraction::xlsx::CalamineWorkbook;
use crate::extraction::{Extraction, WorkbookSource};
use crate::model::OutputArtifact;
use crate::outcome::{
    RunSummary, SheetReport, SheetScan, SheetStatus, TableOutcome, TableReport, TableScan,
};
use crate::output::{CsvDirectory, TableSink};
use crate::sanitize::MAX_FILENAME_LEN;

/// Walks a workbook sheet by sheet and writes every table it can carve out.
///
/// Sheet and table failures are recorded in the [`RunSummary`] and never stop
/// the run. Only a missing input, an unreadable workbook or an unusable output
/// destination are returned as errors.
pub struct ExtractionPipeline {
    config: ExtractionConfig,
}

impl ExtractionPipeline {
    pub fn new(config: ExtractionConfig) -> Self {
        Self { config }
    }

    /// Extract the configured input workbook into CSV files under the
    /// configured output directory.
    pub fn run(&self) -> Result<RunSummary, CarveError> {
        let mut workbook = self.open_input()?;
        let mut sink = CsvDirectory::new(&self.config.output_dir);
        self.run_with(&mut workbook, &mut sink)
    }

    /// Extract from any workbook backend into any sink.
    pub fn run_with(
        &self,
        source: &mut dyn WorkbookSource,
        sink: &mut dyn TableSink,
    ) -> Result<RunSummary, CarveError> {
        sink.prepare()?;
        let sheets = source.sheet_names();
        debug!(backend = source.backend_name(), sheets = sheets.len(), "opened workbook");

        let mut names = OutputNames::new(self.config.duplicate_names);
        let mut summary = RunSummary {
            input: self.config.input.clone(),
            output_dir: self.config.output_dir.clone(),
            sheets: Vec::new(),
        };

        for sheet in sheets {
            let report = self.process_sheet(source, sink, &mut names, &sheet);
            summary.sheets.push(report);
        }

        info!(
            extracted = summary.extracted(),
            skipped = summary.skipped(),
            failed_tables = summary.failed_tables(),
            failed_sheets = summary.failed_sheets(),
            "extraction finished"
        );
        Ok(summary)
    }

    /// Locate tables in the configured input without writing anything.
    pub fn scan(&self) -> Result<Vec<SheetScan>, CarveError> {
        let mut workbook = self.open_input()?;
        Ok(self.scan_with(&mut workbook))
    }

    pub fn scan_with(&self, source: &mut dyn WorkbookSource) -> Vec<SheetScan> {
        source
            .sheet_names()
            .into_iter()
            .map(|sheet| {
                let kind = classify_sheet(&sheet, &self.config);
                let mut scan = SheetScan {
                    sheet,
                    kind,
                    error: None,
                    tables: Vec::new(),
                };
                if kind != SheetKind::FormattedReport {
                    return scan;
                }
                match source.read_grid(&scan.sheet) {
                    Ok(grid) => {
                        let starts = find_table_starts(&grid);
                        for (i, start) in starts.iter().enumerate() {
                            let next_row = starts.get(i + 1).map(|s| s.row);
                            let resolved = resolve_region(
                                &grid,
                                start,
                                next_row,
                                &self.config.footnote_prefixes,
                            );
                            let (region, skipped) = match resolved {
                                Ok(region) => (Some(region), None),
                                Err(reason) => (None, Some(reason)),
                            };
                            scan.tables.push(TableScan {
                                name: table_file_name(&start.caption, i),
                                caption: start.caption.clone(),
                                caption_row: start.row,
                                region,
                                skipped,
                            });
                        }
                    }
                    Err(e) => scan.error = Some(e.to_string()),
                }
                scan
            })
            .collect()
    }

    fn open_input(&self) -> Result<CalamineWorkbook, CarveError> {
        let input = &self.config.input;
        if !input.exists() {
            return Err(CarveError::InputNotFound {
                path: input.clone(),
            });
        }
        info!(input = %input.display(), "processing file");
        CalamineWorkbook::open(input)
    }

    fn process_sheet(
        &self,
        source: &mut dyn WorkbookSource,
        sink: &mut dyn TableSink,
        names: &mut OutputNames,
        sheet: &str,
    ) -> SheetReport {
        let kind = classify_sheet(sheet, &self.config);
        let mut report = SheetReport::new(sheet, kind);

        match kind {
            SheetKind::Skip => {
                debug!(sheet, "skipping administrative sheet");
                report.status = SheetStatus::Skipped;
            }
            SheetKind::RawData => {
                info!(sheet, "scanning raw data sheet");
                if let Err(e) = self.process_raw(source, sink, names, &mut report) {
                    error!(sheet, error = %e, "failed to process raw data sheet");
                    report.status = SheetStatus::Failed {
                        error: e.to_string(),
                    };
                }
            }
            SheetKind::FormattedReport => {
                info!(sheet, "scanning sheet");
                self.process_formatted(source, sink, names, &mut report);
            }
        }

        report
    }

    fn process_raw(
        &self,
        source: &mut dyn WorkbookSource,
        sink: &mut dyn TableSink,
        names: &mut OutputNames,
        report: &mut SheetReport,
    ) -> Result<(), CarveError> {
        let header_row = self.config.raw_header_row;
        let data = source.read_with_header(&report.sheet, header_row)?;
        let artifact = extract_raw_table(&report.sheet, &data, header_row);
        let path = emit(sink, names, &artifact)?;
        info!(sheet = %report.sheet, path = %path.display(), "exported raw data");

        report.tables.push(TableReport {
            name: artifact.name,
            caption: None,
            outcome: TableOutcome::Extracted {
                path,
                rows: artifact.table.row_count(),
                columns: artifact.table.column_count(),
            },
        });
        Ok(())
    }

    fn process_formatted(
        &self,
        source: &mut dyn WorkbookSource,
        sink: &mut dyn TableSink,
        names: &mut OutputNames,
        report: &mut SheetReport,
    ) {
        let sheet_name = report.sheet.clone();
        let sheet = sheet_name.as_str();
        let grid = match source.read_grid(sheet) {
            Ok(grid) => grid,
            Err(e) => {
                error!(sheet, error = %e, "could not read sheet");
                report.status = SheetStatus::Failed {
                    error: e.to_string(),
                };
                return;
            }
        };

        let extractions = extract_tables(&grid, sheet, &self.config.footnote_prefixes);
        if extractions.is_empty() {
            debug!(sheet, "no table captions found");
            report.status = SheetStatus::NoTables;
            return;
        }

        for extraction in extractions {
            let table_report = match extraction {
                Extraction::Skipped {
                    name,
                    caption,
                    reason,
                } => {
                    warn!(sheet, table = %name, %reason, "skipping table");
                    TableReport {
                        name,
                        caption: Some(caption),
                        outcome: TableOutcome::Skipped { reason },
                    }
                }
                Extraction::Extracted(artifact) => {
                    let outcome = match emit(sink, names, &artifact) {
                        Ok(path) => {
                            if artifact.table.row_count() == 0 {
                                warn!(sheet, table = %artifact.name, "table has no data rows");
                            }
                            info!(sheet, path = %path.display(), "extracted table");
                            TableOutcome::Extracted {
                                path,
                                rows: artifact.table.row_count(),
                                columns: artifact.table.column_count(),
                            }
                        }
                        Err(e) => {
                            error!(sheet, table = %artifact.name, error = %e, "failed to write table");
                            TableOutcome::Failed {
                                error: e.to_string(),
                            }
                        }
                    };
                    TableReport {
                        name: artifact.name,
                        caption: artifact.source.caption,
                        outcome,
                    }
                }
            };
            report.tables.push(table_report);
        }
    }
}

/// Claim an output name for `artifact` and write it.
fn emit(
    sink: &mut dyn TableSink,
    names: &mut OutputNames,
    artifact: &OutputArtifact,
) -> Result<PathBuf, CarveError> {
    let name = names.claim(&artifact.name)?;
    if name != artifact.name {
        warn!(
            sheet = %artifact.source.sheet,
            table = %artifact.name,
            renamed = %name,
            "output name already used in this run"
        );
    }
    sink.write_table(&name, &artifact.table)
}

/// Output file stems handed out so far in a run.
///
/// Keys are lowercased so tables differing only in case do not clobber each
/// other on case-insensitive filesystems.
struct OutputNames {
    policy: DuplicateNames,
    seen: HashMap<String, usize>,
}

impl OutputNames {
    fn new(policy: DuplicateNames) -> Self {
        Self {
            policy,
            seen: HashMap::new(),
        }
    }

    fn claim(&mut self, name: &str) -> Result<String, CarveError> {
        let count = self.seen.entry(name.to_lowercase()).or_insert(0);
        *count += 1;
        if *count == 1 {
            return Ok(name.to_string());
        }

        match self.policy {
            DuplicateNames::Overwrite => Ok(name.to_string()),
            DuplicateNames::Error => Err(CarveError::DuplicateOutput {
                name: name.to_string(),
            }),
            DuplicateNames::Suffix => {
                let mut n = *count;
                loop {
                    let suffix = format!("_{n}");
                    let base: String = name
                        .chars()
                        .take(MAX_FILENAME_LEN.saturating_sub(suffix.len()))
                        .collect();
                    let candidate = format!("{base}{suffix}");
                    if !self.seen.contains_key(&candidate.to_lowercase()) {
                        self.seen.insert(candidate.to_lowercase(), 1);
                        return Ok(candidate);
                    }
                    n += 1;
                }
            }
        }
    }
}
