pub mod classify;
pub mod config;
pub mod error;
pub mod extraction;
pub mod model;
pub mod outcome;
pub mod output;
pub mod pipeline;
pub mod sanitize;

use config::ExtractionConfig;
use error::CarveError;
use outcome::{RunSummary, SheetScan};
use pipeline::ExtractionPipeline;

/// Main API entry point: split a workbook into one CSV file per table.
///
/// Opens `config.input`, creates `config.output_dir` if needed and processes
/// every sheet in file order. A missing input file is the only error that
/// stops the run before any sheet is read; everything else is recorded
/// per sheet or per table in the returned summary.
pub fn extract_workbook(config: &ExtractionConfig) -> Result<RunSummary, CarveError> {
    ExtractionPipeline::new(config.clone()).run()
}

/// Detect table boundaries in a workbook without writing any output.
pub fn scan_workbook(config: &ExtractionConfig) -> Result<Vec<SheetScan>, CarveError> {
    ExtractionPipeline::new(config.clone()).scan()
}
