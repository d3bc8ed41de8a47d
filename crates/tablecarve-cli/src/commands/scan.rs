use std::path::PathBuf;

use tablecarve_core::error::CarveError;

use crate::output;

pub fn run(
    input: Option<PathBuf>,
    config_file: Option<PathBuf>,
    output_format: &str,
) -> Result<(), CarveError> {
    let config = super::resolve_config(config_file, input, None)?;
    let scans = tablecarve_core::scan_workbook(&config)?;

    match output_format {
        "json" => output::json::print_scan(&scans)?,
        _ => output::table::print_scan(&scans),
    }

    Ok(())
}
