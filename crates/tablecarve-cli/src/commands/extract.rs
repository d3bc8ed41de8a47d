use std::path::PathBuf;

use tablecarve_core::error::CarveError;

use crate::output;

pub fn run(
    input: Option<PathBuf>,
    out_dir: Option<PathBuf>,
    config_file: Option<PathBuf>,
    output_format: &str,
) -> Result<(), CarveError> {
    let config = super::resolve_config(config_file, input, out_dir)?;
    let summary = tablecarve_core::extract_workbook(&config)?;

    // Partial failures are reported, not turned into a failing exit code.
    match output_format {
        "json" => output::json::print_summary(&summary)?,
        _ => output::table::print_summary(&summary),
    }

    Ok(())
}
