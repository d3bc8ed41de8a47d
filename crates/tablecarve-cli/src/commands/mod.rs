pub mod config;
pub mod extract;
pub mod scan;

use std::path::PathBuf;

use tablecarve_core::config::{load_config, ExtractionConfig};
use tablecarve_core::error::CarveError;

/// Defaults, then the config file, then explicit command-line paths.
fn resolve_config(
    config_file: Option<PathBuf>,
    input: Option<PathBuf>,
    out_dir: Option<PathBuf>,
) -> Result<ExtractionConfig, CarveError> {
    let mut config = match config_file {
        Some(path) => load_config(&path)?,
        None => ExtractionConfig::default(),
    };
    if let Some(input) = input {
        config.input = input;
    }
    if let Some(out_dir) = out_dir {
        config.output_dir = out_dir;
    }
    Ok(config)
}
