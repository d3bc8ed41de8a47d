use std::path::PathBuf;

use tablecarve_core::error::CarveError;

pub fn run(config_file: Option<PathBuf>) -> Result<(), CarveError> {
    let config = super::resolve_config(config_file, None, None)?;
    println!("{}", serde_json::to_string_pretty(&config)?);
    Ok(())
}
