use tablecarve_core::error::CarveError;
use tablecarve_core::outcome::{RunSummary, SheetScan};

pub fn print_summary(summary: &RunSummary) -> Result<(), CarveError> {
    let json = serde_json::to_string_pretty(summary)?;
    println!("{json}");
    Ok(())
}

pub fn print_scan(scans: &[SheetScan]) -> Result<(), CarveError> {
    let json = serde_json::to_string_pretty(scans)?;
    println!("{json}");
    Ok(())
}
