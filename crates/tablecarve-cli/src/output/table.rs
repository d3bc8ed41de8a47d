use tablecarve_core::outcome::{RunSummary, SheetScan, SheetStatus, TableOutcome};

pub fn print_summary(summary: &RunSummary) {
    println!(
        "\n=== {} -> {} ===\n",
        summary.input.display(),
        summary.output_dir.display()
    );

    let max_name = summary
        .sheets
        .iter()
        .flat_map(|s| s.tables.iter().map(|t| t.name.len() + 2))
        .chain(summary.sheets.iter().map(|s| s.sheet.len()))
        .max()
        .unwrap_or(10);

    for sheet in &summary.sheets {
        let status = match &sheet.status {
            SheetStatus::Skipped => "skipped".to_string(),
            SheetStatus::NoTables => "no tables found".to_string(),
            SheetStatus::Processed => format!("{} table(s)", sheet.tables.len()),
            SheetStatus::Failed { error } => format!("FAILED: {error}"),
        };
        println!(
            "  {:<width$}  [{}] {}",
            sheet.sheet,
            sheet.kind,
            status,
            width = max_name
        );

        for table in &sheet.tables {
            let detail = match &table.outcome {
                TableOutcome::Extracted {
                    path,
                    rows,
                    columns,
                } => format!("{rows} rows x {columns} cols -> {}", path.display()),
                TableOutcome::Skipped { reason } => format!("skipped: {reason}"),
                TableOutcome::Failed { error } => format!("FAILED: {error}"),
            };
            println!(
                "    {:<width$}  {}",
                table.name,
                detail,
                width = max_name.saturating_sub(2)
            );
        }
    }

    println!();
    for line in totals(summary) {
        println!("  {line}");
    }
}

fn totals(summary: &RunSummary) -> Vec<String> {
    let mut lines = vec![format!(
        "Extracted {} table(s), skipped {}, failed {}; {} sheet(s) failed",
        summary.extracted(),
        summary.skipped(),
        summary.failed_tables(),
        summary.failed_sheets()
    )];
    if !summary.is_clean() {
        lines.push("Completed with failures; see the errors above.".to_string());
    }
    lines
}

pub fn print_scan(scans: &[SheetScan]) {
    for scan in scans {
        println!("{} [{}]", scan.sheet, scan.kind);

        if let Some(ref error) = scan.error {
            println!("  could not read: {error}");
            continue;
        }

        for table in &scan.tables {
            println!("  row {:>5}  {}", table.caption_row, table.caption);
            match (&table.region, &table.skipped) {
                (Some(region), _) => {
                    let end = match region.footnote_row {
                        Some(row) => format!("footnote at row {row}"),
                        None => format!("row {}", region.end_row),
                    };
                    println!(
                        "             header row {}, data to {}, {} column(s): {}",
                        region.header_row,
                        end,
                        region.columns.len(),
                        region.headers.join(" | ")
                    );
                    println!("             -> {}.csv", table.name);
                }
                (None, Some(reason)) => println!("             skipped: {reason}"),
                (None, None) => {}
            }
        }
        println!();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tablecarve_core::classify::SheetKind;
    use tablecarve_core::outcome::SheetReport;

    #[test]
    fn totals_flag_failed_runs() {
        let mut summary = RunSummary::default();
        let mut ok = SheetReport::new("Demographics", SheetKind::FormattedReport);
        ok.status = SheetStatus::NoTables;
        summary.sheets.push(ok);
        assert_eq!(totals(&summary).len(), 1);

        let mut broken = SheetReport::new("Broken", SheetKind::FormattedReport);
        broken.status = SheetStatus::Failed {
            error: "unreadable".into(),
        };
        summary.sheets.push(broken);
        let lines = totals(&summary);
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with("1 sheet(s) failed"));
        assert!(lines[1].starts_with("Completed with failures"));
    }
}
