mod commands;
mod logging;
mod output;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "tablecarve",
    version,
    about = "Split statistical report workbooks into one clean CSV file per table"
)]
struct Cli {
    /// Log boundary decisions (debug level)
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Only log warnings and errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Defaults to `extract` with the built-in input and output paths
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract every table in a workbook to CSV files
    Extract {
        /// Path to the workbook (xlsx, xlsm, xlsb, xls or ods)
        input: Option<PathBuf>,

        /// Directory to write CSV files into
        #[arg(short = 'd', long = "out-dir", value_name = "DIR")]
        out_dir: Option<PathBuf>,

        /// JSON config file
        #[arg(short, long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Summary format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,
    },
    /// Show where tables would be cut, without writing anything
    Scan {
        /// Path to the workbook
        input: Option<PathBuf>,

        /// JSON config file
        #[arg(short, long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,
    },
    /// Print the effective configuration as JSON
    Config {
        /// JSON config file to merge over the defaults
        #[arg(short, long, value_name = "FILE")]
        config: Option<PathBuf>,
    },
}

fn main() {
    let cli = Cli::parse();

    let json_output = matches!(
        &cli.command,
        Some(Commands::Extract { output, .. } | Commands::Scan { output, .. }) if output == "json"
    );
    let level = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "warn"
    } else {
        "info"
    };
    logging::setup_logging(level, json_output);

    let result = match cli.command {
        None => commands::extract::run(None, None, None, "table"),
        Some(Commands::Extract {
            input,
            out_dir,
            config,
            output,
        }) => commands::extract::run(input, out_dir, config, &output),
        Some(Commands::Scan {
            input,
            config,
            output,
        }) => commands::scan::run(input, config, &output),
        Some(Commands::Config { config }) => commands::config::run(config),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
