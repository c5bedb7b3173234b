//! TCP Trace Analyzer CLI
//!
//! Reads an ns-3 ASCII trace and writes a traffic metrics report.

use anyhow::Result;
use clap::Parser;
use env_logger::Env;
use std::path::PathBuf;

use tcp_trace_analyzer::commands::{execute_analyze, validate_args, AnalyzeArgs};
use tcp_trace_analyzer::utils::config::{DEFAULT_MAX_PROBLEM_LINES, DEFAULT_OUTPUT_FILE};

/// TCP Trace Analyzer - traffic metrics for ns-3 simulation traces
#[derive(Parser, Debug)]
#[command(name = "trace-analyzer")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Input trace file (e.g. bbr-experiment.tr)
    input_file: PathBuf,

    /// Output file for the text report
    #[arg(short, long, default_value = DEFAULT_OUTPUT_FILE)]
    output: PathBuf,

    /// Also write the report as JSON to this path
    #[arg(long)]
    json: Option<PathBuf>,

    /// Number of unparsable lines to include in the report
    #[arg(long, default_value_t = DEFAULT_MAX_PROBLEM_LINES)]
    samples: usize,

    /// Print the full report to stdout
    #[arg(long)]
    summary: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    let args = AnalyzeArgs {
        input_file: cli.input_file,
        output_file: cli.output,
        output_json: cli.json,
        max_problem_lines: cli.samples,
        print_summary: cli.summary,
    };

    // Validate args first
    validate_args(&args)?;

    execute_analyze(args)?;

    Ok(())
}
