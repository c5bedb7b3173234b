//! Analyze command implementation.
//!
//! The analyze command:
//! 1. Opens the trace file
//! 2. Streams it through the aggregator
//! 3. Writes the text report (and optionally JSON)
//! 4. Echoes a short completion summary

use crate::aggregator::{aggregate_reader, AggregatorConfig, Report};
use crate::output::{render_report, write_report, write_report_json, ReportHeader};
use crate::utils::config::{DEFAULT_MAX_PROBLEM_LINES, DEFAULT_OUTPUT_FILE};
use crate::utils::error::TraceError;
use anyhow::{Context, Result};
use log::{debug, info};
use std::fs::File;
use std::io::{BufReader, ErrorKind};
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Arguments for the analyze command
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone)]
pub struct AnalyzeArgs {
    /// Trace file to analyze
    pub input_file: PathBuf,

    /// Output path for the text report
    pub output_file: PathBuf,

    /// Output path for a JSON copy of the report (optional)
    pub output_json: Option<PathBuf>,

    /// Unparsable lines to sample in the report
    pub max_problem_lines: usize,

    /// Print the full report to stdout
    pub print_summary: bool,
}

impl Default for AnalyzeArgs {
    fn default() -> Self {
        Self {
            input_file: PathBuf::new(),
            output_file: PathBuf::from(DEFAULT_OUTPUT_FILE),
            output_json: None,
            max_problem_lines: DEFAULT_MAX_PROBLEM_LINES,
            print_summary: false,
        }
    }
}

/// Execute the analyze command
///
/// **Public** - main entry point called from main.rs
///
/// # Errors
/// * `TraceError::InputNotFound` - the input file does not exist
/// * Read errors while streaming the trace
/// * Report write errors
pub fn execute_analyze(args: AnalyzeArgs) -> Result<Report> {
    let start_time = Instant::now();

    info!("Analyzing trace: {}", args.input_file.display());

    // Step 1: Aggregate
    info!("Step 1/2: Reading and classifying trace lines...");
    let config = AggregatorConfig::new().with_max_problem_lines(args.max_problem_lines);
    let report = analyze_file(&args.input_file, config)?;

    info!("{}", report.summary());
    debug!(
        "{} flows, {} synthetic sequence numbers",
        report.unique_flows, report.synthetic_seqs
    );

    // Step 2: Write outputs
    info!("Step 2/2: Writing report...");
    let header = ReportHeader::now(args.input_file.display().to_string());

    write_report(&report, &header, &args.output_file)
        .context("Failed to write text report")?;

    if let Some(json_path) = &args.output_json {
        write_report_json(&report, &header, json_path)
            .context("Failed to write JSON report")?;
        info!("✓ JSON report written to: {}", json_path.display());
    }

    if args.print_summary {
        println!("\n{}", "=".repeat(80));
        print!("{}", render_report(&report, &header));
        println!("{}", "=".repeat(80));
    }

    println!(
        "Analysis complete. Results saved to {}",
        args.output_file.display()
    );
    println!(
        "Parsed: {} lines, Failed: {}",
        report.parsed_lines, report.failed_lines
    );
    println!("Success rate: {:.1}%", report.success_rate);

    let elapsed = start_time.elapsed();
    info!("Analysis completed in {:.2}s", elapsed.as_secs_f64());

    Ok(report)
}

/// Open a trace file and stream it through a fresh aggregator
///
/// **Public** - usable without writing any report
pub fn analyze_file(path: &Path, config: AggregatorConfig) -> Result<Report> {
    let file = File::open(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => TraceError::InputNotFound(path.to_path_buf()),
        _ => TraceError::ReadFailed(e),
    })?;

    let report = aggregate_reader(BufReader::new(file), config)
        .map_err(TraceError::ReadFailed)
        .with_context(|| format!("Failed while reading {}", path.display()))?;

    Ok(report)
}

/// Validate analyze arguments
///
/// **Public** - can be called before execute_analyze for early validation
pub fn validate_args(args: &AnalyzeArgs) -> Result<()> {
    if args.input_file.as_os_str().is_empty() {
        anyhow::bail!("Input file cannot be empty");
    }

    if args.output_file.as_os_str().is_empty() {
        anyhow::bail!("Output file cannot be empty");
    }

    if args.output_file == args.input_file {
        anyhow::bail!("Output file would overwrite the input trace");
    }

    if args.output_json.as_ref() == Some(&args.output_file) {
        anyhow::bail!("JSON output must differ from the text report path");
    }

    if args.max_problem_lines > 1000 {
        anyhow::bail!("samples is too large (max 1000)");
    }

    Ok(())
}
