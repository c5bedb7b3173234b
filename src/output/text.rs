//! Human-readable text report.
//!
//! Sections, in order: header, processing statistics, event distribution,
//! core metrics, packet-type distribution, flow information and, when any
//! exist, the sampled unparsable lines.

use super::{calculate_file_size, prepare_output_path, ReportHeader};
use crate::aggregator::Report;
use crate::utils::error::OutputError;
use log::info;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Render the report as UTF-8 text
///
/// **Public** - also used for `--summary` console output
pub fn render_report(report: &Report, header: &ReportHeader) -> String {
    let mut out = String::new();

    out.push_str(&format!("Trace analysis: {}\n", header.input_file));
    out.push_str(&format!("Analysis date: {}\n", header.generated_at));

    out.push_str("\n--- PROCESSING STATISTICS ---\n");
    out.push_str(&format!("Parsed lines: {}\n", report.parsed_lines));
    out.push_str(&format!("Failed lines: {}\n", report.failed_lines));
    out.push_str(&format!("Success rate: {:.1}%\n", report.success_rate));

    out.push_str("\n--- EVENT DISTRIBUTION ---\n");
    for (event_type, count) in &report.event_types {
        out.push_str(&format!("{}: {} events\n", event_type, count));
    }

    out.push_str("\n--- CORE METRICS ---\n");
    out.push_str(&format!("Total data packets: {}\n", report.total_packets));
    out.push_str(&format!("Retransmissions: {}\n", report.retransmitted_packets));
    out.push_str(&format!(
        "Retransmission rate: {:.2}%\n",
        report.retransmission_rate
    ));
    out.push_str(&format!(
        "Total data: {} bytes ({:.2} KB)\n",
        report.total_bytes,
        report.total_kb()
    ));
    out.push_str(&format!("Duration: {:.3} s\n", report.duration));
    out.push_str(&format!(
        "Average throughput: {:.2} bit/s ({:.2} Mbit/s)\n",
        report.throughput_bps,
        report.throughput_mbps()
    ));

    out.push_str("\n--- PACKET TYPE DISTRIBUTION ---\n");
    for (bucket, count) in &report.packet_types {
        out.push_str(&format!("{}: {} packets\n", bucket, count));
    }

    out.push_str("\n--- FLOW INFORMATION ---\n");
    out.push_str(&format!("Unique flows: {}\n", report.unique_flows));
    out.push_str(&format!(
        "Average packets per flow: {:.1}\n",
        report.avg_packets_per_flow
    ));

    if !report.problem_lines.is_empty() {
        out.push_str("\n--- PROBLEM LINES ---\n");
        for problem in &report.problem_lines {
            out.push_str(&format!("Line {}: {}...\n", problem.line_number, problem.text));
        }
    }

    out
}

/// Write the text report to a file
///
/// # Errors
/// * `OutputError::InvalidPath` - empty path, directory, or parent cannot be created
/// * `OutputError::WriteFailed` - I/O error during write
pub fn write_report(
    report: &Report,
    header: &ReportHeader,
    output_path: impl AsRef<Path>,
) -> Result<(), OutputError> {
    let output_path = output_path.as_ref();

    info!("Writing report to: {}", output_path.display());
    prepare_output_path(output_path)?;

    let file = File::create(output_path)?;
    let mut writer = BufWriter::new(file);
    writer.write_all(render_report(report, header).as_bytes())?;
    writer.flush()?;

    info!(
        "Report written successfully ({} bytes)",
        calculate_file_size(output_path)
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregator::aggregate;

    fn header() -> ReportHeader {
        ReportHeader {
            input_file: "trace.tr".to_string(),
            generated_at: "2024-01-01 00:00:00".to_string(),
        }
    }

    #[test]
    fn test_render_sections_in_order() {
        let report = aggregate([
            "r 1.0 /NodeList/0/x length: 500 Seq=1",
            "r 3.0 /NodeList/0/x length: 500 Seq=1",
            "this is not a trace line",
        ]);
        let text = render_report(&report, &header());

        let sections = [
            "Trace analysis: trace.tr",
            "--- PROCESSING STATISTICS ---",
            "--- EVENT DISTRIBUTION ---",
            "--- CORE METRICS ---",
            "--- PACKET TYPE DISTRIBUTION ---",
            "--- FLOW INFORMATION ---",
            "--- PROBLEM LINES ---",
        ];
        let positions: Vec<usize> = sections.iter().map(|s| text.find(s).unwrap()).collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));

        assert!(text.contains("Success rate: 66.7%\n"));
        assert!(text.contains("Retransmission rate: 50.00%\n"));
        assert!(text.contains("Total data: 1000 bytes (0.98 KB)\n"));
        assert!(text.contains("Duration: 2.000 s\n"));
        assert!(text.contains("Average throughput: 4000.00 bit/s (0.00 Mbit/s)\n"));
        assert!(text.contains("Average packets per flow: 2.0\n"));
        assert!(text.contains("Line 3: this is not a trace line...\n"));
    }

    #[test]
    fn test_no_problem_section_when_clean() {
        let report = aggregate(["+ 0.5 /NodeList/1/x length: 40 [SYN] Seq=0"]);
        let text = render_report(&report, &header());
        assert!(!text.contains("PROBLEM LINES"));
        assert!(text.contains("+: 1 events\n"));
        assert!(text.contains("SYN: 1 packets\n"));
    }
}
