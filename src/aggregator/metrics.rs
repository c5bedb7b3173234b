//! Derived metrics computed at end of stream.
//!
//! Every ratio here is guarded: a zero denominator yields 0, never a panic
//! or a NaN.

/// Elapsed simulation time, 0 when nothing was parsed
pub fn duration(start_time: Option<f64>, end_time: f64) -> f64 {
    match start_time {
        Some(start) => (end_time - start).max(0.0),
        None => 0.0,
    }
}

/// Average throughput in bits per second
pub fn throughput_bps(total_bytes: u64, duration: f64) -> f64 {
    if duration > 0.0 {
        (total_bytes as f64 * 8.0) / duration
    } else {
        0.0
    }
}

/// Percentage of `part` in `whole`
pub fn percentage(part: u64, whole: u64) -> f64 {
    if whole > 0 {
        (part as f64 / whole as f64) * 100.0
    } else {
        0.0
    }
}

/// Retransmitted share of Data/ACK packets, in percent
pub fn retransmission_rate(retransmitted_packets: u64, total_packets: u64) -> f64 {
    percentage(retransmitted_packets, total_packets)
}

/// Parsed share of non-blank lines, in percent
pub fn success_rate(parsed_lines: u64, failed_lines: u64) -> f64 {
    percentage(parsed_lines, parsed_lines + failed_lines)
}

pub fn avg_packets_per_flow(total_packets: u64, unique_flows: u64) -> f64 {
    if unique_flows > 0 {
        total_packets as f64 / unique_flows as f64
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duration_and_throughput() {
        let d = duration(Some(1.0), 3.0);
        assert_eq!(d, 2.0);
        assert_eq!(throughput_bps(1000, d), 4000.0);
    }

    #[test]
    fn test_zero_denominators() {
        assert_eq!(duration(None, 5.0), 0.0);
        assert_eq!(throughput_bps(1000, 0.0), 0.0);
        assert_eq!(retransmission_rate(0, 0), 0.0);
        assert_eq!(success_rate(0, 0), 0.0);
        assert_eq!(avg_packets_per_flow(0, 0), 0.0);
    }

    #[test]
    fn test_rates() {
        assert_eq!(retransmission_rate(1, 4), 25.0);
        assert_eq!(success_rate(3, 1), 75.0);
        assert_eq!(avg_packets_per_flow(6, 4), 1.5);
    }
}
