use pretty_assertions::assert_eq;
use tcp_trace_analyzer::aggregator::{
    aggregate, aggregate_reader, AggregatorConfig, FlowKey, PacketBucket, TraceAggregator,
};
use tcp_trace_analyzer::parser::{classify, EventType};

#[test]
fn test_retransmission_detected() {
    let mut aggregator = TraceAggregator::new();
    aggregator.feed_line(1, "r 1.0 /NodeList/1/x length: 500 Seq=100");
    aggregator.feed_line(2, "r 1.5 /NodeList/1/x length: 500 Seq=100");
    let report = aggregator.finish();

    assert_eq!(report.total_packets, 2);
    assert_eq!(report.retransmitted_packets, 1);
    assert_eq!(report.packet_count(PacketBucket::Retransmissions), 1);
    assert_eq!(report.unique_flows, 1);
    assert_eq!(report.retransmission_rate, 50.0);
}

#[test]
fn test_flow_packet_count_excludes_retransmissions() {
    let mut table = tcp_trace_analyzer::aggregator::FlowTable::new();
    let event = classify("r 1.0 /NodeList/1/x length: 52 [ACK] Seq=7").unwrap();

    table.observe(event.node_id, event.seq);
    table.observe(event.node_id, event.seq);

    assert_eq!(table.get(&FlowKey::new(1, 7)).unwrap().packet_count, 1);
}

#[test]
fn test_duration_and_throughput_scenario() {
    let report = aggregate([
        "r 1.0 /NodeList/0/x length: 400 Seq=1",
        "r 2.0 /NodeList/0/x length: 300 Seq=2",
        "r 3.0 /NodeList/0/x length: 300 Seq=3",
    ]);

    assert_eq!(report.total_bytes, 1000);
    assert_eq!(report.start_time, Some(1.0));
    assert_eq!(report.end_time, Some(3.0));
    assert_eq!(report.duration, 2.0);
    assert_eq!(report.throughput_bps, 4000.0);
}

#[test]
fn test_start_time_is_first_end_time_is_max() {
    let report = aggregate([
        "r 2.0 /NodeList/0/x length: 10 Seq=1",
        "r 5.0 /NodeList/0/x length: 10 Seq=2",
        "r 1.0 /NodeList/0/x length: 10 Seq=3",
    ]);

    assert_eq!(report.start_time, Some(2.0));
    assert_eq!(report.end_time, Some(5.0));
    assert_eq!(report.duration, 3.0);
}

#[test]
fn test_trace_starting_at_time_zero() {
    let report = aggregate([
        "r 0.0 /NodeList/0/x length: 500 Seq=1",
        "r 2.0 /NodeList/0/x length: 500 Seq=2",
    ]);

    assert_eq!(report.start_time, Some(0.0));
    assert_eq!(report.duration, 2.0);
    assert_eq!(report.throughput_bps, 4000.0);
}

#[test]
fn test_large_lengths_do_not_abort() {
    let report = aggregate([
        "r 1.0 /NodeList/0/x length: 18446744073709551615 Seq=1",
        "r 2.0 /NodeList/0/x length: 18446744073709551615 Seq=2",
    ]);

    assert_eq!(report.parsed_lines, 2);
    assert_eq!(report.total_bytes, u64::MAX);
}

#[test]
fn test_line_accounting_invariant() {
    let lines = [
        "r 1.0 /NodeList/0/x length: 10 Seq=1",
        "",
        "# comment",
        "   ",
        "+ 1.1 /NodeList/0/x length: 10 Seq=2",
        "garbage line that is long",
    ];
    let non_blank = lines.iter().filter(|l| !l.trim().is_empty()).count() as u64;

    let report = aggregate(lines);

    assert_eq!(report.parsed_lines + report.failed_lines, non_blank);
    assert_eq!(report.total_lines(), 4);
    assert!(report.retransmitted_packets <= report.total_packets);
    assert_eq!(report.problem_lines[0].line_number, 6);
}

#[test]
fn test_empty_input() {
    let report = aggregate(Vec::<String>::new());

    assert_eq!(report.parsed_lines, 0);
    assert_eq!(report.duration, 0.0);
    assert_eq!(report.throughput_bps, 0.0);
    assert_eq!(report.retransmission_rate, 0.0);
    assert_eq!(report.avg_packets_per_flow, 0.0);
    assert_eq!(report.success_rate, 0.0);
    assert_eq!(report.start_time, None);
}

#[test]
fn test_only_control_packets() {
    let report = aggregate([
        "+ 0.1 /NodeList/0/x length: 40 [SYN] Seq=0",
        "r 0.2 /NodeList/1/x length: 40 [FIN] Seq=0",
    ]);

    assert_eq!(report.total_packets, 0);
    assert_eq!(report.retransmission_rate, 0.0);
    assert_eq!(report.avg_packets_per_flow, 0.0);
    // control packets still bound the time window
    assert!((report.duration - 0.1).abs() < 1e-9);
}

#[test]
fn test_distributions_in_first_seen_order() {
    let report = aggregate([
        "- 0.1 /NodeList/0/x length: 1000 Seq=1",
        "+ 0.2 /NodeList/0/x length: 40 [SYN] Seq=0",
        "- 0.3 /NodeList/0/x length: 52 ACK Seq=9",
        "r 0.4 /NodeList/0/x length: 1000 Seq=1",
    ]);

    assert_eq!(
        report.event_types,
        vec![
            (EventType::Dequeue, 2),
            (EventType::Enqueue, 1),
            (EventType::Receive, 1)
        ]
    );
    assert_eq!(
        report.packet_types,
        vec![
            (PacketBucket::Data, 2),
            (PacketBucket::Syn, 1),
            (PacketBucket::Ack, 1),
            (PacketBucket::Retransmissions, 1)
        ]
    );
    assert_eq!(report.event_count(EventType::Dequeue), 2);
    assert_eq!(report.unique_flows, 2);
    assert_eq!(report.avg_packets_per_flow, 1.5);
}

#[test]
fn test_synthetic_seq_count() {
    let report = aggregate([
        "r 0.1 /NodeList/0/x length: 1000 nothing",
        "r 0.1 /NodeList/0/x length: 1000 nothing",
    ]);

    // identical lines hash to the same synthetic seq, so the second is a retransmission
    assert_eq!(report.synthetic_seqs, 2);
    assert_eq!(report.retransmitted_packets, 1);
}

#[test]
fn test_reader_matches_in_memory() {
    let input = "r 1.0 /NodeList/0/x length: 500 Seq=1\n\nr 2.0 /NodeList/0/x length: 500 Seq=1\nbad\n";
    let streamed = aggregate_reader(input.as_bytes(), AggregatorConfig::default()).unwrap();
    let in_memory = aggregate(input.lines());

    assert_eq!(streamed, in_memory);
}
