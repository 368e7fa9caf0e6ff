use std::collections::HashSet;

use geoscope::aggregate::{format_count, format_money, format_value};
use geoscope::{Dataset, Metric, Metrics, Region, SelectionId, SelectionSummary};

fn region(name: &str, avg: f64, total: f64, tx: u64) -> Region {
    Region {
        state_code: "01".to_string(),
        name: name.to_string(),
        shape: Vec::new(),
        metrics: Metrics {
            avg_price: avg,
            total_price: total,
            total_transactions: tx,
        },
    }
}

fn fixture() -> Dataset {
    Dataset::new(vec![
        region("Alder", 100.0, 10_000.0, 100),
        region("Birch", 200.0, 20_000.0, 150),
        region("Cedar", 300.0, 30_000.0, 250),
    ])
}

#[test]
fn empty_partitions_report_no_data() {
    let summary = SelectionSummary::empty();
    assert!(!summary.has_data());
    for metric in Metric::all() {
        for id in SelectionId::both() {
            let stat = summary.stat(metric, id);
            assert!(stat.value.is_none(), "empty partition must not read as 0");
            assert_eq!(stat.count, 0);
        }
    }
}

#[test]
fn single_region_mean_equals_its_value() {
    let dataset = fixture();
    let only: HashSet<_> = [1].into_iter().collect();
    let summary = SelectionSummary::aggregate(&dataset, &[(SelectionId::One, &only)]);
    assert_eq!(summary.stat(Metric::AvgPrice, SelectionId::One).value, Some(200.0));
    assert_eq!(summary.stat(Metric::AvgPrice, SelectionId::One).count, 1);
}

#[test]
fn mean_for_avg_price_and_sum_for_totals() {
    let dataset = fixture();
    let picked: HashSet<_> = [0, 1].into_iter().collect();
    let summary = SelectionSummary::aggregate(&dataset, &[(SelectionId::Two, &picked)]);

    assert_eq!(summary.stat(Metric::AvgPrice, SelectionId::Two).value, Some(150.0));
    assert_eq!(
        summary.stat(Metric::TotalPrice, SelectionId::Two).value,
        Some(30_000.0)
    );
    assert_eq!(
        summary.stat(Metric::TotalTransactions, SelectionId::Two).value,
        Some(250.0)
    );

    // The untouched selection stays at "no data".
    assert!(summary.stat(Metric::AvgPrice, SelectionId::One).value.is_none());
}

#[test]
fn partitions_are_reduced_independently() {
    let dataset = fixture();
    let one: HashSet<_> = [0].into_iter().collect();
    let two: HashSet<_> = [1, 2].into_iter().collect();
    let summary =
        SelectionSummary::aggregate(&dataset, &[(SelectionId::One, &one), (SelectionId::Two, &two)]);
    assert_eq!(summary.stat(Metric::AvgPrice, SelectionId::One).value, Some(100.0));
    assert_eq!(summary.stat(Metric::AvgPrice, SelectionId::Two).value, Some(250.0));
}

#[test]
fn stat_labels_carry_partition_size() {
    let dataset = fixture();
    let picked: HashSet<_> = [0, 1].into_iter().collect();
    let summary = SelectionSummary::aggregate(&dataset, &[(SelectionId::One, &picked)]);
    assert_eq!(
        summary.stat(Metric::AvgPrice, SelectionId::One).label(),
        "Selection 1 (2)"
    );
}

#[test]
fn money_formatting_abbreviates_by_magnitude() {
    assert_eq!(format_money(999.0), "$999");
    assert_eq!(format_money(450_000.0), "$450K");
    assert_eq!(format_money(12_000_000.0), "$12M");
    assert_eq!(format_money(3_400_000_000.0), "$3.4B");
    assert_eq!(format_money(1_230_000_000_000.0), "$1.2T");
}

#[test]
fn count_formatting_groups_thousands() {
    assert_eq!(format_count(1_234_567.0), "1,234,567");
    assert_eq!(format_count(42.0), "42");
}

#[test]
fn format_value_dispatches_on_metric_kind() {
    assert_eq!(format_value(Metric::TotalPrice, 2_000_000.0), "$2M");
    assert_eq!(format_value(Metric::TotalTransactions, 2_000_000.0), "2,000,000");
}
