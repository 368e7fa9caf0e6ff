use geoscope::{Dataset, Metric, Metrics, RangeFilter, Region};

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
        region("Birch", 200.0, 20_000.0, 100),
        region("Cedar", 300.0, 30_000.0, 300),
    ])
}

#[test]
fn fresh_filter_passes_every_region() {
    let dataset = fixture();
    let filter = RangeFilter::new(&dataset);
    assert_eq!(filter.filtered_set(&dataset).len(), 3);
    assert_eq!(filter.range(Metric::AvgPrice), [100.0, 300.0]);
}

#[test]
fn range_bounds_are_inclusive() {
    let dataset = fixture();
    let mut filter = RangeFilter::new(&dataset);

    filter.set_range(Metric::AvgPrice, [150.0, 300.0]);
    let set = filter.filtered_set(&dataset);
    assert!(!set.contains(&0));
    assert!(set.contains(&1));
    assert!(set.contains(&2), "a value equal to max must pass");

    filter.set_range(Metric::AvgPrice, [200.0, 200.0]);
    let set = filter.filtered_set(&dataset);
    assert_eq!(set.len(), 1, "a zero-width range still matches exact values");
    assert!(set.contains(&1));
}

#[test]
fn out_of_order_input_is_normalized() {
    let dataset = fixture();
    let mut filter = RangeFilter::new(&dataset);
    filter.set_range(Metric::AvgPrice, [300.0, 150.0]);
    assert_eq!(filter.range(Metric::AvgPrice), [150.0, 300.0]);
}

#[test]
fn ranges_are_clamped_to_global_bounds() {
    let dataset = fixture();
    let mut filter = RangeFilter::new(&dataset);
    filter.set_range(Metric::AvgPrice, [-1e9, 1e9]);
    assert_eq!(
        filter.range(Metric::AvgPrice),
        filter.global_bounds(Metric::AvgPrice)
    );
}

#[test]
fn all_metric_ranges_are_anded() {
    let dataset = fixture();
    let mut filter = RangeFilter::new(&dataset);

    // Birch and Cedar pass on price; only Cedar passes on transactions.
    filter.set_range(Metric::AvgPrice, [150.0, 300.0]);
    filter.set_range(Metric::TotalTransactions, [200.0, 300.0]);
    let set = filter.filtered_set(&dataset);
    assert_eq!(set.len(), 1);
    assert!(set.contains(&2));
}

#[test]
fn reset_restores_global_bounds() {
    let dataset = fixture();
    let mut filter = RangeFilter::new(&dataset);
    filter.set_range(Metric::AvgPrice, [250.0, 260.0]);
    filter.set_range(Metric::TotalPrice, [10_000.0, 10_000.0]);
    filter.reset();
    for metric in Metric::all() {
        assert_eq!(filter.range(metric), filter.global_bounds(metric));
    }
    assert_eq!(filter.filtered_set(&dataset).len(), 3);
}

#[test]
fn empty_match_set_is_representable() {
    let dataset = fixture();
    let mut filter = RangeFilter::new(&dataset);
    // [210, 290] excludes every region without being outside global bounds.
    filter.set_range(Metric::AvgPrice, [210.0, 290.0]);
    assert!(filter.filtered_set(&dataset).is_empty());
}
