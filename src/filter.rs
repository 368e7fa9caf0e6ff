//! Range filter: per-metric `[min, max]` bounds and the derived filtered set.
//!
//! Each metric carries one inclusive range, initialized to the dataset's
//! global bounds. The filtered set is never stored — it is recomputed from
//! the current ranges and the immutable dataset on demand, so there is no
//! cache to go stale. Filter changes never touch brush selections.

use std::collections::HashSet;

use crate::data::{Dataset, Metric, Region, RegionId};

/// Holds one inclusive `[min, max]` range per metric, plus the immutable
/// global bounds used for clamping.
#[derive(Debug, Clone)]
pub struct RangeFilter {
    ranges: [[f64; 2]; 3],
    bounds: [[f64; 2]; 3],
}

impl RangeFilter {
    /// Create a filter with every range at the dataset's global bounds
    /// (i.e. passing every region).
    pub fn new(dataset: &Dataset) -> Self {
        let bounds = [
            dataset.metric_bounds(Metric::AvgPrice),
            dataset.metric_bounds(Metric::TotalPrice),
            dataset.metric_bounds(Metric::TotalTransactions),
        ];
        Self {
            ranges: bounds,
            bounds,
        }
    }

    /// Replace the range for one metric.
    ///
    /// Out-of-order input is normalized (`lo > hi` swapped) and both ends are
    /// clamped to the metric's global bounds before storage. Never errors.
    pub fn set_range(&mut self, metric: Metric, range: [f64; 2]) {
        let [gmin, gmax] = self.bounds[metric.index()];
        let (lo, hi) = if range[0] <= range[1] {
            (range[0], range[1])
        } else {
            (range[1], range[0])
        };
        self.ranges[metric.index()] = [lo.clamp(gmin, gmax), hi.clamp(gmin, gmax)];
    }

    /// Current `[min, max]` for one metric.
    pub fn range(&self, metric: Metric) -> [f64; 2] {
        self.ranges[metric.index()]
    }

    /// The metric's global `[min, max]` captured at construction.
    pub fn global_bounds(&self, metric: Metric) -> [f64; 2] {
        self.bounds[metric.index()]
    }

    /// Reset every range back to the global bounds.
    pub fn reset(&mut self) {
        self.ranges = self.bounds;
    }

    /// Whether a region satisfies every metric's current range (inclusive).
    pub fn is_match(&self, region: &Region) -> bool {
        Metric::all().iter().all(|metric| {
            let v = metric.value_of(&region.metrics);
            let [lo, hi] = self.ranges[metric.index()];
            v >= lo && v <= hi
        })
    }

    /// Recompute the subset of regions satisfying all current ranges.
    pub fn filtered_set(&self, dataset: &Dataset) -> HashSet<RegionId> {
        dataset
            .iter()
            .filter(|(_, region)| self.is_match(region))
            .map(|(id, _)| id)
            .collect()
    }
}
