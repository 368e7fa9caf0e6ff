//! Core data model: regions, their metrics, and the loaded dataset.
//!
//! A [`Region`] is one geographic unit (a county) with a fixed-shape metrics
//! payload. Regions are loaded once into a [`Dataset`] and never mutated;
//! every other component holds the dataset by shared reference.

use serde::{Deserialize, Serialize};

/// Numeric identifier for a region, assigned densely by the library at load.
///
/// Ids are stable for the lifetime of one loaded [`Dataset`] and index
/// directly into it.
pub type RegionId = u32;

/// One exterior ring of a region outline, as `[longitude, latitude]` pairs.
pub type Ring = Vec<[f64; 2]>;

/// The three real-estate metrics tracked per region.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Metrics {
    /// Average transaction price in the region.
    pub avg_price: f64,
    /// Sum of all transaction prices in the region.
    pub total_price: f64,
    /// Number of recorded transactions.
    pub total_transactions: u64,
}

/// Identifies one of the tracked metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Metric {
    AvgPrice,
    TotalPrice,
    TotalTransactions,
}

impl Metric {
    /// All metrics in display order.
    pub fn all() -> [Metric; 3] {
        [Metric::AvgPrice, Metric::TotalPrice, Metric::TotalTransactions]
    }

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Metric::AvgPrice => "Average Price",
            Metric::TotalPrice => "Total Price",
            Metric::TotalTransactions => "Total Transactions",
        }
    }

    /// Whether aggregation over a partition uses the arithmetic mean.
    ///
    /// Average-type metrics are reduced with a mean; totals are summed.
    pub fn uses_mean(&self) -> bool {
        matches!(self, Metric::AvgPrice)
    }

    /// Whether the metric denotes a monetary amount (affects formatting).
    pub fn is_money(&self) -> bool {
        !matches!(self, Metric::TotalTransactions)
    }

    /// Extract this metric's value from a metrics payload.
    pub fn value_of(&self, m: &Metrics) -> f64 {
        match self {
            Metric::AvgPrice => m.avg_price,
            Metric::TotalPrice => m.total_price,
            Metric::TotalTransactions => m.total_transactions as f64,
        }
    }

    pub(crate) fn index(&self) -> usize {
        match self {
            Metric::AvgPrice => 0,
            Metric::TotalPrice => 1,
            Metric::TotalTransactions => 2,
        }
    }
}

/// One geographic region (county) with its outline and metrics.
///
/// Identity is the `(state_code, name)` pair; the geometry is a list of
/// exterior rings in geographic coordinates (holes are dropped at load).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Region {
    /// State FIPS code (groups counties into states for State-level selection).
    pub state_code: String,
    /// Region display name.
    pub name: String,
    /// Exterior rings of the region outline, `[lon, lat]`.
    pub shape: Vec<Ring>,
    /// Real-estate metrics payload.
    pub metrics: Metrics,
}

/// The immutable region collection plus per-metric global value bounds.
///
/// Bounds are folded once at construction and back the Range Filter's
/// clamping and initial slider positions.
#[derive(Debug, Clone)]
pub struct Dataset {
    regions: Vec<Region>,
    bounds: [[f64; 2]; 3],
}

impl Dataset {
    /// Build a dataset from loaded regions, folding global metric bounds.
    pub fn new(regions: Vec<Region>) -> Self {
        let mut bounds = [[f64::INFINITY, f64::NEG_INFINITY]; 3];
        for r in &regions {
            for metric in Metric::all() {
                let v = metric.value_of(&r.metrics);
                let b = &mut bounds[metric.index()];
                b[0] = b[0].min(v);
                b[1] = b[1].max(v);
            }
        }
        Self { regions, bounds }
    }

    /// Number of regions.
    pub fn len(&self) -> usize {
        self.regions.len()
    }

    /// Returns `true` when the dataset holds no regions.
    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// Look up a region by id.
    pub fn get(&self, id: RegionId) -> Option<&Region> {
        self.regions.get(id as usize)
    }

    /// Iterate over `(id, region)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (RegionId, &Region)> {
        self.regions
            .iter()
            .enumerate()
            .map(|(i, r)| (i as RegionId, r))
    }

    /// All region ids.
    pub fn ids(&self) -> impl Iterator<Item = RegionId> + '_ {
        (0..self.regions.len()).map(|i| i as RegionId)
    }

    /// Global `[min, max]` over the dataset for the given metric.
    pub fn metric_bounds(&self, metric: Metric) -> [f64; 2] {
        self.bounds[metric.index()]
    }
}
