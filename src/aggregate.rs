//! Per-selection statistical aggregates feeding the chart.
//!
//! The aggregator partitions the two selections' region lists by selection
//! id and reduces each metric over each partition: arithmetic mean for
//! average-type metrics, sum for totals. An empty partition yields an
//! explicit "no data" marker, never a numeric zero — a mean over nothing
//! would mislead. The summary is recomputed in full on every commit; region
//! counts are small (a few thousand at most), so incremental updates are not
//! worth their drift risk.

use std::collections::HashSet;

use crate::data::{Dataset, Metric, RegionId};
use crate::selection::{SelectionEngine, SelectionId};

/// One bar of the chart: a selection's reduced value for one metric.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SelectionStat {
    pub selection: SelectionId,
    /// Reduced value, or `None` when the partition is empty ("no data").
    pub value: Option<f64>,
    /// Partition size (number of regions in the selection).
    pub count: usize,
}

impl SelectionStat {
    /// Chart label, e.g. `Selection 1 (12)`.
    pub fn label(&self) -> String {
        format!("{} ({})", self.selection, self.count)
    }
}

/// Aggregates for every metric and both selections.
#[derive(Debug, Clone)]
pub struct SelectionSummary {
    // Indexed [metric][selection].
    stats: [[SelectionStat; 2]; 3],
}

impl Default for SelectionSummary {
    fn default() -> Self {
        SelectionSummary::empty()
    }
}

impl SelectionSummary {
    /// A summary with every partition empty.
    pub fn empty() -> Self {
        let stat = |selection| SelectionStat {
            selection,
            value: None,
            count: 0,
        };
        let row = [stat(SelectionId::One), stat(SelectionId::Two)];
        Self { stats: [row; 3] }
    }

    /// Reduce the given tagged region sets.
    ///
    /// This is the list-based form matching how the engine reports commits;
    /// [`SelectionSummary::from_engine`] is the common entry point.
    pub fn aggregate(
        dataset: &Dataset,
        parts: &[(SelectionId, &HashSet<RegionId>)],
    ) -> SelectionSummary {
        let mut summary = SelectionSummary::empty();
        for (id, regions) in parts {
            for metric in Metric::all() {
                let values: Vec<f64> = regions
                    .iter()
                    .filter_map(|rid| dataset.get(*rid))
                    .map(|r| metric.value_of(&r.metrics))
                    .collect();
                let slot = &mut summary.stats[metric.index()][id.index()];
                slot.count = values.len();
                slot.value = if values.is_empty() {
                    None
                } else if metric.uses_mean() {
                    Some(values.iter().sum::<f64>() / values.len() as f64)
                } else {
                    Some(values.iter().sum())
                };
            }
        }
        summary
    }

    /// Reduce both of the engine's current selections.
    pub fn from_engine(dataset: &Dataset, engine: &SelectionEngine) -> SelectionSummary {
        SelectionSummary::aggregate(
            dataset,
            &[
                (SelectionId::One, engine.region_ids(SelectionId::One)),
                (SelectionId::Two, engine.region_ids(SelectionId::Two)),
            ],
        )
    }

    /// Both selections' stats for one metric.
    pub fn stats(&self, metric: Metric) -> &[SelectionStat; 2] {
        &self.stats[metric.index()]
    }

    /// One selection's stat for one metric.
    pub fn stat(&self, metric: Metric, id: SelectionId) -> &SelectionStat {
        &self.stats[metric.index()][id.index()]
    }

    /// Whether any partition produced a value.
    pub fn has_data(&self) -> bool {
        self.stats
            .iter()
            .flatten()
            .any(|stat| stat.value.is_some())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Display formatting
// ─────────────────────────────────────────────────────────────────────────────

/// Abbreviated money format: `$1.2T`, `$3.4B`, `$12M`, `$450K`, `$999`.
pub fn format_money(value: f64) -> String {
    let abs = value.abs();
    if abs >= 1e12 {
        format!("${:.1}T", value / 1e12)
    } else if abs >= 1e9 {
        format!("${:.1}B", value / 1e9)
    } else if abs >= 1e6 {
        format!("${}M", (value / 1e6).round() as i64)
    } else if abs >= 1e3 {
        format!("${}K", (value / 1e3).round() as i64)
    } else {
        format!("${}", group_thousands(value.round() as i64))
    }
}

/// Plain count with thousands separators: `1,234,567`.
pub fn format_count(value: f64) -> String {
    group_thousands(value.round() as i64)
}

/// Format a reduced value for one metric.
pub fn format_value(metric: Metric, value: f64) -> String {
    if metric.is_money() {
        format_money(value)
    } else {
        format_count(value)
    }
}

fn group_thousands(value: i64) -> String {
    let negative = value < 0;
    let digits = value.abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if negative {
        format!("-{out}")
    } else {
        out
    }
}
