//! Data model and load boundary.

mod load;
mod region;

pub use region::{Dataset, Metric, Metrics, Region, RegionId, Ring};
