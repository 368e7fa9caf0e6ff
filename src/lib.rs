//! Geoscope crate root: re-exports and module wiring.
//!
//! This crate provides a linked geo-selection and aggregation UI built on
//! egui/eframe: a projected region map with rectangular brush selections,
//! per-metric range filters, and bar charts of per-selection aggregates.
//!
//! The implementation is split into cohesive modules:
//! - `data`: region dataset, metrics, and GeoJSON loading
//! - `projection`: Albers projection fitted to the viewport
//! - `selection`: interaction modes, brush gestures, and the two selections
//! - `filter`: per-metric inclusive range filter
//! - `color`: fill-color resolution and the global palette
//! - `aggregate`: per-selection statistics feeding the chart
//! - `controllers`: external control of a running UI
//! - `config`: shared configuration
//! - `app`: the eframe application and run helper

pub mod aggregate;
pub mod app;
pub mod color;
pub mod config;
pub mod controllers;
pub mod data;
pub mod filter;
pub mod projection;
pub mod selection;

// Public re-exports for a compact external API
pub use aggregate::{format_money, format_value, SelectionStat, SelectionSummary};
pub use app::{run_geoscope, GeoScopeApp};
pub use color::{color_of, MapColors, PaintContext};
pub use config::{Controllers, FeatureFlags, GeoScopeConfig};
pub use controllers::{FilterController, SelectionController};
pub use data::{Dataset, Metric, Metrics, Region, RegionId};
pub use filter::RangeFilter;
pub use projection::{MapProjection, ViewportSize};
pub use selection::{
    AggregationLevel, BrushRect, InteractionMode, SelectionCommit, SelectionEngine, SelectionId,
    ZoomTransform,
};
