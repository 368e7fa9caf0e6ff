//! The geoscope UI: an eframe application wrapping the core engine.
//!
//! [`GeoScopeApp`] owns the dataset, the selection engine, the range filter,
//! and the projection cache, and renders three linked panels: the map, the
//! statistics chart, and the filter sidebar. [`run_geoscope`] opens it as a
//! native window.

mod chart_panel;
mod filter_panel;
mod geoscope_app;
mod map_panel;
mod run;

pub use geoscope_app::GeoScopeApp;
pub use run::run_geoscope;
