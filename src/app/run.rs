//! Top-level entry point for running geoscope as a native window.
//!
//! [`run_geoscope`] is the primary public API for launching the linked
//! map + chart view over a loaded dataset.  It applies the configuration,
//! opens a native window, and enters the eframe event loop.

use eframe::egui;

use crate::config::GeoScopeConfig;
use crate::data::Dataset;

use super::GeoScopeApp;

/// Launch the geoscope application in a native window.
///
/// The call blocks until the window is closed.
pub fn run_geoscope(dataset: Dataset, mut cfg: GeoScopeConfig) -> eframe::Result<()> {
    let app = GeoScopeApp::with_config(dataset, &cfg);

    let title = cfg.title.clone();
    let mut opts = cfg
        .native_options
        .take()
        .unwrap_or_else(eframe::NativeOptions::default);

    // Set a bigger default window size if one is not provided by config.
    if opts.viewport.inner_size.is_none() {
        opts.viewport = opts
            .viewport
            .clone()
            .with_inner_size(egui::vec2(1400.0, 900.0));
    }

    eframe::run_native(&title, opts, Box::new(|_cc| Ok(Box::new(app))))
}
