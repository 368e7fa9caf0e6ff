//! The top-level application state and frame loop.

use std::sync::mpsc::Receiver;

use eframe::egui;

use crate::aggregate::SelectionSummary;
use crate::color::{set_global_colors, MapColors};
use crate::config::{FeatureFlags, GeoScopeConfig};
use crate::controllers::{FilterController, SelectionController};
use crate::data::Dataset;
use crate::filter::RangeFilter;
use crate::projection::MapProjection;
use crate::selection::{SelectionCommit, SelectionEngine};

/// Linked map + chart application implementing [`eframe::App`].
///
/// All state transitions happen synchronously inside the frame: controller
/// requests are applied first, pointer input drives the engine while the map
/// paints, and commits drained at the end of the frame trigger a full
/// aggregate recompute for the chart.
pub struct GeoScopeApp {
    pub(crate) dataset: Dataset,
    pub(crate) engine: SelectionEngine,
    pub(crate) filter: RangeFilter,
    pub(crate) summary: SelectionSummary,

    /// Projection cache; recomputed only when the map viewport size changes.
    pub(crate) projection: Option<MapProjection>,

    pub(crate) colors: MapColors,
    pub(crate) filter_emphasis: bool,
    pub(crate) features: FeatureFlags,
    pub(crate) headline: Option<String>,

    commits_rx: Receiver<SelectionCommit>,
    selection_ctrl: Option<SelectionController>,
    filter_ctrl: Option<FilterController>,
}

impl GeoScopeApp {
    /// Create an app over a loaded dataset with default configuration.
    pub fn new(dataset: Dataset) -> Self {
        let filter = RangeFilter::new(&dataset);
        let mut engine = SelectionEngine::new();
        let commits_rx = engine.subscribe();
        Self {
            dataset,
            engine,
            filter,
            summary: SelectionSummary::empty(),
            projection: None,
            colors: MapColors::classic(),
            filter_emphasis: false,
            features: FeatureFlags::default(),
            headline: None,
            commits_rx,
            selection_ctrl: None,
            filter_ctrl: None,
        }
    }

    /// Create an app and apply a configuration in one step.
    pub fn with_config(dataset: Dataset, cfg: &GeoScopeConfig) -> Self {
        let mut app = Self::new(dataset);
        app.apply_config(cfg);
        app
    }

    /// Apply colors, feature flags, zoom limits and controller handles.
    pub fn apply_config(&mut self, cfg: &GeoScopeConfig) {
        self.colors = cfg.colors.clone();
        set_global_colors(cfg.colors.clone());
        self.filter_emphasis = cfg.filter_emphasis;
        self.features = cfg.features.clone();
        self.headline = cfg.headline.clone();
        self.engine.set_zoom_scale_extent(cfg.zoom_scale_extent);
        self.selection_ctrl = cfg.controllers.selection.clone();
        self.filter_ctrl = cfg.controllers.filter.clone();
    }

    /// Direct access to the engine (tests and embedding).
    pub fn engine(&self) -> &SelectionEngine {
        &self.engine
    }

    /// Direct access to the range filter (tests and embedding).
    pub fn filter(&self) -> &RangeFilter {
        &self.filter
    }

    /// The aggregates currently backing the chart.
    pub fn summary(&self) -> &SelectionSummary {
        &self.summary
    }

    /// Apply pending controller requests before handling this frame's input.
    fn apply_controller_requests(&mut self) {
        if let Some(ctrl) = &self.selection_ctrl {
            let (mode, level, active, clears) = {
                let mut inner = ctrl.inner.lock().unwrap();
                (
                    inner.mode_request.take(),
                    inner.level_request.take(),
                    inner.active_request.take(),
                    std::mem::take(&mut inner.clear_requests),
                )
            };
            if let Some(mode) = mode {
                self.engine.set_mode(mode);
            }
            if let Some(level) = level {
                self.engine.set_level(level);
            }
            if let Some(active) = active {
                self.engine.set_active(active);
            }
            for id in clears {
                self.engine.clear_selection(id);
            }
        }

        if let Some(ctrl) = &self.filter_ctrl {
            let (ranges, emphasis, reset) = {
                let mut inner = ctrl.inner.lock().unwrap();
                (
                    std::mem::take(&mut inner.range_requests),
                    inner.emphasis_request.take(),
                    std::mem::replace(&mut inner.reset_requested, false),
                )
            };
            if reset {
                self.filter.reset();
            }
            for (metric, range) in ranges {
                self.filter.set_range(metric, range);
            }
            if let Some(on) = emphasis {
                self.filter_emphasis = on;
            }
        }
    }

    /// Drain commits produced this frame: recompute aggregates and forward
    /// to external subscribers.
    fn drain_commits(&mut self) {
        let mut any = false;
        while let Ok(commit) = self.commits_rx.try_recv() {
            any = true;
            if let Some(ctrl) = &self.selection_ctrl {
                ctrl.publish(&commit);
            }
        }
        if any {
            self.summary = SelectionSummary::from_engine(&self.dataset, &self.engine);
        }
    }
}

impl eframe::App for GeoScopeApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.apply_controller_requests();

        if self.features.filter_panel {
            egui::SidePanel::right("filter_panel")
                .default_width(260.0)
                .show(ctx, |ui| self.ui_filter_panel(ui));
        }

        if self.features.chart_panel {
            egui::TopBottomPanel::bottom("chart_panel")
                .default_height(220.0)
                .resizable(true)
                .show(ctx, |ui| self.ui_chart_panel(ui));
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            if let Some(headline) = self.headline.clone() {
                ui.heading(headline);
            }
            if self.features.mode_toggles {
                self.ui_mode_toggles(ui);
            }
            self.ui_map_panel(ui);
        });

        self.drain_commits();
    }
}
