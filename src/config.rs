//! Configuration types for the geoscope UI.

use crate::color::MapColors;
use crate::controllers::{FilterController, SelectionController};

// ─────────────────────────────────────────────────────────────────────────────
// Feature flags
// ─────────────────────────────────────────────────────────────────────────────

/// Toggle individual UI features on or off.
///
/// All features default to `true` (enabled). Disable features to embed a
/// minimal map-only view.
#[derive(Clone, Debug)]
pub struct FeatureFlags {
    /// Show the range-filter side panel.
    pub filter_panel: bool,
    /// Show the statistics chart below the map.
    pub chart_panel: bool,
    /// Show the mode / active-selection / level toggles above the map.
    pub mode_toggles: bool,
    /// Show region tooltips on hover.
    pub tooltips: bool,
}

impl Default for FeatureFlags {
    fn default() -> Self {
        Self {
            filter_panel: true,
            chart_panel: true,
            mode_toggles: true,
            tooltips: true,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Controllers sub-config
// ─────────────────────────────────────────────────────────────────────────────

/// Optional programmatic controllers attached to the UI.
#[derive(Clone, Default)]
pub struct Controllers {
    pub selection: Option<SelectionController>,
    pub filter: Option<FilterController>,
}

// ─────────────────────────────────────────────────────────────────────────────
// GeoScopeConfig
// ─────────────────────────────────────────────────────────────────────────────

/// Top-level configuration for the linked map + chart view.
#[derive(Clone)]
pub struct GeoScopeConfig {
    /// Native window title.
    pub title: String,
    /// Optional headline rendered inside the UI.
    pub headline: Option<String>,
    /// Optional eframe native-window options.
    pub native_options: Option<eframe::NativeOptions>,

    /// Map fill/stroke colors.
    pub colors: MapColors,
    /// Allowed zoom scale range in Navigate mode.
    pub zoom_scale_extent: [f64; 2],
    /// Whether filter emphasis starts enabled.
    pub filter_emphasis: bool,

    /// Toggle individual UI features on/off.
    pub features: FeatureFlags,
    /// External controllers for programmatic interaction.
    pub controllers: Controllers,
}

impl Default for GeoScopeConfig {
    fn default() -> Self {
        Self {
            title: "GeoScope".to_string(),
            headline: None,
            native_options: None,
            colors: MapColors::classic(),
            zoom_scale_extent: [1.0, 8.0],
            filter_emphasis: false,
            features: FeatureFlags::default(),
            controllers: Controllers::default(),
        }
    }
}
