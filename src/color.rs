//! Color resolution for map regions.
//!
//! [`color_of`] maps one region's membership (filtered set, selection 1,
//! selection 2) to a single display color using a fixed precedence:
//!
//! 1. member of the filtered set while filter emphasis is shown → filtered
//!    color, regardless of brush membership;
//! 2. member of both selections → overlap color;
//! 3. member of exactly one selection → that selection's color;
//! 4. otherwise → unselected color.
//!
//! Filter-over-brush is the canonical ordering here; when emphasis is on,
//! brush highlighting is suppressed for filtered regions. Callers needing
//! both signals at once must use a separate visual channel.

use eframe::egui::Color32;
use once_cell::sync::Lazy;
use std::collections::HashSet;
use std::sync::Mutex;

use crate::data::RegionId;
use crate::selection::SelectionId;

// Global color set used when no explicit MapColors is configured. Updated
// whenever a config is applied; cloned on read so callers can mutate freely.
static GLOBAL_COLORS: Lazy<Mutex<MapColors>> = Lazy::new(|| Mutex::new(MapColors::classic()));

/// Get a copy of the current global map colors.
///
/// Exposed primarily for unit tests; production code normally reads the
/// colors out of its config.
pub fn global_colors() -> MapColors {
    GLOBAL_COLORS.lock().unwrap().clone()
}

/// Replace the global map colors. Called when a config is applied, but user
/// code (or tests) may call it directly.
pub fn set_global_colors(new: MapColors) {
    let mut guard = GLOBAL_COLORS.lock().unwrap();
    *guard = new;
}

/// The five membership colors plus the region outline stroke.
#[derive(Debug, Clone, PartialEq)]
pub struct MapColors {
    /// Selection 1 fill.
    pub selection1: Color32,
    /// Selection 2 fill.
    pub selection2: Color32,
    /// Fill for regions in both selections.
    pub overlap: Color32,
    /// Fill for regions passing the range filter while emphasis is shown.
    pub filtered: Color32,
    /// Fill for regions in no selection.
    pub unselected: Color32,
    /// Region outline stroke.
    pub outline: Color32,
}

impl Default for MapColors {
    fn default() -> Self {
        MapColors::classic()
    }
}

impl MapColors {
    /// The default light palette: tomato / steel blue / purple overlap,
    /// teal filter emphasis, white land.
    pub fn classic() -> Self {
        Self {
            selection1: Color32::from_rgb(0xff, 0x63, 0x47),
            selection2: Color32::from_rgb(0x46, 0x82, 0xb4),
            overlap: Color32::from_rgb(0x80, 0x00, 0x80),
            filtered: Color32::from_rgb(0x32, 0xa8, 0x89),
            unselected: Color32::WHITE,
            outline: Color32::from_rgb(0x55, 0x55, 0x55),
        }
    }

    /// Same accent colors on a dark land fill.
    pub fn dark() -> Self {
        Self {
            unselected: Color32::from_rgb(0x2a, 0x2a, 0x2a),
            outline: Color32::from_rgb(0x8a, 0x8a, 0x8a),
            ..MapColors::classic()
        }
    }

    /// Fill color for one selection.
    pub fn for_selection(&self, id: SelectionId) -> Color32 {
        match id {
            SelectionId::One => self.selection1,
            SelectionId::Two => self.selection2,
        }
    }
}

/// Everything the resolver needs to paint one frame: current memberships and
/// the palette. Built once per repaint, then queried per region.
pub struct PaintContext<'a> {
    /// Regions passing every range filter.
    pub filtered: &'a HashSet<RegionId>,
    /// Whether the filtered subset is currently emphasised.
    pub filter_emphasis: bool,
    /// Committed (or live-candidate) region set of selection 1.
    pub selection1: &'a HashSet<RegionId>,
    /// Committed (or live-candidate) region set of selection 2.
    pub selection2: &'a HashSet<RegionId>,
    pub colors: &'a MapColors,
}

/// Resolve one region's fill color. Pure; evaluated per region per repaint.
pub fn color_of(region: RegionId, ctx: &PaintContext<'_>) -> Color32 {
    if ctx.filter_emphasis && ctx.filtered.contains(&region) {
        return ctx.colors.filtered;
    }
    let in1 = ctx.selection1.contains(&region);
    let in2 = ctx.selection2.contains(&region);
    match (in1, in2) {
        (true, true) => ctx.colors.overlap,
        (true, false) => ctx.colors.selection1,
        (false, true) => ctx.colors.selection2,
        (false, false) => ctx.colors.unselected,
    }
}
