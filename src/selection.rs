//! Selection engine: interaction modes, brush gestures, and the two region
//! selections.
//!
//! The engine is the single owner of interaction state, written to only by
//! the UI thread: the Navigate/Select mode, the County/State aggregation level, the
//! active selection, the in-progress brush rectangle, and the zoom transform.
//! It consumes pointer gestures (`begin` → `update`* → `end`) and produces
//! committed region sets, pushing a [`SelectionCommit`] to subscribers on
//! every commit — including clears — in the same interaction turn.
//!
//! Commit semantics differ by level:
//! - **County**: each commit fully replaces the active selection with the
//!   set of regions whose projected centroid lies inside the final rectangle
//!   (closed intervals on both axes).
//! - **State**: the state codes touched by the final rectangle are unioned
//!   into the selection's accumulator; the region set is every region whose
//!   state code is accumulated. Only an explicit clear (or a degenerate
//!   rectangle on gesture end) shrinks a State selection.
//!
//! Candidate sets for live repaint are recomputed in full from the current
//! rectangle on every update; nothing is patched incrementally.

use std::collections::HashSet;
use std::sync::mpsc::{Receiver, Sender};

use serde::{Deserialize, Serialize};

use crate::data::{Dataset, RegionId};
use crate::projection::{MapProjection, ViewportSize};

// ─────────────────────────────────────────────────────────────────────────────
// Value types
// ─────────────────────────────────────────────────────────────────────────────

/// Map interaction mode. Navigate enables zoom/pan and disables brushing;
/// Select is the reverse. Entering Select clears nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum InteractionMode {
    #[default]
    Navigate,
    Select,
}

/// Granularity at which brush gestures are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AggregationLevel {
    #[default]
    County,
    State,
}

/// One of the two independently tracked selections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SelectionId {
    One,
    Two,
}

impl SelectionId {
    /// Both ids, in order.
    pub fn both() -> [SelectionId; 2] {
        [SelectionId::One, SelectionId::Two]
    }

    /// The other selection.
    pub fn other(&self) -> SelectionId {
        match self {
            SelectionId::One => SelectionId::Two,
            SelectionId::Two => SelectionId::One,
        }
    }

    /// Numeric form (1 or 2), for labels.
    pub fn as_u8(&self) -> u8 {
        match self {
            SelectionId::One => 1,
            SelectionId::Two => 2,
        }
    }

    pub(crate) fn index(&self) -> usize {
        (self.as_u8() - 1) as usize
    }
}

impl std::fmt::Display for SelectionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Selection {}", self.as_u8())
    }
}

/// A brush rectangle in screen coordinates.
///
/// Corners may arrive in any order; [`BrushRect::normalized`] reorders them
/// so `(x0, y0)` is the top-left corner. Containment is closed on both axes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BrushRect {
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
}

impl BrushRect {
    pub fn new(x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        Self { x0, y0, x1, y1 }
    }

    /// Swap corners as needed so that `x0 <= x1` and `y0 <= y1`.
    pub fn normalized(&self) -> BrushRect {
        BrushRect {
            x0: self.x0.min(self.x1),
            y0: self.y0.min(self.y1),
            x1: self.x0.max(self.x1),
            y1: self.y0.max(self.y1),
        }
    }

    pub fn width(&self) -> f64 {
        (self.x1 - self.x0).abs()
    }

    pub fn height(&self) -> f64 {
        (self.y1 - self.y0).abs()
    }

    /// A rectangle with zero width or zero height selects nothing.
    pub fn is_degenerate(&self) -> bool {
        self.width() == 0.0 || self.height() == 0.0
    }

    /// Closed-interval containment test (assumes a normalized rectangle).
    pub fn contains(&self, p: [f64; 2]) -> bool {
        p[0] >= self.x0 && p[0] <= self.x1 && p[1] >= self.y0 && p[1] <= self.y1
    }
}

/// Pan/zoom state of the map view. Identity by default.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZoomTransform {
    pub scale: f64,
    pub tx: f64,
    pub ty: f64,
}

impl Default for ZoomTransform {
    fn default() -> Self {
        Self {
            scale: 1.0,
            tx: 0.0,
            ty: 0.0,
        }
    }
}

impl ZoomTransform {
    pub fn is_identity(&self) -> bool {
        self.scale == 1.0 && self.tx == 0.0 && self.ty == 0.0
    }

    /// Map-space point to screen space.
    pub fn apply(&self, p: [f64; 2]) -> [f64; 2] {
        [p[0] * self.scale + self.tx, p[1] * self.scale + self.ty]
    }

    /// Screen-space point back to map space.
    pub fn invert(&self, p: [f64; 2]) -> [f64; 2] {
        [(p[0] - self.tx) / self.scale, (p[1] - self.ty) / self.scale]
    }
}

/// One selection's full state.
#[derive(Debug, Clone, Default)]
pub struct Selection {
    /// The rectangle last committed for this selection, if any.
    pub last_rect: Option<BrushRect>,
    /// Committed region set. Always derivable from `last_rect` (County) or
    /// from `state_codes` (State).
    pub region_ids: HashSet<RegionId>,
    /// Accumulated state codes (State level only; grows monotonically until
    /// an explicit clear).
    pub state_codes: HashSet<String>,
}

impl Selection {
    pub fn is_empty(&self) -> bool {
        self.region_ids.is_empty() && self.state_codes.is_empty() && self.last_rect.is_none()
    }

    fn clear(&mut self) {
        self.last_rect = None;
        self.region_ids.clear();
        self.state_codes.clear();
    }
}

/// Emitted to subscribers on every commit, including clears (empty list).
#[derive(Debug, Clone)]
pub struct SelectionCommit {
    pub id: SelectionId,
    /// Committed region ids, sorted for deterministic consumption.
    pub regions: Vec<RegionId>,
}

// ─────────────────────────────────────────────────────────────────────────────
// SelectionEngine
// ─────────────────────────────────────────────────────────────────────────────

/// The interaction state machine described in the module docs.
pub struct SelectionEngine {
    mode: InteractionMode,
    level: AggregationLevel,
    active: SelectionId,
    selections: [Selection; 2],
    /// In-progress gesture: anchor at `(x0, y0)`, cursor at `(x1, y1)`.
    gesture: Option<BrushRect>,
    zoom: ZoomTransform,
    zoom_scale_extent: [f64; 2],
    listeners: Vec<Sender<SelectionCommit>>,
}

impl Default for SelectionEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl SelectionEngine {
    /// Engine with mount defaults: Navigate mode, Selection 1 active, County
    /// level, both selections empty, identity zoom, scale extent 1..8.
    pub fn new() -> Self {
        Self {
            mode: InteractionMode::Navigate,
            level: AggregationLevel::County,
            active: SelectionId::One,
            selections: [Selection::default(), Selection::default()],
            gesture: None,
            zoom: ZoomTransform::default(),
            zoom_scale_extent: [1.0, 8.0],
            listeners: Vec::new(),
        }
    }

    // ── State accessors ──────────────────────────────────────────────────

    pub fn mode(&self) -> InteractionMode {
        self.mode
    }

    pub fn level(&self) -> AggregationLevel {
        self.level
    }

    pub fn active(&self) -> SelectionId {
        self.active
    }

    pub fn selection(&self, id: SelectionId) -> &Selection {
        &self.selections[id.index()]
    }

    /// Committed region set of one selection.
    pub fn region_ids(&self, id: SelectionId) -> &HashSet<RegionId> {
        &self.selections[id.index()].region_ids
    }

    /// The normalized in-progress brush rectangle, for overlay drawing.
    pub fn gesture_rect(&self) -> Option<BrushRect> {
        self.gesture.map(|r| r.normalized())
    }

    // ── Mode / level / active toggles ────────────────────────────────────

    /// Switch interaction mode. Leaving Select drops any uncommitted
    /// gesture; committed selections are untouched in both directions.
    pub fn set_mode(&mut self, mode: InteractionMode) {
        if mode != self.mode {
            self.mode = mode;
            self.gesture = None;
        }
    }

    /// Switch aggregation level. An existing selection's footprint is not
    /// translated between granularities; both selections are discarded, and
    /// subscribers see a clear for each selection that had content.
    pub fn set_level(&mut self, level: AggregationLevel) {
        if level == self.level {
            return;
        }
        self.level = level;
        self.gesture = None;
        for id in SelectionId::both() {
            if !self.selections[id.index()].is_empty() {
                self.selections[id.index()].clear();
                self.emit(SelectionCommit {
                    id,
                    regions: Vec::new(),
                });
            }
        }
    }

    /// Make one selection the receiver of new gestures.
    pub fn set_active(&mut self, id: SelectionId) {
        if id != self.active {
            self.active = id;
            self.gesture = None;
        }
    }

    /// Flip which selection is active.
    pub fn toggle_active(&mut self) {
        self.set_active(self.active.other());
    }

    // ── Subscription ─────────────────────────────────────────────────────

    /// Subscribe to commits. Every commit (including clears) is delivered
    /// synchronously within the interaction turn that produced it.
    pub fn subscribe(&mut self) -> Receiver<SelectionCommit> {
        let (tx, rx) = std::sync::mpsc::channel();
        self.listeners.push(tx);
        rx
    }

    fn emit(&mut self, commit: SelectionCommit) {
        self.listeners.retain(|s| s.send(commit.clone()).is_ok());
    }

    // ── Gesture lifecycle ────────────────────────────────────────────────

    /// Pointer down. Ignored outside Select mode.
    pub fn begin_gesture(&mut self, p: [f64; 2]) {
        if self.mode == InteractionMode::Select {
            self.gesture = Some(BrushRect::new(p[0], p[1], p[0], p[1]));
        }
    }

    /// Pointer drag: move the gesture's free corner.
    pub fn update_gesture(&mut self, p: [f64; 2]) {
        if let Some(rect) = &mut self.gesture {
            rect.x1 = p[0];
            rect.y1 = p[1];
        }
    }

    /// The candidate region set for live repaint, recomputed in full from
    /// the current rectangle. Does not commit anything.
    pub fn candidate_regions(
        &self,
        dataset: &Dataset,
        projection: &MapProjection,
    ) -> HashSet<RegionId> {
        let Some(rect) = self.gesture.map(|r| r.normalized()) else {
            return HashSet::new();
        };
        if rect.is_degenerate() {
            return HashSet::new();
        }
        match self.level {
            AggregationLevel::County => hit_regions(&rect, projection),
            AggregationLevel::State => {
                // Live view of what a commit right now would select: the
                // accumulator plus the codes under the current rectangle.
                let mut codes = self.selections[self.active.index()].state_codes.clone();
                codes.extend(hit_state_codes(&rect, dataset, projection));
                regions_in_states(dataset, &codes)
            }
        }
    }

    /// Pointer up: commit the gesture against the active selection.
    ///
    /// A degenerate (zero width/height) rectangle resets the selection —
    /// this is the only way to shrink a State-level selection. Returns the
    /// commit that was pushed to subscribers, or `None` if no gesture was in
    /// progress.
    pub fn end_gesture(
        &mut self,
        dataset: &Dataset,
        projection: &MapProjection,
    ) -> Option<SelectionCommit> {
        let rect = self.gesture.take()?.normalized();
        if rect.is_degenerate() {
            return Some(self.clear_selection(self.active));
        }

        let id = self.active;
        let selection = &mut self.selections[id.index()];
        match self.level {
            AggregationLevel::County => {
                selection.region_ids = hit_regions(&rect, projection);
            }
            AggregationLevel::State => {
                let touched = hit_state_codes(&rect, dataset, projection);
                selection.state_codes.extend(touched);
                selection.region_ids = regions_in_states(dataset, &selection.state_codes);
            }
        }
        selection.last_rect = Some(rect);

        let commit = SelectionCommit {
            id,
            regions: sorted(&self.selections[id.index()].region_ids),
        };
        self.emit(commit.clone());
        Some(commit)
    }

    /// Explicitly reset one selection (region set and state accumulator).
    /// Subscribers receive an empty commit.
    pub fn clear_selection(&mut self, id: SelectionId) -> SelectionCommit {
        self.selections[id.index()].clear();
        let commit = SelectionCommit {
            id,
            regions: Vec::new(),
        };
        self.emit(commit.clone());
        commit
    }

    // ── Zoom / pan (Navigate mode only) ──────────────────────────────────

    pub fn zoom(&self) -> ZoomTransform {
        self.zoom
    }

    /// Replace the allowed zoom scale range (default 1..8).
    pub fn set_zoom_scale_extent(&mut self, extent: [f64; 2]) {
        self.zoom_scale_extent = [extent[0].min(extent[1]), extent[0].max(extent[1])];
        let clamped = self
            .zoom
            .scale
            .clamp(self.zoom_scale_extent[0], self.zoom_scale_extent[1]);
        self.zoom.scale = clamped;
    }

    /// Scale about a screen-space focus point. Ignored in Select mode.
    pub fn zoom_by(&mut self, factor: f64, focus: [f64; 2], viewport: ViewportSize) {
        if self.mode != InteractionMode::Navigate || !factor.is_finite() || factor <= 0.0 {
            return;
        }
        let old = self.zoom.scale;
        let new = (old * factor).clamp(self.zoom_scale_extent[0], self.zoom_scale_extent[1]);
        let k = new / old;
        self.zoom.scale = new;
        self.zoom.tx = focus[0] - (focus[0] - self.zoom.tx) * k;
        self.zoom.ty = focus[1] - (focus[1] - self.zoom.ty) * k;
        self.clamp_translate(viewport);
    }

    /// Translate the view. Ignored in Select mode.
    pub fn pan_by(&mut self, delta: [f64; 2], viewport: ViewportSize) {
        if self.mode != InteractionMode::Navigate {
            return;
        }
        self.zoom.tx += delta[0];
        self.zoom.ty += delta[1];
        self.clamp_translate(viewport);
    }

    /// Back to the identity transform.
    pub fn reset_zoom(&mut self) {
        self.zoom = ZoomTransform::default();
    }

    /// Keep the scaled map covering the viewport (d3 translateExtent
    /// behaviour for an extent equal to the viewport).
    fn clamp_translate(&mut self, viewport: ViewportSize) {
        let span_x = viewport.width * (1.0 - self.zoom.scale);
        let span_y = viewport.height * (1.0 - self.zoom.scale);
        self.zoom.tx = self.zoom.tx.clamp(span_x.min(0.0), span_x.max(0.0));
        self.zoom.ty = self.zoom.ty.clamp(span_y.min(0.0), span_y.max(0.0));
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Hit-testing helpers
// ─────────────────────────────────────────────────────────────────────────────

/// Regions whose projected centroid lies in the rectangle.
fn hit_regions(rect: &BrushRect, projection: &MapProjection) -> HashSet<RegionId> {
    projection
        .iter()
        .filter(|(_, r)| rect.contains(r.centroid))
        .map(|(id, _)| id)
        .collect()
}

/// State codes of every region whose centroid lies in the rectangle.
fn hit_state_codes(
    rect: &BrushRect,
    dataset: &Dataset,
    projection: &MapProjection,
) -> HashSet<String> {
    hit_regions(rect, projection)
        .into_iter()
        .filter_map(|id| dataset.get(id).map(|r| r.state_code.clone()))
        .collect()
}

/// Every region belonging to one of the given states.
fn regions_in_states(dataset: &Dataset, codes: &HashSet<String>) -> HashSet<RegionId> {
    dataset
        .iter()
        .filter(|(_, r)| codes.contains(&r.state_code))
        .map(|(id, _)| id)
        .collect()
}

fn sorted(ids: &HashSet<RegionId>) -> Vec<RegionId> {
    let mut v: Vec<RegionId> = ids.iter().copied().collect();
    v.sort_unstable();
    v
}
