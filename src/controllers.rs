//! Programmatic control of a running geoscope from outside the UI thread.
//!
//! Controllers follow the request/apply pattern: external code records a
//! request under a mutex, and the UI thread applies all pending requests at
//! the start of its next frame. Commit listeners registered through
//! [`SelectionController::subscribe`] receive every [`SelectionCommit`] the
//! engine produces.

use std::sync::mpsc::{Receiver, Sender};
use std::sync::{Arc, Mutex};

use crate::data::Metric;
use crate::selection::{AggregationLevel, InteractionMode, SelectionCommit, SelectionId};

// ─────────────────────────────────────────────────────────────────────────────
// SelectionController
// ─────────────────────────────────────────────────────────────────────────────

/// Control interaction mode, aggregation level, the active selection, and
/// clears; subscribe to commits.
#[derive(Clone, Default)]
pub struct SelectionController {
    pub(crate) inner: Arc<Mutex<SelectionCtrlInner>>, // crate-visible for the UI
}

#[derive(Default)]
pub(crate) struct SelectionCtrlInner {
    pub(crate) mode_request: Option<InteractionMode>,
    pub(crate) level_request: Option<AggregationLevel>,
    pub(crate) active_request: Option<SelectionId>,
    pub(crate) clear_requests: Vec<SelectionId>,
    pub(crate) listeners: Vec<Sender<SelectionCommit>>,
}

impl SelectionController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request switching between Navigate and Select (applied next frame).
    pub fn set_mode(&self, mode: InteractionMode) {
        self.inner.lock().unwrap().mode_request = Some(mode);
    }

    /// Request switching the aggregation level (applied next frame).
    pub fn set_level(&self, level: AggregationLevel) {
        self.inner.lock().unwrap().level_request = Some(level);
    }

    /// Request making one selection the active gesture receiver.
    pub fn set_active(&self, id: SelectionId) {
        self.inner.lock().unwrap().active_request = Some(id);
    }

    /// Request clearing one selection.
    pub fn clear(&self, id: SelectionId) {
        self.inner.lock().unwrap().clear_requests.push(id);
    }

    /// Subscribe to selection commits as they happen.
    pub fn subscribe(&self) -> Receiver<SelectionCommit> {
        let (tx, rx) = std::sync::mpsc::channel();
        self.inner.lock().unwrap().listeners.push(tx);
        rx
    }

    /// Internal: forward a commit to all live listeners.
    pub(crate) fn publish(&self, commit: &SelectionCommit) {
        let mut inner = self.inner.lock().unwrap();
        inner.listeners.retain(|s| s.send(commit.clone()).is_ok());
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// FilterController
// ─────────────────────────────────────────────────────────────────────────────

/// Control the range filter and filter emphasis from outside the UI.
#[derive(Clone, Default)]
pub struct FilterController {
    pub(crate) inner: Arc<Mutex<FilterCtrlInner>>, // crate-visible for the UI
}

#[derive(Default)]
pub(crate) struct FilterCtrlInner {
    pub(crate) range_requests: Vec<(Metric, [f64; 2])>,
    pub(crate) emphasis_request: Option<bool>,
    pub(crate) reset_requested: bool,
}

impl FilterController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request replacing one metric's `[min, max]` range (clamped on apply).
    pub fn set_range(&self, metric: Metric, range: [f64; 2]) {
        self.inner
            .lock()
            .unwrap()
            .range_requests
            .push((metric, range));
    }

    /// Request toggling the filtered-subset emphasis on the map.
    pub fn set_emphasis(&self, on: bool) {
        self.inner.lock().unwrap().emphasis_request = Some(on);
    }

    /// Request resetting every range to its global bounds.
    pub fn reset(&self) {
        self.inner.lock().unwrap().reset_requested = true;
    }
}
