//! Map panel: region painting, brush gestures, zoom/pan, tooltips.

use eframe::egui::epaint::{PathShape, PathStroke};
use eframe::egui::{self, Color32, Pos2, Shape, Stroke};

use crate::aggregate::format_money;
use crate::color::{color_of, PaintContext};
use crate::data::RegionId;
use crate::projection::{MapProjection, ViewportSize};
use crate::selection::{AggregationLevel, BrushRect, InteractionMode, SelectionId};

use super::GeoScopeApp;

impl GeoScopeApp {
    /// Mode / active-selection / level toggles above the map.
    pub(super) fn ui_mode_toggles(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            let mode = self.engine.mode();
            if ui
                .selectable_label(mode == InteractionMode::Navigate, "Navigate")
                .clicked()
            {
                self.engine.set_mode(InteractionMode::Navigate);
            }
            if ui
                .selectable_label(mode == InteractionMode::Select, "Select")
                .clicked()
            {
                self.engine.set_mode(InteractionMode::Select);
            }

            if self.engine.mode() == InteractionMode::Select {
                ui.separator();
                let active = self.engine.active();
                for id in SelectionId::both() {
                    let label = format!("Brush {}", id.as_u8());
                    if ui.selectable_label(active == id, label).clicked() {
                        self.engine.set_active(id);
                    }
                }

                ui.separator();
                let level = self.engine.level();
                if ui
                    .selectable_label(level == AggregationLevel::County, "County")
                    .clicked()
                {
                    self.engine.set_level(AggregationLevel::County);
                }
                if ui
                    .selectable_label(level == AggregationLevel::State, "State")
                    .clicked()
                {
                    self.engine.set_level(AggregationLevel::State);
                }

                ui.separator();
                for id in SelectionId::both() {
                    if ui.button(format!("Clear {}", id.as_u8())).clicked() {
                        self.engine.clear_selection(id);
                    }
                }
            } else {
                ui.separator();
                if ui.button("Reset view").clicked() {
                    self.engine.reset_zoom();
                }
            }
        });
    }

    /// The map itself: pointer input, region fills, brush overlay, tooltip.
    pub(super) fn ui_map_panel(&mut self, ui: &mut egui::Ui) {
        let (response, painter) =
            ui.allocate_painter(ui.available_size(), egui::Sense::click_and_drag());
        let rect = response.rect;
        let viewport = ViewportSize::new(rect.width() as f64, rect.height() as f64);

        // Projection cache: recompute only on viewport resize.
        let stale = self
            .projection
            .as_ref()
            .map(|p| p.viewport() != viewport)
            .unwrap_or(true);
        if stale {
            self.projection = Some(MapProjection::project(&self.dataset, viewport));
        }
        let projection = match self.projection.take() {
            Some(p) => p,
            None => return,
        };

        // Pointer positions are converted through the inverse zoom transform
        // so hit-testing always happens in projection space.
        let input_zoom = self.engine.zoom();
        let to_map = |pos: Pos2| {
            input_zoom.invert([(pos.x - rect.min.x) as f64, (pos.y - rect.min.y) as f64])
        };

        match self.engine.mode() {
            InteractionMode::Select => {
                if response.drag_started() {
                    if let Some(pos) = response.interact_pointer_pos() {
                        self.engine.begin_gesture(to_map(pos));
                    }
                }
                if response.dragged() {
                    if let Some(pos) = response.interact_pointer_pos() {
                        self.engine.update_gesture(to_map(pos));
                    }
                }
                if response.drag_stopped() {
                    self.engine.end_gesture(&self.dataset, &projection);
                }
            }
            InteractionMode::Navigate => {
                if response.dragged() {
                    let d = response.drag_delta();
                    self.engine.pan_by([d.x as f64, d.y as f64], viewport);
                }
                if response.hovered() {
                    let scroll = ui.input(|i| i.raw_scroll_delta.y);
                    if scroll != 0.0 {
                        if let Some(pos) = response.hover_pos() {
                            let focus =
                                [(pos.x - rect.min.x) as f64, (pos.y - rect.min.y) as f64];
                            let factor = 1.0 + scroll as f64 * 0.002;
                            self.engine.zoom_by(factor, focus, viewport);
                        }
                    }
                }
            }
        }

        // Paint with the post-input transform so pan/zoom feels immediate.
        let zoom = self.engine.zoom();
        let to_screen = |p: [f64; 2]| {
            let s = zoom.apply(p);
            Pos2::new(rect.min.x + s[0] as f32, rect.min.y + s[1] as f32)
        };

        let filtered = self.filter.filtered_set(&self.dataset);
        let candidate = if self.engine.gesture_rect().is_some() {
            Some(self.engine.candidate_regions(&self.dataset, &projection))
        } else {
            None
        };
        let sel1 = self.engine.region_ids(SelectionId::One);
        let sel2 = self.engine.region_ids(SelectionId::Two);
        // During a drag the active selection is painted from the live
        // candidate set instead of its committed set.
        let (set1, set2) = match (&candidate, self.engine.active()) {
            (Some(c), SelectionId::One) => (c, sel2),
            (Some(c), SelectionId::Two) => (sel1, c),
            (None, _) => (sel1, sel2),
        };
        let paint_ctx = PaintContext {
            filtered: &filtered,
            filter_emphasis: self.filter_emphasis,
            selection1: set1,
            selection2: set2,
            colors: &self.colors,
        };

        for (id, region) in projection.iter() {
            let fill = color_of(id, &paint_ctx);
            for ring in &region.rings {
                if ring.len() < 3 {
                    continue;
                }
                let points: Vec<Pos2> = ring.iter().map(|p| to_screen(*p)).collect();
                painter.add(Shape::Path(PathShape {
                    points,
                    closed: true,
                    fill,
                    stroke: PathStroke::new(0.5, self.colors.outline),
                }));
            }
        }

        // Brush overlay: the in-progress rectangle, or the active
        // selection's last committed one.
        let overlay = self
            .engine
            .gesture_rect()
            .or(self.engine.selection(self.engine.active()).last_rect);
        if let Some(brush) = overlay {
            self.paint_brush_rect(&painter, brush, &to_screen);
        }

        if self.features.tooltips {
            if let Some(pos) = response.hover_pos() {
                if let Some(id) = region_at(&projection, to_map(pos)) {
                    if let Some(region) = self.dataset.get(id).cloned() {
                        response.clone().on_hover_ui_at_pointer(|ui| {
                            ui.strong(&region.name);
                            ui.label(format!(
                                "Average price: {}",
                                format_money(region.metrics.avg_price)
                            ));
                            ui.label(format!(
                                "Total price: {}",
                                format_money(region.metrics.total_price)
                            ));
                            ui.label(format!(
                                "Transactions: {}",
                                region.metrics.total_transactions
                            ));
                        });
                    }
                }
            }
        }

        self.projection = Some(projection);
    }

    fn paint_brush_rect(
        &self,
        painter: &egui::Painter,
        brush: BrushRect,
        to_screen: &dyn Fn([f64; 2]) -> Pos2,
    ) {
        let min = to_screen([brush.x0, brush.y0]);
        let max = to_screen([brush.x1, brush.y1]);
        let r = egui::Rect::from_min_max(min, max);
        painter.add(Shape::rect_filled(
            r,
            egui::CornerRadius::ZERO,
            Color32::from_rgba_unmultiplied(120, 120, 120, 40),
        ));
        painter.add(Shape::rect_stroke(
            r,
            egui::CornerRadius::ZERO,
            Stroke::new(1.0, self.colors.outline),
            egui::StrokeKind::Inside,
        ));
    }
}

/// Find the region whose outline contains the point (projection space).
fn region_at(projection: &MapProjection, p: [f64; 2]) -> Option<RegionId> {
    projection
        .iter()
        .find(|(_, region)| region.rings.iter().any(|ring| point_in_ring(ring, p)))
        .map(|(id, _)| id)
}

/// Ray-casting point-in-polygon test over one ring.
fn point_in_ring(ring: &[[f64; 2]], p: [f64; 2]) -> bool {
    let mut inside = false;
    let n = ring.len();
    if n < 3 {
        return false;
    }
    let mut j = n - 1;
    for i in 0..n {
        let (a, b) = (ring[i], ring[j]);
        if (a[1] > p[1]) != (b[1] > p[1]) {
            let x = (b[0] - a[0]) * (p[1] - a[1]) / (b[1] - a[1]) + a[0];
            if p[0] < x {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}
