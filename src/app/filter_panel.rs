//! Range-filter sidebar: one min/max pair per metric.

use eframe::egui::{self, DragValue};

use crate::aggregate::format_value;
use crate::data::Metric;

use super::GeoScopeApp;

impl GeoScopeApp {
    pub(super) fn ui_filter_panel(&mut self, ui: &mut egui::Ui) {
        ui.heading("Filters");
        ui.separator();

        for metric in Metric::all() {
            self.metric_range_controls(ui, metric);
            ui.separator();
        }

        ui.checkbox(&mut self.filter_emphasis, "Highlight filtered regions");

        ui.horizontal(|ui| {
            if ui.button("Reset filters").clicked() {
                self.filter.reset();
            }
        });

        let matched = self.filter.filtered_set(&self.dataset).len();
        ui.label(format!(
            "{matched} of {} regions match",
            self.dataset.len()
        ));
    }

    fn metric_range_controls(&mut self, ui: &mut egui::Ui, metric: Metric) {
        let [gmin, gmax] = self.filter.global_bounds(metric);
        let [mut lo, mut hi] = self.filter.range(metric);
        let speed = ((gmax - gmin) / 200.0).max(1.0);

        ui.label(metric.label());
        let mut changed = false;
        ui.horizontal(|ui| {
            ui.label("min");
            changed |= ui
                .add(DragValue::new(&mut lo).speed(speed).range(gmin..=gmax))
                .changed();
            ui.label("max");
            changed |= ui
                .add(DragValue::new(&mut hi).speed(speed).range(gmin..=gmax))
                .changed();
        });
        ui.small(format!(
            "{} – {}",
            format_value(metric, lo),
            format_value(metric, hi)
        ));
        if changed {
            self.filter.set_range(metric, [lo, hi]);
        }
    }
}
