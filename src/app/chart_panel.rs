//! Statistics chart: one bar chart per metric, one bar per selection.

use eframe::egui;
use egui_plot::{Bar, BarChart, Plot};

use crate::aggregate::format_value;
use crate::data::Metric;

use super::GeoScopeApp;

impl GeoScopeApp {
    pub(super) fn ui_chart_panel(&mut self, ui: &mut egui::Ui) {
        if !self.summary.has_data() {
            ui.centered_and_justified(|ui| {
                ui.label("Select regions on the map to see statistics");
            });
            return;
        }
        ui.columns(Metric::all().len(), |cols| {
            for (col, metric) in cols.iter_mut().zip(Metric::all()) {
                self.metric_chart(col, metric);
            }
        });
    }

    fn metric_chart(&self, ui: &mut egui::Ui, metric: Metric) {
        ui.vertical(|ui| {
            ui.strong(metric.label());

            let mut bars = Vec::new();
            for stat in self.summary.stats(metric) {
                let Some(value) = stat.value else { continue };
                let bar = Bar::new(stat.selection.as_u8() as f64, value)
                    .name(stat.label())
                    .width(0.6)
                    .fill(self.colors.for_selection(stat.selection));
                bars.push(bar);
            }

            Plot::new(format!("metric_chart_{}", metric.index()))
                .allow_scroll(false)
                .allow_zoom(false)
                .allow_drag(false)
                .allow_boxed_zoom(false)
                .show_x(false)
                .include_x(0.0)
                .include_x(3.0)
                .include_y(0.0)
                .x_axis_formatter(|x, _range| {
                    // Integer positions 1 and 2 carry the bars.
                    let v = x.value;
                    if (v - 1.0).abs() < 1e-9 {
                        "Sel 1".to_string()
                    } else if (v - 2.0).abs() < 1e-9 {
                        "Sel 2".to_string()
                    } else {
                        String::new()
                    }
                })
                .y_axis_formatter(move |y, _range| format_value(metric, y.value))
                .show(ui, |plot_ui| {
                    plot_ui.bar_chart(BarChart::new(metric.label(), bars));
                });
        });
    }
}
