// crates/actionscope-ui/src/modules/histogram_module.rs
//
// Central chart. Binning and hit-testing live in actionscope_core::histogram;
// this module only paints the BarSpecs and turns a plot click into a
// ClickBucket command.

use super::DashboardModule;
use actionscope_core::commands::DashboardCommand;
use actionscope_core::histogram::Histogram;
use actionscope_core::view::DashboardView;
use crate::theme::{series_color, DARK_BG_2, DARK_TEXT_DIM};
use egui::{RichText, Ui};
use egui_plot::{uniform_grid_spacer, Bar, BarChart, Legend, Plot};

/// Fraction of the slot a bar fills; the rest is the gap between bars.
const BAR_FILL: f64 = 0.9;

pub struct HistogramModule;

impl HistogramModule {
    fn charts(hist: &Histogram) -> Vec<BarChart> {
        let bars = hist.bars();
        hist.series().iter().enumerate().map(|(si, series)| {
            let color = series_color(si);
            let series_bars: Vec<Bar> = bars.iter()
                .filter(|b| b.series == si)
                .map(|b| {
                    let bucket = &hist.buckets()[b.bucket];
                    Bar::new(b.center, b.height)
                        .width(b.width * BAR_FILL)
                        .base_offset(b.base)
                        .fill(color)
                        .name(format!("{}  [{:.2}, {:.2})", series.file, bucket.low, bucket.high))
                })
                .collect();
            BarChart::new(series_bars).name(&series.file).color(color)
        }).collect()
    }
}

impl DashboardModule for HistogramModule {
    fn name(&self) -> &str { "Histogram" }

    fn ui(&mut self, ui: &mut Ui, view: &DashboardView, cmd: &mut Vec<DashboardCommand>) {
        let hist = &view.histogram;

        egui::Frame::new()
            .fill(DARK_BG_2)
            .inner_margin(egui::Margin { left: 8, right: 8, top: 5, bottom: 5 })
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    ui.label(RichText::new(&view.caption).size(14.0).strong());
                    if view.click_enabled {
                        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                            ui.label(RichText::new("click a bar to inspect it").size(11.0).color(DARK_TEXT_DIM));
                        });
                    }
                });
            });

        if hist.is_empty() {
            ui.centered_and_justified(|ui| {
                ui.label(RichText::new("No rows recorded for this action").color(DARK_TEXT_DIM));
            });
            return;
        }

        let y_top = hist.y_max() as f64 * 1.1 + 1.0;
        let mut plot = Plot::new(self.name())
            .legend(Legend::default())
            .x_axis_label("time")
            .y_axis_label("count")
            .include_y(0.0)
            .include_y(y_top)
            .allow_drag(false)
            .allow_zoom(false)
            .allow_scroll(false)
            .allow_boxed_zoom(false);
        if !hist.mode().is_stacked() {
            // Integer-step grid on both axes, time ticks every unit.
            plot = plot
                .x_grid_spacer(uniform_grid_spacer(|_| [1.0, 5.0, 10.0]))
                .y_grid_spacer(uniform_grid_spacer(|_| [1.0, 5.0, 10.0]));
        }

        let charts = Self::charts(hist);
        let resp = plot.show(ui, |plot_ui| {
            for chart in charts {
                plot_ui.bar_chart(chart);
            }
            plot_ui.pointer_coordinate()
        });

        if !view.click_enabled || !resp.response.clicked() {
            return;
        }
        if let Some(p) = resp.inner {
            match hist.hit_test(p.x, p.y) {
                Some(click) => cmd.push(DashboardCommand::ClickBucket(click)),
                None        => tracing::debug!("[histogram] click at ({:.2}, {:.2}) hit no bar", p.x, p.y),
            }
        }
    }
}
