// crates/actionscope-ui/src/modules/sidebar.rs
use super::DashboardModule;
use actionscope_core::commands::DashboardCommand;
use actionscope_core::helpers::time::format_range;
use actionscope_core::histogram::HistogramMode;
use actionscope_core::view::DashboardView;
use crate::helpers::format::{fit_label, plural};
use crate::theme::{series_color, DARK_BG_2, DARK_TEXT_DIM};
use egui::{RichText, Ui};

pub struct SidebarModule;

impl DashboardModule for SidebarModule {
    fn name(&self) -> &str { "Controls" }

    fn ui(&mut self, ui: &mut Ui, view: &DashboardView, cmd: &mut Vec<DashboardCommand>) {
        // ── Header ───────────────────────────────────────────────────────────
        egui::Frame::new()
            .fill(DARK_BG_2)
            .inner_margin(egui::Margin { left: 8, right: 8, top: 5, bottom: 5 })
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    ui.label(RichText::new(format!("🎛 {}", self.name())).size(12.0).strong());
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.small_button("⟳").on_hover_text("Reload data from disk").clicked() {
                            cmd.push(DashboardCommand::ReloadData);
                        }
                    });
                });
            });

        ui.add_space(6.0);

        // ── Action selector ──────────────────────────────────────────────────
        ui.label(RichText::new("Select action to display").size(11.0).color(DARK_TEXT_DIM));
        let width   = ui.available_width();
        let current = view.options.iter()
            .find(|o| o.id == view.selected)
            .map(|o| o.label.as_str())
            .unwrap_or("");

        let mut picked = view.selected;
        egui::ComboBox::from_id_salt("action_selector")
            .width(width)
            .selected_text(fit_label(current, width - 24.0))
            .show_ui(ui, |ui| {
                for opt in &view.options {
                    ui.selectable_value(&mut picked, opt.id, fit_label(&opt.label, width));
                }
            });
        if picked != view.selected {
            cmd.push(DashboardCommand::SelectAction(picked));
        }

        ui.add_space(8.0);
        ui.separator();

        // ── Selection summary ────────────────────────────────────────────────
        let hist = &view.histogram;
        egui::Grid::new("selection_summary")
            .num_columns(2)
            .spacing([10.0, 4.0])
            .show(ui, |ui| {
                ui.label(RichText::new("Rows").color(DARK_TEXT_DIM));
                ui.label(view.selection.len().to_string());
                ui.end_row();

                ui.label(RichText::new("Time").color(DARK_TEXT_DIM));
                ui.label(view.selection.time_range().map(format_range).unwrap_or_else(|| "–".into()));
                ui.end_row();

                ui.label(RichText::new("Binning").color(DARK_TEXT_DIM));
                ui.label(match hist.mode() {
                    HistogramMode::GroupedCount { bins }  => format!("grouped, {bins} bins"),
                    HistogramMode::StackedWidth { width } => format!("stacked, width {width}"),
                });
                ui.end_row();
            });

        ui.add_space(8.0);
        ui.separator();

        // ── Recordings (legend) ──────────────────────────────────────────────
        ui.label(RichText::new(plural(hist.series().len(), "recording")).size(11.0).color(DARK_TEXT_DIM));
        egui::ScrollArea::vertical().auto_shrink([false, true]).show(ui, |ui| {
            for (i, series) in hist.series().iter().enumerate() {
                let n: u64 = series.counts.iter().sum();
                ui.horizontal(|ui| {
                    let (rect, _) = ui.allocate_exact_size(egui::vec2(10.0, 10.0), egui::Sense::hover());
                    ui.painter().rect_filled(rect, 2.0, series_color(i));
                    ui.label(fit_label(&series.file, width - 70.0))
                        .on_hover_text(&series.file);
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.label(RichText::new(n.to_string()).monospace().color(DARK_TEXT_DIM));
                    });
                });
            }
        });
    }
}
