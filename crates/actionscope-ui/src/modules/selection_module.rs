// crates/actionscope-ui/src/modules/selection_module.rs
//
// Right-hand panel shown in click-enabled mode: the clicked bucket's record
// plus the video monitor.
use super::DashboardModule;
use actionscope_core::commands::DashboardCommand;
use actionscope_core::helpers::time::{format_range, format_timecode};
use actionscope_core::view::DashboardView;
use crate::theme::{ACCENT, DARK_BG_2, DARK_BORDER, DARK_TEXT_DIM, ERROR_RED};
use egui::{Color32, Pos2, Rect, RichText, Sense, Stroke, Ui, Vec2};

const MONITOR_RATIO: f32 = 16.0 / 9.0;

pub struct SelectionModule {
    /// Latest monitor frame, set by app.rs each frame before ui() is called.
    pub current_frame: Option<egui::TextureHandle>,
    pub frame_ts:      f64,
    pub playing:       bool,
    /// Last media error, if any.
    pub status:        Option<String>,
}

impl SelectionModule {
    pub fn new() -> Self {
        Self { current_frame: None, frame_ts: 0.0, playing: false, status: None }
    }

    fn monitor(&self, ui: &mut Ui) {
        let w = ui.available_width();
        let h = w / MONITOR_RATIO;
        let (canvas, _) = ui.allocate_exact_size(Vec2::new(w, h), Sense::hover());
        let painter = ui.painter();

        let border = if self.playing {
            Stroke::new(1.5, ACCENT.gamma_multiply(0.55))
        } else {
            Stroke::new(1.0, DARK_BORDER)
        };
        painter.rect_stroke(canvas.expand(1.0), 4.0, border, egui::StrokeKind::Outside);
        painter.rect_filled(canvas, 3.0, Color32::BLACK);

        match &self.current_frame {
            Some(tex) => {
                // Letterbox into the canvas, keeping the frame's aspect.
                let [fw, fh] = tex.size();
                let ratio = fw as f32 / fh.max(1) as f32;
                let size = if w / ratio <= h { Vec2::new(w, w / ratio) } else { Vec2::new(h * ratio, h) };
                painter.image(
                    tex.id(),
                    Rect::from_center_size(canvas.center(), size),
                    Rect::from_min_max(Pos2::ZERO, Pos2::new(1.0, 1.0)),
                    Color32::WHITE,
                );
            }
            None => {
                painter.text(canvas.center(), egui::Align2::CENTER_CENTER,
                    "NO SIGNAL", egui::FontId::monospace(14.0), Color32::from_gray(40));
            }
        }
    }
}

impl Default for SelectionModule {
    fn default() -> Self { Self::new() }
}

impl DashboardModule for SelectionModule {
    fn name(&self) -> &str { "Selection" }

    fn ui(&mut self, ui: &mut Ui, view: &DashboardView, cmd: &mut Vec<DashboardCommand>) {
        egui::Frame::new()
            .fill(DARK_BG_2)
            .inner_margin(egui::Margin { left: 8, right: 8, top: 5, bottom: 5 })
            .show(ui, |ui| {
                ui.label(RichText::new(format!("📺 {}", self.name())).size(12.0).strong());
            });

        ui.add_space(6.0);

        let Some(bucket) = &view.bucket else {
            ui.label(RichText::new("Click a bar to inspect its bucket.").color(DARK_TEXT_DIM));
            return;
        };

        egui::Grid::new("bucket_record")
            .num_columns(2)
            .spacing([10.0, 4.0])
            .show(ui, |ui| {
                ui.label(RichText::new("Range").color(DARK_TEXT_DIM));
                ui.label(RichText::new(format_range(bucket.range)).monospace());
                ui.end_row();

                ui.label(RichText::new("Count").color(DARK_TEXT_DIM));
                ui.label(RichText::new(bucket.count.to_string()).monospace());
                ui.end_row();

                ui.label(RichText::new("File").color(DARK_TEXT_DIM));
                ui.label(&bucket.file);
                ui.end_row();
            });

        ui.add_space(8.0);
        self.monitor(ui);

        ui.horizontal(|ui| {
            ui.label(RichText::new(format_timecode(self.frame_ts)).monospace().color(ACCENT));
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button("Clear").clicked() {
                    cmd.push(DashboardCommand::ClearSelection);
                }
                if ui.add_enabled(self.playing, egui::Button::new("⏹ Stop")).clicked() {
                    cmd.push(DashboardCommand::StopPlayback);
                }
            });
        });

        ui.label(
            RichText::new("Video selection not implemented: every bucket plays the sample clip.")
                .size(11.0)
                .italics()
                .color(DARK_TEXT_DIM),
        );

        if let Some(msg) = &self.status {
            ui.add_space(4.0);
            ui.label(RichText::new(msg).color(ERROR_RED));
        }
    }
}
