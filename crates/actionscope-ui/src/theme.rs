// crates/actionscope-ui/src/theme.rs
use egui::style::WidgetVisuals;
use egui::{Color32, Context, CornerRadius, Stroke, Visuals};

// ── Palette ──────────────────────────────────────────────────────────────────
pub const ACCENT:        Color32 = Color32::from_rgb( 90, 170, 255);
pub const ACCENT_DIM:    Color32 = Color32::from_rgb( 40, 100, 170);
pub const ACCENT_HOVER:  Color32 = Color32::from_rgb(140, 200, 255);

pub const DARK_BG_0:     Color32 = Color32::from_rgb( 14,  14,  16);
pub const DARK_BG_1:     Color32 = Color32::from_rgb( 20,  20,  24);
pub const DARK_BG_2:     Color32 = Color32::from_rgb( 28,  28,  34);
pub const DARK_BG_3:     Color32 = Color32::from_rgb( 38,  38,  46);
pub const DARK_BG_4:     Color32 = Color32::from_rgb( 50,  50,  60);

pub const DARK_TEXT:     Color32 = Color32::from_rgb(220, 220, 230);
pub const DARK_TEXT_DIM: Color32 = Color32::from_rgb(120, 120, 138);
pub const DARK_BORDER:   Color32 = Color32::from_rgb( 55,  55,  68);

pub const ERROR_RED:     Color32 = Color32::from_rgb(220,  80,  70);

// One color per recording, cycled. Same order as the plotting library the
// datasets were first explored with, so screenshots stay comparable.
const SERIES: [Color32; 10] = [
    Color32::from_rgb( 99, 110, 250),
    Color32::from_rgb(239,  85,  59),
    Color32::from_rgb(  0, 204, 150),
    Color32::from_rgb(171,  99, 250),
    Color32::from_rgb(255, 161,  90),
    Color32::from_rgb( 25, 211, 243),
    Color32::from_rgb(255, 102, 146),
    Color32::from_rgb(182, 232, 128),
    Color32::from_rgb(255, 151, 255),
    Color32::from_rgb(254, 203,  82),
];

pub fn series_color(index: usize) -> Color32 {
    SERIES[index % SERIES.len()]
}

/// Fill, border and text of one widget interaction state.
struct Tone {
    fill:   Color32,
    border: Color32,
    text:   Color32,
    text_w: f32,
}

// noninteractive, inactive, hovered, active
const TONES: [Tone; 4] = [
    Tone { fill: DARK_BG_2,  border: DARK_BORDER, text: DARK_TEXT_DIM,   text_w: 1.0 },
    Tone { fill: DARK_BG_3,  border: DARK_BORDER, text: DARK_TEXT,       text_w: 1.0 },
    Tone { fill: DARK_BG_4,  border: ACCENT_DIM,  text: ACCENT_HOVER,    text_w: 1.5 },
    Tone { fill: ACCENT_DIM, border: ACCENT,      text: Color32::WHITE,  text_w: 2.0 },
];

fn apply(w: &mut WidgetVisuals, tone: &Tone) {
    w.bg_fill       = tone.fill;
    w.weak_bg_fill  = tone.fill;
    w.bg_stroke     = Stroke::new(1.0, tone.border);
    w.fg_stroke     = Stroke::new(tone.text_w, tone.text);
    w.corner_radius = CornerRadius::same(3);
}

fn dashboard_visuals() -> Visuals {
    let mut v = Visuals::dark();
    v.panel_fill          = DARK_BG_1;
    v.window_fill         = DARK_BG_2;
    v.faint_bg_color      = DARK_BG_0;
    v.extreme_bg_color    = DARK_BG_0;
    v.window_stroke       = Stroke::new(1.0, DARK_BORDER);
    v.selection.bg_fill   = ACCENT_DIM;
    v.selection.stroke    = Stroke::new(1.0, Color32::WHITE);
    v.hyperlink_color     = ACCENT_HOVER;
    v.override_text_color = Some(DARK_TEXT);

    let w = &mut v.widgets;
    let states = [&mut w.noninteractive, &mut w.inactive, &mut w.hovered, &mut w.active];
    for (state, tone) in states.into_iter().zip(TONES.iter()) {
        apply(state, tone);
    }
    v
}

pub fn configure_style(ctx: &Context) {
    ctx.style_mut(|style| {
        style.spacing.item_spacing     = egui::vec2(8.0, 6.0);
        style.spacing.button_padding   = egui::vec2(8.0, 4.0);
        style.spacing.interact_size.y  = 22.0;
        style.spacing.scroll.bar_width = 8.0;
        style.visuals = dashboard_visuals();
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn series_colors_cycle() {
        assert_eq!(series_color(0), series_color(SERIES.len()));
        assert_ne!(series_color(0), series_color(1));
    }

    #[test]
    fn every_interaction_state_gets_its_tone() {
        let v = dashboard_visuals();
        assert_eq!(v.widgets.noninteractive.bg_fill, DARK_BG_2);
        assert_eq!(v.widgets.inactive.fg_stroke.color, DARK_TEXT);
        assert_eq!(v.widgets.hovered.fg_stroke.color, ACCENT_HOVER);
        assert_eq!(v.widgets.active.bg_stroke.color, ACCENT);
        assert_eq!(v.panel_fill, DARK_BG_1);
    }
}
