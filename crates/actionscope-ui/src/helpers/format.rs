// crates/actionscope-ui/src/helpers/format.rs
//
// UI-layer string utilities. Time and range formatting lives in
// actionscope_core::helpers::time; this module only deals with fitting text
// into panels.

/// Truncates `text` to fit within `max_px` using a per-character width
/// heuristic (≈ 6.5 px per char at the default proportional size). Appends
/// "…" when truncated. Avoids egui font measurement, which needs `&mut Fonts`.
///
/// Used for action labels in the sidebar selector and recording names in the
/// legend list.
pub fn fit_label(text: &str, max_px: f32) -> String {
    const AVG_CHAR_PX: f32 = 6.5;
    let max_chars = (max_px / AVG_CHAR_PX).max(0.0) as usize;
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    if max_chars == 0 {
        return String::new();
    }
    text.chars().take(max_chars - 1).collect::<String>() + "…"
}

/// `1 row`, `3 rows`.
pub fn plural(n: usize, noun: &str) -> String {
    if n == 1 { format!("1 {noun}") } else { format!("{n} {noun}s") }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_text_unchanged() {
        assert_eq!(fit_label("Walk", 200.0), "Walk");
    }

    #[test]
    fn zero_budget_returns_empty() {
        assert_eq!(fit_label("Walk", 0.0), "");
    }

    #[test]
    fn long_text_gets_ellipsis_within_budget() {
        let out = fit_label("subject_07_treadmill_session", 39.0);
        assert_eq!(out.chars().count(), 6);
        assert!(out.ends_with('…'));
    }

    #[test]
    fn plural_forms() {
        assert_eq!(plural(1, "row"), "1 row");
        assert_eq!(plural(0, "row"), "0 rows");
        assert_eq!(plural(12, "recording"), "12 recordings");
    }
}
