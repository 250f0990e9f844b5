// crates/actionscope-core/src/helpers/time.rs
//
// Human-readable time strings for the selection panel and video monitor.

/// Format seconds as `MM:SS:FF` (minutes, seconds, frames at 30 fps).
///
/// Used by the monitor's timecode readout.
///
/// ```
/// use actionscope_core::helpers::time::format_timecode;
/// assert_eq!(format_timecode(0.0),  "00:00:00");
/// assert_eq!(format_timecode(61.5), "01:01:15");
/// ```
pub fn format_timecode(s: f64) -> String {
    let s  = s.max(0.0);
    let m  = (s / 60.0) as u32;
    let sc = (s % 60.0) as u32;
    let fr = ((s * 30.0) as u32) % 30;
    format!("{m:02}:{sc:02}:{fr:02}")
}

/// Format a bucket time range for display, trimming trailing zeros.
///
/// ```
/// use actionscope_core::helpers::time::format_range;
/// assert_eq!(format_range((8.5, 11.5)), "8.5 – 11.5");
/// assert_eq!(format_range((0.0, 3.0)),  "0 – 3");
/// assert_eq!(format_range((1.0 / 3.0, 1.0)), "0.333 – 1");
/// ```
pub fn format_range((low, high): (f64, f64)) -> String {
    format!("{} – {}", trim_number(low), trim_number(high))
}

fn trim_number(v: f64) -> String {
    let s = format!("{v:.3}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" { "0".to_string() } else { s.to_string() }
}
