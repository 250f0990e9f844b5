// crates/actionscope-core/src/selection.rs
//
// Selection bridge: turns a chart click `{x, y, group}` into the bucket
// summary shown next to the chart, plus a playback request.
//
// Playback always targets the one configured sample clip. Mapping a bucket
// (file + time range) to its own footage is not implemented; every request
// says so in the log instead of guessing a mapping.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::error::SelectionError;

/// Clicked-point payload as emitted by the chart: bucket center, bar count,
/// series (file) label.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PointClick {
    pub x:     f64,
    pub y:     f64,
    pub group: String,
}

impl PointClick {
    pub fn from_json(json: &str) -> Result<Self, SelectionError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Decode an optional click event.
///
/// No event, `null` and `[]` all mean "no selection" and come back as
/// `Ok(None)`, distinct from a real click at `{x: 0, y: 0, group: ""}`.
/// A list is unwrapped to its first point.
///
/// ```
/// use actionscope_core::selection::parse_click_event;
/// assert!(parse_click_event(None).unwrap().is_none());
/// assert!(parse_click_event(Some("[]")).unwrap().is_none());
/// let c = parse_click_event(Some(r#"{"x":0,"y":0,"group":""}"#)).unwrap().unwrap();
/// assert_eq!(c.x, 0.0);
/// ```
pub fn parse_click_event(event: Option<&str>) -> Result<Option<PointClick>, SelectionError> {
    let Some(raw) = event else { return Ok(None) };
    let point = match serde_json::from_str::<Value>(raw)? {
        Value::Null => return Ok(None),
        Value::Array(mut points) => {
            if points.is_empty() { return Ok(None); }
            points.swap_remove(0)
        }
        v @ Value::Object(_) => v,
        other => return Err(SelectionError::Shape(other.to_string())),
    };
    Ok(Some(serde_json::from_value(point)?))
}

/// What the selection panel displays for one clicked bar.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BucketSelection {
    pub range: (f64, f64),
    pub count: u64,
    pub file:  String,
}

impl BucketSelection {
    /// `range = x ± (width - 1) / 2`, `count = y`, `file = group`.
    /// Widths under one unit collapse to `(x, x)` rather than inverting.
    pub fn from_click(click: &PointClick, bucket_width: f64) -> Result<Self, SelectionError> {
        let half = ((bucket_width - 1.0) / 2.0).max(0.0);
        Self::from_bounds(click, (click.x - half, click.x + half))
    }

    /// Explicit `range`, `count = y`, `file = group`.
    pub fn from_bounds(click: &PointClick, range: (f64, f64)) -> Result<Self, SelectionError> {
        if !(click.y.is_finite() && click.y >= 0.0) {
            return Err(SelectionError::InvalidCount(click.y));
        }
        Ok(Self {
            range,
            count: click.y.round() as u64,
            file:  click.group.clone(),
        })
    }
}

/// A request to start the video monitor. Each click gets a fresh id so
/// frames from an earlier session can be told apart and dropped.
#[derive(Clone, Debug, PartialEq)]
pub struct PlaybackRequest {
    pub id:   Uuid,
    pub path: PathBuf,
}

impl PlaybackRequest {
    pub fn for_selection(selection: &BucketSelection, sample_clip: &Path) -> Self {
        tracing::warn!(
            "video selection not implemented: bucket {:.2}..{:.2} of {:?} plays the sample clip {}",
            selection.range.0, selection.range.1, selection.file, sample_clip.display(),
        );
        Self { id: Uuid::new_v4(), path: sample_clip.to_path_buf() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn width_four_click_maps_to_centered_range() {
        let click = PointClick { x: 10.0, y: 3.0, group: "A".into() };
        let sel = BucketSelection::from_click(&click, 4.0).unwrap();
        assert_eq!(sel, BucketSelection { range: (8.5, 11.5), count: 3, file: "A".into() });
    }

    #[test]
    fn zero_valued_click_is_a_real_selection() {
        let c = parse_click_event(Some(r#"{"x":0,"y":0,"group":""}"#)).unwrap();
        assert_eq!(c, Some(PointClick { x: 0.0, y: 0.0, group: String::new() }));
        assert_eq!(parse_click_event(Some("null")).unwrap(), None);
    }

    #[test]
    fn list_payload_takes_first_point() {
        let c = parse_click_event(Some(r#"[{"x":2,"y":1,"group":"B"},{"x":6,"y":2,"group":"A"}]"#))
            .unwrap()
            .unwrap();
        assert_eq!(c.group, "B");
    }

    #[test]
    fn malformed_payloads_are_errors() {
        assert!(matches!(parse_click_event(Some("{")), Err(SelectionError::Json(_))));
        assert!(matches!(parse_click_event(Some("42")), Err(SelectionError::Shape(_))));
        assert!(matches!(parse_click_event(Some(r#"{"x":1}"#)), Err(SelectionError::Json(_))));
    }

    #[test]
    fn negative_count_is_rejected() {
        let click = PointClick { x: 1.0, y: -1.0, group: "A".into() };
        assert!(matches!(
            BucketSelection::from_click(&click, 4.0),
            Err(SelectionError::InvalidCount(_))
        ));
    }

    #[test]
    fn playback_ignores_bucket_and_uses_sample_clip() {
        let sel = BucketSelection { range: (0.5, 3.5), count: 1, file: "A".into() };
        let a = PlaybackRequest::for_selection(&sel, Path::new("sample.mp4"));
        let b = PlaybackRequest::for_selection(&sel, Path::new("sample.mp4"));
        assert_eq!(a.path, PathBuf::from("sample.mp4"));
        assert_eq!(a.path, b.path);
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn sub_unit_width_never_inverts_the_range() {
        let click = PointClick { x: 0.125, y: 1.0, group: "A".into() };
        let sel = BucketSelection::from_click(&click, 0.25).unwrap();
        assert_eq!(sel.range, (0.125, 0.125));
    }
}
