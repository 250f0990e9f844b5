// crates/actionscope-core/src/filter.rs
//
// Action filter: every row whose action_id matches, across all recordings,
// tagged with the recording it came from.
//
// The store is only ever borrowed. Output rows are fresh copies, so repeated
// filters over the cached store with different ids never see each other's
// tagging.

use crate::catalog::ActionId;
use crate::recording::RecordingStore;

#[derive(Clone, Debug, PartialEq)]
pub struct SelectedRow {
    pub time:      f64,
    pub action_id: ActionId,
    /// Name of the recording this row was copied from.
    pub file:      String,
    /// Aligned with `Selection::columns()`. `None` where the source
    /// recording has no such column.
    pub extra:     Vec<Option<String>>,
}

/// Concatenated, tagged rows for one action id.
#[derive(Clone, Debug, PartialEq)]
pub struct Selection {
    action:  ActionId,
    columns: Vec<String>,
    rows:    Vec<SelectedRow>,
}

impl Selection {
    pub fn action(&self) -> ActionId { self.action }

    /// Union of every recording's pass-through columns, first-seen order.
    pub fn columns(&self) -> &[String] { &self.columns }

    pub fn rows(&self) -> &[SelectedRow] { &self.rows }

    pub fn len(&self) -> usize { self.rows.len() }

    pub fn is_empty(&self) -> bool { self.rows.is_empty() }

    /// Distinct `file` values in row order.
    pub fn files(&self) -> Vec<&str> {
        let mut out: Vec<&str> = Vec::new();
        for row in &self.rows {
            if !out.contains(&row.file.as_str()) {
                out.push(&row.file);
            }
        }
        out
    }

    /// (min, max) over finite times, or None when there are none.
    pub fn time_range(&self) -> Option<(f64, f64)> {
        self.rows.iter()
            .map(|r| r.time)
            .filter(|t| t.is_finite())
            .fold(None, |acc, t| match acc {
                None             => Some((t, t)),
                Some((lo, hi))   => Some((lo.min(t), hi.max(t))),
            })
    }
}

/// Select and tag the rows for `action` from every recording in store order.
/// No match anywhere is an empty selection, not an error.
pub fn filter_by_action(store: &RecordingStore, action: impl Into<ActionId>) -> Selection {
    let action = action.into();

    let mut columns: Vec<String> = Vec::new();
    for rec in store.iter() {
        for c in rec.columns() {
            if !columns.contains(c) {
                columns.push(c.clone());
            }
        }
    }

    let mut rows = Vec::new();
    for rec in store.iter() {
        // Position of each union column inside this recording's `extra`.
        let slots: Vec<Option<usize>> = columns.iter()
            .map(|c| rec.columns().iter().position(|rc| rc == c))
            .collect();

        rows.extend(rec.rows().iter()
            .filter(|r| r.action_id == action)
            .map(|r| SelectedRow {
                time:      r.time,
                action_id: r.action_id,
                file:      rec.name().to_string(),
                extra:     slots.iter()
                    .map(|s| s.map(|i| r.extra[i].clone()))
                    .collect(),
            }));
    }

    tracing::debug!("action {action}: {} rows from {} recordings", rows.len(), store.len());
    Selection { action, columns, rows }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recording::{Recording, Row};

    fn row(time: f64, action: i64) -> Row {
        Row { time, action_id: ActionId(action), extra: Vec::new() }
    }

    fn store_ab() -> RecordingStore {
        RecordingStore::from_recordings(vec![
            Recording::new("A", Vec::new(), vec![row(1.0, 1), row(2.0, 2)]),
            Recording::new("B", Vec::new(), vec![row(1.0, 1)]),
        ]).unwrap()
    }

    #[test]
    fn rows_are_tagged_in_store_order() {
        let sel = filter_by_action(&store_ab(), 1u32);
        let tagged: Vec<_> = sel.rows().iter()
            .map(|r| (r.time, r.action_id, r.file.as_str()))
            .collect();
        assert_eq!(tagged, vec![(1.0, ActionId(1), "A"), (1.0, ActionId(1), "B")]);
    }

    #[test]
    fn only_matching_rows_and_sources_survive() {
        let sel = filter_by_action(&store_ab(), 2u32);
        assert_eq!(sel.len(), 1);
        assert!(sel.rows().iter().all(|r| r.action_id == ActionId(2)));
        assert_eq!(sel.files(), vec!["A"]);
    }

    #[test]
    fn no_match_is_empty_not_error() {
        let sel = filter_by_action(&store_ab(), 42u32);
        assert!(sel.is_empty());
        assert_eq!(sel.time_range(), None);
        assert_eq!(sel.action(), ActionId(42));
    }

    #[test]
    fn store_is_untouched_between_filters() {
        let store  = store_ab();
        let before = store.clone();
        let one = filter_by_action(&store, 1u32);
        let two = filter_by_action(&store, 2u32);
        assert_eq!(store, before);
        assert_eq!(one.len(), 2);
        assert_eq!(two.len(), 1);
        assert_eq!(filter_by_action(&store, 1u32), one);
    }

    #[test]
    fn columns_are_unioned_with_gaps() {
        let store = RecordingStore::from_recordings(vec![
            Recording::new("A", vec!["x".into()], vec![
                Row { time: 1.0, action_id: ActionId(1), extra: vec!["ax".into()] },
            ]),
            Recording::new("B", vec!["y".into(), "x".into()], vec![
                Row { time: 2.0, action_id: ActionId(1), extra: vec!["by".into(), "bx".into()] },
            ]),
        ]).unwrap();

        let sel = filter_by_action(&store, 1u32);
        assert_eq!(sel.columns(), &["x".to_string(), "y".to_string()]);
        assert_eq!(sel.rows()[0].extra, vec![Some("ax".to_string()), None]);
        assert_eq!(sel.rows()[1].extra, vec![Some("bx".to_string()), Some("by".to_string())]);
    }

    #[test]
    fn time_range_skips_nan() {
        let store = RecordingStore::from_recordings(vec![
            Recording::new("A", Vec::new(), vec![row(f64::NAN, 1), row(3.0, 1), row(-1.0, 1)]),
        ]).unwrap();
        assert_eq!(filter_by_action(&store, 1u32).time_range(), Some((-1.0, 3.0)));
    }
}
