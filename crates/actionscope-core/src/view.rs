// crates/actionscope-core/src/view.rs
//
// `render(state) -> view`: the whole dashboard recomputed from scratch on
// every UI frame. Only the two loads are memoized (SessionCache); filtering
// and binning are redone each pass and hold no state between passes.

use crate::cache::{DataSource, SessionCache};
use crate::catalog::ActionId;
use crate::config::DashboardConfig;
use crate::error::{DashboardError, LookupError, SelectionError};
use crate::filter::{filter_by_action, Selection};
use crate::histogram::Histogram;
use crate::selection::{BucketSelection, PointClick};

/// The little state the user's interactions leave behind.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DashboardState {
    /// None until the user picks; the first catalog entry is shown meanwhile.
    pub selected_action: Option<ActionId>,
    /// Last clicked bucket. Replaced by every click.
    pub bucket:          Option<BucketSelection>,
}

impl DashboardState {
    /// Switching action invalidates the bucket, which belonged to the old chart.
    pub fn select_action(&mut self, id: ActionId) {
        if self.selected_action != Some(id) {
            self.selected_action = Some(id);
            self.bucket = None;
        }
    }

    /// Record a click on `histogram`, the chart it was made on.
    pub fn select_bucket(
        &mut self,
        click:     &PointClick,
        histogram: &Histogram,
    ) -> Result<&BucketSelection, SelectionError> {
        let sel = histogram.select(click)?;
        Ok(self.bucket.insert(sel))
    }

    pub fn clear_bucket(&mut self) { self.bucket = None; }
}

/// One entry of the action selector: value is the id, label the name.
#[derive(Clone, Debug, PartialEq)]
pub struct ActionOption {
    pub id:    ActionId,
    pub label: String,
}

#[derive(Clone, Debug)]
pub struct DashboardView {
    pub options:       Vec<ActionOption>,
    pub selected:      ActionId,
    pub caption:       String,
    pub selection:     Selection,
    pub histogram:     Histogram,
    pub bucket:        Option<BucketSelection>,
    pub click_enabled: bool,
}

pub fn render<S: DataSource>(
    state:  &DashboardState,
    cache:  &SessionCache<S>,
    config: &DashboardConfig,
) -> Result<DashboardView, DashboardError> {
    let actions = cache.actions()?;
    let store   = cache.recordings()?;

    let selected = match state.selected_action {
        Some(id) => id,
        None     => actions.first().ok_or(LookupError::EmptyCatalog)?.id,
    };
    let name = actions.name_of(selected)?;

    let options = actions.iter()
        .map(|a| ActionOption { id: a.id, label: a.name.clone() })
        .collect();

    let selection = filter_by_action(&store, selected);
    let histogram = Histogram::build(&selection, config.histogram);

    Ok(DashboardView {
        options,
        selected,
        caption:       format!("Histogram of {name}"),
        selection,
        histogram,
        bucket:        if config.click_select { state.bucket.clone() } else { None },
        click_enabled: config.click_select,
    })
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::Ordering;

    use super::*;
    use crate::cache::fixtures::MemorySource;
    use crate::histogram::HistogramMode;

    fn cache() -> SessionCache<MemorySource> { SessionCache::new(MemorySource::default()) }

    #[test]
    fn defaults_to_first_action() {
        let view = render(&DashboardState::default(), &cache(), &DashboardConfig::default()).unwrap();
        assert_eq!(view.selected, ActionId(1));
        assert_eq!(view.caption, "Histogram of Walk");
        assert_eq!(view.options.len(), 2);
        assert_eq!(view.options[1], ActionOption { id: ActionId(2), label: "Run".into() });
        let files: Vec<_> = view.selection.rows().iter().map(|r| r.file.as_str()).collect();
        assert_eq!(files, vec!["A", "B"]);
    }

    #[test]
    fn repeated_renders_load_once_and_see_clean_data() {
        let cache = cache();
        let cfg = DashboardConfig::default();
        let mut state = DashboardState::default();

        let walk = render(&state, &cache, &cfg).unwrap();
        state.select_action(ActionId(2));
        let run = render(&state, &cache, &cfg).unwrap();
        state.select_action(ActionId(1));
        let walk_again = render(&state, &cache, &cfg).unwrap();

        assert_eq!(run.selection.len(), 1);
        assert_eq!(walk.selection, walk_again.selection);
        assert_eq!(cache.source().recording_loads.load(Ordering::SeqCst), 1);
        assert_eq!(cache.recordings().unwrap().total_rows(), 3);
    }

    #[test]
    fn unknown_action_fails_fast() {
        let state = DashboardState { selected_action: Some(ActionId(7)), bucket: None };
        let err = render(&state, &cache(), &DashboardConfig::default()).unwrap_err();
        assert!(matches!(err, DashboardError::Lookup(LookupError::UnknownAction(ActionId(7)))));
    }

    #[test]
    fn load_failure_aborts_render() {
        let cache = SessionCache::new(MemorySource { fail: true, ..Default::default() });
        let err = render(&DashboardState::default(), &cache, &DashboardConfig::default()).unwrap_err();
        assert!(matches!(err, DashboardError::Load(_)));
    }

    #[test]
    fn click_then_action_change_clears_bucket() {
        let cache = cache();
        let cfg = DashboardConfig::default();
        let mut state = DashboardState::default();
        let chart = render(&state, &cache, &cfg).unwrap().histogram;
        let click = PointClick { x: 10.0, y: 3.0, group: "A".into() };
        assert_eq!(state.select_bucket(&click, &chart).unwrap().range, (8.5, 11.5));

        let view = render(&state, &cache, &cfg).unwrap();
        assert_eq!(view.bucket.as_ref().map(|b| b.count), Some(3));

        state.select_action(ActionId(2));
        assert!(state.bucket.is_none());
    }

    #[test]
    fn click_disabled_hides_bucket() {
        let mut state = DashboardState::default();
        let chart = render(&state, &cache(), &DashboardConfig::default()).unwrap().histogram;
        state.select_bucket(&PointClick { x: 2.0, y: 1.0, group: "A".into() }, &chart).unwrap();
        assert!(state.bucket.is_some());
        let cfg = DashboardConfig {
            click_select: false,
            histogram:    HistogramMode::grouped(),
            ..Default::default()
        };
        let view = render(&state, &cache(), &cfg).unwrap();
        assert!(view.bucket.is_none());
        assert!(!view.click_enabled);
        assert_eq!(view.histogram.mode(), HistogramMode::grouped());
    }

    #[test]
    fn grouped_click_keeps_an_ordered_range() {
        let cfg = DashboardConfig { histogram: HistogramMode::grouped(), ..Default::default() };
        let cache = cache();
        let mut state = DashboardState::default();
        let view = render(&state, &cache, &cfg).unwrap();
        let bar = view.histogram.bars()[0];
        let click = view.histogram.hit_test(bar.center, bar.height / 2.0).unwrap();
        let sel = state.select_bucket(&click, &view.histogram).unwrap();
        assert!(sel.range.0 <= sel.range.1);
    }
}
