// crates/actionscope-core/src/cache.rs
//
// Session cache for the two expensive loads (catalog + recording store).
//
// Loaded once, shared as `Arc`s for the rest of the process, dropped only by
// an explicit `clear()`. The data source is injected so tests can swap the
// filesystem for in-memory fixtures.
//
// Failed loads are not cached: the next render pass tries again.

use std::path::PathBuf;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::catalog::ActionCatalog;
use crate::error::LoadError;
use crate::recording::RecordingStore;

/// Where the catalog and recordings come from.
pub trait DataSource {
    fn load_actions(&self) -> Result<ActionCatalog, LoadError>;
    fn load_recordings(&self) -> Result<RecordingStore, LoadError>;
}

/// Catalog CSV + directory of recording CSVs on disk.
#[derive(Clone, Debug)]
pub struct FsDataSource {
    pub actions_path:   PathBuf,
    pub recordings_dir: PathBuf,
}

impl DataSource for FsDataSource {
    fn load_actions(&self) -> Result<ActionCatalog, LoadError> {
        ActionCatalog::load(&self.actions_path)
    }

    fn load_recordings(&self) -> Result<RecordingStore, LoadError> {
        RecordingStore::load_dir(&self.recordings_dir)
    }
}

pub struct SessionCache<S> {
    source:     S,
    actions:    Mutex<Option<Arc<ActionCatalog>>>,
    recordings: Mutex<Option<Arc<RecordingStore>>>,
}

impl<S: DataSource> SessionCache<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            actions:    Mutex::new(None),
            recordings: Mutex::new(None),
        }
    }

    pub fn source(&self) -> &S { &self.source }

    pub fn actions(&self) -> Result<Arc<ActionCatalog>, LoadError> {
        memoize(&self.actions, || self.source.load_actions())
    }

    pub fn recordings(&self) -> Result<Arc<RecordingStore>, LoadError> {
        memoize(&self.recordings, || self.source.load_recordings())
    }

    /// Drop both cached values; the next access reloads from the source.
    pub fn clear(&self) {
        *self.actions.lock()    = None;
        *self.recordings.lock() = None;
        tracing::info!("session cache cleared");
    }
}

fn memoize<T>(
    slot: &Mutex<Option<Arc<T>>>,
    load: impl FnOnce() -> Result<T, LoadError>,
) -> Result<Arc<T>, LoadError> {
    let mut guard = slot.lock();
    if let Some(hit) = guard.as_ref() {
        return Ok(Arc::clone(hit));
    }
    let value = Arc::new(load()?);
    *guard = Some(Arc::clone(&value));
    Ok(value)
}

#[cfg(test)]
pub(crate) mod fixtures {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::catalog::{Action, ActionId};
    use crate::recording::{Recording, Row};

    /// Catalog {1: Walk, 2: Run}; recordings A = [(1, 1), (2, 2)], B = [(1, 1)].
    #[derive(Default)]
    pub struct MemorySource {
        pub action_loads:    AtomicUsize,
        pub recording_loads: AtomicUsize,
        pub fail:            bool,
    }

    fn row(time: f64, action: i64) -> Row {
        Row { time, action_id: ActionId(action), extra: Vec::new() }
    }

    impl DataSource for MemorySource {
        fn load_actions(&self) -> Result<ActionCatalog, LoadError> {
            self.action_loads.fetch_add(1, Ordering::SeqCst);
            Ok(ActionCatalog::new(vec![
                Action { id: ActionId(1), name: "Walk".into() },
                Action { id: ActionId(2), name: "Run".into() },
            ]))
        }

        fn load_recordings(&self) -> Result<RecordingStore, LoadError> {
            self.recording_loads.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(LoadError::EmptyAsset { path: "recorded_data".into() });
            }
            RecordingStore::from_recordings(vec![
                Recording::new("A", Vec::new(), vec![row(1.0, 1), row(2.0, 2)]),
                Recording::new("B", Vec::new(), vec![row(1.0, 1)]),
            ])
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::Ordering;

    use super::fixtures::MemorySource;
    use super::*;

    #[test]
    fn second_load_is_the_same_arc() {
        let cache = SessionCache::new(MemorySource::default());
        let first  = cache.recordings().unwrap();
        let second = cache.recordings().unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.source().recording_loads.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn clear_forces_a_reload() {
        let cache = SessionCache::new(MemorySource::default());
        let first = cache.actions().unwrap();
        cache.clear();
        let second = cache.actions().unwrap();
        assert!(!Arc::ptr_eq(&first, &second));
        assert_eq!(*first, *second);
        assert_eq!(cache.source().action_loads.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn failures_are_not_cached() {
        let cache = SessionCache::new(MemorySource { fail: true, ..Default::default() });
        assert!(cache.recordings().is_err());
        assert!(cache.recordings().is_err());
        assert_eq!(cache.source().recording_loads.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn filesystem_source_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let data = dir.path().join("recorded_data");
        std::fs::create_dir(&data).unwrap();
        std::fs::write(dir.path().join("actions.csv"), "id,action\n1,Walk\n").unwrap();
        std::fs::write(data.join("A.csv"), "time,action_id\n1,1\n").unwrap();

        let cache = SessionCache::new(FsDataSource {
            actions_path:   dir.path().join("actions.csv"),
            recordings_dir: data,
        });
        assert_eq!(cache.actions().unwrap().len(), 1);
        let store = cache.recordings().unwrap();
        assert!(Arc::ptr_eq(&store, &cache.recordings().unwrap()));
        assert_eq!(store.names().collect::<Vec<_>>(), vec!["A"]);
    }
}
