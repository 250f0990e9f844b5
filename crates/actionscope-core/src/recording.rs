// crates/actionscope-core/src/recording.rs
//
// Recording store: one table per CSV file in the data directory, keyed by the
// file name up to its first '.'. Loaded once per session, read-only after.

use std::io::Read;
use std::path::{Path, PathBuf};

use crate::catalog::ActionId;
use crate::error::LoadError;
use crate::table::{column_index, line_of, open_csv};

/// One parsed CSV row. `extra` holds every column other than `time` and
/// `action_id`, as raw text, in the owning recording's header order.
#[derive(Clone, Debug, PartialEq)]
pub struct Row {
    pub time:      f64,
    pub action_id: ActionId,
    pub extra:     Vec<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Recording {
    name:    String,
    /// Pass-through column names, aligned with `Row::extra`.
    columns: Vec<String>,
    rows:    Vec<Row>,
}

impl Recording {
    pub fn new(name: impl Into<String>, columns: Vec<String>, rows: Vec<Row>) -> Self {
        Self { name: name.into(), columns, rows }
    }

    pub fn load(name: impl Into<String>, path: &Path) -> Result<Self, LoadError> {
        let file = std::fs::File::open(path)
            .map_err(|source| LoadError::Io { path: path.to_path_buf(), source })?;
        Self::parse(name.into(), file, path)
    }

    pub fn from_reader<R: Read>(name: impl Into<String>, reader: R) -> Result<Self, LoadError> {
        Self::parse(name.into(), reader, Path::new("<memory>"))
    }

    fn parse<R: Read>(name: String, reader: R, origin: &Path) -> Result<Self, LoadError> {
        let csv_err = |source| LoadError::Csv { path: origin.to_path_buf(), source };

        let mut rdr = open_csv(reader);
        let headers = rdr.headers().map_err(csv_err)?.clone();
        let time_col   = column_index(&headers, "time", origin)?;
        let action_col = column_index(&headers, "action_id", origin)?;

        let extra_idx: Vec<usize> = (0..headers.len())
            .filter(|&i| i != time_col && i != action_col)
            .collect();
        let columns = extra_idx.iter().map(|&i| headers[i].to_string()).collect();

        let mut rows = Vec::new();
        for record in rdr.records() {
            let record = record.map_err(csv_err)?;
            let bad = |column: &'static str, value: &str| LoadError::BadValue {
                path:  origin.to_path_buf(),
                line:  line_of(&record),
                column,
                value: value.to_string(),
            };

            // A blank time is a missing sample, not a parse failure; the
            // histogram drops it like any other non-finite value.
            let raw_time = &record[time_col];
            let time = if raw_time.is_empty() {
                f64::NAN
            } else {
                raw_time.parse::<f64>().map_err(|_| bad("time", raw_time))?
            };

            let raw_action = &record[action_col];
            let action_id = raw_action.parse::<ActionId>()
                .map_err(|_| bad("action_id", raw_action))?;

            let extra = extra_idx.iter().map(|&i| record[i].to_string()).collect();
            rows.push(Row { time, action_id, extra });
        }

        Ok(Self { name, columns, rows })
    }

    pub fn name(&self) -> &str { &self.name }

    pub fn columns(&self) -> &[String] { &self.columns }

    pub fn rows(&self) -> &[Row] { &self.rows }

    pub fn len(&self) -> usize { self.rows.len() }

    pub fn is_empty(&self) -> bool { self.rows.is_empty() }
}

/// All recordings of a session, in file-name order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RecordingStore {
    recordings: Vec<Recording>,
}

impl RecordingStore {
    /// Build a store from already-parsed recordings. Names must be unique.
    pub fn from_recordings(recordings: Vec<Recording>) -> Result<Self, LoadError> {
        for (i, r) in recordings.iter().enumerate() {
            if recordings[..i].iter().any(|o| o.name == r.name) {
                return Err(LoadError::DuplicateRecording { name: r.name.clone() });
            }
        }
        Ok(Self { recordings })
    }

    /// Parse every regular file in `dir`. Any unreadable or malformed file
    /// aborts the whole load.
    pub fn load_dir(dir: &Path) -> Result<Self, LoadError> {
        let read_dir_err = |source| LoadError::ReadDir { path: dir.to_path_buf(), source };

        let mut files: Vec<PathBuf> = Vec::new();
        for entry in std::fs::read_dir(dir).map_err(read_dir_err)? {
            let entry = entry.map_err(read_dir_err)?;
            let path  = entry.path();
            if path.is_dir() {
                tracing::debug!("skipping sub-directory {}", path.display());
                continue;
            }
            files.push(path);
        }
        // read_dir order is filesystem-specific; sort so the concatenation
        // order of filtered rows is the same on every machine.
        files.sort();

        let mut recordings = Vec::with_capacity(files.len());
        for path in &files {
            let name = recording_name(path);
            recordings.push(Recording::load(name, path)?);
        }
        let store = Self::from_recordings(recordings)?;
        tracing::info!(
            "loaded {} recordings ({} rows) from {}",
            store.len(), store.total_rows(), dir.display(),
        );
        Ok(store)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Recording> { self.recordings.iter() }

    pub fn get(&self, name: &str) -> Option<&Recording> {
        self.recordings.iter().find(|r| r.name == name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.recordings.iter().map(|r| r.name.as_str())
    }

    pub fn len(&self) -> usize { self.recordings.len() }

    pub fn is_empty(&self) -> bool { self.recordings.is_empty() }

    pub fn total_rows(&self) -> usize {
        self.recordings.iter().map(Recording::len).sum()
    }
}

/// `walk.2024.csv` → `walk`.
///
/// ```
/// use std::path::Path;
/// use actionscope_core::recording::recording_name;
/// assert_eq!(recording_name(Path::new("data/subject_a.csv")), "subject_a");
/// assert_eq!(recording_name(Path::new("data/walk.2024.csv")), "walk");
/// ```
pub fn recording_name(path: &Path) -> String {
    let file_name = path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    match file_name.split_once('.') {
        Some((stem, _)) => stem.to_string(),
        None            => file_name,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn extra_columns_pass_through_in_order() {
        let r = Recording::from_reader(
            "A",
            "sensor,time,note,action_id\nimu,1.5,start,2\nimu,2,,1\n".as_bytes(),
        ).unwrap();
        assert_eq!(r.columns(), &["sensor".to_string(), "note".to_string()]);
        assert_eq!(r.rows()[0], Row {
            time: 1.5,
            action_id: ActionId(2),
            extra: vec!["imu".into(), "start".into()],
        });
        assert_eq!(r.rows()[1].extra, vec!["imu".to_string(), String::new()]);
    }

    #[test]
    fn blank_time_is_nan() {
        let r = Recording::from_reader("A", "time,action_id\n,1\n".as_bytes()).unwrap();
        assert!(r.rows()[0].time.is_nan());
    }

    #[test]
    fn non_integer_action_id_is_bad_value() {
        let err = Recording::from_reader("A", "time,action_id\n1,run\n".as_bytes()).unwrap_err();
        assert!(matches!(err, LoadError::BadValue { column: "action_id", line: 2, .. }));
    }

    #[test]
    fn missing_time_column_fails() {
        let err = Recording::from_reader("A", "t,action_id\n1,1\n".as_bytes()).unwrap_err();
        assert!(matches!(err, LoadError::MissingColumn { column: "time", .. }));
    }

    #[test]
    fn load_dir_sorts_by_file_name_and_strips_extension() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("b.csv"), "time,action_id\n1,1\n").unwrap();
        fs::write(dir.path().join("a.csv"), "time,action_id\n1,1\n2,2\n").unwrap();
        fs::create_dir(dir.path().join("nested")).unwrap();

        let store = RecordingStore::load_dir(dir.path()).unwrap();
        assert_eq!(store.names().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(store.total_rows(), 3);
        assert_eq!(store.get("a").map(Recording::len), Some(2));
    }

    #[test]
    fn one_bad_file_aborts_the_load() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("good.csv"), "time,action_id\n1,1\n").unwrap();
        fs::write(dir.path().join("bad.csv"), "time,action_id\n1,1,9\n").unwrap();
        let err = RecordingStore::load_dir(dir.path()).unwrap_err();
        assert!(matches!(err, LoadError::Csv { .. }));
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.csv"), "time,action_id\n").unwrap();
        fs::write(dir.path().join("a.txt"), "time,action_id\n").unwrap();
        let err = RecordingStore::load_dir(dir.path()).unwrap_err();
        assert!(matches!(err, LoadError::DuplicateRecording { ref name } if name == "a"));
    }

    #[test]
    fn missing_directory_is_load_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = RecordingStore::load_dir(&dir.path().join("nope")).unwrap_err();
        assert!(matches!(err, LoadError::ReadDir { .. }));
    }
}
