// crates/actionscope-core/src/catalog.rs
//
// Action catalog: the `id,action` table that labels every action id.

use std::fmt;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{LoadError, LookupError};
use crate::table::{column_index, line_of, open_csv};

/// Numeric action identifier, as stored in the catalog and in every
/// recording's `action_id` column.
///
/// Parses from text so a selector value or a CLI flag can be used directly:
///
/// ```
/// use actionscope_core::catalog::ActionId;
/// assert_eq!(" 3 ".parse::<ActionId>().unwrap(), ActionId(3));
/// assert_eq!(ActionId::from(7u32), ActionId(7));
/// assert!("walk".parse::<ActionId>().is_err());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActionId(pub i64);

impl From<u32> for ActionId {
    fn from(v: u32) -> Self { ActionId(v as i64) }
}

impl From<i64> for ActionId {
    fn from(v: i64) -> Self { ActionId(v) }
}

impl FromStr for ActionId {
    type Err = std::num::ParseIntError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse::<i64>().map(ActionId)
    }
}

impl fmt::Display for ActionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Action {
    pub id:   ActionId,
    pub name: String,
}

/// Immutable after load; shared across render passes behind an `Arc`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ActionCatalog {
    actions: Vec<Action>,
}

impl ActionCatalog {
    pub fn new(actions: Vec<Action>) -> Self { Self { actions } }

    pub fn load(path: &Path) -> Result<Self, LoadError> {
        let file = std::fs::File::open(path)
            .map_err(|source| LoadError::Io { path: path.to_path_buf(), source })?;
        let catalog = Self::parse(file, path)?;
        tracing::info!("loaded {} actions from {}", catalog.len(), path.display());
        Ok(catalog)
    }

    /// Parse a catalog from any reader.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, LoadError> {
        Self::parse(reader, Path::new("<memory>"))
    }

    /// `origin` is only used in error messages.
    fn parse<R: Read>(reader: R, origin: &Path) -> Result<Self, LoadError> {
        let mut rdr = open_csv(reader);
        let headers = rdr.headers()
            .map_err(|source| LoadError::Csv { path: origin.to_path_buf(), source })?
            .clone();
        let id_col   = column_index(&headers, "id", origin)?;
        let name_col = column_index(&headers, "action", origin)?;

        let mut actions = Vec::new();
        for record in rdr.records() {
            let record = record
                .map_err(|source| LoadError::Csv { path: origin.to_path_buf(), source })?;
            let raw = record.get(id_col).unwrap_or("");
            let id = raw.parse::<ActionId>()
                .ok()
                .filter(|id| id.0 > 0)
                .ok_or_else(|| LoadError::BadValue {
                    path:   origin.to_path_buf(),
                    line:   line_of(&record),
                    column: "id",
                    value:  raw.to_string(),
                })?;
            let name = record.get(name_col).unwrap_or("").to_string();
            actions.push(Action { id, name });
        }
        Ok(Self { actions })
    }

    pub fn iter(&self) -> impl Iterator<Item = &Action> { self.actions.iter() }

    pub fn ids(&self) -> impl Iterator<Item = ActionId> + '_ {
        self.actions.iter().map(|a| a.id)
    }

    pub fn first(&self) -> Option<&Action> { self.actions.first() }

    pub fn len(&self) -> usize { self.actions.len() }

    pub fn is_empty(&self) -> bool { self.actions.is_empty() }

    pub fn contains(&self, id: ActionId) -> bool {
        self.actions.iter().any(|a| a.id == id)
    }

    /// Bounds-checked lookup. An id missing from the catalog is an error,
    /// never a panic.
    pub fn name_of(&self, id: ActionId) -> Result<&str, LookupError> {
        self.actions.iter()
            .find(|a| a.id == id)
            .map(|a| a.name.as_str())
            .ok_or(LookupError::UnknownAction(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn walk_run() -> ActionCatalog {
        ActionCatalog::from_reader("id,action\n1,Walk\n2,Run\n".as_bytes()).unwrap()
    }

    #[test]
    fn parses_in_file_order() {
        let c = walk_run();
        assert_eq!(c.len(), 2);
        assert_eq!(c.ids().collect::<Vec<_>>(), vec![ActionId(1), ActionId(2)]);
        assert_eq!(c.name_of(ActionId(2)), Ok("Run"));
    }

    #[test]
    fn columns_may_be_reordered_and_padded() {
        let c = ActionCatalog::from_reader(" action , id \n Jump , 1 \n".as_bytes()).unwrap();
        assert_eq!(c.name_of(ActionId(1)), Ok("Jump"));
    }

    #[test]
    fn unknown_id_is_lookup_error() {
        assert_eq!(walk_run().name_of(ActionId(9)), Err(LookupError::UnknownAction(ActionId(9))));
    }

    #[test]
    fn missing_action_column_fails() {
        let err = ActionCatalog::from_reader("id,label\n1,Walk\n".as_bytes()).unwrap_err();
        assert!(matches!(err, LoadError::MissingColumn { column: "action", .. }));
    }

    #[test]
    fn non_positive_id_fails() {
        let err = ActionCatalog::from_reader("id,action\n0,Idle\n".as_bytes()).unwrap_err();
        assert!(matches!(err, LoadError::BadValue { column: "id", line: 2, .. }));
    }

    #[test]
    fn absent_file_is_load_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = ActionCatalog::load(&dir.path().join("actions.csv")).unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
    }
}
