// crates/actionscope-core/src/error.rs
//
// Typed failures for the data pipeline. Load errors abort the current render
// pass; nothing here is retried or recovered locally.

use std::path::PathBuf;
use thiserror::Error;

use crate::catalog::ActionId;

/// A catalog, recording or asset file could not be read or parsed.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot read {}: {source}", path.display())]
    Io {
        path:   PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot list directory {}: {source}", path.display())]
    ReadDir {
        path:   PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed CSV in {}: {source}", path.display())]
    Csv {
        path:   PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("{} has no `{column}` column", path.display())]
    MissingColumn { path: PathBuf, column: &'static str },

    #[error("{}:{line}: `{column}` value {value:?} is not valid", path.display())]
    BadValue {
        path:   PathBuf,
        line:   u64,
        column: &'static str,
        value:  String,
    },

    #[error("two recordings share the name {name:?}")]
    DuplicateRecording { name: String },

    #[error("{} is empty or not a regular file", path.display())]
    EmptyAsset { path: PathBuf },
}

/// The chosen action id has no catalog entry.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LookupError {
    #[error("action {0} is not in the catalog")]
    UnknownAction(ActionId),
    #[error("the action catalog is empty")]
    EmptyCatalog,
}

/// A chart click payload that is present but unusable.
#[derive(Debug, Error)]
pub enum SelectionError {
    #[error("click event is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("click event must be an object or a list of objects, got {0}")]
    Shape(String),
    #[error("click count {0} is not a non-negative number")]
    InvalidCount(f64),
    #[error("no bucket at x = {0}")]
    NoBucket(f64),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config {}: {source}", path.display())]
    Io {
        path:   PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid histogram setting: {0}")]
    Histogram(String),
}

/// Everything that can abort one render pass of the dashboard.
#[derive(Debug, Error)]
pub enum DashboardError {
    #[error(transparent)]
    Load(#[from] LoadError),
    #[error(transparent)]
    Lookup(#[from] LookupError),
}
