// crates/actionscope-core/src/lib.rs
//
// Pure dashboard data: loading, filtering, binning, click selection.
// No egui, no ffmpeg.

pub mod cache;
pub mod catalog;
pub mod commands;
pub mod config;
pub mod error;
pub mod filter;
pub mod helpers;
pub mod histogram;
pub mod media_types;
pub mod recording;
pub mod selection;
pub mod view;

mod table;

pub use cache::{DataSource, FsDataSource, SessionCache};
pub use catalog::{Action, ActionCatalog, ActionId};
pub use error::{DashboardError, LoadError, LookupError, SelectionError};
pub use filter::{filter_by_action, Selection};
pub use histogram::{Histogram, HistogramMode};
pub use recording::{Recording, RecordingStore};
