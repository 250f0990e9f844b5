// crates/actionscope-core/src/commands.rs
//
// Every user action on the dashboard is a DashboardCommand.
// Panels emit these during the UI pass; app.rs applies them afterwards.

use crate::catalog::ActionId;
use crate::selection::PointClick;

#[derive(Debug, Clone, PartialEq)]
pub enum DashboardCommand {
    /// Sidebar selector changed.
    SelectAction(ActionId),
    /// A histogram bar was clicked (click-enabled mode only).
    ClickBucket(PointClick),
    /// Dismiss the displayed bucket and stop the monitor.
    ClearSelection,
    /// Drop the session cache and reload catalog + recordings from disk.
    ReloadData,
    StopPlayback,
}
