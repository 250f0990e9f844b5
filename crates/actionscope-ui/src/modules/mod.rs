// crates/actionscope-ui/src/modules/mod.rs
//
// Module registry. To add a new panel:
//   1. Create modules/mypanel.rs implementing DashboardModule
//   2. Add `pub mod mypanel;` below
//   3. Add a field and one `ui()` call in app.rs

pub mod sidebar;
pub mod histogram_module;
pub mod selection_module;
pub mod video_module;

use actionscope_core::commands::DashboardCommand;
use actionscope_core::view::DashboardView;
use egui::Ui;

/// Every dashboard panel implements this trait.
/// Modules read the rendered view and emit commands; they never mutate
/// DashboardState directly.
pub trait DashboardModule {
    fn name(&self) -> &str;
    fn ui(
        &mut self,
        ui:   &mut Ui,
        view: &DashboardView,
        cmd:  &mut Vec<DashboardCommand>,
    );
}
