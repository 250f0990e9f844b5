// crates/actionscope-ui/src/paths.rs
// Single source of truth for where ActionScope looks for and writes files
// outside the dataset itself.

use std::path::PathBuf;

/// Config file picked up from the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "actionscope.toml";

/// Append-only session log. Lives in the OS temp dir so it exists even for a
/// double-clicked release build with no console attached.
pub fn log_file() -> PathBuf {
    std::env::temp_dir().join("actionscope.log")
}
