// crates/actionscope-ui/src/helpers/log.rs
//
// Unified logging for the application.
//
// In release builds with `windows_subsystem = "windows"` (double-click launch)
// there is no console, so stderr output is discarded. Every event therefore
// goes to two sinks: stderr, and an append-only file in the OS temp dir
// (see paths::log_file).
//
// Level defaults to `info`; override with RUST_LOG, e.g.
//   RUST_LOG=actionscope_core=debug actionscope

use std::fs::OpenOptions;
use std::sync::Mutex;

use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

use crate::paths::log_file;

pub fn init() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let file_layer = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file())
        .ok()
        .map(|f| fmt::layer().with_ansi(false).with_writer(Mutex::new(f)));

    // try_init: a second call (tests) must not panic.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(file_layer)
        .try_init();
}
