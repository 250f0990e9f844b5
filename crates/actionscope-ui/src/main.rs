#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod app;
mod cli;
mod context;
mod helpers;
mod modules;
mod paths;
mod theme;

use anyhow::Context;
use clap::Parser;

fn main() -> anyhow::Result<()> {
    helpers::log::init();

    let config = cli::Cli::parse().into_config()?;
    ffmpeg_the_third::init().context("FFmpeg init failed")?;

    let native_options = eframe::NativeOptions {
        centered: true,
        viewport: egui::ViewportBuilder::default()
            .with_title("📊 ActionScope")
            .with_inner_size([1280.0, 800.0])
            .with_min_inner_size([900.0, 560.0]),
        ..Default::default()
    };

    tracing::info!("[main] log file: {}", paths::log_file().display());
    eframe::run_native(
        "ActionScope",
        native_options,
        Box::new(|cc| Ok(Box::new(app::DashboardApp::new(cc, config)))),
    )
    .map_err(|e| anyhow::anyhow!("{e}"))
}
