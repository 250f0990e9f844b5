// crates/actionscope-ui/src/app.rs
use actionscope_core::cache::{FsDataSource, SessionCache};
use actionscope_core::commands::DashboardCommand;
use actionscope_core::config::DashboardConfig;
use actionscope_core::histogram::Histogram;
use actionscope_core::selection::{BucketSelection, PlaybackRequest};
use actionscope_core::view::{render, DashboardState, DashboardView};
use actionscope_media::{MediaWorker, VideoAsset};
use crate::context::AppContext;
use crate::theme::{configure_style, ACCENT, ERROR_RED};
use crate::modules::{
    DashboardModule,
    sidebar::SidebarModule,
    histogram_module::HistogramModule,
    selection_module::SelectionModule,
    video_module::VideoModule,
};
use eframe::egui;
use tracing::{error, info, warn};

// ── App ───────────────────────────────────────────────────────────────────────

pub struct DashboardApp {
    config:       DashboardConfig,
    cache:        SessionCache<FsDataSource>,
    state:        DashboardState,
    context:      AppContext,
    // Panel modules as concrete types, not a name-keyed registry.
    sidebar:      SidebarModule,
    histogram:    HistogramModule,
    selection:    SelectionModule,
    /// Last rendered chart; ClickBucket resolves against it after the view
    /// has been dropped.
    last_chart:   Option<Histogram>,
    /// Last render error, so it is logged once rather than every frame.
    last_error:   Option<String>,
    /// Commands emitted by modules each frame, processed after the UI pass
    pending_cmds: Vec<DashboardCommand>,
}

impl DashboardApp {
    pub fn new(cc: &eframe::CreationContext<'_>, config: DashboardConfig) -> Self {
        configure_style(&cc.egui_ctx);
        // Pin to dark mode so the OS theme can't overwrite the palette.
        cc.egui_ctx.options_mut(|o| {
            o.theme_preference = egui::ThemePreference::Dark;
        });

        let cache = SessionCache::new(config.data_source());
        info!(
            "[app] actions={} recordings={} video={}",
            config.actions_path.display(),
            config.recordings_dir.display(),
            config.video_path.display(),
        );

        Self {
            config,
            cache,
            state:        DashboardState::default(),
            context:      AppContext::new(MediaWorker::new()),
            sidebar:      SidebarModule,
            histogram:    HistogramModule,
            selection:    SelectionModule::new(),
            last_chart:   None,
            last_error:   None,
            pending_cmds: Vec::new(),
        }
    }

    fn process_command(&mut self, cmd: DashboardCommand) {
        match cmd {
            DashboardCommand::SelectAction(id) => {
                if self.state.selected_action != Some(id) {
                    self.context.stop_monitor();
                }
                self.state.select_action(id);
            }
            DashboardCommand::ClickBucket(click) => {
                let Some(chart) = &self.last_chart else { return };
                let selection = match self.state.select_bucket(&click, chart) {
                    Ok(sel) => sel.clone(),
                    Err(e)  => {
                        warn!("[app] rejected click {click:?}: {e}");
                        return;
                    }
                };
                info!("[app] bucket {:?} of {} ({} rows)", selection.range, selection.file, selection.count);
                self.start_monitor(&selection);
            }
            DashboardCommand::ClearSelection => {
                self.state.clear_bucket();
                self.context.stop_monitor();
            }
            DashboardCommand::StopPlayback => {
                self.context.media_worker.stop_playback();
                self.context.monitor.end(true);
            }
            DashboardCommand::ReloadData => {
                self.cache.clear();
                self.context.video = None;
                self.context.status = None;
            }
        }
    }

    fn start_monitor(&mut self, selection: &BucketSelection) {
        if self.context.video.is_none() {
            match VideoAsset::load(&self.config.video_path) {
                Ok(asset) => self.context.video = Some(asset),
                Err(e)    => {
                    error!("[app] {e}");
                    self.context.status = Some(e.to_string());
                    self.context.stop_monitor();
                    return;
                }
            }
        }
        let Some(asset) = &self.context.video else { return };

        let req = PlaybackRequest::for_selection(selection, asset.path());
        self.context.status = None;
        self.context.monitor.begin(req.id);
        self.context.media_worker.start_playback(req.id, req.path);
    }

    fn show_view(&mut self, ctx: &egui::Context, view: &DashboardView) {
        egui::SidePanel::left("controls_panel")
            .resizable(true)
            .default_width(240.0)
            .min_width(180.0)
            .show(ctx, |ui| {
                self.sidebar.ui(ui, view, &mut self.pending_cmds);
            });

        if view.click_enabled {
            egui::SidePanel::right("selection_panel")
                .resizable(true)
                .default_width(320.0)
                .min_width(220.0)
                .show(ctx, |ui| {
                    self.selection.current_frame = self.context.monitor.frame.clone();
                    self.selection.frame_ts      = self.context.monitor.frame_ts;
                    self.selection.playing       = self.context.monitor.is_playing();
                    self.selection.status        = self.context.status.clone();
                    self.selection.ui(ui, view, &mut self.pending_cmds);
                });
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            self.histogram.ui(ui, view, &mut self.pending_cmds);
        });
    }

    fn show_error(&mut self, ctx: &egui::Context, msg: &str) {
        if self.last_error.as_deref() != Some(msg) {
            error!("[app] {msg}");
            self.last_error = Some(msg.to_string());
        }
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(40.0);
                ui.label(egui::RichText::new("Could not render the dashboard").strong().size(16.0));
                ui.add_space(8.0);
                ui.label(egui::RichText::new(msg).color(ERROR_RED).monospace());
                ui.add_space(12.0);
                if ui.button("⟳ Retry").clicked() {
                    self.pending_cmds.push(DashboardCommand::ReloadData);
                }
            });
        });
    }
}

// ── eframe::App ───────────────────────────────────────────────────────────────

impl eframe::App for DashboardApp {
    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        self.context.media_worker.stop_playback();
    }

    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ── Playback frame consumption (PTS-gated) ────────────────────────────
        VideoModule::poll_playback(&mut self.context, ctx);
        self.context.ingest_media_results(ctx);

        egui::TopBottomPanel::top("top_panel")
            .exact_height(36.0)
            .show(ctx, |ui| {
                ui.horizontal_centered(|ui| {
                    ui.label(
                        egui::RichText::new("📊 ActionScope")
                            .strong().size(15.0).color(ACCENT),
                    );
                    ui.separator();
                    ui.label(
                        egui::RichText::new(self.config.recordings_dir.display().to_string())
                            .size(12.0).weak(),
                    );
                });
            });

        // The whole view is recomputed every frame; only the loads are cached.
        match render(&self.state, &self.cache, &self.config) {
            Ok(view) => {
                self.last_error = None;
                self.show_view(ctx, &view);
                self.last_chart = Some(view.histogram);
            }
            Err(e) => {
                self.last_chart = None;
                self.show_error(ctx, &e.to_string());
            }
        }

        // ── Process commands emitted by modules this frame ────────────────────
        let cmds: Vec<DashboardCommand> = self.pending_cmds.drain(..).collect();
        for cmd in cmds {
            self.process_command(cmd);
        }
    }
}
