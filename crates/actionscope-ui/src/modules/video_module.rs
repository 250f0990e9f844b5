// crates/actionscope-ui/src/modules/video_module.rs
//
// VideoModule owns the monitor's frame pacing.
// Non-rendering module: poll_playback() is called every frame from app.rs
// before the panels draw. No egui panel is shown.

use actionscope_core::media_types::PlaybackFrame;
use crate::context::AppContext;
use eframe::egui;

/// A frame may be shown this far ahead of its PTS (one 60 Hz tick).
const EARLY_SLACK: f64 = 1.0 / 60.0;
/// Frames later than this behind the wall clock are skipped, not shown.
const LATE_SLACK: f64 = 1.0 / 30.0;

pub struct VideoModule;

impl VideoModule {
    /// PTS-gated playback frame consumption.
    ///
    /// The decode thread fills a bounded channel as fast as FFmpeg can go.
    /// Draining it and showing the last frame would race ahead at decode
    /// speed, so a one-slot pending buffer is used instead and a frame is only
    /// promoted once the session's wall clock has caught up to its PTS.
    pub fn poll_playback(ctx: &mut AppContext, egui_ctx: &egui::Context) {
        let (Some(id), Some(elapsed)) = (ctx.monitor.playback_id, ctx.monitor.elapsed()) else {
            return;
        };

        // Frames from an earlier session can still sit in the slot.
        if ctx.monitor.pending_pb_frame.as_ref().is_some_and(|f| f.id != id) {
            ctx.monitor.pending_pb_frame = None;
        }

        // Step 1: fill pending slot if empty.
        if ctx.monitor.pending_pb_frame.is_none() {
            ctx.monitor.pending_pb_frame = next_for(ctx, id);
        }

        // Step 2: fast-forward past overdue frames.
        while ctx.monitor.pending_pb_frame
            .as_ref()
            .is_some_and(|f: &PlaybackFrame| f.timestamp < elapsed - LATE_SLACK)
        {
            match next_for(ctx, id) {
                Some(newer) => ctx.monitor.pending_pb_frame = Some(newer),
                None        => break,
            }
        }

        // Step 3: promote pending frame when its PTS is due.
        let due = ctx.monitor.pending_pb_frame
            .as_ref()
            .is_some_and(|f| f.timestamp <= elapsed + EARLY_SLACK);
        if due {
            if let Some(f) = ctx.monitor.pending_pb_frame.take() {
                let tex = egui_ctx.load_texture(
                    "monitor",
                    egui::ColorImage::from_rgba_unmultiplied(
                        [f.width as usize, f.height as usize], &f.data,
                    ),
                    egui::TextureOptions::LINEAR,
                );
                ctx.monitor.frame    = Some(tex);
                ctx.monitor.frame_ts = f.timestamp;
                // Pre-pull next frame so it's ready for the next tick.
                ctx.monitor.pending_pb_frame = next_for(ctx, id);
            }
        }

        egui_ctx.request_repaint();
    }
}

/// Next queued frame belonging to session `id`; stale frames are discarded.
fn next_for(ctx: &AppContext, id: uuid::Uuid) -> Option<PlaybackFrame> {
    while let Ok(f) = ctx.media_worker.pb_rx.try_recv() {
        if f.id == id {
            return Some(f);
        }
    }
    None
}
