// crates/actionscope-ui/src/context.rs
//
// AppContext owns all runtime handles that are NOT part of the dashboard
// state. DashboardApp holds one of these plus the session cache, the
// DashboardState and the module list.
//
// Layout:
//   AppContext
//     ├── media_worker   the FFmpeg playback thread + channel handles
//     ├── video          sample clip, validated on first click, then reused
//     ├── monitor        texture + pending frame for the video monitor
//     └── status         last media error, shown in the selection panel

use std::time::Instant;

use eframe::egui;
use tracing::{debug, error, info};
use uuid::Uuid;

use actionscope_core::media_types::{MediaResult, PlaybackFrame};
use actionscope_media::{MediaWorker, VideoAsset};

// ── MonitorContext ───────────────────────────────────────────────────────────
/// Everything the video monitor needs between frames.
#[derive(Default)]
pub struct MonitorContext {
    /// Session whose frames are accepted. Frames tagged with any other id are
    /// leftovers from an earlier click and get dropped.
    pub playback_id:      Option<Uuid>,
    /// Wall-clock origin of the current session; frame PTS is compared to
    /// `started.elapsed()`.
    pub started:          Option<Instant>,
    /// Last promoted frame. Kept after the clip ends so the monitor holds the
    /// final image instead of going black.
    pub frame:            Option<egui::TextureHandle>,
    /// Timestamp of `frame`, for the timecode readout.
    pub frame_ts:         f64,
    /// Next-to-display frame, held until its PTS is due.
    pub pending_pb_frame: Option<PlaybackFrame>,
}

impl MonitorContext {
    pub fn is_playing(&self) -> bool { self.playback_id.is_some() }

    /// Seconds since the session started, or None when idle.
    pub fn elapsed(&self) -> Option<f64> {
        self.started.map(|t| t.elapsed().as_secs_f64())
    }

    pub fn begin(&mut self, id: Uuid) {
        self.playback_id      = Some(id);
        self.started          = Some(Instant::now());
        self.frame            = None;
        self.frame_ts         = 0.0;
        self.pending_pb_frame = None;
    }

    /// Stop accepting frames. `keep_frame` leaves the last image on screen.
    pub fn end(&mut self, keep_frame: bool) {
        self.playback_id      = None;
        self.started          = None;
        self.pending_pb_frame = None;
        if !keep_frame {
            self.frame    = None;
            self.frame_ts = 0.0;
        }
    }
}

// ── AppContext ───────────────────────────────────────────────────────────────
pub struct AppContext {
    pub media_worker: MediaWorker,
    pub video:        Option<VideoAsset>,
    pub monitor:      MonitorContext,
    pub status:       Option<String>,
}

impl AppContext {
    pub fn new(media_worker: MediaWorker) -> Self {
        Self {
            media_worker,
            video:   None,
            monitor: MonitorContext::default(),
            status:  None,
        }
    }

    /// Stop the decode thread's current session and blank the monitor.
    pub fn stop_monitor(&mut self) {
        if self.monitor.is_playing() {
            self.media_worker.stop_playback();
        }
        self.monitor.end(false);
    }

    /// Drain the worker's notice channel. Notices for a session other than the
    /// current one are stale and ignored.
    pub fn ingest_media_results(&mut self, egui_ctx: &egui::Context) {
        while let Ok(result) = self.media_worker.rx.try_recv() {
            let current = self.monitor.playback_id;
            match result {
                MediaResult::Started { id, width, height } if Some(id) == current => {
                    info!("[monitor] session {id} started ({width}x{height})");
                    self.status = None;
                }
                MediaResult::Finished { id } if Some(id) == current => {
                    info!("[monitor] session {id} finished");
                    // Frames still queued in pb_rx are dropped with the session.
                    self.monitor.end(true);
                    egui_ctx.request_repaint();
                }
                MediaResult::Error { id, msg } if Some(id) == current => {
                    error!("[monitor] session {id}: {msg}");
                    self.status = Some(msg);
                    self.monitor.end(false);
                    egui_ctx.request_repaint();
                }
                stale => debug!("[monitor] ignoring stale notice {stale:?}"),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn begin_and_end_track_session() {
        let mut m = MonitorContext::default();
        assert!(!m.is_playing());
        assert!(m.elapsed().is_none());

        let id = Uuid::new_v4();
        m.begin(id);
        assert_eq!(m.playback_id, Some(id));
        assert!(m.elapsed().is_some());

        m.frame_ts = 2.5;
        m.end(true);
        assert!(!m.is_playing());
        assert_eq!(m.frame_ts, 2.5);

        m.end(false);
        assert_eq!(m.frame_ts, 0.0);
    }
}
