// crates/actionscope-media/src/worker.rs
//
// MediaWorker: owns the playback decode thread. All public API that
// actionscope-ui calls lives here.

use std::path::PathBuf;
use std::thread;

use crossbeam_channel::{bounded, Receiver, Sender, TryRecvError};
use uuid::Uuid;

use actionscope_core::media_types::{MediaResult, PlaybackFrame};

use crate::decode::LiveDecoder;

enum PlaybackCmd {
    Start { id: Uuid, path: PathBuf },
    Stop,
}

pub struct MediaWorker {
    /// Started / finished / error notices.
    pub rx:    Receiver<MediaResult>,
    /// Decoded frames, decode-ahead bounded by the channel capacity.
    pub pb_rx: Receiver<PlaybackFrame>,
    pb_tx:     Sender<PlaybackCmd>,
}

impl MediaWorker {
    pub fn new() -> Self {
        let (tx, rx)             = bounded::<MediaResult>(64);
        let (pb_tx, pb_cmd_rx)   = bounded::<PlaybackCmd>(4);
        // 32 frames ≈ 1 s of lookahead at 30 fps. send() blocks when full;
        // that IS the rate limiter, no sleep needed.
        let (pb_frame_tx, pb_rx) = bounded::<PlaybackFrame>(32);

        thread::spawn(move || playback_loop(pb_cmd_rx, pb_frame_tx, tx));

        Self { rx, pb_rx, pb_tx }
    }

    /// Start decoding `path` from the beginning as playback session `id`.
    pub fn start_playback(&self, id: Uuid, path: PathBuf) {
        // Flush stale frames from the previous session; this also unblocks a
        // decode thread parked on a full channel so it sees the new command.
        while self.pb_rx.try_recv().is_ok() {}
        let _ = self.pb_tx.try_send(PlaybackCmd::Start { id, path });
    }

    pub fn stop_playback(&self) {
        let _ = self.pb_tx.try_send(PlaybackCmd::Stop);
        while self.pb_rx.try_recv().is_ok() {}
    }
}

impl Default for MediaWorker {
    fn default() -> Self { Self::new() }
}

fn playback_loop(
    cmd_rx:    Receiver<PlaybackCmd>,
    frame_tx:  Sender<PlaybackFrame>,
    result_tx: Sender<MediaResult>,
) {
    let mut active: Option<(Uuid, LiveDecoder)> = None;
    loop {
        // Idle: block for the next command. Playing: poll between frames.
        let cmd = if active.is_some() {
            match cmd_rx.try_recv() {
                Ok(c)                           => Some(c),
                Err(TryRecvError::Empty)        => None,
                Err(TryRecvError::Disconnected) => return,
            }
        } else {
            match cmd_rx.recv() {
                Ok(c)  => Some(c),
                Err(_) => return,
            }
        };

        match cmd {
            Some(PlaybackCmd::Start { id, path }) => {
                active = match LiveDecoder::open(&path) {
                    Ok(d) => {
                        tracing::info!("playback {id} ← {}", path.display());
                        let _ = result_tx.try_send(MediaResult::Started {
                            id, width: d.out_w, height: d.out_h,
                        });
                        Some((id, d))
                    }
                    Err(e) => {
                        tracing::error!("playback open {}: {e}", path.display());
                        let _ = result_tx.try_send(MediaResult::Error { id, msg: e.to_string() });
                        None
                    }
                };
                continue;
            }
            Some(PlaybackCmd::Stop) => {
                active = None;
                continue;
            }
            None => {}
        }

        let Some((id, decoder)) = active.as_mut() else { continue };
        let id = *id;
        match decoder.next_frame() {
            Some((data, width, height, timestamp)) => {
                let frame = PlaybackFrame { id, timestamp, width, height, data };
                if frame_tx.send(frame).is_err() { return; }
            }
            None => {
                tracing::debug!("playback {id} reached end of clip");
                let _ = result_tx.try_send(MediaResult::Finished { id });
                active = None;
            }
        }
    }
}
