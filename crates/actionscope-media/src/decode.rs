// crates/actionscope-media/src/decode.rs
//
// LiveDecoder: sequential per-clip decoder feeding the playback thread.
// Frames come out as packed RGBA, scaled to at most MAX_W pixels wide.

use std::path::{Path, PathBuf};

use anyhow::{anyhow, Result};

use ffmpeg_the_third as ffmpeg;
use ffmpeg::format::{input, Pixel};
use ffmpeg::media::Type;
use ffmpeg::software::scaling::{context::Context as SwsContext, flag::Flags};

const MAX_W: u32 = 640;

pub struct LiveDecoder {
    pub path:      PathBuf,
    ictx:          ffmpeg::format::context::Input,
    decoder:       ffmpeg::decoder::video::Video,
    video_idx:     usize,
    last_pts:      i64,
    tb_num:        i32,
    tb_den:        i32,
    pub out_w:     u32,
    pub out_h:     u32,
    scaler:        SwsContext,
}

impl LiveDecoder {
    pub fn open(path: &Path) -> Result<Self> {
        let ictx = input(path)?;
        let video_idx = ictx.streams().best(Type::Video)
            .ok_or_else(|| anyhow!("no video stream in {}", path.display()))?
            .index();

        let (tb_num, tb_den) = {
            let stream = ictx.stream(video_idx).ok_or_else(|| anyhow!("stream gone"))?;
            let tb = stream.time_base();
            (tb.numerator(), tb.denominator())
        };

        // Second context for decoder params (Parameters borrows from the stream).
        let ictx2   = input(path)?;
        let stream2 = ictx2.stream(video_idx).ok_or_else(|| anyhow!("stream gone"))?;
        let dec_ctx = ffmpeg::codec::context::Context::from_parameters(stream2.parameters())?;
        let decoder = dec_ctx.decoder().video()?;

        let (out_w, out_h) = output_size(decoder.width(), decoder.height());
        let scaler = SwsContext::get(
            decoder.format(), decoder.width(), decoder.height(),
            Pixel::RGBA, out_w, out_h, Flags::BILINEAR,
        )?;

        Ok(Self {
            path: path.to_path_buf(), ictx, decoder, video_idx,
            last_pts: 0, tb_num, tb_den, out_w, out_h, scaler,
        })
    }

    /// Decode the next frame. Returns `(rgba, w, h, ts_secs)` or None at EOF.
    pub fn next_frame(&mut self) -> Option<(Vec<u8>, u32, u32, f64)> {
        for (stream, packet) in self.ictx.packets().flatten() {
            if stream.index() != self.video_idx { continue; }
            if self.decoder.send_packet(&packet).is_err() { continue; }
            let mut decoded = ffmpeg::util::frame::video::Video::empty();
            if self.decoder.receive_frame(&mut decoded).is_ok() {
                let pts = decoded.pts().unwrap_or(self.last_pts + 1);
                self.last_pts = pts;
                // Field-level access: `packets()` holds `self.ictx` mutably.
                let ts_secs = pts_to_secs(pts, self.tb_num, self.tb_den);
                let mut out = ffmpeg::util::frame::video::Video::empty();
                if self.scaler.run(&decoded, &mut out).is_err() { return None; }
                let data = pack_rgba(out.data(0), out.stride(0), self.out_w, self.out_h);
                return Some((data, self.out_w, self.out_h, ts_secs));
            }
        }
        None
    }
}

fn pts_to_secs(pts: i64, tb_num: i32, tb_den: i32) -> f64 {
    if tb_den == 0 { return 0.0; }
    pts as f64 * tb_num as f64 / tb_den as f64
}

/// Scale down to MAX_W keeping the aspect ratio; both sides even, at least 2.
fn output_size(raw_w: u32, raw_h: u32) -> (u32, u32) {
    let raw_w = raw_w.max(2);
    let raw_h = raw_h.max(2);
    let w = raw_w.min(MAX_W) & !1;
    let h = ((raw_h as u64 * w as u64 / raw_w as u64) as u32 & !1).max(2);
    (w.max(2), h)
}

/// Strip row padding from an RGBA plane.
fn pack_rgba(raw: &[u8], stride: usize, w: u32, h: u32) -> Vec<u8> {
    let row_bytes = w as usize * 4;
    (0..h as usize)
        .flat_map(|row| {
            let s = row * stride;
            &raw[s..s + row_bytes]
        })
        .copied()
        .collect()
}
