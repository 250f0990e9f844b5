// crates/actionscope-core/src/media_types.rs
//
// Types that flow across the channel between actionscope-media and
// actionscope-ui. No egui, no ffmpeg, just plain data.

use uuid::Uuid;

/// A decoded RGBA frame from the playback pipeline.
pub struct PlaybackFrame {
    /// Playback session the frame belongs to (`PlaybackRequest::id`).
    pub id:        Uuid,
    /// Seconds from the start of the clip.
    pub timestamp: f64,
    pub width:     u32,
    pub height:    u32,
    pub data:      Vec<u8>,
}

/// Out-of-band notices from the playback thread.
#[derive(Debug, Clone, PartialEq)]
pub enum MediaResult {
    Started  { id: Uuid, width: u32, height: u32 },
    Finished { id: Uuid },
    Error    { id: Uuid, msg: String },
}
