// crates/actionscope-media/src/lib.rs
//
// No egui dependency; communicates with actionscope-ui via channels only.

pub mod asset;
pub mod decode;
pub mod worker;

pub use asset::VideoAsset;
pub use worker::MediaWorker;
pub use actionscope_core::media_types::{MediaResult, PlaybackFrame};
