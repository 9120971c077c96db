//! core/audio/mod.rs
//! Load an MP3 into memory and write segments of it back out.

mod export;
mod ffmpeg;
mod source;

pub use export::{Exporter, FfmpegExporter, FrameExporter};
pub use ffmpeg::ffmpeg_available;
pub use source::{MpegFrame, MpegSource};
