//! core/audio/source.rs
//! Read an MP3 into memory as a list of MPEG frames (Symphonia demuxer).
//!
//! Nothing is decoded. Symphonia's MP3 reader hands out one packet per MPEG
//! frame, header included, so writing a run of packets back to disk gives a
//! playable MP3 again.

use std::fs::File;
use std::path::{Path, PathBuf};

use symphonia::core::codecs::CODEC_TYPE_NULL;
use symphonia::core::errors::Error as SymphoniaError;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::{MediaSourceStream, MediaSourceStreamOptions};
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;
use symphonia::core::units::TimeBase;
use tracing::debug;

use crate::core::error::SplitError;
use crate::core::types::Segment;

/// One raw MPEG audio frame.
#[derive(Debug, Clone)]
pub struct MpegFrame {
    /// Start, in time-base units (samples for MP3).
    pub ts: u64,
    /// Length, in time-base units.
    pub dur: u64,
    pub data: Vec<u8>,
}

/// An MP3 held in memory, frame by frame.
#[derive(Debug)]
pub struct MpegSource {
    path: PathBuf,
    time_base: TimeBase,
    frames: Vec<MpegFrame>,
    duration_ms: u64,
}

impl MpegSource {
    /// Probe `path` and read every frame of its default track.
    pub fn open(path: &Path) -> Result<Self, SplitError> {
        let file = File::open(path)?;
        let mss = MediaSourceStream::new(Box::new(file), MediaSourceStreamOptions::default());

        let mut hint = Hint::new();
        if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
            hint.with_extension(ext);
        }

        let probed = symphonia::default::get_probe().format(
            &hint,
            mss,
            &FormatOptions::default(),
            &MetadataOptions::default(),
        )?;
        let mut format = probed.format;

        let track = format
            .default_track()
            .ok_or(SplitError::MissingDefaultTrack)?;
        if track.codec_params.codec == CODEC_TYPE_NULL {
            return Err(SplitError::UnsupportedCodec);
        }

        let track_id = track.id;
        let sample_rate = track
            .codec_params
            .sample_rate
            .ok_or(SplitError::MissingSampleRate)?;
        let time_base = track
            .codec_params
            .time_base
            .unwrap_or_else(|| TimeBase::new(1, sample_rate));

        let mut frames = Vec::new();
        loop {
            let packet = match format.next_packet() {
                Ok(p) => p,
                // End of stream.
                Err(SymphoniaError::IoError(e))
                    if e.kind() == std::io::ErrorKind::UnexpectedEof =>
                {
                    break;
                }
                Err(e) => return Err(e.into()),
            };

            if packet.track_id() != track_id {
                continue;
            }

            frames.push(MpegFrame {
                ts: packet.ts(),
                dur: packet.dur(),
                data: packet.data.into_vec(),
            });
        }

        Ok(Self::from_frames(path.to_path_buf(), time_base, frames))
    }

    /// Build a source from frames already in memory. Frames must be in
    /// timestamp order.
    pub fn from_frames(path: PathBuf, time_base: TimeBase, frames: Vec<MpegFrame>) -> Self {
        let end_ts = frames.iter().map(|f| f.ts + f.dur).max().unwrap_or(0);
        let duration_ms = ts_to_ms(time_base, end_ts);

        debug!(
            path = %path.display(),
            frames = frames.len(),
            duration_ms,
            "loaded source"
        );

        Self {
            path,
            time_base,
            frames,
            duration_ms,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn duration_ms(&self) -> u64 {
        self.duration_ms
    }

    pub fn frames(&self) -> &[MpegFrame] {
        &self.frames
    }

    /// Frames whose start time lies inside `segment`.
    ///
    /// A non-empty segment that reaches the end of the source also takes any
    /// frame past the rounded-down millisecond duration, so across a full
    /// partition every frame is returned exactly once.
    pub fn frames_in(&self, segment: Segment) -> &[MpegFrame] {
        if segment.is_empty() {
            return &[];
        }

        let lo = self.index_at(segment.start);
        let hi = if segment.end >= self.duration_ms {
            self.frames.len()
        } else {
            self.index_at(segment.end)
        };

        &self.frames[lo..hi.max(lo)]
    }

    /// First frame index starting at or after `ms`.
    fn index_at(&self, ms: u64) -> usize {
        let ts = ms_to_ts(self.time_base, ms);
        self.frames.partition_point(|f| f.ts < ts)
    }
}

fn ts_to_ms(tb: TimeBase, ts: u64) -> u64 {
    let ms = u128::from(ts) * u128::from(tb.numer) * 1000 / u128::from(tb.denom);
    u64::try_from(ms).unwrap_or(u64::MAX)
}

/// Smallest timestamp at or after `ms`.
fn ms_to_ts(tb: TimeBase, ms: u64) -> u64 {
    let num = u128::from(ms) * u128::from(tb.denom);
    let den = u128::from(tb.numer) * 1000;
    u64::try_from(num.div_ceil(den)).unwrap_or(u64::MAX)
}
