//! core/audio/export.rs
//! Write one segment of a source to disk.
//!
//! Two strategies behind one trait:
//! - [`FrameExporter`]: copy whole MPEG frames, no re-encode. Cuts land on
//!   frame boundaries.
//! - [`FfmpegExporter`]: hand the cut to `ffmpeg`, which re-encodes and cuts
//!   on the exact millisecond.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::process::{Command, Stdio};

use tracing::debug;

use super::source::MpegSource;
use crate::core::error::SplitError;
use crate::core::types::Segment;

pub trait Exporter {
    /// Short name for logs.
    fn name(&self) -> &'static str;

    /// Write `segment` of `source` to `dest`, replacing any existing file.
    /// An empty segment produces an empty file.
    fn export(
        &self,
        source: &MpegSource,
        segment: Segment,
        dest: &Path,
    ) -> Result<(), SplitError>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct FrameExporter;

impl Exporter for FrameExporter {
    fn name(&self) -> &'static str {
        "frames"
    }

    fn export(
        &self,
        source: &MpegSource,
        segment: Segment,
        dest: &Path,
    ) -> Result<(), SplitError> {
        let frames = source.frames_in(segment);
        let mut out = BufWriter::new(File::create(dest)?);

        for frame in frames {
            out.write_all(&frame.data)?;
        }
        out.flush()?;

        debug!(
            dest = %dest.display(),
            %segment,
            frames = frames.len(),
            "wrote segment"
        );
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct FfmpegExporter {
    program: String,
    /// LAME VBR quality, 0 (best) ..= 9.
    quality: u8,
}

impl FfmpegExporter {
    pub fn new(program: impl Into<String>, quality: u8) -> Self {
        Self {
            program: program.into(),
            quality,
        }
    }

    fn command(&self, input: &Path, segment: Segment, dest: &Path) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(["-hide_banner", "-loglevel", "error", "-nostdin", "-y", "-i"])
            .arg(input)
            .arg("-ss")
            .arg(seconds_arg(segment.start))
            .arg("-to")
            .arg(seconds_arg(segment.end))
            .args(["-vn", "-c:a", "libmp3lame", "-q:a"])
            .arg(self.quality.to_string())
            .arg(dest)
            .stdin(Stdio::null());
        cmd
    }
}

impl Exporter for FfmpegExporter {
    fn name(&self) -> &'static str {
        "ffmpeg"
    }

    fn export(
        &self,
        source: &MpegSource,
        segment: Segment,
        dest: &Path,
    ) -> Result<(), SplitError> {
        // ffmpeg refuses zero-length output.
        if segment.is_empty() {
            File::create(dest)?;
            return Ok(());
        }

        let output = self.command(source.path(), segment, dest).output()?;
        if !output.status.success() {
            return Err(SplitError::Ffmpeg {
                path: dest.to_path_buf(),
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        debug!(dest = %dest.display(), %segment, "ffmpeg wrote segment");
        Ok(())
    }
}

/// `61234` ms -> `"61.234"`.
fn seconds_arg(ms: u64) -> String {
    format!("{}.{:03}", ms / 1000, ms % 1000)
}
