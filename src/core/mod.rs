//! core/mod.rs
//!
//! The brain of the splitter:
//! - Validate split points and cut `[0, duration)` into segments
//! - Load MP3s, write the segments out, tag the parts
//! - Return plain data structs for the console to render
//!
//! The per-file pipeline is explicit:
//!   (A) load source -> `MpegSource`
//!   (B) validate input -> `SplitPoints` (console loops until valid)
//!   (C) partition + export + tag -> `SplitOutcome`
//!
//! The console owns every prompt; nothing in here reads stdin.

pub mod audio;
pub mod edit;
pub mod error;
pub mod library;
pub mod partition;
pub mod tags;
pub mod timestamps;
pub mod types;

use std::path::Path;

use tracing::{info, warn};

use crate::config::{ExportMode, ExportSettings, Settings};
use audio::{Exporter, FfmpegExporter, FrameExporter, MpegSource};
use error::SplitError;
use types::{SplitOutcome, SplitPoints};

/// Progress notifications from [`split_with_progress`].
#[derive(Debug, Clone, Copy)]
pub enum ProgressEvent<'a> {
    Start { segments: usize },
    Wrote { index: usize, path: &'a Path },
    Finish,
}

/// Pick the exporter for this run.
///
/// `ffmpeg_present` is the result of the startup probe. Asking for ffmpeg when
/// it is missing falls back to frame copy with a warning, since the user has
/// already agreed to continue without it.
pub fn select_exporter(settings: &ExportSettings, ffmpeg_present: bool) -> Box<dyn Exporter> {
    let ffmpeg = || {
        Box::new(FfmpegExporter::new(
            settings.ffmpeg_program.clone(),
            settings.ffmpeg_quality,
        )) as Box<dyn Exporter>
    };

    match settings.mode {
        ExportMode::Frames => Box::new(FrameExporter),
        ExportMode::Auto if ffmpeg_present => ffmpeg(),
        ExportMode::Auto => Box::new(FrameExporter),
        ExportMode::Ffmpeg if ffmpeg_present => ffmpeg(),
        ExportMode::Ffmpeg => {
            warn!(
                program = %settings.ffmpeg_program,
                "ffmpeg export requested but not available, copying frames instead"
            );
            Box::new(FrameExporter)
        }
    }
}

/// Split one loaded source at `points` into a fresh `<stem>_<N>` directory.
pub fn split_file(
    source: &MpegSource,
    points: &SplitPoints,
    settings: &Settings,
    exporter: &dyn Exporter,
) -> Result<SplitOutcome, SplitError> {
    split_with_progress(source, points, settings, exporter, |_| {})
}

/// [`split_file`] with a callback per written part.
pub fn split_with_progress<F>(
    source: &MpegSource,
    points: &SplitPoints,
    settings: &Settings,
    exporter: &dyn Exporter,
    mut on_event: F,
) -> Result<SplitOutcome, SplitError>
where
    F: FnMut(ProgressEvent<'_>),
{
    let duration_ms = source.duration_ms();
    let segments = partition::partition(points, duration_ms);

    let output_dir = library::create_unique_directory(&library::output_base(source.path()))?;
    info!(
        source = %source.path().display(),
        output = %output_dir.display(),
        segments = segments.len(),
        exporter = exporter.name(),
        "splitting"
    );

    on_event(ProgressEvent::Start {
        segments: segments.len(),
    });

    let mut parts = Vec::with_capacity(segments.len());
    for (index, segment) in segments.iter().enumerate() {
        let dest = output_dir.join(library::part_file_name(
            &settings.export.part_prefix,
            index,
        ));
        exporter.export(source, *segment, &dest)?;
        on_event(ProgressEvent::Wrote { index, path: &dest });
        parts.push(dest);
    }

    // A broken source tag should not sink the split; the parts just go untagged-from-source.
    let source_tag = match tags::load(source.path()) {
        Ok(tag) => tag,
        Err(e) => {
            warn!(source = %source.path().display(), error = %e, "could not read source tag");
            None
        }
    };
    tags::tag_parts(source_tag.as_ref(), &parts, &settings.tags)?;

    on_event(ProgressEvent::Finish);

    Ok(SplitOutcome {
        source: source.path().to_path_buf(),
        output_dir,
        parts,
        duration_ms,
        segments,
    })
}
