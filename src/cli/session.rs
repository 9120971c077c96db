//! cli/session.rs
//!
//! The interactive run, top to bottom:
//!   ffmpeg check -> input path -> per file: timestamps + split -> "Done!"
//!   -> optional tag editing over every exported part
//!
//! Every prompt and message goes through [`Console`] so the whole session can
//! be driven from a script.

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use id3::Version;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use thiserror::Error;
use tracing::{info, warn};

use super::Console;
use crate::config::{ExportMode, Settings};
use crate::core::audio::{Exporter, MpegSource, ffmpeg_available};
use crate::core::edit::{EditState, TagEditor};
use crate::core::error::SplitError;
use crate::core::types::{SplitOutcome, SplitPoints, TagField, TagSnapshot};
use crate::core::{
    ProgressEvent, library, select_exporter, split_with_progress, tags, timestamps,
};

const PATH_PROMPT: &str = "Enter the path to an MP3 file or a directory containing MP3 files: ";
const TIMESTAMPS_PROMPT: &str =
    "Enter the timestamps you want to split on in milliseconds (separated by commas): ";
const CONTINUE_PROMPT: &str = "Do you want to continue processing? (Y/N): ";
const EDIT_PROMPT: &str = "Do you want to update the ID3 tags of the exported parts? (Y/N): ";
const CHOICE_PROMPT: &str = "Enter your choice: ";
const RULE: &str = "--------------------------------------";

/// Why a typed input path was turned down. Always retryable.
#[derive(Debug, Error)]
enum InputError {
    #[error("Invalid filename. Please enter a valid MP3 filename.")]
    NotMp3,

    #[error("Invalid path. Please enter an existing MP3 file or directory.")]
    Missing,

    #[error("Could not read '{}': {source}", path.display())]
    Unreadable { path: PathBuf, source: io::Error },
}

fn resolve_input(path: &Path) -> Result<Vec<PathBuf>, InputError> {
    if path.is_file() {
        if !library::is_mp3(path) {
            return Err(InputError::NotMp3);
        }
    } else if !path.is_dir() {
        return Err(InputError::Missing);
    }

    library::discover_inputs(path).map_err(|source| InputError::Unreadable {
        path: path.to_path_buf(),
        source,
    })
}

/// Run one whole session.
///
/// `input` comes from the command line; when absent the user is asked.
/// Declining to continue without ffmpeg ends the session with `Ok(())`.
pub fn run<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    settings: &Settings,
    input: Option<&Path>,
) -> anyhow::Result<()> {
    let wants_ffmpeg = settings.export.mode != ExportMode::Frames;
    let ffmpeg_present = wants_ffmpeg && ffmpeg_available(&settings.export.ffmpeg_program);

    if wants_ffmpeg && !ffmpeg_present {
        console.say(
            "WARNING: ffmpeg is not installed. Please install ffmpeg for accurate MP3 parsing.",
        )?;
        console.say("Without ffmpeg, cuts snap to the nearest MP3 frame (about 26 ms).")?;
        if !console.confirm(CONTINUE_PROMPT)? {
            info!("user declined to continue without ffmpeg");
            return Ok(());
        }
    }

    let exporter = select_exporter(&settings.export, ffmpeg_present);

    let inputs = match input {
        Some(path) => resolve_input(path)
            .with_context(|| format!("cannot use input '{}'", path.display()))?,
        None => console.ask_until(PATH_PROMPT, |line| resolve_input(Path::new(line.trim())))?,
    };

    if inputs.is_empty() {
        console.say("No MP3 files found.")?;
        return Ok(());
    }

    let mut outcomes = Vec::with_capacity(inputs.len());
    for path in &inputs {
        console.say(format_args!("Processing: {}", path.display()))?;

        let source = MpegSource::open(path)
            .with_context(|| format!("failed to load '{}'", path.display()))?;
        let duration = source.duration_ms();
        console.say(format_args!("Length: {duration} ms"))?;

        let points =
            console.ask_until(TIMESTAMPS_PROMPT, |line| timestamps::validate(line, duration))?;

        let outcome = split_with_bar(&source, &points, settings, exporter.as_ref())
            .with_context(|| format!("failed to split '{}'", path.display()))?;
        info!(
            source = %outcome.source.display(),
            output = %outcome.output_dir.display(),
            parts = outcome.parts.len(),
            duration_ms = outcome.duration_ms,
            "split finished"
        );
        show_parts(console, &outcome)?;
        outcomes.push(outcome);
    }

    console.say("Done!")?;

    let edit = console.confirm(EDIT_PROMPT)?;
    console.blank()?;
    if !edit {
        return Ok(());
    }

    edit_tags(console, &outcomes, settings.tags.version.into())?;
    console.say("ID3 tags updated!")?;
    Ok(())
}

fn split_with_bar(
    source: &MpegSource,
    points: &SplitPoints,
    settings: &Settings,
    exporter: &dyn Exporter,
) -> Result<SplitOutcome, SplitError> {
    let bar = ProgressBar::with_draw_target(None, ProgressDrawTarget::stderr());
    let style =
        ProgressStyle::with_template("{spinner:.green} {bar:40.cyan/blue} {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar());

    let bar_handle = bar.clone();
    let result = split_with_progress(source, points, settings, exporter, move |event| {
        match event {
            ProgressEvent::Start { segments } => {
                bar_handle.set_style(style.clone());
                bar_handle.set_length(segments as u64);
            }
            ProgressEvent::Wrote { path, .. } => {
                bar_handle.inc(1);
                bar_handle.set_message(display_name(path));
            }
            ProgressEvent::Finish => bar_handle.set_message("tagged"),
        }
    });

    bar.finish_and_clear();
    result
}

/// Tag-edit phase over every part of every split file, in order.
fn edit_tags<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    outcomes: &[SplitOutcome],
    version: Version,
) -> anyhow::Result<()> {
    for part in outcomes.iter().flat_map(|o| o.parts.iter()) {
        edit_part(console, part, version)?;
    }
    Ok(())
}

fn edit_part<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    path: &Path,
    version: Version,
) -> anyhow::Result<()> {
    let name = display_name(path);

    let mut tag = match tags::load(path) {
        Ok(Some(tag)) => tag,
        Ok(None) => {
            warn!(part = %path.display(), "no ID3 tag, skipping");
            console.say(format_args!("Skipping '{name}': no ID3 tag found."))?;
            return Ok(());
        }
        Err(e) => {
            warn!(part = %path.display(), error = %e, "could not read tag, skipping");
            console.say(format_args!("Skipping '{name}': {e}"))?;
            return Ok(());
        }
    };

    let current = tags::snapshot(&tag);
    let mut editor = TagEditor::new();

    while editor.state() != EditState::Saved {
        let line = match editor.state().editing() {
            Some(field) => console.ask(&format!("Enter the new {}: ", field.label()))?,
            None => {
                console.blank()?;
                let heading = if editor.edit().is_empty() {
                    "Current tags"
                } else {
                    "Pending tags"
                };
                console.say(format_args!("{heading} for '{name}':"))?;
                show_tags(console, &editor.preview(&current))?;
                show_menu(console)?;
                let choice = console.ask(CHOICE_PROMPT)?;
                console.blank()?;
                choice
            }
        };
        editor.handle(&line);
    }

    match tags::save(path, &mut tag, editor.edit(), version) {
        Ok(true) => {
            console.blank()?;
            console.say(format_args!("New tags for '{name}':"))?;
            show_tags(console, &tags::snapshot(&tag))?;
        }
        Ok(false) => {}
        Err(e) => {
            warn!(part = %path.display(), error = %e, "could not save tag");
            console.say(format_args!("Could not save tags for '{name}': {e}"))?;
        }
    }
    Ok(())
}

/// One line per written part: name, time range, length.
fn show_parts<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    outcome: &SplitOutcome,
) -> io::Result<()> {
    console.say(format_args!("Wrote {}:", outcome.output_dir.display()))?;
    for (part, segment) in outcome.parts.iter().zip(&outcome.segments) {
        console.say(format_args!(
            "   {} {segment} ({} ms)",
            display_name(part),
            segment.len_ms()
        ))?;
    }
    Ok(())
}

fn show_tags<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    snapshot: &TagSnapshot,
) -> io::Result<()> {
    for field in TagField::ALL {
        let value = snapshot.get(field).unwrap_or("(not set)");
        console.say(format_args!("{}: {value}", field.heading()))?;
    }
    console.say(RULE)
}

fn show_menu<R: BufRead, W: Write>(console: &mut Console<R, W>) -> io::Result<()> {
    console.say("Select a tag to update:")?;
    for field in TagField::ALL {
        console.say(format_args!("   {} - {}", field.key(), field.heading()))?;
    }
    console.say("   Q - Quit and Save")
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .unwrap_or(path.as_os_str())
        .to_string_lossy()
        .into_owned()
}
