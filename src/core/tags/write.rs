//! core/tags/write.rs
//! Write ID3 tags back to disk.
//!
//! Two writers:
//! - [`save`] applies a user's [`TagEdit`] to one file
//! - [`tag_parts`] stamps freshly exported parts with the source's tag

use std::fs;
use std::path::{Path, PathBuf};

use id3::{Tag, TagLike, Version};
use tracing::debug;

use crate::config::{TagSettings, TagVersion};
use crate::core::error::SplitError;
use crate::core::types::TagEdit;

impl From<TagVersion> for Version {
    fn from(v: TagVersion) -> Self {
        match v {
            TagVersion::Id3v23 => Version::Id3v23,
            TagVersion::Id3v24 => Version::Id3v24,
        }
    }
}

/// Helper: set a plain text frame (T***), or remove it when the value is blank.
fn set_text_or_remove(tag: &mut Tag, id: &str, value: &str) {
    match value.trim() {
        "" => {
            tag.remove(id); // returns the removed frames; not needed
        }
        s => tag.set_text(id, s.to_string()),
    }
}

/// Helper: write TRCK as "n/total".
fn set_track_pair(tag: &mut Tag, n: usize, total: usize) {
    tag.set_text("TRCK", format!("{n}/{total}"));
}

/// Apply `edit` to `tag` in memory. Fields not in `edit` are untouched.
pub fn apply_edit(tag: &mut Tag, edit: &TagEdit) {
    for (field, value) in edit.iter() {
        set_text_or_remove(tag, field.frame_id(), value);
    }
}

/// Apply `edit` and write the tag to `path`.
///
/// Returns `Ok(false)` without touching the file when `edit` is empty, so
/// saving "no changes" any number of times changes nothing.
pub fn save(
    path: &Path,
    tag: &mut Tag,
    edit: &TagEdit,
    version: Version,
) -> Result<bool, SplitError> {
    if edit.is_empty() {
        return Ok(false);
    }

    apply_edit(tag, edit);
    tag.write_to_path(path, version)?;

    debug!(path = %path.display(), fields = ?edit, "saved tag");
    Ok(true)
}

/// Give every exported part a tag.
///
/// - `copy_source`: start from the source's tag (minus TLEN, which no longer fits)
/// - `number_tracks`: TRCK = `n/total`
///
/// Zero-length parts (a split point at 0 or at the very end) hold no audio and
/// stay untagged. They are left out of the numbering too, so `n/total` counts
/// the parts that actually play.
pub fn tag_parts(
    source: Option<&Tag>,
    parts: &[PathBuf],
    settings: &TagSettings,
) -> Result<(), SplitError> {
    let mut audible = Vec::with_capacity(parts.len());
    for part in parts {
        if fs::metadata(part)?.len() == 0 {
            debug!(part = %part.display(), "empty part, not tagged");
        } else {
            audible.push(part);
        }
    }

    let total = audible.len();
    for (i, part) in audible.into_iter().enumerate() {
        let mut tag = match source {
            Some(src) if settings.copy_source => src.clone(),
            _ => Tag::new(),
        };
        tag.remove("TLEN");

        if settings.number_tracks {
            set_track_pair(&mut tag, i + 1, total);
        }

        if tag.frames().next().is_none() {
            continue;
        }

        tag.write_to_path(part, settings.version.into())?;
    }

    debug!(parts = parts.len(), tagged = total, "tagged parts");
    Ok(())
}
