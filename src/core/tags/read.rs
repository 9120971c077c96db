//! core/tags/read.rs
//! Read the ID3 tag of an MP3.
//!
//! "No tag" is an ordinary answer here, not an error:
//! - `Ok(Some(tag))` = a tag container was found and parsed
//! - `Ok(None)` = no tag, or one too broken to parse
//! - `Err(..)` = the file itself could not be read

use std::io;
use std::path::Path;

use id3::{ErrorKind, Tag, TagLike};
use tracing::debug;

use crate::core::error::SplitError;
use crate::core::types::TagSnapshot;

pub fn load(path: &Path) -> Result<Option<Tag>, SplitError> {
    match Tag::read_from_path(path) {
        Ok(tag) => Ok(Some(tag)),
        Err(e) => match e.kind {
            // A truncated header reads as EOF; that is a broken tag, not a broken disk.
            ErrorKind::Io(err) if err.kind() != io::ErrorKind::UnexpectedEof => Err(err.into()),
            kind => {
                debug!(path = %path.display(), ?kind, "no readable tag");
                Ok(None)
            }
        },
    }
}

/// The three fields the console shows.
pub fn snapshot(tag: &Tag) -> TagSnapshot {
    TagSnapshot {
        artist: tag.artist().map(str::to_owned),
        album: tag.album().map(str::to_owned),
        title: tag.title().map(str::to_owned),
    }
}
