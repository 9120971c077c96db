//! Core data types shared between the splitting pipeline and the console.
//!
//! Rule of thumb:
//! - These structs are plain bags of data
//! - No console code
//! - No filesystem code
//! - No tag parsing code
//!
//! All times are whole milliseconds (`u64`).

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

/// Validated split points for one audio file.
///
/// Invariants (upheld by [`crate::core::timestamps::validate`], the only constructor):
/// - non-empty
/// - strictly increasing, so no duplicates
/// - every value is `<=` the duration it was validated against
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitPoints(Vec<u64>);

impl SplitPoints {
    pub(crate) fn new_unchecked(points: Vec<u64>) -> Self {
        debug_assert!(!points.is_empty());
        debug_assert!(points.windows(2).all(|w| w[0] < w[1]));
        Self(points)
    }

    pub fn as_slice(&self) -> &[u64] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false for validated points.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// A half-open interval `[start, end)` in milliseconds.
///
/// `start == end` is a legal, empty segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    pub start: u64,
    pub end: u64,
}

impl Segment {
    pub fn new(start: u64, end: u64) -> Self {
        debug_assert!(start <= end);
        Self { start, end }
    }

    pub fn len_ms(&self) -> u64 {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.start, self.end)
    }
}

/// The three tag fields the editor knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TagField {
    Artist,
    Album,
    Title,
}

impl TagField {
    pub const ALL: [TagField; 3] = [TagField::Artist, TagField::Album, TagField::Title];

    /// ID3v2.3/2.4 frame id backing this field.
    pub fn frame_id(self) -> &'static str {
        match self {
            TagField::Artist => "TPE1",
            TagField::Album => "TALB",
            TagField::Title => "TIT2",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TagField::Artist => "artist",
            TagField::Album => "album",
            TagField::Title => "title",
        }
    }

    pub fn heading(self) -> &'static str {
        match self {
            TagField::Artist => "Artist",
            TagField::Album => "Album",
            TagField::Title => "Title",
        }
    }

    /// Menu letter. Album is `B` since `A` is taken.
    pub fn key(self) -> char {
        match self {
            TagField::Artist => 'A',
            TagField::Album => 'B',
            TagField::Title => 'T',
        }
    }
}

/// Pending tag changes for one file.
///
/// Fields not present are left untouched on disk.
/// An empty string value means "remove that frame".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagEdit {
    fields: BTreeMap<TagField, String>,
}

impl TagEdit {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a value; a later call for the same field wins.
    pub fn set(&mut self, field: TagField, value: impl Into<String>) {
        self.fields.insert(field, value.into());
    }

    pub fn get(&self, field: TagField) -> Option<&str> {
        self.fields.get(&field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (TagField, &str)> {
        self.fields.iter().map(|(k, v)| (*k, v.as_str()))
    }
}

/// What the console shows for a file's tags.
///
/// `Option` because a tag container can exist without these frames.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagSnapshot {
    pub artist: Option<String>,
    pub album: Option<String>,
    pub title: Option<String>,
}

impl TagSnapshot {
    pub fn get(&self, field: TagField) -> Option<&str> {
        match field {
            TagField::Artist => self.artist.as_deref(),
            TagField::Album => self.album.as_deref(),
            TagField::Title => self.title.as_deref(),
        }
    }
}

/// Everything the tag-edit phase needs to know about one split input.
///
/// Returned by the split step so the output directory is handed on explicitly.
#[derive(Debug, Clone)]
pub struct SplitOutcome {
    pub source: PathBuf,
    pub output_dir: PathBuf,
    /// Written part files, in time order.
    pub parts: Vec<PathBuf>,
    pub duration_ms: u64,
    pub segments: Vec<Segment>,
}
