//! core/tags/mod.rs
//!
//! ID3 tag read/write utilities.
//! Public API:
//! - [`load`] reads a file's tag, `None` when there is nothing readable.
//! - [`snapshot`] pulls artist/album/title out for display.
//! - [`save`] writes a user's edits back to disk.
//! - [`tag_parts`] stamps exported parts with the source tag and track numbers.

mod read;
mod write;

pub use read::{load, snapshot};
pub use write::{apply_edit, save, tag_parts};
