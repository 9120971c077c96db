//! mp3split
//!
//! Split MP3 files at user-chosen millisecond timestamps, write each piece to
//! a fresh `<stem>_<N>` folder, then optionally edit the pieces' ID3 tags.
//!
//! - `core`: validation, partitioning, export, tags (no console IO)
//! - `cli`: arguments and the interactive session
//! - `config`: `config.toml` + environment settings

pub mod cli;
pub mod config;
pub mod core;
