use std::fmt;
use std::str::FromStr;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer};

/// Top-level settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/mp3split/config.toml` or `~/.config/mp3split/config.toml`
///
/// Precedence (highest wins):
/// 1) Command-line flags (only `--mode` today)
/// 2) Environment variables (prefix `MP3SPLIT__`, `__` as nested separator)
/// 3) Config file (if present)
/// 4) Struct defaults
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub export: ExportSettings,
    pub tags: TagSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ExportSettings {
    /// How segments are written. See [`ExportMode`].
    pub mode: ExportMode,
    /// Program probed and run for `ffmpeg` exports.
    pub ffmpeg_program: String,
    /// LAME VBR quality passed as `-q:a` (0 best, 9 smallest).
    pub ffmpeg_quality: u8,
    /// File name prefix of each part: `<prefix><n>.mp3`.
    pub part_prefix: String,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            mode: ExportMode::Auto,
            ffmpeg_program: "ffmpeg".to_string(),
            ffmpeg_quality: 2,
            part_prefix: "part".to_string(),
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExportMode {
    /// ffmpeg when it is installed, frame copy otherwise.
    Auto,
    /// Lossless frame copy; cuts snap to MPEG frame boundaries.
    #[serde(alias = "frame", alias = "copy")]
    Frames,
    /// Re-encode each part with ffmpeg for exact cuts.
    Ffmpeg,
}

impl FromStr for ExportMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" => Ok(ExportMode::Auto),
            "frames" | "frame" | "copy" => Ok(ExportMode::Frames),
            "ffmpeg" => Ok(ExportMode::Ffmpeg),
            other => Err(format!(
                "unknown export mode '{other}' (expected auto, frames or ffmpeg)"
            )),
        }
    }
}

impl fmt::Display for ExportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ExportMode::Auto => "auto",
            ExportMode::Frames => "frames",
            ExportMode::Ffmpeg => "ffmpeg",
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TagSettings {
    /// ID3v2 version written to disk.
    pub version: TagVersion,
    /// Copy the source file's tag onto every part.
    pub copy_source: bool,
    /// Set TRCK to `n/total` on every part.
    pub number_tracks: bool,
}

impl Default for TagSettings {
    fn default() -> Self {
        Self {
            version: TagVersion::Id3v23,
            copy_source: true,
            number_tracks: true,
        }
    }
}

/// ID3v2 revision used when writing tags.
///
/// Accepted spellings: `id3v23`, `v23`, `v2.3`, `2.3` (and the same for 2.4),
/// any case. `2.3` may also arrive as a number, from an unquoted TOML value
/// or from `MP3SPLIT__TAGS__VERSION=2.3`, which the environment layer parses.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum TagVersion {
    Id3v23,
    Id3v24,
}

impl FromStr for TagVersion {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "id3v23" | "v23" | "v2.3" | "2.3" => Ok(TagVersion::Id3v23),
            "id3v24" | "v24" | "v2.4" | "2.4" => Ok(TagVersion::Id3v24),
            other => Err(format!(
                "unknown tag version '{other}' (expected 2.3 or 2.4)"
            )),
        }
    }
}

impl<'de> Deserialize<'de> for TagVersion {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct VersionVisitor;

        impl Visitor<'_> for VersionVisitor {
            type Value = TagVersion;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an ID3v2 version: 2.3, 2.4, id3v23 or id3v24")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<TagVersion, E> {
                v.parse().map_err(E::custom)
            }

            fn visit_f64<E: de::Error>(self, v: f64) -> Result<TagVersion, E> {
                if v == 2.3 {
                    Ok(TagVersion::Id3v23)
                } else if v == 2.4 {
                    Ok(TagVersion::Id3v24)
                } else {
                    Err(E::invalid_value(de::Unexpected::Float(v), &self))
                }
            }
        }

        deserializer.deserialize_any(VersionVisitor)
    }
}
