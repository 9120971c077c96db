//! Error types for the splitting pipeline.

use std::path::PathBuf;

use symphonia::core::errors::Error as SymphoniaError;
use thiserror::Error;

/// Rejections from the timestamp validator.
///
/// All of these are retryable: the console prints the message and asks again.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimestampError {
    #[error("Invalid timestamps. Please enter valid integer values separated by commas.")]
    Empty,

    #[error("Invalid timestamps. Please enter values in increasing order.")]
    NotIncreasing,

    #[error("Invalid timestamps. Please enter unique values within the audio duration.")]
    Duplicate,

    #[error(
        "Invalid timestamps. Please enter unique values within the audio duration ({value} ms > {duration} ms)."
    )]
    OutOfBounds { value: u64, duration: u64 },
}

/// Fatal errors while loading, splitting or tagging a file.
#[derive(Debug, Error)]
pub enum SplitError {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("could not read audio stream: {0}")]
    Symphonia(#[from] SymphoniaError),

    #[error("tag error: {0}")]
    Id3(#[from] id3::Error),

    /// The container does not expose any default track.
    #[error("input stream does not provide a default track")]
    MissingDefaultTrack,

    #[error("input stream does not advertise a sample rate")]
    MissingSampleRate,

    #[error("unsupported codec")]
    UnsupportedCodec,

    #[error("ffmpeg failed on '{}' ({status}): {stderr}", path.display())]
    Ffmpeg {
        path: PathBuf,
        status: String,
        stderr: String,
    },
}
