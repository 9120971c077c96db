//! core/timestamps.rs
//!
//! Turn a raw "10,2500,61000" line into [`SplitPoints`].
//!
//! Policy: parsing is tolerant, validation is strict.
//! - Tokens that are not plain non-negative integers are dropped without
//!   complaint (so "10, abc, 20" is read as `[10, 20]`).
//! - What survives must be strictly increasing and within the duration,
//!   otherwise the whole line is rejected and the caller asks again.

use super::error::TimestampError;
use super::types::SplitPoints;

/// Parse a comma-separated list of millisecond offsets.
///
/// A token is kept only if, after trimming, it is a non-empty run of ASCII
/// digits. Digit runs too large for `u64` saturate to `u64::MAX`, which no
/// duration can contain.
pub fn parse_timestamps(raw: &str) -> Vec<u64> {
    raw.trim()
        .split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty() && t.bytes().all(|b| b.is_ascii_digit()))
        .map(|t| t.parse::<u64>().unwrap_or(u64::MAX))
        .collect()
}

/// Validate user input against an audio duration (ms).
///
/// Rejected when, in this order:
/// - nothing parseable remains
/// - values go backwards
/// - a value repeats
/// - a value is past the end of the audio
pub fn validate(raw: &str, duration: u64) -> Result<SplitPoints, TimestampError> {
    let points = parse_timestamps(raw);

    if points.is_empty() {
        return Err(TimestampError::Empty);
    }

    if points.windows(2).any(|w| w[0] > w[1]) {
        return Err(TimestampError::NotIncreasing);
    }

    if points.windows(2).any(|w| w[0] == w[1]) {
        return Err(TimestampError::Duplicate);
    }

    // Sorted at this point, so the last value is the largest.
    let max = points[points.len() - 1];
    if max > duration {
        return Err(TimestampError::OutOfBounds {
            value: max,
            duration,
        });
    }

    Ok(SplitPoints::new_unchecked(points))
}
