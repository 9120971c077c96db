//! core/partition.rs
//!
//! Cut `[0, duration)` into consecutive segments at validated split points.

use super::types::{Segment, SplitPoints};

/// Build `points.len() + 1` segments that cover `[0, duration)` with no gap
/// and no overlap.
///
/// A point at `0` or at `duration` produces an empty segment at that edge.
pub fn partition(points: &SplitPoints, duration: u64) -> Vec<Segment> {
    let mut segments = Vec::with_capacity(points.len() + 1);
    let mut start = 0;

    for &point in points.as_slice() {
        segments.push(Segment::new(start, point));
        start = point;
    }
    segments.push(Segment::new(start, duration));

    segments
}
