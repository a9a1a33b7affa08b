//! Segment request resolution.
//!
//! Maps a requested segment onto the timeline and decides whether it is
//! served normally, delayed, failed, or failed after a delay.

use std::num::NonZeroU64;

use crate::error::{Error, Result};
use crate::model::{ResolvedAction, SegmentAction, Timeline};

/// Resolve a segment by its filename index (`7` for `7.ts`).
pub fn resolve(
    timeline: &Timeline,
    requested_index: u64,
    segment_length: NonZeroU64,
) -> ResolvedAction {
    match requested_index.checked_mul(segment_length.get()) {
        Some(elapsed_secs) => resolve_elapsed(timeline, elapsed_secs, segment_length),
        // Past the representable elapsed time the index already names the segment
        None => lookup(timeline, requested_index),
    }
}

/// Resolve the segment a player `elapsed_secs` into the session is asking
/// for. Times between segment boundaries round up to the next segment.
pub fn resolve_elapsed(
    timeline: &Timeline,
    elapsed_secs: u64,
    segment_length: NonZeroU64,
) -> ResolvedAction {
    lookup(timeline, elapsed_secs.div_ceil(segment_length.get()))
}

fn lookup(timeline: &Timeline, segment: u64) -> ResolvedAction {
    timeline
        .get(segment)
        .map_or(ResolvedAction::Normal, to_resolved)
}

/// Resolve a segment from its filename stem.
///
/// Fails with [`Error::InvalidRequest`] when the stem is not a
/// non-negative integer.
pub fn resolve_filename(
    timeline: &Timeline,
    stem: &str,
    segment_length: NonZeroU64,
) -> Result<ResolvedAction> {
    let index = parse_index(stem)?;
    Ok(resolve(timeline, index, segment_length))
}

fn parse_index(stem: &str) -> Result<u64> {
    if stem.is_empty() || !stem.bytes().all(|b| b.is_ascii_digit()) {
        return Err(Error::invalid_request(stem));
    }
    stem.parse().map_err(|_| Error::invalid_request(stem))
}

fn to_resolved(action: &SegmentAction) -> ResolvedAction {
    match (action.delay_secs, action.error_code) {
        (None, None) => ResolvedAction::Normal,
        (Some(delay_secs), None) => ResolvedAction::DelayedNormal { delay_secs },
        (None, Some(code)) => ResolvedAction::Failure { code },
        (Some(delay_secs), Some(code)) => ResolvedAction::DelayedFailure { delay_secs, code },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{parse, timeline, SEGMENT_LENGTH};

    fn sample_timeline() -> Timeline {
        timeline::build(&parse("s5-p30-r10"))
    }

    #[test]
    fn rebuffer_segment_is_delayed() {
        assert_eq!(
            resolve(&sample_timeline(), 7, SEGMENT_LENGTH),
            ResolvedAction::DelayedNormal { delay_secs: 10 }
        );
    }

    #[test]
    fn untouched_segment_is_normal() {
        assert_eq!(
            resolve(&sample_timeline(), 3, SEGMENT_LENGTH),
            ResolvedAction::Normal
        );
    }

    #[test]
    fn startup_segment_is_delayed() {
        assert_eq!(
            resolve(&sample_timeline(), 0, SEGMENT_LENGTH),
            ResolvedAction::DelayedNormal { delay_secs: 5 }
        );
    }

    #[test]
    fn failures_with_and_without_delay() {
        let timeline = timeline::build(&parse("p5-e404-r3-e503"));
        assert_eq!(
            resolve(&timeline, 1, SEGMENT_LENGTH),
            ResolvedAction::Failure { code: 404 }
        );
        assert_eq!(
            resolve(&timeline, 2, SEGMENT_LENGTH),
            ResolvedAction::DelayedFailure {
                delay_secs: 3,
                code: 503
            }
        );
    }

    #[test]
    fn unaligned_elapsed_time_rounds_up() {
        let timeline = sample_timeline();
        assert_eq!(
            resolve_elapsed(&timeline, 31, SEGMENT_LENGTH),
            ResolvedAction::DelayedNormal { delay_secs: 10 }
        );
        assert_eq!(
            resolve_elapsed(&timeline, 35, SEGMENT_LENGTH),
            ResolvedAction::DelayedNormal { delay_secs: 10 }
        );
        assert_eq!(
            resolve_elapsed(&timeline, 36, SEGMENT_LENGTH),
            ResolvedAction::Normal
        );
    }

    #[test]
    fn other_segment_lengths_index_the_same_timeline() {
        let length = NonZeroU64::new(2).unwrap();
        assert_eq!(
            resolve(&sample_timeline(), 7, length),
            ResolvedAction::DelayedNormal { delay_secs: 10 }
        );
    }

    #[test]
    fn filename_stems_parse_as_indices() {
        assert_eq!(
            resolve_filename(&sample_timeline(), "7", SEGMENT_LENGTH),
            Ok(ResolvedAction::DelayedNormal { delay_secs: 10 })
        );
        assert_eq!(
            resolve_filename(&sample_timeline(), "007", SEGMENT_LENGTH),
            Ok(ResolvedAction::DelayedNormal { delay_secs: 10 })
        );
    }

    #[test]
    fn malformed_stems_are_invalid_requests() {
        for stem in ["", "abc", "-1", "+3", "7a", " 7", "99999999999999999999999"] {
            assert_eq!(
                resolve_filename(&sample_timeline(), stem, SEGMENT_LENGTH),
                Err(Error::invalid_request(stem)),
                "stem {stem:?}"
            );
        }
    }

    #[test]
    fn empty_timeline_is_always_normal() {
        let timeline = Timeline::new();
        for index in [0, 1, 100] {
            assert_eq!(resolve(&timeline, index, SEGMENT_LENGTH), ResolvedAction::Normal);
        }
    }

    #[test]
    fn huge_indices_are_not_clamped() {
        let last_reachable = u64::MAX / SEGMENT_LENGTH.get();
        let timeline = Timeline::from(vec![SegmentAction::delay(last_reachable, 10)]);

        assert_eq!(
            resolve(&timeline, last_reachable, SEGMENT_LENGTH),
            ResolvedAction::DelayedNormal { delay_secs: 10 }
        );
        for index in [last_reachable + 1, u64::MAX] {
            assert_eq!(
                resolve(&timeline, index, SEGMENT_LENGTH),
                ResolvedAction::Normal,
                "index {index}"
            );
        }
    }

    #[test]
    fn huge_indices_find_their_own_action() {
        let timeline = Timeline::from(vec![SegmentAction::error(u64::MAX, 503)]);
        assert_eq!(
            resolve(&timeline, u64::MAX, SEGMENT_LENGTH),
            ResolvedAction::Failure { code: 503 }
        );
    }
}
