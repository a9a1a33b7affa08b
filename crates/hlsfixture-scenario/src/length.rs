//! Nominal media length.
//!
//! Sizes the rendition playlist. Playback rounds up to whole segments,
//! startups and errors occupy one segment each, and rebuffers recur on a
//! segment that is already counted.

use crate::model::Operation;
use crate::{segment_slots, SEGMENT_LENGTH_SECS};

/// Total nominal playback length of a scenario, in seconds.
pub fn total_length(ops: &[Operation]) -> u64 {
    ops.iter()
        .map(footprint)
        .fold(0, |total, secs| total.saturating_add(secs))
}

fn footprint(op: &Operation) -> u64 {
    match *op {
        Operation::Playback { duration_secs } => {
            segment_slots(duration_secs).saturating_mul(SEGMENT_LENGTH_SECS)
        }
        Operation::Rebuffer { .. } => 0,
        Operation::Startup { .. } | Operation::Error { .. } => SEGMENT_LENGTH_SECS,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;

    #[test]
    fn playback_rebuffer_startup() {
        let ops = [
            Operation::playback(Some(30)),
            Operation::rebuffer(Some(10)),
            Operation::startup(Some(5)),
        ];
        assert_eq!(total_length(&ops), 35);
    }

    #[test]
    fn startup_counts_one_segment_regardless_of_delay() {
        assert_eq!(total_length(&parse("s60")), 5);
    }

    #[test]
    fn playback_rounds_up() {
        assert_eq!(total_length(&parse("p1")), 5);
        assert_eq!(total_length(&parse("p11")), 15);
        assert_eq!(total_length(&parse("p0")), 0);
    }

    #[test]
    fn errors_occupy_a_segment() {
        assert_eq!(total_length(&parse("e404-e")), 10);
    }

    #[test]
    fn empty_scenario_has_no_length() {
        assert_eq!(total_length(&[]), 0);
    }

    #[test]
    fn huge_playback_saturates() {
        let ops = [
            Operation::playback(Some(u64::MAX)),
            Operation::playback(Some(u64::MAX)),
        ];
        assert_eq!(total_length(&ops), u64::MAX);
    }
}
