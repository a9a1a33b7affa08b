//! Timeline compilation.
//!
//! Walks the operations with a segment cursor and records which segment
//! indices need a delay or an error:
//!
//! - `Startup` always lands on segment 0 and consumes one segment.
//! - `Playback` consumes `ceil(duration / segment length)` segments.
//! - `Rebuffer` stalls on the current segment without consuming it, so the
//!   next operation targets the same index.
//! - `Error` fails the current segment and consumes it. If the last
//!   emitted action sits on the current segment the error merges into it.

use crate::model::{Operation, SegmentAction, Timeline};
use crate::segment_slots;

/// Compile operations into a timeline.
pub fn build(ops: &[Operation]) -> Timeline {
    let mut timeline = Timeline::new();
    let mut cursor: u64 = 0;

    for op in ops {
        match *op {
            Operation::Startup { delay_secs } => {
                add_delay(&mut timeline, 0, delay_secs);
                cursor = cursor.saturating_add(1);
            }
            Operation::Playback { duration_secs } => {
                cursor = cursor.saturating_add(segment_slots(duration_secs));
            }
            Operation::Rebuffer { delay_secs } => {
                add_delay(&mut timeline, cursor, delay_secs);
            }
            Operation::Error { code } => {
                match timeline.last_mut() {
                    Some(last) if last.segment_index == cursor => last.error_code = Some(code),
                    _ => timeline.push(SegmentAction::error(cursor, code)),
                }
                cursor = cursor.saturating_add(1);
            }
        }
    }

    timeline
}

/// Record a delay on `index`, accumulating onto an existing action.
fn add_delay(timeline: &mut Timeline, index: u64, delay_secs: u64) {
    if delay_secs == 0 {
        return;
    }
    match timeline.get_mut(index) {
        Some(existing) => existing.add_delay(delay_secs),
        None => timeline.push(SegmentAction::delay(index, delay_secs)),
    }
}
