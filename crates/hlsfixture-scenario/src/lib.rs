//! # hlsfixture-scenario
//!
//! Compiles playback scenarios for the hlsfixture HLS test server.
//!
//! A scenario is a compact token string carried in the request path, for
//! example `s5-p30-r10-e404`:
//!
//! | token | operation | default |
//! |-------|-----------|---------|
//! | `s<n>` | startup delay of `n` seconds on segment 0 | 5 |
//! | `p<n>` | `n` seconds of nominal playback | 30 |
//! | `r<n>` | rebuffer pause of `n` seconds on the current segment | 30 |
//! | `e<n>` | fail the current segment with status `n` | 500 |
//!
//! ## Quick Start
//!
//! ```
//! use hlsfixture_scenario::{ResolvedAction, Scenario};
//!
//! let scenario = Scenario::compile("/s5-p30-r10");
//!
//! assert_eq!(scenario.total_length_secs, 35);
//! assert_eq!(
//!     scenario.resolve_segment("7"),
//!     Ok(ResolvedAction::DelayedNormal { delay_secs: 10 })
//! );
//! assert_eq!(scenario.resolve_segment("3"), Ok(ResolvedAction::Normal));
//! ```
//!
//! Everything here is a pure function of the scenario string. Caching
//! compiled scenarios is left to the caller.

pub mod error;
pub mod length;
pub mod model;
pub mod parser;
pub mod resolver;
pub mod timeline;

use std::num::NonZeroU64;

pub use error::{Error, Result};
pub use length::total_length;
pub use model::{Operation, ResolvedAction, SegmentAction, Timeline};
pub use parser::{parse, parse_tokens, TokenOutcome};
pub use resolver::{resolve, resolve_elapsed, resolve_filename};

/// Duration of every segment, in seconds.
pub const SEGMENT_LENGTH_SECS: u64 = 5;

/// [`SEGMENT_LENGTH_SECS`] as the resolver's segment length.
pub const SEGMENT_LENGTH: NonZeroU64 = match NonZeroU64::new(SEGMENT_LENGTH_SECS) {
    Some(length) => length,
    None => panic!("segment length must be positive"),
};

/// Number of segments `duration_secs` of playback occupies.
pub(crate) fn segment_slots(duration_secs: u64) -> u64 {
    duration_secs.div_ceil(SEGMENT_LENGTH_SECS)
}

/// A compiled scenario: its operations, timeline and nominal length.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Scenario {
    /// Parsed operations, in token order.
    pub operations: Vec<Operation>,
    /// Per-segment actions.
    pub timeline: Timeline,
    /// Nominal media length in seconds.
    pub total_length_secs: u64,
}

impl Scenario {
    /// Parse and compile a scenario path.
    pub fn compile(scenario_path: &str) -> Self {
        Self::from_operations(parse(scenario_path))
    }

    /// Compile already parsed operations.
    pub fn from_operations(operations: Vec<Operation>) -> Self {
        let timeline = timeline::build(&operations);
        let total_length_secs = total_length(&operations);
        Self {
            operations,
            timeline,
            total_length_secs,
        }
    }

    /// Number of segments the rendition playlist advertises.
    pub fn segment_count(&self) -> u64 {
        self.total_length_secs / SEGMENT_LENGTH_SECS
    }

    /// Whether the playlist is long enough for every timeline action.
    ///
    /// Every action index must be at most `total_length / segment length`.
    pub fn is_consistent(&self) -> bool {
        self.timeline
            .max_index()
            .map_or(true, |max| max <= self.segment_count())
    }

    /// Resolve a segment request from its filename stem (`7` for `7.ts`).
    pub fn resolve_segment(&self, stem: &str) -> Result<ResolvedAction> {
        resolve_filename(&self.timeline, stem, SEGMENT_LENGTH)
    }
}
