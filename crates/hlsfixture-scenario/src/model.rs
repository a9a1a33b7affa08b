//! Scenario data model.
//!
//! [`Operation`] is what the parser produces, [`Timeline`] is what the
//! builder compiles it into, and [`ResolvedAction`] is the answer for a
//! single segment request.

use std::fmt;
use std::time::Duration;

/// Default startup delay in seconds.
pub const DEFAULT_STARTUP_SECS: u64 = 5;
/// Default nominal playback in seconds.
pub const DEFAULT_PLAYBACK_SECS: u64 = 30;
/// Default rebuffer pause in seconds.
pub const DEFAULT_REBUFFER_SECS: u64 = 30;
/// Default status code for an injected error.
pub const DEFAULT_ERROR_CODE: u16 = 500;

/// One parsed scenario instruction.
///
/// Each variant carries exactly the value valid for its kind. Defaults are
/// applied by the parser, so a value of this type is always complete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum Operation {
    /// Delay before the first segment is served.
    Startup { delay_secs: u64 },
    /// Nominal playback with no special handling.
    Playback { duration_secs: u64 },
    /// Stall on the current segment.
    Rebuffer { delay_secs: u64 },
    /// Fail the current segment with a status code.
    Error { code: u16 },
}

impl Operation {
    /// Startup with an optional explicit delay.
    pub fn startup(delay_secs: Option<u64>) -> Self {
        Self::Startup {
            delay_secs: delay_secs.unwrap_or(DEFAULT_STARTUP_SECS),
        }
    }

    /// Playback with an optional explicit duration.
    pub fn playback(duration_secs: Option<u64>) -> Self {
        Self::Playback {
            duration_secs: duration_secs.unwrap_or(DEFAULT_PLAYBACK_SECS),
        }
    }

    /// Rebuffer with an optional explicit delay.
    pub fn rebuffer(delay_secs: Option<u64>) -> Self {
        Self::Rebuffer {
            delay_secs: delay_secs.unwrap_or(DEFAULT_REBUFFER_SECS),
        }
    }

    /// Error with an optional explicit status code.
    pub fn error(code: Option<u16>) -> Self {
        Self::Error {
            code: code.unwrap_or(DEFAULT_ERROR_CODE),
        }
    }
}

impl fmt::Display for Operation {
    /// Formats the operation back into its token form, e.g. `r10`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Startup { delay_secs } => write!(f, "s{}", delay_secs),
            Operation::Playback { duration_secs } => write!(f, "p{}", duration_secs),
            Operation::Rebuffer { delay_secs } => write!(f, "r{}", delay_secs),
            Operation::Error { code } => write!(f, "e{}", code),
        }
    }
}

/// Non-nominal handling for one segment index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SegmentAction {
    /// Segment index this action applies to.
    pub segment_index: u64,
    /// Delay before the response, in seconds. Always positive when present.
    pub delay_secs: Option<u64>,
    /// Status code to fail the response with.
    pub error_code: Option<u16>,
}

impl SegmentAction {
    /// An action that only delays the segment.
    pub fn delay(segment_index: u64, delay_secs: u64) -> Self {
        Self {
            segment_index,
            delay_secs: Some(delay_secs),
            error_code: None,
        }
    }

    /// An action that only fails the segment.
    pub fn error(segment_index: u64, code: u16) -> Self {
        Self {
            segment_index,
            delay_secs: None,
            error_code: Some(code),
        }
    }

    /// Add `secs` to this action's delay.
    pub(crate) fn add_delay(&mut self, secs: u64) {
        self.delay_secs = Some(self.delay_secs.unwrap_or(0).saturating_add(secs));
    }
}

/// Compiled per-segment actions, in emission order.
///
/// Indices not present are served normally.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Timeline {
    actions: Vec<SegmentAction>,
}

impl Timeline {
    /// Create an empty timeline.
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up the action for a segment index.
    pub fn get(&self, segment_index: u64) -> Option<&SegmentAction> {
        self.actions
            .iter()
            .find(|action| action.segment_index == segment_index)
    }

    /// All actions in emission order.
    pub fn actions(&self) -> &[SegmentAction] {
        &self.actions
    }

    /// Number of actions.
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    /// Whether every segment is served normally.
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Highest segment index referenced by any action.
    pub fn max_index(&self) -> Option<u64> {
        self.actions.iter().map(|a| a.segment_index).max()
    }

    pub(crate) fn last_mut(&mut self) -> Option<&mut SegmentAction> {
        self.actions.last_mut()
    }

    pub(crate) fn get_mut(&mut self, segment_index: u64) -> Option<&mut SegmentAction> {
        self.actions
            .iter_mut()
            .find(|action| action.segment_index == segment_index)
    }

    pub(crate) fn push(&mut self, action: SegmentAction) {
        self.actions.push(action);
    }
}

impl From<Vec<SegmentAction>> for Timeline {
    fn from(actions: Vec<SegmentAction>) -> Self {
        Self { actions }
    }
}

/// Response behavior for one segment request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "action", rename_all = "snake_case"))]
pub enum ResolvedAction {
    /// Serve the segment immediately.
    Normal,
    /// Serve the segment after a delay.
    DelayedNormal { delay_secs: u64 },
    /// Fail immediately with a status code.
    Failure { code: u16 },
    /// Fail with a status code after a delay.
    DelayedFailure { delay_secs: u64, code: u16 },
}

impl ResolvedAction {
    /// Delay to apply before (or while) responding.
    pub fn delay(&self) -> Option<Duration> {
        match self {
            ResolvedAction::DelayedNormal { delay_secs }
            | ResolvedAction::DelayedFailure { delay_secs, .. } => {
                Some(Duration::from_secs(*delay_secs))
            }
            _ => None,
        }
    }

    /// Status code to fail with, if this is a failure.
    pub fn status(&self) -> Option<u16> {
        match self {
            ResolvedAction::Failure { code } | ResolvedAction::DelayedFailure { code, .. } => {
                Some(*code)
            }
            _ => None,
        }
    }
}

impl fmt::Display for ResolvedAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolvedAction::Normal => write!(f, "normal"),
            ResolvedAction::DelayedNormal { delay_secs } => {
                write!(f, "delayed {}s", delay_secs)
            }
            ResolvedAction::Failure { code } => write!(f, "failure {}", code),
            ResolvedAction::DelayedFailure { delay_secs, code } => {
                write!(f, "failure {} after {}s", code, delay_secs)
            }
        }
    }
}
