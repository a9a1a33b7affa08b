//! Human-readable scenario reports for the `inspect` command.

use hlsfixture_scenario::{parse_tokens, Operation, Scenario, TokenOutcome, SEGMENT_LENGTH_SECS};
use std::fmt;

/// Describe how a scenario string compiles.
pub fn describe(scenario_path: &str) -> String {
    ScenarioReport::new(scenario_path).to_string()
}

/// A compiled scenario together with the string it came from.
pub struct ScenarioReport<'a> {
    path: &'a str,
    scenario: Scenario,
}

impl<'a> ScenarioReport<'a> {
    pub fn new(path: &'a str) -> Self {
        Self {
            path,
            scenario: Scenario::compile(path),
        }
    }
}

impl fmt::Display for ScenarioReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let scenario = &self.scenario;

        writeln!(f, "Scenario: {}", self.path)?;

        writeln!(f, "\nOperations: {}", scenario.operations.len())?;
        for outcome in parse_tokens(self.path) {
            match outcome {
                TokenOutcome::Operation(op) => {
                    writeln!(f, "  {:<8} {}", op.to_string(), OperationSummary(&op))?
                }
                TokenOutcome::UnknownKind(kind) => {
                    writeln!(f, "  (ignored token starting with {:?})", kind)?
                }
                TokenOutcome::Empty => {}
            }
        }

        writeln!(f, "\nTimeline: {} actions", scenario.timeline.len())?;
        for action in scenario.timeline.actions() {
            write!(f, "  segment {}:", action.segment_index)?;
            if let Some(delay) = action.delay_secs {
                write!(f, " delay {}s", delay)?;
            }
            if let Some(code) = action.error_code {
                write!(f, " error {}", code)?;
            }
            writeln!(f)?;
        }

        writeln!(
            f,
            "\nTotal length: {}s ({} segments of {}s)",
            scenario.total_length_secs,
            scenario.segment_count(),
            SEGMENT_LENGTH_SECS
        )
    }
}

struct OperationSummary<'a>(&'a Operation);

impl fmt::Display for OperationSummary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Operation::Startup { delay_secs } => write!(f, "startup delay {}s", delay_secs),
            Operation::Playback { duration_secs } => write!(f, "playback {}s", duration_secs),
            Operation::Rebuffer { delay_secs } => write!(f, "rebuffer {}s", delay_secs),
            Operation::Error { code } => write!(f, "error {}", code),
        }
    }
}
