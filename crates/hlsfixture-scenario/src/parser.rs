//! Scenario token parser.
//!
//! Turns a path such as `/s5-p30-r10` into
//! `[Startup(5), Playback(30), Rebuffer(10)]`. Parsing is total: a token
//! that cannot be understood is dropped and the rest of the string is
//! still parsed.

use crate::model::Operation;

/// Separator between tokens.
pub const TOKEN_DELIMITER: char = '-';

/// Classification of a single token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenOutcome {
    /// The token produced an operation.
    Operation(Operation),
    /// The token was empty (leading, trailing or doubled delimiter).
    Empty,
    /// The first character does not select an operation kind.
    UnknownKind(char),
}

impl TokenOutcome {
    /// The operation, if the token produced one.
    pub fn operation(self) -> Option<Operation> {
        match self {
            TokenOutcome::Operation(op) => Some(op),
            TokenOutcome::Empty | TokenOutcome::UnknownKind(_) => None,
        }
    }
}

/// Parse a scenario path into its operations, in token order.
pub fn parse(scenario_path: &str) -> Vec<Operation> {
    tokens(scenario_path)
        .filter_map(|token| parse_token(token).operation())
        .collect()
}

/// Classify every token of a scenario path, in order.
pub fn parse_tokens(scenario_path: &str) -> Vec<TokenOutcome> {
    tokens(scenario_path).map(parse_token).collect()
}

/// Parse a single token such as `r10` or `e`.
pub fn parse_token(token: &str) -> TokenOutcome {
    let mut chars = token.chars();
    let Some(kind) = chars.next() else {
        return TokenOutcome::Empty;
    };
    let magnitude = parse_magnitude(chars.as_str());

    let op = match kind {
        's' => Operation::startup(magnitude),
        'p' => Operation::playback(magnitude),
        'r' => Operation::rebuffer(magnitude),
        'e' => Operation::error(magnitude.and_then(status_code)),
        other => return TokenOutcome::UnknownKind(other),
    };

    TokenOutcome::Operation(op)
}

fn tokens(scenario_path: &str) -> impl Iterator<Item = &str> {
    let ops = scenario_path.strip_prefix('/').unwrap_or(scenario_path);
    ops.split(TOKEN_DELIMITER)
}

/// A non-negative base-10 integer, or `None` when absent or malformed.
fn parse_magnitude(data: &str) -> Option<u64> {
    if data.is_empty() {
        return None;
    }
    data.parse().ok()
}

/// Narrow a magnitude to something usable as an HTTP status.
fn status_code(value: u64) -> Option<u16> {
    u16::try_from(value)
        .ok()
        .filter(|code| (100..=999).contains(code))
}
