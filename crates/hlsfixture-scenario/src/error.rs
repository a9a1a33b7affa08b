//! Error types for hlsfixture-scenario.

use thiserror::Error;

/// Result type for scenario resolution.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while resolving a segment request.
///
/// Compiling a scenario never fails; malformed tokens are dropped. Only the
/// segment lookup can reject its input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The requested segment name is not a non-negative integer.
    #[error("Invalid segment request: {0:?}")]
    InvalidRequest(String),
}

impl Error {
    /// Create an invalid request error.
    pub fn invalid_request(msg: impl Into<String>) -> Self {
        Self::InvalidRequest(msg.into())
    }
}
