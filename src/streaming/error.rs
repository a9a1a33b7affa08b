//! Error-to-HTTP response conversion for fixture handlers.
//!
//! Simulated segment failures are not errors; they are ordinary responses
//! built by the segment handler. This type only covers requests the server
//! cannot answer.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use std::path::PathBuf;

/// Failure while answering a fixture request.
#[derive(Debug, thiserror::Error)]
pub enum FixtureError {
    /// The client asked for something malformed (e.g. `abc.ts`).
    #[error(transparent)]
    InvalidRequest(#[from] hlsfixture_scenario::Error),

    /// A static file does not exist in the media directory.
    #[error("File not found: {0:?}")]
    NotFound(PathBuf),

    /// The stub segment could not be opened.
    #[error("Stub segment unavailable at {path:?}: {source}")]
    StubMissing {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Any other I/O failure.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to build response: {0}")]
    Http(#[from] axum::http::Error),
}

impl FixtureError {
    pub fn status(&self) -> StatusCode {
        match self {
            FixtureError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            FixtureError::NotFound(_) => StatusCode::NOT_FOUND,
            FixtureError::StubMissing { .. } | FixtureError::Io(_) | FixtureError::Http(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for FixtureError {
    fn into_response(self) -> Response {
        let status = self.status();

        if status.is_server_error() {
            tracing::error!(status = %status, error = %self, "Server error in fixture handler");
        } else {
            tracing::debug!(status = %status, error = %self, "Rejected fixture request");
        }

        status.into_response()
    }
}
