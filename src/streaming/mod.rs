//! Fixture streaming module.
//!
//! Serves HLS playlists and segments whose behavior is driven by the
//! scenario string in the request path.
//!
//! # Routes
//!
//! - `GET /<scenario>/media.m3u8` - Master playlist
//! - `GET /<scenario>/rendition.m3u8` - Rendition playlist sized to the scenario
//! - `GET /<scenario>/<index>.ts` - Segment, possibly delayed or failed
//! - `GET /<scenario>/<file>` - Static file from the media directory
//!
//! For example `/s5-p30-r10/7.ts` is served after a 10 second stall.

mod direct;
mod error;
mod hls;
pub mod request;
mod scenario_cache;

pub use error::FixtureError;
pub use hls::fixture_request;
pub use request::{classify, FixtureRequest, RequestKind};
pub use scenario_cache::ScenarioCache;

use axum::Router;

use crate::server::AppContext;

/// Create the fixture router; it answers every path not routed elsewhere.
pub fn fixture_router() -> Router<AppContext> {
    Router::new().fallback(fixture_request)
}
