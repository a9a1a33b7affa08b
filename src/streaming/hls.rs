//! Fixture HLS handlers.
//!
//! Every path below the server root is a fixture request:
//!
//! - `/<scenario>/media.m3u8` - static master playlist, or a generated one
//!   pointing at `rendition.m3u8` when the media dir has none
//! - `/<scenario>/rendition.m3u8` - playlist sized to the scenario
//! - `/<scenario>/<n>.ts` - the stub segment, delayed or failed as the
//!   scenario dictates
//! - anything else - static file from the media dir

use axum::{
    body::Body,
    extract::State,
    http::{header, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
};
use hlsfixture_media::{MasterPlaylist, MediaPlaylist, StreamInfo, PLAYLIST_CONTENT_TYPE};
use hlsfixture_scenario::SEGMENT_LENGTH_SECS;

use super::direct::{serve_static, serve_stub};
use super::request::{classify, RequestKind, MEDIA_PLAYLIST};
use super::FixtureError;
use crate::config::DelayMode;
use crate::server::AppContext;

/// Entry point for every fixture path.
pub async fn fixture_request(
    State(ctx): State<AppContext>,
    method: Method,
    uri: Uri,
) -> Result<Response, FixtureError> {
    if method != Method::GET && method != Method::HEAD {
        return Ok(StatusCode::METHOD_NOT_ALLOWED.into_response());
    }

    let request = classify(uri.path(), &ctx.config.scenario.ignore);
    tracing::debug!(scenario = request.scenario, kind = ?request.kind, "Fixture request");

    match request.kind {
        RequestKind::Ignored => Ok(StatusCode::NO_CONTENT.into_response()),
        RequestKind::MediaPlaylist => media_playlist(&ctx).await,
        RequestKind::RenditionPlaylist => rendition_playlist(&ctx, request.scenario),
        RequestKind::Segment { stem } => media_segment(&ctx, request.scenario, stem).await,
        RequestKind::Static { filename } => {
            serve_static(ctx.config.media.dir.join(filename)).await
        }
    }
}

/// Serve the master playlist, generating a single-variant one if the media
/// directory has no `media.m3u8`.
async fn media_playlist(ctx: &AppContext) -> Result<Response, FixtureError> {
    match serve_static(ctx.config.media.dir.join(MEDIA_PLAYLIST)).await {
        Err(FixtureError::NotFound(_)) => {}
        served => return served,
    }

    let media = &ctx.config.media;
    let mut stream = StreamInfo::rendition(media.bandwidth);
    stream.resolution = media.resolution;
    stream.codecs = media.codecs.clone();

    playlist_response(MasterPlaylist::new().add_stream(stream).render())
}

/// Serve the rendition playlist sized to the scenario.
fn rendition_playlist(ctx: &AppContext, scenario_path: &str) -> Result<Response, FixtureError> {
    let scenario = ctx.scenario(scenario_path);
    let playlist = MediaPlaylist::for_segments(scenario.segment_count(), SEGMENT_LENGTH_SECS);

    tracing::debug!(
        scenario = scenario_path,
        segments = scenario.segment_count(),
        "Rendition playlist"
    );

    playlist_response(playlist.render())
}

/// Serve one segment according to the scenario's timeline.
async fn media_segment(
    ctx: &AppContext,
    scenario_path: &str,
    stem: &str,
) -> Result<Response, FixtureError> {
    let scenario = ctx.scenario(scenario_path);
    let action = scenario.resolve_segment(stem)?;

    tracing::debug!(scenario = scenario_path, segment = stem, %action, "Segment request");

    let delay = action.delay();
    if let Some(code) = action.status() {
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        return Ok(failure_response(code));
    }

    let stub = ctx.config.media.dir.join(&ctx.config.media.stub_segment);
    match (delay, ctx.config.scenario.delay_mode) {
        (Some(delay), DelayMode::Sleep) => {
            tokio::time::sleep(delay).await;
            serve_stub(stub, None).await
        }
        (delay, _) => serve_stub(stub, delay).await,
    }
}

/// The simulated failure for a segment.
///
/// Codes that cannot be a final HTTP status become 500.
fn failure_response(code: u16) -> Response {
    let status = StatusCode::from_u16(code)
        .ok()
        .filter(|status| !status.is_informational())
        .unwrap_or_else(|| {
            tracing::warn!(code, "Unusable simulated status code, responding 500");
            StatusCode::INTERNAL_SERVER_ERROR
        });
    status.into_response()
}

fn playlist_response(body: String) -> Result<Response, FixtureError> {
    Ok(Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, PLAYLIST_CONTENT_TYPE)
        .header(header::CACHE_CONTROL, "no-cache")
        .body(Body::from(body))?)
}
