//! Fixture server integration tests
//!
//! Drives the full router with `oneshot` against a temporary media dir.

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    response::Response,
    Router,
};
use hlsfixture::config::{Config, DelayMode};
use hlsfixture::server::{create_router, AppContext};
use http_body_util::BodyExt;
use std::path::Path;
use tempfile::{tempdir, TempDir};
use tokio::time::{Duration, Instant};
use tower::ServiceExt;

const STUB: &[u8] = b"\x47stub transport stream";

/// Media dir with a stub segment and nothing else
fn media_dir() -> TempDir {
    let dir = tempdir().unwrap();
    std::fs::write(dir.path().join("0.ts"), STUB).unwrap();
    dir
}

fn config_for(dir: &Path) -> Config {
    let mut config = Config::default();
    config.media.dir = dir.to_path_buf();
    config
}

fn app(config: Config) -> Router {
    create_router(AppContext::new(config))
}

async fn get(app: Router, uri: &str) -> Response {
    app.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

async fn body_to_bytes(response: Response) -> Vec<u8> {
    response.into_body().collect().await.unwrap().to_bytes().to_vec()
}

async fn body_to_string(response: Response) -> String {
    String::from_utf8(body_to_bytes(response).await).unwrap()
}

#[tokio::test]
async fn test_health_check() {
    let dir = media_dir();
    let response = get(app(config_for(dir.path())), "/health").await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_server_header_on_every_response() {
    let dir = media_dir();
    for uri in ["/health", "/e404/0.ts", "/missing.txt", "/favicon.ico"] {
        let response = get(app(config_for(dir.path())), uri).await;
        assert_eq!(
            response.headers().get(header::SERVER).unwrap(),
            "hlsfixture",
            "no server header for {uri}"
        );
    }
}

#[tokio::test]
async fn test_rendition_playlist_sized_to_scenario() {
    let dir = media_dir();
    let response = get(app(config_for(dir.path())), "/s5-p30-r10/rendition.m3u8").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::CONTENT_TYPE).unwrap(),
        "application/x-mpegURL"
    );

    let body = body_to_string(response).await;
    assert!(body.starts_with("#EXTM3U\n"));
    assert!(body.contains("#EXT-X-PLAYLIST-TYPE:VOD"));
    assert!(body.contains("0.ts\n"));
    assert!(body.contains("6.ts\n"));
    assert!(!body.contains("7.ts"));
    assert_eq!(body.matches("#EXTINF:5,").count(), 7);
    assert!(body.ends_with("#EXT-X-ENDLIST\n"));
}

#[tokio::test]
async fn test_generated_media_playlist() {
    let dir = media_dir();
    let response = get(app(config_for(dir.path())), "/s5-p30/media.m3u8").await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_to_string(response).await;
    assert!(body.contains("#EXT-X-STREAM-INF:BANDWIDTH=1000000"));
    assert!(body.contains("rendition.m3u8"));
}

#[tokio::test]
async fn test_static_media_playlist_takes_precedence() {
    let dir = media_dir();
    let master = "#EXTM3U\n#EXT-X-STREAM-INF:BANDWIDTH=42\nrendition.m3u8\n";
    std::fs::write(dir.path().join("media.m3u8"), master).unwrap();

    let response = get(app(config_for(dir.path())), "/e404/media.m3u8").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_to_string(response).await, master);
}

#[tokio::test]
async fn test_normal_segment_serves_stub() {
    let dir = media_dir();
    let response = get(app(config_for(dir.path())), "/s5-p30-r10/3.ts").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::CONTENT_TYPE).unwrap(),
        "video/MP2T"
    );
    assert_eq!(body_to_bytes(response).await, STUB);
}

#[tokio::test]
async fn test_every_segment_number_serves_same_stub() {
    let dir = media_dir();
    for uri in ["/p60/0.ts", "/p60/11.ts", "/p60/500.ts"] {
        let response = get(app(config_for(dir.path())), uri).await;
        assert_eq!(response.status(), StatusCode::OK, "{uri}");
        assert_eq!(body_to_bytes(response).await, STUB);
    }
}

#[tokio::test]
async fn test_failure_segment_uses_simulated_status() {
    let dir = media_dir();

    let response = get(app(config_for(dir.path())), "/e404/0.ts").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = get(app(config_for(dir.path())), "/p10-e503/2.ts").await;
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

    // Segments before the failure are unaffected
    let response = get(app(config_for(dir.path())), "/p10-e503/1.ts").await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_default_error_code() {
    let dir = media_dir();
    let response = get(app(config_for(dir.path())), "/e/0.ts").await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test(start_paused = true)]
async fn test_delayed_segment_sleeps_before_responding() {
    let dir = media_dir();
    let start = Instant::now();

    let response = get(app(config_for(dir.path())), "/s5-p30-r10/7.ts").await;
    assert!(start.elapsed() >= Duration::from_secs(10));
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_to_bytes(response).await, STUB);
}

#[tokio::test(start_paused = true)]
async fn test_startup_delay_applies_to_first_segment() {
    let dir = media_dir();
    let start = Instant::now();

    let response = get(app(config_for(dir.path())), "/s3-p30/0.ts").await;
    assert!(start.elapsed() >= Duration::from_secs(3));
    assert_eq!(response.status(), StatusCode::OK);
}

/// Read data frames until the whole stub arrived; returns the body and the
/// instant its last byte was received
async fn read_until_complete(response: Response) -> (Vec<u8>, Instant) {
    let mut body = response.into_body();
    let mut received = Vec::new();
    let mut completed_at = Instant::now();

    while let Some(frame) = body.frame().await {
        if let Some(data) = frame.unwrap().data_ref() {
            received.extend_from_slice(data);
            completed_at = Instant::now();
        }
    }

    (received, completed_at)
}

#[tokio::test(start_paused = true)]
async fn test_throttled_segment_delivers_last_byte_after_delay() {
    let dir = media_dir();
    let mut config = config_for(dir.path());
    config.scenario.delay_mode = DelayMode::Throttle;

    let start = Instant::now();
    let response = get(app(config), "/p10-r8/2.ts").await;
    assert_eq!(response.status(), StatusCode::OK);
    // Headers go out before the delay
    assert!(start.elapsed() < Duration::from_secs(8));

    let (received, completed_at) = read_until_complete(response).await;
    assert_eq!(received, STUB);
    assert!(completed_at.duration_since(start) >= Duration::from_secs(8));
}

#[tokio::test(start_paused = true)]
async fn test_throttled_multi_chunk_segment_is_spread_over_delay() {
    let dir = tempdir().unwrap();
    let stub: Vec<u8> = (0..=255u8).cycle().take(40 * 1024).collect();
    std::fs::write(dir.path().join("0.ts"), &stub).unwrap();

    let mut config = config_for(dir.path());
    config.scenario.delay_mode = DelayMode::Throttle;

    let start = Instant::now();
    let response = get(app(config), "/r9/0.ts").await;
    assert_eq!(response.status(), StatusCode::OK);

    let mut body = response.into_body();
    let first = body.frame().await.unwrap().unwrap();
    assert!(first.is_data());
    // Three chunks over nine seconds: the first waits one interval
    assert!(start.elapsed() >= Duration::from_secs(3));

    let mut received = first.into_data().unwrap().to_vec();
    while let Some(frame) = body.frame().await {
        if let Some(data) = frame.unwrap().data_ref() {
            received.extend_from_slice(data);
        }
    }
    assert_eq!(received, stub);
    assert!(start.elapsed() >= Duration::from_secs(9));
}

#[tokio::test(start_paused = true)]
async fn test_throttle_mode_leaves_undelayed_segments_alone() {
    let dir = media_dir();
    let mut config = config_for(dir.path());
    config.scenario.delay_mode = DelayMode::Throttle;

    let start = Instant::now();
    let response = get(app(config), "/p10-r8/1.ts").await;
    let (received, completed_at) = read_until_complete(response).await;
    assert_eq!(received, STUB);
    assert_eq!(completed_at.duration_since(start), Duration::ZERO);
}

#[tokio::test(start_paused = true)]
async fn test_delayed_failure_waits_then_fails() {
    let dir = media_dir();
    let start = Instant::now();

    let response = get(app(config_for(dir.path())), "/r10-e503/0.ts").await;
    assert!(start.elapsed() >= Duration::from_secs(10));
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn test_non_numeric_segment_is_bad_request() {
    let dir = media_dir();
    for uri in ["/s5/abc.ts", "/s5/-1.ts", "/s5/1a.ts"] {
        let response = get(app(config_for(dir.path())), uri).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{uri}");
    }
}

#[tokio::test]
async fn test_missing_stub_is_server_error() {
    let dir = tempdir().unwrap();
    let response = get(app(config_for(dir.path())), "/p10/0.ts").await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_browser_probes_are_ignored() {
    let dir = media_dir();
    for uri in ["/favicon.ico", "/s5/apple-touch-icon.png"] {
        let response = get(app(config_for(dir.path())), uri).await;
        assert_eq!(response.status(), StatusCode::NO_CONTENT, "{uri}");
        assert!(body_to_bytes(response).await.is_empty());
    }
}

#[tokio::test]
async fn test_static_files() {
    let dir = media_dir();
    std::fs::write(dir.path().join("player.html"), "<video></video>").unwrap();

    let response = get(app(config_for(dir.path())), "/s5-p30/player.html").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::CONTENT_TYPE).unwrap(),
        "text/html"
    );
    assert_eq!(body_to_string(response).await, "<video></video>");

    let response = get(app(config_for(dir.path())), "/s5-p30/missing.txt").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_parent_directory_is_not_served() {
    let dir = media_dir();
    let response = get(app(config_for(dir.path())), "/s5/..").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_post_not_allowed() {
    let dir = media_dir();
    let response = app(config_for(dir.path()))
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri("/s5/0.ts")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn test_uncached_server_behaves_the_same() {
    let dir = media_dir();
    let mut config = config_for(dir.path());
    config.scenario.cache_entries = 0;

    let response = get(app(config.clone()), "/p10-e503/2.ts").await;
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

    let response = get(app(config), "/p10-e503/rendition.m3u8").await;
    let body = body_to_string(response).await;
    assert_eq!(body.matches("#EXTINF:5,").count(), 3);
}
