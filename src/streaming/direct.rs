//! File delivery from the media directory.
//!
//! Static files and the stub segment are streamed straight from disk. A
//! delayed segment can be throttled so the body trickles out over the
//! delay instead of arriving after it.

use axum::{
    body::Body,
    http::{header, StatusCode},
    response::Response,
};
use hlsfixture_media::{PLAYLIST_CONTENT_TYPE, SEGMENT_CONTENT_TYPE};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::fs::File;
use tokio_stream::StreamExt;
use tokio_util::io::ReaderStream;

use super::FixtureError;

/// Read size for streamed bodies.
const CHUNK_SIZE: usize = 16 * 1024;

/// Serve a static file; a missing file is a 404.
pub async fn serve_static(path: PathBuf) -> Result<Response, FixtureError> {
    match File::open(&path).await {
        Ok(file) => file_response(file, &path, None).await,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(FixtureError::NotFound(path)),
        Err(e) => Err(e.into()),
    }
}

/// Serve the stub segment, optionally spread over `throttle`.
///
/// A missing stub is a server fault, not a 404.
pub async fn serve_stub(path: PathBuf, throttle: Option<Duration>) -> Result<Response, FixtureError> {
    let file = match File::open(&path).await {
        Ok(file) => file,
        Err(source) => return Err(FixtureError::StubMissing { path, source }),
    };
    file_response(file, &path, throttle).await
}

async fn file_response(
    file: File,
    path: &Path,
    throttle: Option<Duration>,
) -> Result<Response, FixtureError> {
    let metadata = file.metadata().await?;
    if !metadata.is_file() {
        return Err(FixtureError::NotFound(path.to_path_buf()));
    }
    let file_size = metadata.len();

    let stream = ReaderStream::with_capacity(file, CHUNK_SIZE);
    let body = match throttle {
        Some(delay) => {
            let interval = chunk_interval(file_size, delay);
            tracing::trace!(?path, ?interval, "Throttling file delivery");
            // Every chunk, the first included, waits one interval, so the
            // last byte leaves no earlier than `delay`.
            Body::from_stream(stream.then(move |chunk| async move {
                tokio::time::sleep(interval).await;
                chunk
            }))
        }
        None => Body::from_stream(stream),
    };

    Ok(Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, content_type(path))
        .header(header::CONTENT_LENGTH, file_size.to_string())
        .header(header::CACHE_CONTROL, "no-cache")
        .body(body)?)
}

/// Wait before each chunk so that `file_size` bytes take at least `delay`.
pub(crate) fn chunk_interval(file_size: u64, delay: Duration) -> Duration {
    let chunks = u128::from(file_size.div_ceil(CHUNK_SIZE as u64).max(1));
    let nanos = delay.as_nanos().div_ceil(chunks);
    Duration::from_nanos(u64::try_from(nanos).unwrap_or(u64::MAX))
}

/// Content type by file extension.
pub(crate) fn content_type(path: &Path) -> &'static str {
    match path.extension().and_then(|e| e.to_str()) {
        Some("m3u8") => PLAYLIST_CONTENT_TYPE,
        Some("ts") => SEGMENT_CONTENT_TYPE,
        Some("mp4") | Some("m4s") => "video/mp4",
        Some("aac") => "audio/aac",
        Some("vtt") => "text/vtt",
        Some("html") => "text/html",
        Some("js") => "application/javascript",
        Some("json") => "application/json",
        _ => "application/octet-stream",
    }
}
