//! Request classification.
//!
//! A fixture URL is `/<scenario>/<filename>`: the directory part is the
//! scenario string and the filename decides what is served.

/// Filename of the top-level playlist.
pub const MEDIA_PLAYLIST: &str = "media.m3u8";
/// Filename of the generated rendition playlist.
pub const RENDITION_PLAYLIST: &str = "rendition.m3u8";

/// A classified fixture request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixtureRequest<'a> {
    /// Directory part of the path, e.g. `/s5-p30-r10`.
    pub scenario: &'a str,
    /// What the filename asks for.
    pub kind: RequestKind<'a>,
}

/// What a fixture request is asking for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind<'a> {
    /// Browser probe (favicon, touch icon); answered with an empty response.
    Ignored,
    /// `media.m3u8`.
    MediaPlaylist,
    /// `rendition.m3u8`.
    RenditionPlaylist,
    /// `<stem>.ts`; the stem is not validated here.
    Segment { stem: &'a str },
    /// Anything else, served from the media directory.
    Static { filename: &'a str },
}

/// Classify a request path.
pub fn classify<'a>(path: &'a str, ignore: &[String]) -> FixtureRequest<'a> {
    let path = path.trim_end_matches('/');
    let (scenario, filename) = match path.rsplit_once('/') {
        Some((dir, file)) if dir.is_empty() => ("/", file),
        Some((dir, file)) => (dir, file),
        None => ("", path),
    };

    FixtureRequest {
        scenario,
        kind: classify_filename(filename, ignore),
    }
}

fn classify_filename<'a>(filename: &'a str, ignore: &[String]) -> RequestKind<'a> {
    if ignore.iter().any(|name| name == filename) {
        return RequestKind::Ignored;
    }

    match filename.rsplit_once('.') {
        Some((stem, "ts")) if !stem.is_empty() => RequestKind::Segment { stem },
        _ if filename == MEDIA_PLAYLIST => RequestKind::MediaPlaylist,
        _ if filename == RENDITION_PLAYLIST => RequestKind::RenditionPlaylist,
        _ => RequestKind::Static { filename },
    }
}
