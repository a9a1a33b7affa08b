//! hlsfixture-media: HLS playlist rendering
//!
//! Renders the M3U8 text served by hlsfixture:
//!
//! - [`MediaPlaylist`] - the rendition playlist listing `<i>.ts` segments
//! - [`MasterPlaylist`] - a single-variant master playlist pointing at the
//!   rendition playlist
//!
//! Both implement [`std::fmt::Display`]; `render()` is a convenience for
//! `to_string()`.

pub mod hls;

pub use hls::{MasterPlaylist, MediaPlaylist, SegmentEntry, StreamInfo};

/// Content type for every playlist served by hlsfixture.
pub const PLAYLIST_CONTENT_TYPE: &str = "application/x-mpegURL";

/// Content type for MPEG-TS segments.
pub const SEGMENT_CONTENT_TYPE: &str = "video/MP2T";
