//! HLS playlist structures.

use std::fmt;

/// Relative URI of the rendition playlist.
pub const RENDITION_URI: &str = "rendition.m3u8";

/// VOD media playlist for a single rendition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaPlaylist {
    /// Target duration in seconds.
    pub target_duration: u64,
    /// Segment entries.
    pub segments: Vec<SegmentEntry>,
}

impl MediaPlaylist {
    /// Playlist of `count` segments named `0.ts`, `1.ts`, ...
    ///
    /// The target duration is one second above the segment length, leaving
    /// players headroom for rounding in `#EXTINF`.
    pub fn for_segments(count: u64, segment_length: u64) -> Self {
        Self {
            target_duration: segment_length.saturating_add(1),
            segments: (0..count)
                .map(|i| SegmentEntry {
                    duration: segment_length,
                    uri: format!("{}.ts", i),
                })
                .collect(),
        }
    }

    /// Render to M3U8 string.
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for MediaPlaylist {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "#EXTM3U")?;
        writeln!(f, "#EXT-X-VERSION:3")?;
        writeln!(f, "#EXT-X-TARGETDURATION:{}", self.target_duration)?;
        writeln!(f, "#EXT-X-PLAYLIST-TYPE:VOD")?;

        for segment in &self.segments {
            writeln!(f, "#EXTINF:{},", segment.duration)?;
            writeln!(f, "{}", segment.uri)?;
        }

        writeln!(f, "#EXT-X-ENDLIST")
    }
}

/// A segment entry in the playlist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SegmentEntry {
    /// Duration in whole seconds.
    pub duration: u64,
    /// Segment URI.
    pub uri: String,
}

/// Master playlist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MasterPlaylist {
    /// Stream variants.
    pub streams: Vec<StreamInfo>,
}

impl MasterPlaylist {
    /// Create a new master playlist.
    pub fn new() -> Self {
        Self {
            streams: Vec::new(),
        }
    }

    /// Add a stream variant.
    pub fn add_stream(mut self, stream: StreamInfo) -> Self {
        self.streams.push(stream);
        self
    }

    /// Render to M3U8 string.
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl Default for MasterPlaylist {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for MasterPlaylist {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "#EXTM3U")?;
        writeln!(f, "#EXT-X-VERSION:3")?;

        for stream in &self.streams {
            write!(f, "#EXT-X-STREAM-INF:BANDWIDTH={}", stream.bandwidth)?;

            if let Some((width, height)) = stream.resolution {
                write!(f, ",RESOLUTION={}x{}", width, height)?;
            }

            if let Some(ref codecs) = stream.codecs {
                write!(f, ",CODECS=\"{}\"", codecs)?;
            }

            writeln!(f)?;
            writeln!(f, "{}", stream.uri)?;
        }

        Ok(())
    }
}

/// Stream variant information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamInfo {
    /// Playlist URI.
    pub uri: String,
    /// Bandwidth in bits per second.
    pub bandwidth: u32,
    /// Video width and height.
    pub resolution: Option<(u32, u32)>,
    /// Codec string (e.g., "avc1.64001f,mp4a.40.2").
    pub codecs: Option<String>,
}

impl StreamInfo {
    /// A variant pointing at the rendition playlist.
    pub fn rendition(bandwidth: u32) -> Self {
        Self {
            uri: RENDITION_URI.to_string(),
            bandwidth,
            resolution: None,
            codecs: None,
        }
    }
}
