//! HLS playlist generation.

mod playlist;

pub use playlist::{
    MasterPlaylist, MediaPlaylist, SegmentEntry, StreamInfo, RENDITION_URI,
};
