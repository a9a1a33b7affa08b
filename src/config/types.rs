use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub media: MediaConfig,

    #[serde(default)]
    pub scenario: ScenarioConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}
fn default_port() -> u16 {
    3000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MediaConfig {
    /// Directory holding the stub segment and any static files
    #[serde(default = "default_media_dir")]
    pub dir: PathBuf,

    /// File served for every segment request, relative to `dir`
    #[serde(default = "default_stub_segment")]
    pub stub_segment: String,

    /// Advertised bandwidth of the generated master playlist (bits/s)
    #[serde(default = "default_bandwidth")]
    pub bandwidth: u32,

    /// Advertised `[width, height]` of the generated master playlist
    #[serde(default)]
    pub resolution: Option<(u32, u32)>,

    /// Advertised codec string of the generated master playlist
    #[serde(default)]
    pub codecs: Option<String>,
}

fn default_media_dir() -> PathBuf {
    PathBuf::from("./media")
}
fn default_stub_segment() -> String {
    "0.ts".to_string()
}
fn default_bandwidth() -> u32 {
    1_000_000
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self {
            dir: default_media_dir(),
            stub_segment: default_stub_segment(),
            bandwidth: default_bandwidth(),
            resolution: None,
            codecs: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ScenarioConfig {
    /// Compiled scenarios kept in memory (0 disables the cache)
    #[serde(default = "default_cache_entries")]
    pub cache_entries: usize,

    /// How a segment delay is realised
    #[serde(default)]
    pub delay_mode: DelayMode,

    /// Filenames answered with an empty response (browser probes)
    #[serde(default = "default_ignore")]
    pub ignore: Vec<String>,
}

fn default_cache_entries() -> usize {
    1024
}

fn default_ignore() -> Vec<String> {
    vec![
        "favicon.ico".to_string(),
        "apple-touch-icon-precomposed.png".to_string(),
        "apple-touch-icon.png".to_string(),
    ]
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            cache_entries: default_cache_entries(),
            delay_mode: DelayMode::default(),
            ignore: default_ignore(),
        }
    }
}

/// How a delayed segment is delivered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DelayMode {
    /// Wait for the whole delay, then send the segment at full speed.
    #[default]
    Sleep,
    /// Spread the segment body over the delay.
    Throttle,
}
