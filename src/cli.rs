use clap::{Parser, Subcommand, ValueEnum};
use hlsfixture::config::DelayMode;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "hlsfixture")]
#[command(author, version, about = "Deterministic HLS test server for player playback scenarios")]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the fixture server
    Start {
        /// Host to bind to
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on
        #[arg(short, long)]
        port: Option<u16>,

        /// Directory holding the stub segment and static files
        #[arg(long)]
        media_dir: Option<PathBuf>,

        /// How delayed segments are delivered
        #[arg(long, value_enum)]
        delay_mode: Option<DelayModeArg>,
    },

    /// Show the operations, timeline and length compiled from a scenario
    Inspect {
        /// Scenario string, e.g. s5-p30-r10
        scenario: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the rendition playlist served for a scenario
    Playlist {
        /// Scenario string, e.g. s5-p30-r10
        scenario: String,
    },

    /// Validate configuration file
    Validate {
        /// Config file to validate (uses default if not specified)
        config: Option<PathBuf>,
    },

    /// Display version information
    Version,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum DelayModeArg {
    Sleep,
    Throttle,
}

impl From<DelayModeArg> for DelayMode {
    fn from(arg: DelayModeArg) -> Self {
        match arg {
            DelayModeArg::Sleep => DelayMode::Sleep,
            DelayModeArg::Throttle => DelayMode::Throttle,
        }
    }
}
