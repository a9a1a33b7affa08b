mod cli;

use hlsfixture::{config, inspect, server};
use hlsfixture_media::MediaPlaylist;
use hlsfixture_scenario::{Scenario, SEGMENT_LENGTH_SECS};

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands, DelayModeArg};
use std::path::{Path, PathBuf};

struct StartOptions {
    host: Option<String>,
    port: Option<u16>,
    media_dir: Option<PathBuf>,
    delay_mode: Option<DelayModeArg>,
}

async fn start_server(options: StartOptions, config_path: Option<&Path>) -> Result<()> {
    let mut config = config::load_config_or_default(config_path)?;

    // CLI flags override the config file
    if let Some(host) = options.host {
        config.server.host = host;
    }
    if let Some(port) = options.port {
        config.server.port = port;
    }
    if let Some(dir) = options.media_dir {
        config.media.dir = dir;
    }
    if let Some(mode) = options.delay_mode {
        config.scenario.delay_mode = mode.into();
    }

    config::validate_config(&config)?;

    tracing::info!("Starting hlsfixture server");
    tracing::info!(
        "Server will listen on {}:{}",
        config.server.host,
        config.server.port
    );

    server::start_server(config).await
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Respect RUST_LOG env var if set, otherwise use defaults based on verbose flag
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            "hlsfixture=trace,tower_http=debug".to_string()
        } else {
            "hlsfixture=debug,tower_http=info".to_string()
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(&env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Start {
            host,
            port,
            media_dir,
            delay_mode,
        } => {
            let options = StartOptions {
                host,
                port,
                media_dir,
                delay_mode,
            };
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(start_server(options, cli.config.as_deref()))
        }
        Commands::Inspect { scenario, json } => inspect_scenario(&scenario, json),
        Commands::Playlist { scenario } => print_playlist(&scenario),
        Commands::Validate {
            config: config_path,
        } => {
            let path = config_path.or(cli.config);
            validate_config(path.as_deref())
        }
        Commands::Version => {
            println!("hlsfixture {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

fn inspect_scenario(scenario: &str, json: bool) -> Result<()> {
    if json {
        let compiled = Scenario::compile(scenario);
        println!("{}", serde_json::to_string_pretty(&compiled)?);
    } else {
        print!("{}", inspect::describe(scenario));
    }
    Ok(())
}

fn print_playlist(scenario: &str) -> Result<()> {
    let compiled = Scenario::compile(scenario);
    let playlist = MediaPlaylist::for_segments(compiled.segment_count(), SEGMENT_LENGTH_SECS);
    print!("{}", playlist.render());
    Ok(())
}

fn validate_config(path: Option<&Path>) -> Result<()> {
    let config = match path {
        Some(p) => {
            println!("Validating config: {:?}", p);
            config::load_config(p)?
        }
        None => {
            println!("No config file specified, using defaults");
            config::Config::default()
        }
    };

    config::validate_config(&config)?;

    println!("✓ Configuration is valid");
    println!("  Server: {}:{}", config.server.host, config.server.port);
    println!("  Media dir: {}", config.media.dir.display());
    println!("  Stub segment: {}", config.media.stub_segment);
    println!("  Delay mode: {:?}", config.scenario.delay_mode);
    println!("  Scenario cache entries: {}", config.scenario.cache_entries);
    println!("  Ignored files: {}", config.scenario.ignore.join(", "));

    Ok(())
}
