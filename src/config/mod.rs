mod types;

pub use types::*;

use anyhow::{Context, Result};
use std::path::Path;

/// Load configuration from a TOML file
pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let config: Config = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;

    validate_config(&config)?;

    Ok(config)
}

/// Load config from default locations or return default config
pub fn load_config_or_default(custom_path: Option<&Path>) -> Result<Config> {
    if let Some(path) = custom_path {
        return load_config(path);
    }

    let default_paths = [
        "./config.toml",
        "./hlsfixture.toml",
        "~/.config/hlsfixture/config.toml",
        "/etc/hlsfixture/config.toml",
    ];

    for path_str in default_paths {
        let path = shellexpand::tilde(path_str);
        let path = Path::new(path.as_ref());
        if path.exists() {
            return load_config(path);
        }
    }

    Ok(Config::default())
}

/// Validate configuration
pub fn validate_config(config: &Config) -> Result<()> {
    if config.server.port == 0 {
        anyhow::bail!("Server port cannot be 0");
    }

    let stub = &config.media.stub_segment;
    if stub.is_empty() || stub.contains(['/', '\\']) || stub == "." || stub == ".." {
        anyhow::bail!(
            "Stub segment must be a plain filename inside the media dir, got {:?}",
            stub
        );
    }

    if !config.media.dir.is_dir() {
        tracing::warn!("Media directory does not exist: {:?}", config.media.dir);
    } else if !config.media.dir.join(stub).is_file() {
        tracing::warn!(
            "Stub segment {:?} not found in {:?}; segment requests will fail",
            stub,
            config.media.dir
        );
    }

    Ok(())
}
