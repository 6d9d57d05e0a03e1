//! Show or create the configuration file.

use anyhow::Context;
use tracksync_common::config::{config_file_path, AppConfig};
use tracksync_common::error::TracksyncError;

pub fn run(init: bool, force: bool) -> anyhow::Result<()> {
    let path = config_file_path();

    if init {
        if path.exists() && !force {
            anyhow::bail!(
                "Config already exists at {} (use --force to overwrite)",
                path.display()
            );
        }
        let written = AppConfig::default()
            .save()
            .context("Failed to write default config")?;
        println!("Wrote default config to {}", written.display());
        return Ok(());
    }

    println!("Config file: {}", path.display());
    let config = match AppConfig::read(&path) {
        Ok(config) => {
            println!("  Status: OK");
            config
        }
        Err(TracksyncError::FileNotFound { .. }) => {
            println!("  Status: not found, using defaults");
            AppConfig::default()
        }
        Err(e) => {
            println!("  Status: invalid ({e}), using defaults");
            AppConfig::default()
        }
    };
    println!();
    println!("{}", serde_json::to_string_pretty(&config)?);

    Ok(())
}
