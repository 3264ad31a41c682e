//! Configuration loading utilities for CLI commands

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tourguide_core::config::{parse_language, CliConfigOverrides, LayeredConfig};

use crate::cli::Cli;

/// Config file picked up from the working directory when `--config` is absent
pub const DEFAULT_CONFIG_FILE: &str = "tourguide.toml";

/// Load layered configuration: defaults, file, environment
pub fn load_config(explicit: Option<&Path>) -> Result<LayeredConfig> {
    let config = LayeredConfig::with_defaults();

    let config = match explicit {
        Some(path) => config
            .load_from_file(path)
            .with_context(|| format!("Failed to load configuration file {}", path.display()))?,
        None => config
            .load_from_optional_file(PathBuf::from(DEFAULT_CONFIG_FILE))
            .context("Failed to load configuration file")?,
    };

    Ok(config.load_from_env())
}

/// Load layered configuration with the global CLI flags applied on top
pub fn load_config_with_overrides(cli: &Cli) -> Result<LayeredConfig> {
    let mut config = load_config(cli.config.as_deref())?;
    config.update_from_cli(overrides_from(cli)?);
    Ok(config)
}

fn overrides_from(cli: &Cli) -> Result<CliConfigOverrides> {
    let language = cli
        .language
        .as_deref()
        .map(parse_language)
        .transpose()
        .context("Invalid --language")?;

    Ok(CliConfigOverrides {
        endpoint: cli.endpoint.clone(),
        language,
        destination: cli.destination.clone(),
        voice_enabled: cli.voice.then_some(true),
        voice_commands: cli.voice_commands.then_some(true),
        knowledge: cli.knowledge.clone(),
    })
}
