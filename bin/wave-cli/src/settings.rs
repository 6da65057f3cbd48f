use anyhow::{Context, Result};
use config::{Config, Environment, File};
use std::path::Path;
use wave_core::WaveConfig;

/// Environment prefix, e.g. `WAVE__CLOCK__UTC_OFFSET_MINUTES=480`
const ENV_PREFIX: &str = "WAVE";

/// Loads configuration: defaults, then the optional file, then environment
pub fn load(path: Option<&Path>) -> Result<WaveConfig> {
    build(path, Some(environment()))
}

fn environment() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .separator("__")
        .try_parsing(true)
}

fn build(path: Option<&Path>, environment: Option<Environment>) -> Result<WaveConfig> {
    let mut builder = Config::builder();

    if let Some(path) = path {
        builder = builder.add_source(File::from(path));
    }

    if let Some(environment) = environment {
        builder = builder.add_source(environment);
    }

    let wave_config: WaveConfig = builder
        .build()
        .context("failed to read configuration")?
        .try_deserialize()
        .context("invalid configuration")?;

    wave_config.validate()?;
    Ok(wave_config)
}
