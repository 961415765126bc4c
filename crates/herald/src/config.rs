use crate::error::{HeraldErrorExt, Result};
use config::{Config, Environment, File};
use herald_emitter::EmitterConfig;
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use tracing::info;

const DEFAULT_CONFIG_FILE: &str = "herald";
const ENV_PREFIX: &str = "HERALD";
const ENV_SEPARATOR: &str = "__";

/// Loads `T` from `path` (or `herald` when `None`), with `HERALD__*`
/// environment variables overriding file values.
///
/// # Errors
/// Returns [`HeraldError::Config`](crate::HeraldError::Config) if the file is
/// missing or does not match `T`.
pub fn load_config<T>(path: Option<impl AsRef<Path>>) -> Result<T>
where
    T: DeserializeOwned,
{
    let effective_path =
        path.map_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE), |p| p.as_ref().to_path_buf());

    let builder = Config::builder()
        .add_source(File::from(effective_path.as_path()).required(true))
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .separator(ENV_SEPARATOR)
                .convert_case(config::Case::Snake),
        );

    info!("Loading config from {}", effective_path.display());

    let config = builder
        .build()
        .context("Failed to build config")?
        .try_deserialize::<T>()
        .context("Failed to deserialize config")?;

    Ok(config)
}

/// Typed shortcut for [`load_config`] returning an [`EmitterConfig`].
///
/// # Errors
/// Same as [`load_config`].
pub fn load_emitter_config(path: Option<impl AsRef<Path>>) -> Result<EmitterConfig> {
    load_config(path)
}
