//! Top-level config loading pipeline.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::ConfigError;

use super::paths::config_root_dir;
use super::sources::read_config_text_with_sources;
use super::Config;

/// Load configuration from disk.
///
/// `path_override` is an explicit config file path (from --config flag).
pub fn load_config(path_override: Option<&Path>) -> Result<Config, ConfigError> {
    load_config_from_sources(
        path_override,
        |path| std::fs::read_to_string(path),
        config_root_dir,
    )
}

pub(super) fn load_config_from_sources<FRead, FRoot>(
    path_override: Option<&Path>,
    read_file: FRead,
    config_root: FRoot,
) -> Result<Config, ConfigError>
where
    FRead: Fn(&Path) -> Result<String, std::io::Error>,
    FRoot: Fn() -> Option<PathBuf>,
{
    let (text, source) = read_config_text_with_sources(path_override, &read_file, &config_root)?;
    let config = match source.path() {
        None => Config::default(),
        Some(_) if text.trim().is_empty() => Config::default(),
        Some(path) => serde_json::from_str::<Config>(&text)
            .map_err(|err| ConfigError::Invalid(format!("{}: {err}", path.display())))?,
    };
    config.validate().map_err(|err| match (err, source.path()) {
        (ConfigError::Invalid(msg), Some(path)) => {
            ConfigError::Invalid(format!("{}: {msg}", path.display()))
        }
        (err, _) => err,
    })?;
    debug!(source = ?source, "loaded config");
    Ok(config)
}
