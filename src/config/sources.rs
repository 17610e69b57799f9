//! Config-file source discovery.
//!
//! Source order: explicit `--config` path > global config file > built-in
//! defaults. A missing explicit path is an error; a missing global file is not.

use std::path::{Path, PathBuf};

use crate::error::ConfigError;

use super::paths::config_path_in;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) enum ConfigSource {
    /// Config loaded from explicit `--config` path.
    Explicit(PathBuf),
    /// Config loaded from `$XDG_CONFIG_HOME/material-theme/config.json`.
    Global(PathBuf),
    /// No file found; built-in defaults are used.
    BuiltInDefaults,
}

impl ConfigSource {
    pub(super) fn path(&self) -> Option<&Path> {
        match self {
            Self::Explicit(path) | Self::Global(path) => Some(path),
            Self::BuiltInDefaults => None,
        }
    }
}

/// Read config text from the highest-precedence available source.
pub(super) fn read_config_text_with_sources<FRead, FRoot>(
    path_override: Option<&Path>,
    read_file: &FRead,
    config_root: &FRoot,
) -> Result<(String, ConfigSource), ConfigError>
where
    FRead: Fn(&Path) -> Result<String, std::io::Error>,
    FRoot: Fn() -> Option<PathBuf>,
{
    if let Some(path) = path_override {
        let text = read_file(path).map_err(|err| {
            ConfigError::Invalid(format!("cannot read config {}: {err}", path.display()))
        })?;
        return Ok((text, ConfigSource::Explicit(path.to_path_buf())));
    }

    if let Some(root) = config_root() {
        let global = config_path_in(&root);
        match read_file(&global) {
            Ok(text) => return Ok((text, ConfigSource::Global(global))),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {}
            Err(err) => return Err(ConfigError::Io(err)),
        }
    }

    Ok((String::new(), ConfigSource::BuiltInDefaults))
}
