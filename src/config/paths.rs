//! XDG directory helpers for config, terminal scheme and state files.

use std::path::PathBuf;

use super::defaults::{APP_DIR_NAME, CONFIG_FILE_NAME, STATE_FILE_NAME, TERMSCHEME_FILE_NAME};

/// Resolve the base config directory from env/home conventions.
pub fn config_root_dir() -> Option<PathBuf> {
    xdg_dir("XDG_CONFIG_HOME", ".config").or_else(dirs::config_dir)
}

/// Resolve the base state directory (`$XDG_STATE_HOME` or `~/.local/state`).
pub fn state_root_dir() -> Option<PathBuf> {
    xdg_dir("XDG_STATE_HOME", ".local/state").or_else(dirs::state_dir)
}

fn xdg_dir(var: &str, home_relative: &str) -> Option<PathBuf> {
    if let Ok(path) = std::env::var(var) {
        let trimmed = path.trim();
        if !trimmed.is_empty() {
            return Some(PathBuf::from(trimmed));
        }
    }
    dirs::home_dir().map(|home| home.join(home_relative))
}

/// `~/.config/material-theme/terminal-scheme.json`.
pub fn default_termscheme_path() -> Option<PathBuf> {
    config_root_dir().map(|dir| dir.join(APP_DIR_NAME).join(TERMSCHEME_FILE_NAME))
}

/// `~/.local/state/material-theme/colors.json`.
pub fn default_state_path() -> Option<PathBuf> {
    state_root_dir().map(|dir| dir.join(APP_DIR_NAME).join(STATE_FILE_NAME))
}

pub(super) fn config_path_in(root: &std::path::Path) -> PathBuf {
    root.join(APP_DIR_NAME).join(CONFIG_FILE_NAME)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn config_path_nests_under_app_dir() {
        assert_eq!(
            config_path_in(Path::new("/cfg")),
            PathBuf::from("/cfg/material-theme/config.json")
        );
    }
}
