//! Configuration loading from a JSON preferences file.
//!
//! Precedence (highest wins):
//! 1. CLI flags (applied by the caller on top of the loaded `Config`)
//! 2. JSON file given via `--config` (must exist)
//! 3. `$XDG_CONFIG_HOME/material-theme/config.json`
//!    (or `~/.config/material-theme/config.json`)
//! 4. Built-in defaults

mod defaults;
mod loader;
mod paths;
mod sources;
mod types;

pub use defaults::APP_DIR_NAME;
pub use loader::load_config;
pub use paths::{
    config_root_dir, default_state_path, default_termscheme_path, state_root_dir,
};
pub use types::{Config, Transparency};

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;
    use std::io;
    use std::path::{Path, PathBuf};

    use super::loader::load_config_from_sources;
    use super::*;
    use crate::error::ConfigError;
    use crate::render::Target;
    use crate::scheme::{Mode, SchemeKind};

    fn load_with(
        path_override: Option<&Path>,
        files: &[(&str, &str)],
    ) -> Result<Config, ConfigError> {
        let files: BTreeMap<PathBuf, String> = files
            .iter()
            .map(|(path, text)| (PathBuf::from(path), text.to_string()))
            .collect();
        load_config_from_sources(
            path_override,
            |path| {
                files
                    .get(path)
                    .cloned()
                    .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "missing"))
            },
            || Some(PathBuf::from("/cfg")),
        )
    }

    #[test]
    fn defaults_are_sensible() {
        let c = Config::default();
        assert_eq!(c.backend, "swww");
        assert_eq!(c.mode, Mode::Dark);
        assert_eq!(c.scheme, SchemeKind::Vibrant);
        assert!(!c.smart);
        assert_eq!(c.harmony, 0.8);
        assert_eq!(c.harmonize_threshold, 100.0);
        assert_eq!(c.term_fg_boost, 0.0);
        assert!(!c.blend_bg_fg);
        assert_eq!(c.transparency, Transparency::Opaque);
        assert_eq!(c.bitmap_size, 128);
        assert!(c.termscheme.is_none());
        assert_eq!(c.enabled_targets().len(), Target::all().len());
    }

    // Ensures a missing global file is not an error.
    #[test]
    fn missing_global_file_yields_defaults() {
        let c = load_with(None, &[]).unwrap();
        assert_eq!(c, Config::default());
    }

    #[test]
    fn parse_partial_json() {
        let c = load_with(
            None,
            &[(
                "/cfg/material-theme/config.json",
                r#"{
                    "mode": "light",
                    "scheme": "scheme-tonal-spot",
                    "transparency": "transparent",
                    "apps": { "kitty": false },
                    "outputs": { "starship": "/tmp/starship.toml" },
                    "something_else": 42
                }"#,
            )],
        )
        .unwrap();
        assert_eq!(c.mode, Mode::Light);
        assert_eq!(c.scheme, SchemeKind::TonalSpot);
        assert!(c.transparency.is_transparent());
        assert!(!c.is_enabled(Target::Kitty));
        assert!(c.is_enabled(Target::Btop));
        assert!(!c.enabled_targets().contains(&Target::Kitty));
        assert_eq!(
            c.output_override(Target::Starship),
            Some(&PathBuf::from("/tmp/starship.toml"))
        );
        assert_eq!(c.harmony, 0.8);
    }

    #[test]
    fn explicit_path_wins_over_global_file() {
        let c = load_with(
            Some(Path::new("/elsewhere/theme.json")),
            &[
                ("/cfg/material-theme/config.json", r#"{ "mode": "light" }"#),
                ("/elsewhere/theme.json", r#"{ "bitmap_size": 64 }"#),
            ],
        )
        .unwrap();
        assert_eq!(c.mode, Mode::Dark);
        assert_eq!(c.bitmap_size, 64);
    }

    #[test]
    fn missing_explicit_path_is_an_error() {
        let err = load_with(Some(Path::new("/nope.json")), &[]).unwrap_err();
        assert!(err.to_string().contains("/nope.json"), "{err}");
    }

    #[test]
    fn malformed_json_names_the_file() {
        let err = load_with(None, &[("/cfg/material-theme/config.json", "{ mode: ")]).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
        assert!(err.to_string().contains("config.json"), "{err}");
    }

    #[test]
    fn out_of_range_values_are_rejected() {
        for text in [
            r#"{ "harmony": 1.5 }"#,
            r#"{ "harmonize_threshold": 200 }"#,
            r#"{ "term_fg_boost": -0.1 }"#,
            r#"{ "bitmap_size": 0 }"#,
        ] {
            let err = load_with(None, &[("/cfg/material-theme/config.json", text)]).unwrap_err();
            assert!(matches!(err, ConfigError::Invalid(_)), "{text}: {err}");
        }
    }

    #[test]
    fn unknown_scheme_is_rejected() {
        let err = load_with(
            None,
            &[("/cfg/material-theme/config.json", r#"{ "scheme": "pastel" }"#)],
        )
        .unwrap_err();
        assert!(err.to_string().contains("pastel"), "{err}");
    }

    #[test]
    fn derived_options_follow_fields() {
        let c = Config {
            harmony: 0.5,
            harmonize_threshold: 30.0,
            term_fg_boost: 0.2,
            blend_bg_fg: true,
            ..Config::default()
        };
        let harmony = c.harmony_config().unwrap();
        assert_eq!(harmony.strength, 0.5);
        assert_eq!(harmony.max_hue_shift_degrees, 30.0);
        let terminal = c.terminal_options().unwrap();
        assert_eq!(terminal.fg_boost, 0.2);
        assert!(terminal.blend_background);
    }
}
