//! Configuration data model.
//!
//! Every field has a default so a partial (or absent) `config.json` always
//! yields a complete `Config`. Unknown keys are ignored.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::color::HarmonyConfig;
use crate::error::ConfigError;
use crate::render::Target;
use crate::scheme::{Mode, SchemeKind, TerminalOptions};

use super::defaults::{
    DEFAULT_BACKEND, DEFAULT_BITMAP_SIZE, DEFAULT_HARMONY, DEFAULT_HARMONIZE_THRESHOLD,
    DEFAULT_TERM_FG_BOOST,
};

/// Whether rendered themes use a translucent background.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Transparency {
    #[default]
    Opaque,
    Transparent,
}

impl Transparency {
    pub fn is_transparent(self) -> bool {
        matches!(self, Self::Transparent)
    }
}

impl fmt::Display for Transparency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Opaque => "opaque",
            Self::Transparent => "transparent",
        })
    }
}

/// User preferences from `config.json`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Wallpaper backend name; carried for the installer layer only.
    pub backend: String,
    pub mode: Mode,
    pub scheme: SchemeKind,
    pub smart: bool,
    /// Harmonization strength in `[0, 1]`.
    pub harmony: f32,
    /// Maximum hue rotation in degrees, `[0, 180]`.
    pub harmonize_threshold: f32,
    pub term_fg_boost: f32,
    pub blend_bg_fg: bool,
    pub transparency: Transparency,
    pub bitmap_size: u32,
    /// Terminal base scheme file; `None` means the default location.
    pub termscheme: Option<PathBuf>,
    /// Per-target enable flags; absent targets are enabled.
    pub apps: BTreeMap<String, bool>,
    /// Per-target output path overrides.
    pub outputs: BTreeMap<String, PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend: DEFAULT_BACKEND.to_string(),
            mode: Mode::default(),
            scheme: SchemeKind::default(),
            smart: false,
            harmony: DEFAULT_HARMONY,
            harmonize_threshold: DEFAULT_HARMONIZE_THRESHOLD,
            term_fg_boost: DEFAULT_TERM_FG_BOOST,
            blend_bg_fg: false,
            transparency: Transparency::default(),
            bitmap_size: DEFAULT_BITMAP_SIZE,
            termscheme: None,
            apps: BTreeMap::new(),
            outputs: BTreeMap::new(),
        }
    }
}

impl Config {
    /// Reject out-of-range numeric values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.harmony) {
            return Err(ConfigError::Invalid(format!(
                "`harmony` must be within 0..1, got {}",
                self.harmony
            )));
        }
        if !(0.0..=180.0).contains(&self.harmonize_threshold) {
            return Err(ConfigError::Invalid(format!(
                "`harmonize_threshold` must be within 0..180, got {}",
                self.harmonize_threshold
            )));
        }
        if !(0.0..=1.0).contains(&self.term_fg_boost) {
            return Err(ConfigError::Invalid(format!(
                "`term_fg_boost` must be within 0..1, got {}",
                self.term_fg_boost
            )));
        }
        if self.bitmap_size == 0 {
            return Err(ConfigError::Invalid(
                "`bitmap_size` must be positive".to_string(),
            ));
        }
        for key in self.apps.keys().chain(self.outputs.keys()) {
            if key.parse::<Target>().is_err() {
                warn!(key = %key, "ignoring unknown target in config");
            }
        }
        Ok(())
    }

    pub fn harmony_config(&self) -> Result<HarmonyConfig, ConfigError> {
        HarmonyConfig::new(self.harmony, self.harmonize_threshold)
            .map_err(|err| ConfigError::Invalid(err.to_string()))
    }

    pub fn terminal_options(&self) -> Result<TerminalOptions, ConfigError> {
        TerminalOptions::new(self.term_fg_boost, self.blend_bg_fg)
            .map_err(|err| ConfigError::Invalid(err.to_string()))
    }

    pub fn is_enabled(&self, target: Target) -> bool {
        self.apps.get(target.key()).copied().unwrap_or(true)
    }

    /// Targets whose `apps.<key>` flag is not `false`.
    pub fn enabled_targets(&self) -> BTreeSet<Target> {
        Target::all()
            .iter()
            .copied()
            .filter(|target| self.is_enabled(*target))
            .collect()
    }

    pub fn output_override(&self, target: Target) -> Option<&PathBuf> {
        self.outputs.get(target.key())
    }
}
