//! Persisted record of the last applied theme.
//!
//! One JSON file (`$XDG_STATE_HOME/material-theme/colors.json` by default)
//! replaced atomically on every save. `toggle` and `show` read it back.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::color::{Color, HarmonyConfig};
use crate::config;
use crate::error::ThemeError;
use crate::render::write_atomic;
use crate::scheme::{Mode, Palette, SchemeKind};

/// On-disk schema version for [`ThemeStateRecord`].
pub const STATE_FILE_VERSION: u32 = 1;

/// Where the palette's source color came from. Stored flat in the record as
/// `source_color` and `wallpaper`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceRecord {
    #[serde(rename = "source_color")]
    pub color: Color,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wallpaper: Option<PathBuf>,
}

/// Everything needed to regenerate or inspect the applied theme.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThemeStateRecord {
    pub version: u32,
    pub mode: Mode,
    pub scheme: SchemeKind,
    pub transparent: bool,
    #[serde(flatten)]
    pub source: SourceRecord,
    pub harmony: HarmonyConfig,
    pub material: BTreeMap<String, Color>,
    pub terminal: BTreeMap<String, Color>,
    /// Unix seconds of the save.
    pub timestamp: u64,
}

impl ThemeStateRecord {
    pub fn from_palette(
        palette: &Palette,
        harmony: HarmonyConfig,
        transparent: bool,
        wallpaper: Option<PathBuf>,
    ) -> Self {
        Self {
            version: STATE_FILE_VERSION,
            mode: palette.mode,
            scheme: palette.scheme,
            transparent,
            source: SourceRecord {
                color: palette.source,
                wallpaper,
            },
            harmony,
            material: palette.material_by_key(),
            terminal: palette.terminal_by_key(),
            timestamp: now_unix_secs(),
        }
    }
}

/// Filesystem-backed store for the single state record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateStore {
    path: PathBuf,
}

impl StateStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at the XDG state location.
    pub fn open_default() -> Result<Self, ThemeError> {
        config::default_state_path().map(Self::new).ok_or_else(|| {
            ThemeError::InvalidInput(
                "cannot resolve a state directory; pass --state explicitly".to_string(),
            )
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Atomically replace the record on disk.
    pub fn save(&self, record: &ThemeStateRecord) -> Result<(), ThemeError> {
        let mut json = serde_json::to_string_pretty(record).map_err(|err| {
            ThemeError::InvalidInput(format!("cannot serialize state record: {err}"))
        })?;
        json.push('\n');
        write_atomic(&self.path, &json)?;
        debug!(path = %self.path.display(), mode = %record.mode, "saved state");
        Ok(())
    }

    /// Load the record; a missing file is `NotFound`.
    pub fn load(&self) -> Result<ThemeStateRecord, ThemeError> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Err(ThemeError::NotFound(format!(
                    "no theme state at {}; generate a theme first",
                    self.path.display()
                )));
            }
            Err(err) => return Err(ThemeError::io(&self.path, err)),
        };
        let record: ThemeStateRecord = serde_json::from_str(&raw).map_err(|err| {
            ThemeError::InvalidInput(format!(
                "malformed state file {}: {err}",
                self.path.display()
            ))
        })?;
        if record.version != STATE_FILE_VERSION {
            return Err(ThemeError::InvalidInput(format!(
                "unsupported state file version {} in {}",
                record.version,
                self.path.display()
            )));
        }
        Ok(record)
    }
}

fn now_unix_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}
