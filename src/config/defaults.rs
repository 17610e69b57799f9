//! Default configuration constants.

use crate::color::HarmonyConfig;
use crate::extract::DEFAULT_BITMAP_SIZE as EXTRACT_BITMAP_SIZE;

/// Directory name under the XDG config and state roots.
pub const APP_DIR_NAME: &str = "material-theme";
/// Config file name inside `APP_DIR_NAME`.
pub(super) const CONFIG_FILE_NAME: &str = "config.json";
/// Terminal base scheme file name inside `APP_DIR_NAME`.
pub(super) const TERMSCHEME_FILE_NAME: &str = "terminal-scheme.json";
/// State file name inside the state directory.
pub(super) const STATE_FILE_NAME: &str = "colors.json";

pub(super) const DEFAULT_BACKEND: &str = "swww";
pub(super) const DEFAULT_HARMONY: f32 = HarmonyConfig::DEFAULT_STRENGTH;
pub(super) const DEFAULT_HARMONIZE_THRESHOLD: f32 = HarmonyConfig::DEFAULT_MAX_HUE_SHIFT;
pub(super) const DEFAULT_TERM_FG_BOOST: f32 = 0.0;
pub(super) const DEFAULT_BITMAP_SIZE: u32 = EXTRACT_BITMAP_SIZE;
