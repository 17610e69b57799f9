//! Shared test fixtures for unit test modules.
//!
//! Keeping temp-dir and palette helpers here prevents each test module from
//! rebuilding ad-hoc fixtures.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::color::{Color, HarmonyConfig};
use crate::scheme::{generate, Mode, Palette, SchemeKind, TerminalBaseScheme, TerminalOptions};

static TEST_DIR_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Seed color used by palette fixtures.
pub const SAMPLE_SOURCE: &str = "#89b4fa";

/// Temporary directory fixture with best-effort cleanup.
#[derive(Debug)]
pub struct TestTempDir {
    path: PathBuf,
}

impl TestTempDir {
    /// Create a unique temporary directory with a readable prefix.
    pub fn new(prefix: &str) -> Self {
        let suffix = TEST_DIR_COUNTER.fetch_add(1, Ordering::Relaxed);
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis();
        let dir = std::env::temp_dir().join(format!(
            "material-theme-{prefix}-{}-{millis}-{suffix}",
            std::process::id()
        ));
        fs::create_dir_all(&dir).expect("failed to create temporary fixture directory");
        Self { path: dir }
    }

    /// Root directory path for this fixture.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Build a child path under the fixture root.
    pub fn child(&self, relative: &str) -> PathBuf {
        self.path.join(relative)
    }

    /// Write UTF-8 text to a child path, creating parent directories as needed.
    pub fn write_text(&self, relative: &str, content: &str) -> PathBuf {
        let path = self.child(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("failed to create parent directories for fixture");
        }
        fs::write(&path, content).expect("failed to write fixture file");
        path
    }
}

impl Drop for TestTempDir {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.path);
    }
}

/// Vibrant palette for `SAMPLE_SOURCE` with default harmony and terminal base.
pub fn sample_palette(mode: Mode) -> Palette {
    let source = Color::from_hex(SAMPLE_SOURCE).expect("sample source is valid hex");
    generate(
        source,
        mode,
        SchemeKind::Vibrant,
        &HarmonyConfig::default(),
        &TerminalBaseScheme::default(),
        &TerminalOptions::default(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn temp_dir_fixture_writes_and_resolves_paths() {
        let fixture = TestTempDir::new("fixture");
        let file = fixture.write_text("nested/file.txt", "hello");
        assert_eq!(fs::read_to_string(file).unwrap(), "hello");
    }

    #[test]
    fn temp_dir_is_removed_on_drop() {
        let path = {
            let fixture = TestTempDir::new("dropped");
            fixture.path().to_path_buf()
        };
        assert!(!path.exists());
    }

    #[test]
    fn sample_palette_keeps_mode_and_source() {
        let palette = sample_palette(Mode::Light);
        assert_eq!(palette.mode, Mode::Light);
        assert_eq!(palette.source.to_hex(), "#89B4FA");
    }
}
