//! The 16-slot terminal base scheme and its user-editable JSON form.
//!
//! Two JSON layouts are accepted: `{ "dark": { "term0": "#...", ... },
//! "light": { ... } }`, or a flat Catppuccin-style map (`base`, `red`,
//! `green`, ... `subtext1`) which is mapped onto slots and used for both
//! modes. Slots absent from the file keep the built-in value.

use std::path::Path;

use serde_json::{Map, Value};
use tracing::debug;

use crate::color::Color;
use crate::error::ThemeError;

use super::Mode;

pub const TERMINAL_SLOTS: usize = 16;

const BUILTIN_DARK: [&str; TERMINAL_SLOTS] = [
    "#282828", "#CC241D", "#98971A", "#D79921", "#458588", "#B16286", "#689D6A", "#A89984",
    "#928374", "#FB4934", "#B8BB26", "#FABD2F", "#83A598", "#D3869B", "#8EC07C", "#EBDBB2",
];

const BUILTIN_LIGHT: [&str; TERMINAL_SLOTS] = [
    "#FDF9F3", "#FF6188", "#A9DC76", "#FC9867", "#FFD866", "#F47FD4", "#78DCE8", "#333034",
    "#121212", "#FF6188", "#A9DC76", "#FC9867", "#FFD866", "#F47FD4", "#78DCE8", "#333034",
];

/// Catppuccin key feeding each slot.
const CATPPUCCIN_SLOTS: [&str; TERMINAL_SLOTS] = [
    "base", "red", "green", "yellow", "blue", "pink", "teal", "text", "surface2", "red", "green",
    "yellow", "blue", "pink", "teal", "subtext1",
];

/// `termN` slot name.
pub fn slot_name(index: usize) -> String {
    format!("term{index}")
}

/// Per-mode base colors harmonized into the terminal palette.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TerminalBaseScheme {
    pub dark: [Color; TERMINAL_SLOTS],
    pub light: [Color; TERMINAL_SLOTS],
}

impl Default for TerminalBaseScheme {
    fn default() -> Self {
        Self {
            dark: builtin(&BUILTIN_DARK),
            light: builtin(&BUILTIN_LIGHT),
        }
    }
}

impl TerminalBaseScheme {
    pub fn slots(&self, mode: Mode) -> &[Color; TERMINAL_SLOTS] {
        match mode {
            Mode::Dark => &self.dark,
            Mode::Light => &self.light,
        }
    }

    /// Read a scheme file; a missing file yields the built-in scheme.
    pub fn load_or_default(path: &Path) -> Result<Self, ThemeError> {
        match std::fs::read_to_string(path) {
            Ok(text) => {
                debug!(path = %path.display(), "loaded terminal scheme");
                Self::from_json(&text).map_err(|err| match err {
                    ThemeError::InvalidInput(msg) => ThemeError::InvalidInput(format!(
                        "terminal scheme {}: {msg}",
                        path.display()
                    )),
                    other => other,
                })
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no terminal scheme file, using built-in");
                Ok(Self::default())
            }
            Err(err) => Err(ThemeError::io(path, err)),
        }
    }

    pub fn from_json(text: &str) -> Result<Self, ThemeError> {
        let value: Value = serde_json::from_str(text)
            .map_err(|err| ThemeError::InvalidInput(format!("malformed JSON: {err}")))?;
        let Value::Object(root) = value else {
            return Err(ThemeError::InvalidInput(
                "expected a JSON object".to_string(),
            ));
        };

        let mut scheme = Self::default();
        if root.contains_key("dark") || root.contains_key("light") {
            if let Some(dark) = root.get("dark") {
                overlay_slots(&mut scheme.dark, object(dark, "dark")?)?;
            }
            if let Some(light) = root.get("light") {
                overlay_slots(&mut scheme.light, object(light, "light")?)?;
            }
        } else {
            for (index, key) in CATPPUCCIN_SLOTS.iter().enumerate() {
                if let Some(value) = root.get(*key) {
                    let color = parse_color(value, key)?;
                    scheme.dark[index] = color;
                    scheme.light[index] = color;
                }
            }
        }
        Ok(scheme)
    }
}

fn builtin(hex: &[&str; TERMINAL_SLOTS]) -> [Color; TERMINAL_SLOTS] {
    // Literal tables above are always well-formed.
    hex.map(|value| Color::from_hex(value).unwrap_or(Color::new(0, 0, 0)))
}

fn object<'a>(value: &'a Value, name: &str) -> Result<&'a Map<String, Value>, ThemeError> {
    value
        .as_object()
        .ok_or_else(|| ThemeError::InvalidInput(format!("`{name}` must be an object")))
}

fn overlay_slots(
    slots: &mut [Color; TERMINAL_SLOTS],
    entries: &Map<String, Value>,
) -> Result<(), ThemeError> {
    for (index, slot) in slots.iter_mut().enumerate() {
        let name = slot_name(index);
        if let Some(value) = entries.get(&name) {
            *slot = parse_color(value, &name)?;
        }
    }
    Ok(())
}

fn parse_color(value: &Value, key: &str) -> Result<Color, ThemeError> {
    let text = value
        .as_str()
        .ok_or_else(|| ThemeError::InvalidInput(format!("`{key}` must be a hex string")))?;
    Color::from_hex(text)
}

/// Post-harmonization adjustments of the terminal palette.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TerminalOptions {
    /// Tone multiplier for term7/term15: lighter in dark mode, darker in light.
    pub fg_boost: f32,
    /// Take term0/term15 from the surface roles instead of the base scheme.
    pub blend_background: bool,
}

impl TerminalOptions {
    pub fn new(fg_boost: f32, blend_background: bool) -> Result<Self, ThemeError> {
        if !(0.0..=1.0).contains(&fg_boost) {
            return Err(ThemeError::InvalidInput(format!(
                "terminal fg boost {fg_boost} is outside 0..1"
            )));
        }
        Ok(Self {
            fg_boost,
            blend_background,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_dark_background_is_darkest() {
        let scheme = TerminalBaseScheme::default();
        let luminance: Vec<f32> = scheme.dark.iter().map(|c| c.relative_luminance()).collect();
        let darkest = luminance.iter().copied().fold(f32::INFINITY, f32::min);
        assert_eq!(luminance[0], darkest);
        assert_eq!(scheme.dark[0].to_hex(), "#282828");
        assert_eq!(scheme.light[15].to_hex(), "#333034");
    }

    #[test]
    fn mode_keyed_file_overrides_only_listed_slots() {
        let scheme = TerminalBaseScheme::from_json(
            r##"{ "dark": { "term0": "#101010", "term4": "#89b4fa" } }"##,
        )
        .unwrap();
        assert_eq!(scheme.dark[0].to_hex(), "#101010");
        assert_eq!(scheme.dark[4].to_hex(), "#89B4FA");
        assert_eq!(scheme.dark[1].to_hex(), "#CC241D");
        assert_eq!(scheme.light, TerminalBaseScheme::default().light);
    }

    #[test]
    fn catppuccin_map_fills_both_modes() {
        let scheme = TerminalBaseScheme::from_json(
            r##"{ "base": "#1e1e2e", "red": "#f38ba8", "subtext1": "#bac2de" }"##,
        )
        .unwrap();
        for slots in [&scheme.dark, &scheme.light] {
            assert_eq!(slots[0].to_hex(), "#1E1E2E");
            assert_eq!(slots[1], slots[9]);
            assert_eq!(slots[15].to_hex(), "#BAC2DE");
        }
    }

    #[test]
    fn malformed_entries_are_invalid_input() {
        for bad in [
            "[1, 2]",
            r#"{ "dark": "nope" }"#,
            r#"{ "dark": { "term3": 12 } }"#,
            r##"{ "red": "#zzzzzz" }"##,
        ] {
            let err = TerminalBaseScheme::from_json(bad).expect_err(bad);
            assert!(matches!(err, ThemeError::InvalidInput(_)), "{bad}: {err}");
        }
    }

    #[test]
    fn missing_file_uses_builtin() {
        let tmp = crate::testsupport::TestTempDir::new("termscheme");
        let scheme = TerminalBaseScheme::load_or_default(&tmp.child("absent.json")).unwrap();
        assert_eq!(scheme, TerminalBaseScheme::default());
    }

    #[test]
    fn fg_boost_range_is_checked() {
        assert!(TerminalOptions::new(0.35, false).is_ok());
        assert!(TerminalOptions::new(1.5, false).is_err());
    }
}
