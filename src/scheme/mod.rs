//! Palette generation: modes, scheme kinds and the generated palette.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::ThemeError;

mod generate;
mod palettes;
pub mod terminal;

pub use generate::{generate, Palette, Role};
pub use palettes::{CorePalettes, TonalPalette};
pub use terminal::{TerminalBaseScheme, TerminalOptions, TERMINAL_SLOTS};

/// Light or dark variant of a scheme.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Dark,
    Light,
}

impl Mode {
    pub fn is_dark(self) -> bool {
        matches!(self, Self::Dark)
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Dark => "dark",
            Self::Light => "light",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Strategy deciding hue and chroma of every core palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum SchemeKind {
    #[default]
    Vibrant,
    TonalSpot,
    Neutral,
    Expressive,
    Content,
    Monochrome,
    Fidelity,
    FruitSalad,
    Rainbow,
}

impl SchemeKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Vibrant => "vibrant",
            Self::TonalSpot => "tonal-spot",
            Self::Neutral => "neutral",
            Self::Expressive => "expressive",
            Self::Content => "content",
            Self::Monochrome => "monochrome",
            Self::Fidelity => "fidelity",
            Self::FruitSalad => "fruit-salad",
            Self::Rainbow => "rainbow",
        }
    }

    pub fn all() -> &'static [SchemeKind] {
        &[
            Self::Vibrant,
            Self::TonalSpot,
            Self::Neutral,
            Self::Expressive,
            Self::Content,
            Self::Monochrome,
            Self::Fidelity,
            Self::FruitSalad,
            Self::Rainbow,
        ]
    }
}

impl fmt::Display for SchemeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SchemeKind {
    type Err = ThemeError;

    /// Accepts `tonal-spot`, `scheme-tonal-spot`, `tonal_spot`, any case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('_', "-");
        let name = normalized
            .strip_prefix("scheme-")
            .unwrap_or(normalized.as_str());
        Self::all()
            .iter()
            .copied()
            .find(|kind| kind.as_str() == name)
            .ok_or_else(|| ThemeError::UnsupportedScheme(s.trim().to_string()))
    }
}

impl Serialize for SchemeKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for SchemeKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}
