//! Color primitives shared by extraction, generation and rendering.
//!
//! `Color` is the sRGB value type that flows through every stage and is
//! serialized as `#RRGGBB`. `Tonal` gives hue/chroma/tone coordinates in
//! CIE LCh(ab), where tone is L* so that changing hue or chroma keeps
//! perceived lightness (and relative luminance) fixed.

use std::fmt;
use std::str::FromStr;

use palette::convert::FromColorUnclamped;
use palette::{FromColor, IsWithinBounds, Lab, LabHue, Lch, LinSrgb, Srgb};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::ThemeError;

pub mod harmonize;

pub use harmonize::{harmonize, harmonize_hue, HarmonyConfig};

/// Chroma below which a color has no meaningful hue.
pub const ACHROMATIC_CHROMA: f32 = 1.0;

/// Chroma at or below which `Tonal::to_color` emits an exact gray.
const GRAY_CHROMA: f32 = 1e-3;

/// An sRGB color with 8-bit channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#RRGGBB`, `RRGGBB` or `#RGB`.
    pub fn from_hex(input: &str) -> Result<Self, ThemeError> {
        let trimmed = input.trim();
        let hex = trimmed.strip_prefix('#').unwrap_or(trimmed);
        let invalid = || ThemeError::InvalidInput(format!("malformed hex color `{input}`"));
        if !hex.chars().all(|ch| ch.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        match hex.len() {
            6 => {
                let channel = |range: std::ops::Range<usize>| {
                    u8::from_str_radix(&hex[range], 16).map_err(|_| invalid())
                };
                Ok(Self::new(channel(0..2)?, channel(2..4)?, channel(4..6)?))
            }
            3 => {
                let nibble = |idx: usize| {
                    u8::from_str_radix(&hex[idx..idx + 1], 16)
                        .map(|value| value * 17)
                        .map_err(|_| invalid())
                };
                Ok(Self::new(nibble(0)?, nibble(1)?, nibble(2)?))
            }
            _ => Err(invalid()),
        }
    }

    /// Uppercase `#RRGGBB`.
    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    /// Lowercase `rrggbb` without the leading `#` (fish color syntax).
    pub fn to_bare_hex(self) -> String {
        format!("{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// `rgba(r, g, b, alpha)` for CSS consumers.
    pub fn to_css_rgba(self, alpha: f32) -> String {
        format!("rgba({}, {}, {}, {alpha})", self.r, self.g, self.b)
    }

    /// WCAG relative luminance in [0, 1].
    pub fn relative_luminance(self) -> f32 {
        let linear: LinSrgb<f32> = self.to_srgb().into_linear();
        0.2126 * linear.red + 0.7152 * linear.green + 0.0722 * linear.blue
    }

    /// HSV saturation in [0, 1].
    pub fn saturation(self) -> f32 {
        let max = self.r.max(self.g).max(self.b);
        let min = self.r.min(self.g).min(self.b);
        if max == 0 {
            return 0.0;
        }
        f32::from(max - min) / f32::from(max)
    }

    pub(crate) fn to_srgb(self) -> Srgb<f32> {
        Srgb::new(self.r, self.g, self.b).into_format()
    }

    pub(crate) fn from_srgb(rgb: Srgb<f32>) -> Self {
        let channel = |value: f32| (value.clamp(0.0, 1.0) * 255.0).round() as u8;
        Self::new(channel(rgb.red), channel(rgb.green), channel(rgb.blue))
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Color {
    type Err = ThemeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Self::from_hex(&text).map_err(serde::de::Error::custom)
    }
}

/// Hue/chroma/tone coordinates of a color.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tonal {
    /// Hue angle in degrees, [0, 360).
    pub hue: f32,
    pub chroma: f32,
    /// L* lightness, [0, 100].
    pub tone: f32,
}

impl Tonal {
    pub fn new(hue: f32, chroma: f32, tone: f32) -> Self {
        Self {
            hue: sanitize_degrees(hue),
            chroma: chroma.max(0.0),
            tone: tone.clamp(0.0, 100.0),
        }
    }

    pub fn of(color: Color) -> Self {
        let lch: Lch = Lch::from_color(color.to_srgb());
        Self::new(lch.hue.into_positive_degrees(), lch.chroma, lch.l)
    }

    pub fn is_achromatic(self) -> bool {
        self.chroma < ACHROMATIC_CHROMA
    }

    pub fn with_hue(self, hue: f32) -> Self {
        Self::new(hue, self.chroma, self.tone)
    }

    pub fn with_chroma(self, chroma: f32) -> Self {
        Self::new(self.hue, chroma, self.tone)
    }

    pub fn with_tone(self, tone: f32) -> Self {
        Self::new(self.hue, self.chroma, tone)
    }

    /// Convert to sRGB, reducing chroma at fixed hue and tone until the
    /// color is inside the gamut.
    pub fn to_color(self) -> Color {
        if self.chroma <= GRAY_CHROMA {
            return gray(self.tone);
        }
        let at = |chroma: f32| -> Srgb<f32> {
            let lch: Lch = Lch::new(self.tone, chroma, LabHue::from_degrees(self.hue));
            Srgb::from_color_unclamped(lch)
        };

        let direct = at(self.chroma);
        if direct.is_within_bounds() {
            return Color::from_srgb(direct);
        }

        let (mut lo, mut hi) = (0.0_f32, self.chroma);
        for _ in 0..24 {
            let mid = (lo + hi) / 2.0;
            if at(mid).is_within_bounds() {
                lo = mid;
            } else {
                hi = mid;
            }
        }
        if lo <= GRAY_CHROMA {
            return gray(self.tone);
        }
        Color::from_srgb(at(lo))
    }
}

/// Neutral gray with the given L* tone; channels are always equal.
fn gray(tone: f32) -> Color {
    let lab: Lab = Lab::new(tone.clamp(0.0, 100.0), 0.0, 0.0);
    let rgb: Srgb<f32> = Srgb::from_color_unclamped(lab);
    let level = ((rgb.red + rgb.green + rgb.blue) / 3.0).clamp(0.0, 1.0);
    let value = (level * 255.0).round() as u8;
    Color::new(value, value, value)
}

/// Wrap an angle into [0, 360).
pub fn sanitize_degrees(degrees: f32) -> f32 {
    let wrapped = degrees.rem_euclid(360.0);
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

/// Shorter-arc distance between two hues, in [0, 180].
pub fn difference_degrees(a: f32, b: f32) -> f32 {
    180.0 - ((a - b).abs() - 180.0).abs()
}

/// `1.0` when the shorter arc from `from` to `to` is increasing, else `-1.0`.
pub fn rotation_direction(from: f32, to: f32) -> f32 {
    if sanitize_degrees(to - from) <= 180.0 {
        1.0
    } else {
        -1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_long_short_and_bare_hex() {
        assert_eq!(Color::from_hex("#89b4fa").unwrap(), Color::new(0x89, 0xb4, 0xfa));
        assert_eq!(Color::from_hex("89B4FA").unwrap(), Color::new(0x89, 0xb4, 0xfa));
        assert_eq!(Color::from_hex("#fa0").unwrap(), Color::new(0xff, 0xaa, 0x00));
    }

    #[test]
    fn rejects_malformed_hex() {
        for bad in ["", "#12345", "#gggggg", "#1234567", "blue", "#+12345"] {
            let err = Color::from_hex(bad).expect_err(bad);
            assert!(matches!(err, ThemeError::InvalidInput(_)), "{bad}: {err}");
        }
    }

    #[test]
    fn formats_uppercase_hex() {
        assert_eq!(Color::new(0x89, 0xb4, 0xfa).to_hex(), "#89B4FA");
        assert_eq!(Color::new(0x89, 0xb4, 0xfa).to_bare_hex(), "89b4fa");
    }

    #[test]
    fn serde_uses_hex_strings() {
        let json = serde_json::to_string(&Color::new(1, 2, 3)).unwrap();
        assert_eq!(json, "\"#010203\"");
        let back: Color = serde_json::from_str("\"#010203\"").unwrap();
        assert_eq!(back, Color::new(1, 2, 3));
        assert!(serde_json::from_str::<Color>("\"nope\"").is_err());
    }

    #[test]
    fn tonal_round_trip_is_close() {
        let source = Color::new(0x89, 0xb4, 0xfa);
        let back = Tonal::of(source).to_color();
        for (a, b) in [(source.r, back.r), (source.g, back.g), (source.b, back.b)] {
            assert!(a.abs_diff(b) <= 1, "{source} -> {back}");
        }
    }

    #[test]
    fn zero_chroma_is_exact_gray() {
        for tone in [0.0, 7.5, 33.0, 50.0, 91.0, 100.0] {
            let color = Tonal::new(210.0, 0.0, tone).to_color();
            assert_eq!(color.r, color.g);
            assert_eq!(color.g, color.b);
            assert_eq!(color.saturation(), 0.0);
        }
    }

    #[test]
    fn out_of_gamut_chroma_is_reduced_not_clipped() {
        let color = Tonal::new(140.0, 200.0, 70.0).to_color();
        let tone = Tonal::of(color).tone;
        assert!((tone - 70.0).abs() < 1.5, "tone drifted to {tone}");
    }

    #[test]
    fn hue_helpers_take_shorter_arc() {
        assert_eq!(difference_degrees(350.0, 10.0), 20.0);
        assert_eq!(difference_degrees(10.0, 190.0), 180.0);
        assert_eq!(rotation_direction(350.0, 10.0), 1.0);
        assert_eq!(rotation_direction(10.0, 350.0), -1.0);
        assert_eq!(sanitize_degrees(-30.0), 330.0);
        assert_eq!(sanitize_degrees(720.0), 0.0);
    }

    #[test]
    fn luminance_orders_black_below_white() {
        assert!(Color::new(0, 0, 0).relative_luminance() < 0.001);
        assert!(Color::new(255, 255, 255).relative_luminance() > 0.999);
    }
}
