//! Core tonal palettes per scheme kind.

use crate::color::{harmonize_hue, sanitize_degrees, Color, HarmonyConfig, Tonal};

use super::SchemeKind;

/// A hue and chroma; tones are sampled on demand.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TonalPalette {
    pub hue: f32,
    pub chroma: f32,
}

impl TonalPalette {
    pub fn new(hue: f32, chroma: f32) -> Self {
        Self {
            hue: sanitize_degrees(hue),
            chroma: chroma.max(0.0),
        }
    }

    pub fn tone(self, tone: f32) -> Color {
        Tonal::new(self.hue, self.chroma, tone).to_color()
    }

    /// Representative color of the palette.
    pub fn key_color(self) -> Color {
        self.tone(50.0)
    }

    /// Rotate this palette's hue toward `source` the way `harmonize` rotates
    /// a single color. Achromatic palettes and sources are left alone.
    pub fn harmonized(self, source: Tonal, cfg: &HarmonyConfig) -> Self {
        if self.chroma < crate::color::ACHROMATIC_CHROMA || source.is_achromatic() {
            return self;
        }
        match harmonize_hue(self.hue, source.hue, cfg) {
            Some(hue) => Self::new(hue, self.chroma),
            None => self,
        }
    }
}

/// The seven palettes every role is sampled from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CorePalettes {
    pub primary: TonalPalette,
    pub secondary: TonalPalette,
    pub tertiary: TonalPalette,
    pub neutral: TonalPalette,
    pub neutral_variant: TonalPalette,
    pub error: TonalPalette,
    pub success: TonalPalette,
}

const ERROR_HUE: f32 = 25.0;
const ERROR_CHROMA: f32 = 84.0;
const SUCCESS_HUE: f32 = 145.0;
const SUCCESS_CHROMA: f32 = 36.0;

// Source-hue breakpoints and rotations used by vibrant and expressive.
const ROTATION_HUES: [f32; 9] = [0.0, 41.0, 61.0, 101.0, 131.0, 181.0, 251.0, 301.0, 360.0];
const VIBRANT_SECONDARY: [f32; 9] = [18.0, 15.0, 10.0, 12.0, 15.0, 18.0, 15.0, 12.0, 12.0];
const VIBRANT_TERTIARY: [f32; 9] = [35.0, 30.0, 20.0, 25.0, 30.0, 35.0, 30.0, 25.0, 25.0];
const EXPRESSIVE_SECONDARY: [f32; 9] = [45.0, 95.0, 45.0, 20.0, 45.0, 90.0, 45.0, 45.0, 45.0];
const EXPRESSIVE_TERTIARY: [f32; 9] = [120.0, 120.0, 20.0, 45.0, 20.0, 15.0, 20.0, 120.0, 120.0];

impl CorePalettes {
    pub fn for_scheme(source: Tonal, scheme: SchemeKind) -> Self {
        let (h, c) = (source.hue, source.chroma);
        let p = TonalPalette::new;
        let (primary, secondary, tertiary, neutral, neutral_variant) = match scheme {
            SchemeKind::TonalSpot => (
                p(h, 36.0),
                p(h, 16.0),
                p(h + 60.0, 24.0),
                p(h, 6.0),
                p(h, 8.0),
            ),
            SchemeKind::Vibrant => (
                p(h, 200.0),
                p(rotated_hue(h, &VIBRANT_SECONDARY), 24.0),
                p(rotated_hue(h, &VIBRANT_TERTIARY), 32.0),
                p(h, 10.0),
                p(h, 12.0),
            ),
            SchemeKind::Expressive => (
                p(h + 240.0, 40.0),
                p(rotated_hue(h, &EXPRESSIVE_SECONDARY), 24.0),
                p(rotated_hue(h, &EXPRESSIVE_TERTIARY), 32.0),
                p(h + 15.0, 8.0),
                p(h + 15.0, 12.0),
            ),
            SchemeKind::Neutral => (p(h, 12.0), p(h, 8.0), p(h, 16.0), p(h, 2.0), p(h, 2.0)),
            SchemeKind::Monochrome => (p(h, 0.0), p(h, 0.0), p(h, 0.0), p(h, 0.0), p(h, 0.0)),
            SchemeKind::Fidelity | SchemeKind::Content => (
                p(h, c),
                p(h, (c - 32.0).max(c * 0.5)),
                p(h + 60.0, c),
                p(h, c / 8.0),
                p(h, c / 8.0 + 4.0),
            ),
            SchemeKind::FruitSalad => (
                p(h - 50.0, 48.0),
                p(h - 50.0, 36.0),
                p(h, 36.0),
                p(h, 10.0),
                p(h, 16.0),
            ),
            SchemeKind::Rainbow => (
                p(h, 48.0),
                p(h, 16.0),
                p(h + 60.0, 24.0),
                p(h, 0.0),
                p(h, 0.0),
            ),
        };

        let semantic_chroma = |chroma: f32| {
            if scheme == SchemeKind::Monochrome {
                0.0
            } else {
                chroma
            }
        };
        Self {
            primary,
            secondary,
            tertiary,
            neutral,
            neutral_variant,
            error: p(ERROR_HUE, semantic_chroma(ERROR_CHROMA)),
            success: p(SUCCESS_HUE, semantic_chroma(SUCCESS_CHROMA)),
        }
    }

    /// Pull every palette toward the source hue. Error and success use the
    /// semantic cap so they stay recognizably red and green.
    pub fn harmonized(self, source: Tonal, cfg: &HarmonyConfig) -> Self {
        let semantic = cfg.semantic();
        Self {
            primary: self.primary.harmonized(source, cfg),
            secondary: self.secondary.harmonized(source, cfg),
            tertiary: self.tertiary.harmonized(source, cfg),
            neutral: self.neutral.harmonized(source, cfg),
            neutral_variant: self.neutral_variant.harmonized(source, cfg),
            error: self.error.harmonized(source, &semantic),
            success: self.success.harmonized(source, &semantic),
        }
    }
}

fn rotated_hue(source_hue: f32, rotations: &[f32; 9]) -> f32 {
    for idx in 0..ROTATION_HUES.len() - 1 {
        if ROTATION_HUES[idx] < source_hue && source_hue < ROTATION_HUES[idx + 1] {
            return sanitize_degrees(source_hue + rotations[idx]);
        }
    }
    source_hue
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source() -> Tonal {
        Tonal::of(Color::from_hex("#89b4fa").unwrap())
    }

    #[test]
    fn tonal_spot_uses_fixed_chromas() {
        let palettes = CorePalettes::for_scheme(source(), SchemeKind::TonalSpot);
        assert_eq!(palettes.primary.chroma, 36.0);
        assert_eq!(palettes.neutral.chroma, 6.0);
        let expected_tertiary = sanitize_degrees(source().hue + 60.0);
        assert!((palettes.tertiary.hue - expected_tertiary).abs() < 1e-3);
    }

    #[test]
    fn monochrome_zeroes_every_chroma() {
        let palettes = CorePalettes::for_scheme(source(), SchemeKind::Monochrome);
        for palette in [
            palettes.primary,
            palettes.secondary,
            palettes.tertiary,
            palettes.neutral,
            palettes.neutral_variant,
            palettes.error,
            palettes.success,
        ] {
            assert_eq!(palette.chroma, 0.0);
        }
    }

    #[test]
    fn vibrant_rotates_secondary_by_table() {
        assert_eq!(rotated_hue(20.0, &VIBRANT_SECONDARY), 38.0);
        assert_eq!(rotated_hue(200.0, &VIBRANT_TERTIARY), 235.0);
        // Exact breakpoints fall through unchanged.
        assert_eq!(rotated_hue(41.0, &VIBRANT_SECONDARY), 41.0);
    }

    #[test]
    fn semantic_palettes_move_at_most_fifteen_degrees() {
        let cfg = HarmonyConfig::new(1.0, 180.0).unwrap();
        let harmonized =
            CorePalettes::for_scheme(source(), SchemeKind::Vibrant).harmonized(source(), &cfg);
        let error_shift = crate::color::difference_degrees(harmonized.error.hue, ERROR_HUE);
        let success_shift = crate::color::difference_degrees(harmonized.success.hue, SUCCESS_HUE);
        assert!(error_shift <= 15.0 + 1e-3, "{error_shift}");
        assert!(success_shift <= 15.0 + 1e-3, "{success_shift}");
    }

    #[test]
    fn zero_strength_keeps_palettes() {
        let cfg = HarmonyConfig::new(0.0, 100.0).unwrap();
        let palettes = CorePalettes::for_scheme(source(), SchemeKind::Expressive);
        assert_eq!(palettes.harmonized(source(), &cfg), palettes);
    }
}
