//! Bounded hue rotation of a color toward an accent.

use serde::{Deserialize, Serialize};

use super::{difference_degrees, rotation_direction, sanitize_degrees, Color, Tonal};
use crate::error::ThemeError;

/// Cap applied to semantic colors (error, success) so they keep their meaning.
pub const SEMANTIC_MAX_HUE_SHIFT: f32 = 15.0;

/// How strongly and how far colors are pulled toward the source hue.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HarmonyConfig {
    /// Fraction of the hue distance applied, [0, 1].
    pub strength: f32,
    /// Upper bound on the applied rotation in degrees, [0, 180].
    #[serde(rename = "max_hue_shift")]
    pub max_hue_shift_degrees: f32,
}

impl Default for HarmonyConfig {
    fn default() -> Self {
        Self {
            strength: Self::DEFAULT_STRENGTH,
            max_hue_shift_degrees: Self::DEFAULT_MAX_HUE_SHIFT,
        }
    }
}

impl HarmonyConfig {
    pub const DEFAULT_STRENGTH: f32 = 0.8;
    pub const DEFAULT_MAX_HUE_SHIFT: f32 = 100.0;

    /// Build a validated config.
    pub fn new(strength: f32, max_hue_shift_degrees: f32) -> Result<Self, ThemeError> {
        if !(0.0..=1.0).contains(&strength) {
            return Err(ThemeError::InvalidInput(format!(
                "harmony strength {strength} is outside 0..1"
            )));
        }
        if !(0.0..=180.0).contains(&max_hue_shift_degrees) {
            return Err(ThemeError::InvalidInput(format!(
                "harmonize threshold {max_hue_shift_degrees} is outside 0..180 degrees"
            )));
        }
        Ok(Self {
            strength,
            max_hue_shift_degrees,
        })
    }

    /// Same strength with the shift capped for semantic colors.
    pub fn semantic(self) -> Self {
        Self {
            strength: self.strength,
            max_hue_shift_degrees: self.max_hue_shift_degrees.min(SEMANTIC_MAX_HUE_SHIFT),
        }
    }

    /// Rotation in degrees for a given hue distance.
    pub fn rotation_for(self, distance: f32) -> f32 {
        (distance * self.strength).min(self.max_hue_shift_degrees)
    }
}

/// Shift `base`'s hue toward `accent`, keeping base chroma and tone.
///
/// Returns `base` unchanged when either color is achromatic or when the
/// applied rotation is zero.
pub fn harmonize(base: Color, accent: Color, cfg: &HarmonyConfig) -> Color {
    let from = Tonal::of(base);
    let to = Tonal::of(accent);
    if from.is_achromatic() || to.is_achromatic() {
        return base;
    }

    match harmonize_hue(from.hue, to.hue, cfg) {
        Some(hue) => from.with_hue(hue).to_color(),
        None => base,
    }
}

/// Rotated hue, or `None` when the rotation would be zero.
pub fn harmonize_hue(hue: f32, accent_hue: f32, cfg: &HarmonyConfig) -> Option<f32> {
    let rotation = cfg.rotation_for(difference_degrees(hue, accent_hue));
    if rotation <= f32::EPSILON {
        return None;
    }
    Some(sanitize_degrees(
        hue + rotation * rotation_direction(hue, accent_hue),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn hue_of(hex: &str) -> f32 {
        Tonal::of(Color::from_hex(hex).unwrap()).hue
    }

    #[test]
    fn zero_threshold_is_identity() {
        let cfg = HarmonyConfig::new(1.0, 0.0).unwrap();
        let base = Color::from_hex("#CC241D").unwrap();
        let accent = Color::from_hex("#458588").unwrap();
        assert_eq!(harmonize(base, accent, &cfg), base);
    }

    #[test]
    fn zero_strength_is_identity() {
        let cfg = HarmonyConfig::new(0.0, 180.0).unwrap();
        let base = Color::from_hex("#98971A").unwrap();
        let accent = Color::from_hex("#B16286").unwrap();
        assert_eq!(harmonize(base, accent, &cfg), base);
    }

    #[test]
    fn achromatic_base_is_skipped() {
        let cfg = HarmonyConfig::default();
        let gray = Color::from_hex("#808080").unwrap();
        let accent = Color::from_hex("#89b4fa").unwrap();
        assert_eq!(harmonize(gray, accent, &cfg), gray);
    }

    #[test]
    fn rotation_is_clamped_to_threshold() {
        let cfg = HarmonyConfig::new(1.0, 20.0).unwrap();
        let base = Color::from_hex("#CC241D").unwrap();
        let accent = Color::from_hex("#458588").unwrap();
        let before = difference_degrees(hue_of("#CC241D"), hue_of("#458588"));
        let out = harmonize(base, accent, &cfg);
        let after = difference_degrees(Tonal::of(out).hue, hue_of("#458588"));
        assert!(before > 20.0);
        assert!(
            (before - after - 20.0).abs() < 2.0,
            "expected ~20 degree move, before={before} after={after}"
        );
    }

    #[test]
    fn rotation_moves_toward_accent_and_keeps_tone() {
        let cfg = HarmonyConfig::default();
        let base = Color::from_hex("#B8BB26").unwrap();
        let accent = Color::from_hex("#89b4fa").unwrap();
        let out = harmonize(base, accent, &cfg);
        let before = difference_degrees(hue_of("#B8BB26"), hue_of("#89b4fa"));
        let after = difference_degrees(Tonal::of(out).hue, hue_of("#89b4fa"));
        assert!(after < before, "before={before} after={after}");
        let tone_delta = (Tonal::of(out).tone - Tonal::of(base).tone).abs();
        assert!(tone_delta < 1.0, "tone drifted by {tone_delta}");
    }

    #[test]
    fn rejects_out_of_range_config() {
        assert!(HarmonyConfig::new(1.2, 10.0).is_err());
        assert!(HarmonyConfig::new(0.5, 181.0).is_err());
        assert!(HarmonyConfig::new(-0.1, 10.0).is_err());
    }

    fn any_color() -> impl Strategy<Value = Color> {
        (any::<u8>(), any::<u8>(), any::<u8>()).prop_map(|(r, g, b)| Color::new(r, g, b))
    }

    proptest! {
        #[test]
        fn zero_threshold_never_moves(
            base in any_color(),
            accent in any_color(),
            strength in 0.0f32..=1.0,
        ) {
            let cfg = HarmonyConfig::new(strength, 0.0).unwrap();
            prop_assert_eq!(harmonize(base, accent, &cfg), base);
        }

        #[test]
        fn harmonizing_toward_itself_is_identity(base in any_color()) {
            prop_assert_eq!(harmonize(base, base, &HarmonyConfig::default()), base);
        }
    }

    #[test]
    fn semantic_caps_shift() {
        let cfg = HarmonyConfig::default().semantic();
        assert_eq!(cfg.max_hue_shift_degrees, SEMANTIC_MAX_HUE_SHIFT);
        assert_eq!(cfg.strength, 0.8);
    }
}
