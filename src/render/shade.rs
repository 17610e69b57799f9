//! Accent-derived shades shared by the application renderers.

use crate::color::{Color, Tonal, ACHROMATIC_CHROMA};
use crate::error::ThemeError;
use crate::scheme::{Mode, Palette};

/// Hue offset, chroma multiplier with cap, and per-mode tone.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shade {
    pub hue_offset: f32,
    pub chroma_scale: f32,
    pub chroma_cap: f32,
    pub dark_tone: f32,
    pub light_tone: f32,
}

impl Shade {
    pub const fn new(
        hue_offset: f32,
        chroma_scale: f32,
        chroma_cap: f32,
        dark_tone: f32,
        light_tone: f32,
    ) -> Self {
        Self {
            hue_offset,
            chroma_scale,
            chroma_cap,
            dark_tone,
            light_tone,
        }
    }
}

/// Hue and chroma of the primary key color, plus the palette mode.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Accent {
    pub hue: f32,
    pub chroma: f32,
    pub mode: Mode,
}

impl Accent {
    pub const ROLE: &'static str = "primary_paletteKeyColor";

    pub fn of(palette: &Palette, target: &str) -> Result<Self, ThemeError> {
        let key = Tonal::of(palette.require(target, Self::ROLE)?);
        Ok(Self {
            hue: key.hue,
            chroma: key.chroma,
            mode: palette.mode,
        })
    }

    /// Monochrome schemes and gray seeds produce a gray key color.
    pub fn is_achromatic(&self) -> bool {
        self.chroma < ACHROMATIC_CHROMA
    }

    /// `chroma` for a colored accent, zero for a gray one.
    pub fn chroma_unless_gray(&self, chroma: f32) -> f32 {
        if self.is_achromatic() {
            0.0
        } else {
            chroma
        }
    }

    pub fn shade(&self, shade: Shade) -> Color {
        let tone = if self.mode.is_dark() {
            shade.dark_tone
        } else {
            shade.light_tone
        };
        let chroma = (self.chroma * shade.chroma_scale).min(shade.chroma_cap);
        Tonal::new(self.hue + shade.hue_offset, chroma, tone).to_color()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testsupport::sample_palette;

    #[test]
    fn tone_follows_mode() {
        let shade = Shade::new(0.0, 1.0, 40.0, 80.0, 30.0);
        let dark = Accent::of(&sample_palette(Mode::Dark), "test").unwrap();
        let light = Accent::of(&sample_palette(Mode::Light), "test").unwrap();
        assert!(dark.shade(shade).relative_luminance() > light.shade(shade).relative_luminance());
    }

    #[test]
    fn achromatic_accent_yields_grays() {
        let accent = Accent {
            hue: 120.0,
            chroma: 0.0,
            mode: Mode::Dark,
        };
        let color = accent.shade(Shade::new(200.0, 1.5, 80.0, 70.0, 40.0));
        assert_eq!(color.saturation(), 0.0);
    }
}
