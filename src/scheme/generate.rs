//! Palette roles and the generator that fills them.

use std::collections::BTreeMap;

use tracing::debug;

use crate::color::{harmonize, Color, HarmonyConfig, Tonal};
use crate::error::ThemeError;

use super::palettes::{CorePalettes, TonalPalette};
use super::terminal::{slot_name, TerminalBaseScheme, TerminalOptions, TERMINAL_SLOTS};
use super::{Mode, SchemeKind};

/// Material color role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Role {
    PrimaryPaletteKeyColor,
    SecondaryPaletteKeyColor,
    TertiaryPaletteKeyColor,
    NeutralPaletteKeyColor,
    NeutralVariantPaletteKeyColor,
    Background,
    OnBackground,
    Surface,
    SurfaceDim,
    SurfaceBright,
    SurfaceContainerLowest,
    SurfaceContainerLow,
    SurfaceContainer,
    SurfaceContainerHigh,
    SurfaceContainerHighest,
    OnSurface,
    SurfaceVariant,
    OnSurfaceVariant,
    InverseSurface,
    InverseOnSurface,
    Outline,
    OutlineVariant,
    Shadow,
    Scrim,
    SurfaceTint,
    Primary,
    OnPrimary,
    PrimaryContainer,
    OnPrimaryContainer,
    InversePrimary,
    Secondary,
    OnSecondary,
    SecondaryContainer,
    OnSecondaryContainer,
    Tertiary,
    OnTertiary,
    TertiaryContainer,
    OnTertiaryContainer,
    Error,
    OnError,
    ErrorContainer,
    OnErrorContainer,
    Success,
    OnSuccess,
    SuccessContainer,
    OnSuccessContainer,
}

#[derive(Debug, Clone, Copy)]
enum Source {
    Primary,
    Secondary,
    Tertiary,
    Neutral,
    NeutralVariant,
    Error,
    Success,
}

/// Where a role comes from: a palette key color or a (dark, light) tone.
#[derive(Debug, Clone, Copy)]
enum Sample {
    Key(Source),
    Tone(Source, f32, f32),
}

impl Role {
    /// Stable camelCase key used in state files and renderer lookups.
    pub fn key(self) -> &'static str {
        match self {
            Self::PrimaryPaletteKeyColor => "primary_paletteKeyColor",
            Self::SecondaryPaletteKeyColor => "secondary_paletteKeyColor",
            Self::TertiaryPaletteKeyColor => "tertiary_paletteKeyColor",
            Self::NeutralPaletteKeyColor => "neutral_paletteKeyColor",
            Self::NeutralVariantPaletteKeyColor => "neutral_variant_paletteKeyColor",
            Self::Background => "background",
            Self::OnBackground => "onBackground",
            Self::Surface => "surface",
            Self::SurfaceDim => "surfaceDim",
            Self::SurfaceBright => "surfaceBright",
            Self::SurfaceContainerLowest => "surfaceContainerLowest",
            Self::SurfaceContainerLow => "surfaceContainerLow",
            Self::SurfaceContainer => "surfaceContainer",
            Self::SurfaceContainerHigh => "surfaceContainerHigh",
            Self::SurfaceContainerHighest => "surfaceContainerHighest",
            Self::OnSurface => "onSurface",
            Self::SurfaceVariant => "surfaceVariant",
            Self::OnSurfaceVariant => "onSurfaceVariant",
            Self::InverseSurface => "inverseSurface",
            Self::InverseOnSurface => "inverseOnSurface",
            Self::Outline => "outline",
            Self::OutlineVariant => "outlineVariant",
            Self::Shadow => "shadow",
            Self::Scrim => "scrim",
            Self::SurfaceTint => "surfaceTint",
            Self::Primary => "primary",
            Self::OnPrimary => "onPrimary",
            Self::PrimaryContainer => "primaryContainer",
            Self::OnPrimaryContainer => "onPrimaryContainer",
            Self::InversePrimary => "inversePrimary",
            Self::Secondary => "secondary",
            Self::OnSecondary => "onSecondary",
            Self::SecondaryContainer => "secondaryContainer",
            Self::OnSecondaryContainer => "onSecondaryContainer",
            Self::Tertiary => "tertiary",
            Self::OnTertiary => "onTertiary",
            Self::TertiaryContainer => "tertiaryContainer",
            Self::OnTertiaryContainer => "onTertiaryContainer",
            Self::Error => "error",
            Self::OnError => "onError",
            Self::ErrorContainer => "errorContainer",
            Self::OnErrorContainer => "onErrorContainer",
            Self::Success => "success",
            Self::OnSuccess => "onSuccess",
            Self::SuccessContainer => "successContainer",
            Self::OnSuccessContainer => "onSuccessContainer",
        }
    }

    /// All roles in declaration order.
    pub fn all() -> &'static [Role] {
        &[
            Self::PrimaryPaletteKeyColor,
            Self::SecondaryPaletteKeyColor,
            Self::TertiaryPaletteKeyColor,
            Self::NeutralPaletteKeyColor,
            Self::NeutralVariantPaletteKeyColor,
            Self::Background,
            Self::OnBackground,
            Self::Surface,
            Self::SurfaceDim,
            Self::SurfaceBright,
            Self::SurfaceContainerLowest,
            Self::SurfaceContainerLow,
            Self::SurfaceContainer,
            Self::SurfaceContainerHigh,
            Self::SurfaceContainerHighest,
            Self::OnSurface,
            Self::SurfaceVariant,
            Self::OnSurfaceVariant,
            Self::InverseSurface,
            Self::InverseOnSurface,
            Self::Outline,
            Self::OutlineVariant,
            Self::Shadow,
            Self::Scrim,
            Self::SurfaceTint,
            Self::Primary,
            Self::OnPrimary,
            Self::PrimaryContainer,
            Self::OnPrimaryContainer,
            Self::InversePrimary,
            Self::Secondary,
            Self::OnSecondary,
            Self::SecondaryContainer,
            Self::OnSecondaryContainer,
            Self::Tertiary,
            Self::OnTertiary,
            Self::TertiaryContainer,
            Self::OnTertiaryContainer,
            Self::Error,
            Self::OnError,
            Self::ErrorContainer,
            Self::OnErrorContainer,
            Self::Success,
            Self::OnSuccess,
            Self::SuccessContainer,
            Self::OnSuccessContainer,
        ]
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::all().iter().copied().find(|role| role.key() == key)
    }

    // Material baseline tones.
    fn sample(self) -> Sample {
        use Sample::{Key, Tone};
        use Source::*;
        match self {
            Self::PrimaryPaletteKeyColor => Key(Primary),
            Self::SecondaryPaletteKeyColor => Key(Secondary),
            Self::TertiaryPaletteKeyColor => Key(Tertiary),
            Self::NeutralPaletteKeyColor => Key(Neutral),
            Self::NeutralVariantPaletteKeyColor => Key(NeutralVariant),
            Self::Background | Self::Surface => Tone(Neutral, 6.0, 98.0),
            Self::OnBackground | Self::OnSurface => Tone(Neutral, 90.0, 10.0),
            Self::SurfaceDim => Tone(Neutral, 6.0, 87.0),
            Self::SurfaceBright => Tone(Neutral, 24.0, 98.0),
            Self::SurfaceContainerLowest => Tone(Neutral, 4.0, 100.0),
            Self::SurfaceContainerLow => Tone(Neutral, 10.0, 96.0),
            Self::SurfaceContainer => Tone(Neutral, 12.0, 94.0),
            Self::SurfaceContainerHigh => Tone(Neutral, 17.0, 92.0),
            Self::SurfaceContainerHighest => Tone(Neutral, 22.0, 90.0),
            Self::SurfaceVariant => Tone(NeutralVariant, 30.0, 90.0),
            Self::OnSurfaceVariant => Tone(NeutralVariant, 80.0, 30.0),
            Self::InverseSurface => Tone(Neutral, 90.0, 20.0),
            Self::InverseOnSurface => Tone(Neutral, 20.0, 95.0),
            Self::Outline => Tone(NeutralVariant, 60.0, 50.0),
            Self::OutlineVariant => Tone(NeutralVariant, 30.0, 80.0),
            Self::Shadow | Self::Scrim => Tone(Neutral, 0.0, 0.0),
            Self::SurfaceTint | Self::Primary => Tone(Primary, 80.0, 40.0),
            Self::OnPrimary => Tone(Primary, 20.0, 100.0),
            Self::PrimaryContainer => Tone(Primary, 30.0, 90.0),
            Self::OnPrimaryContainer => Tone(Primary, 90.0, 10.0),
            Self::InversePrimary => Tone(Primary, 40.0, 80.0),
            Self::Secondary => Tone(Secondary, 80.0, 40.0),
            Self::OnSecondary => Tone(Secondary, 20.0, 100.0),
            Self::SecondaryContainer => Tone(Secondary, 30.0, 90.0),
            Self::OnSecondaryContainer => Tone(Secondary, 90.0, 10.0),
            Self::Tertiary => Tone(Tertiary, 80.0, 40.0),
            Self::OnTertiary => Tone(Tertiary, 20.0, 100.0),
            Self::TertiaryContainer => Tone(Tertiary, 30.0, 90.0),
            Self::OnTertiaryContainer => Tone(Tertiary, 90.0, 10.0),
            Self::Error => Tone(Error, 80.0, 40.0),
            Self::OnError => Tone(Error, 20.0, 100.0),
            Self::ErrorContainer => Tone(Error, 30.0, 90.0),
            Self::OnErrorContainer => Tone(Error, 90.0, 10.0),
            Self::Success => Tone(Success, 80.0, 40.0),
            Self::OnSuccess => Tone(Success, 20.0, 100.0),
            Self::SuccessContainer => Tone(Success, 30.0, 90.0),
            Self::OnSuccessContainer => Tone(Success, 90.0, 10.0),
        }
    }
}

/// A generated theme: Material roles plus 16 terminal slots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    pub mode: Mode,
    pub scheme: SchemeKind,
    pub source: Color,
    pub material: BTreeMap<Role, Color>,
    pub terminal: [Color; TERMINAL_SLOTS],
}

impl Palette {
    pub fn role(&self, role: Role) -> Option<Color> {
        self.material.get(&role).copied()
    }

    pub fn term(&self, index: usize) -> Option<Color> {
        self.terminal.get(index).copied()
    }

    /// Look up a role key (`primary`, `onSurface`, ...) or slot (`term4`).
    pub fn get(&self, key: &str) -> Option<Color> {
        if let Some(index) = key.strip_prefix("term").and_then(|n| n.parse::<usize>().ok()) {
            return self.term(index);
        }
        Role::from_key(key).and_then(|role| self.role(role))
    }

    /// Like `get`, failing with `MissingRole` on behalf of `target`.
    pub fn require(&self, target: &str, key: &str) -> Result<Color, ThemeError> {
        self.get(key).ok_or_else(|| ThemeError::MissingRole {
            target: target.to_string(),
            role: key.to_string(),
        })
    }

    /// Role colors keyed by their camelCase name.
    pub fn material_by_key(&self) -> BTreeMap<String, Color> {
        self.material
            .iter()
            .map(|(role, color)| (role.key().to_string(), *color))
            .collect()
    }

    /// Terminal colors keyed `term0`..`term15`.
    pub fn terminal_by_key(&self) -> BTreeMap<String, Color> {
        self.terminal
            .iter()
            .enumerate()
            .map(|(index, color)| (slot_name(index), *color))
            .collect()
    }
}

/// Build the palette for a source color.
pub fn generate(
    source: Color,
    mode: Mode,
    scheme: SchemeKind,
    harmony: &HarmonyConfig,
    terminal_base: &TerminalBaseScheme,
    terminal_options: &TerminalOptions,
) -> Palette {
    let source_tonal = Tonal::of(source);
    let palettes = CorePalettes::for_scheme(source_tonal, scheme).harmonized(source_tonal, harmony);

    let material: BTreeMap<Role, Color> = Role::all()
        .iter()
        .map(|role| (*role, sample(&palettes, *role, mode)))
        .collect();

    let terminal = terminal_slots(
        source,
        mode,
        scheme,
        harmony,
        terminal_base.slots(mode),
        terminal_options,
        &material,
    );

    debug!(
        source = %source,
        mode = %mode,
        scheme = %scheme,
        primary = %material.get(&Role::Primary).copied().unwrap_or(source),
        "generated palette"
    );

    Palette {
        mode,
        scheme,
        source,
        material,
        terminal,
    }
}

fn sample(palettes: &CorePalettes, role: Role, mode: Mode) -> Color {
    let palette = |source: Source| -> TonalPalette {
        match source {
            Source::Primary => palettes.primary,
            Source::Secondary => palettes.secondary,
            Source::Tertiary => palettes.tertiary,
            Source::Neutral => palettes.neutral,
            Source::NeutralVariant => palettes.neutral_variant,
            Source::Error => palettes.error,
            Source::Success => palettes.success,
        }
    };
    match role.sample() {
        Sample::Key(source) => palette(source).key_color(),
        Sample::Tone(source, dark, light) => {
            palette(source).tone(if mode.is_dark() { dark } else { light })
        }
    }
}

fn terminal_slots(
    source: Color,
    mode: Mode,
    scheme: SchemeKind,
    harmony: &HarmonyConfig,
    base: &[Color; TERMINAL_SLOTS],
    options: &TerminalOptions,
    material: &BTreeMap<Role, Color>,
) -> [Color; TERMINAL_SLOTS] {
    if scheme == SchemeKind::Monochrome {
        return *base;
    }

    let mut slots = base.map(|color| harmonize(color, source, harmony));

    if options.fg_boost > 0.0 {
        let factor = if mode.is_dark() {
            1.0 + options.fg_boost
        } else {
            1.0 - options.fg_boost
        };
        for index in [7, 15] {
            let tonal = Tonal::of(slots[index]);
            slots[index] = tonal.with_tone(tonal.tone * factor).to_color();
        }
    }

    if options.blend_background {
        if let Some(low) = material.get(&Role::SurfaceContainerLow) {
            let tonal = Tonal::of(*low);
            slots[0] = Tonal::new(tonal.hue, tonal.chroma * 1.2, tonal.tone * 0.95).to_color();
        }
        if let Some(on_surface) = material.get(&Role::OnSurface) {
            let tonal = Tonal::of(*on_surface);
            slots[15] = tonal.with_chroma(tonal.chroma * 3.0).to_color();
        }
    }
    keep_extremes(base, &mut slots);
    slots
}

/// Tone gap left between a clamped slot and the extreme it overtook.
const EXTREME_TONE_GAP: f32 = 1.0;

/// First indices of the darkest and brightest colors.
fn extreme_indices(colors: &[Color; TERMINAL_SLOTS]) -> (usize, usize) {
    let luminance: Vec<f32> = colors.iter().map(|c| c.relative_luminance()).collect();
    let mut darkest = 0;
    let mut brightest = 0;
    for (index, value) in luminance.iter().enumerate() {
        if *value < luminance[darkest] {
            darkest = index;
        }
        if *value > luminance[brightest] {
            brightest = index;
        }
    }
    (darkest, brightest)
}

/// The base scheme's darkest and brightest slots must stay the extremes once
/// boost and blend have moved tones around. Slots that overtake either end are
/// pulled back to just inside it.
fn keep_extremes(base: &[Color; TERMINAL_SLOTS], slots: &mut [Color; TERMINAL_SLOTS]) {
    let (darkest, brightest) = extreme_indices(base);
    if darkest == brightest {
        return;
    }
    let base_floor = base[darkest].relative_luminance();
    let base_ceiling = base[brightest].relative_luminance();
    let floor = slots[darkest].relative_luminance();
    let ceiling = slots[brightest].relative_luminance();
    let floor_tone = Tonal::of(slots[darkest]).tone;
    let ceiling_tone = Tonal::of(slots[brightest]).tone;

    for index in 0..TERMINAL_SLOTS {
        if index == darkest || index == brightest {
            continue;
        }
        let luminance = slots[index].relative_luminance();
        let base_luminance = base[index].relative_luminance();
        let tonal = Tonal::of(slots[index]);
        if luminance > ceiling || (luminance == ceiling && base_luminance < base_ceiling) {
            debug!(slot = index, "clamped below brightest terminal slot");
            slots[index] = tonal.with_tone(ceiling_tone - EXTREME_TONE_GAP).to_color();
        } else if luminance < floor || (luminance == floor && base_luminance > base_floor) {
            debug!(slot = index, "clamped above darkest terminal slot");
            slots[index] = tonal.with_tone(floor_tone + EXTREME_TONE_GAP).to_color();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::difference_degrees;

    fn seed() -> Color {
        Color::from_hex("#89b4fa").unwrap()
    }

    fn build(scheme: SchemeKind, mode: Mode, harmony: HarmonyConfig) -> Palette {
        generate(
            seed(),
            mode,
            scheme,
            &harmony,
            &TerminalBaseScheme::default(),
            &TerminalOptions::default(),
        )
    }

    #[test]
    fn every_role_and_slot_is_present() {
        for scheme in SchemeKind::all() {
            let palette = build(*scheme, Mode::Dark, HarmonyConfig::default());
            for role in Role::all() {
                assert!(palette.get(role.key()).is_some(), "{scheme}: {}", role.key());
            }
            for index in 0..TERMINAL_SLOTS {
                assert!(palette.get(&format!("term{index}")).is_some());
            }
            assert!(palette.get("term16").is_none());
        }
    }

    #[test]
    fn vibrant_primary_stays_near_source_hue() {
        let palette = build(SchemeKind::Vibrant, Mode::Dark, HarmonyConfig::default());
        let primary = palette.role(Role::Primary).unwrap();
        let distance = difference_degrees(Tonal::of(primary).hue, Tonal::of(seed()).hue);
        assert!(distance <= 80.0, "primary drifted {distance} degrees");
    }

    #[test]
    fn dark_background_is_darker_than_light_background() {
        let dark = build(SchemeKind::TonalSpot, Mode::Dark, HarmonyConfig::default());
        let light = build(SchemeKind::TonalSpot, Mode::Light, HarmonyConfig::default());
        let dark_bg = dark.role(Role::Background).unwrap().relative_luminance();
        let light_bg = light.role(Role::Background).unwrap().relative_luminance();
        assert!(dark_bg < light_bg);
    }

    #[test]
    fn term0_stays_darkest_in_dark_mode() {
        let palette = build(SchemeKind::Vibrant, Mode::Dark, HarmonyConfig::default());
        let term0 = palette.terminal[0].relative_luminance();
        for (index, slot) in palette.terminal.iter().enumerate().skip(1) {
            assert!(term0 <= slot.relative_luminance(), "term{index} {slot} darker than term0");
        }
    }

    #[test]
    fn monochrome_keeps_terminal_base_and_grays_roles() {
        let palette = build(SchemeKind::Monochrome, Mode::Light, HarmonyConfig::default());
        assert_eq!(palette.terminal, TerminalBaseScheme::default().light);
        for (role, color) in &palette.material {
            assert!(color.saturation() < 0.02, "{}: {color}", role.key());
        }
    }

    #[test]
    fn fg_boost_lightens_foreground_in_dark_mode() {
        let plain = build(SchemeKind::Vibrant, Mode::Dark, HarmonyConfig::default());
        let boosted = generate(
            seed(),
            Mode::Dark,
            SchemeKind::Vibrant,
            &HarmonyConfig::default(),
            &TerminalBaseScheme::default(),
            &TerminalOptions::new(0.1, false).unwrap(),
        );
        assert!(
            boosted.terminal[7].relative_luminance() > plain.terminal[7].relative_luminance()
        );
        assert_eq!(boosted.terminal[1], plain.terminal[1]);
    }

    #[test]
    fn fg_boost_touches_only_foreground_slots() {
        let base = TerminalBaseScheme::default();
        let boosted = generate(
            seed(),
            Mode::Dark,
            SchemeKind::Vibrant,
            &HarmonyConfig::new(0.0, 0.0).unwrap(),
            &base,
            &TerminalOptions::new(0.2, false).unwrap(),
        );
        for index in 0..TERMINAL_SLOTS {
            if index == 7 || index == 15 {
                assert_ne!(boosted.terminal[index], base.dark[index], "term{index}");
            } else {
                assert_eq!(boosted.terminal[index], base.dark[index], "term{index}");
            }
        }
    }

    #[test]
    fn full_boost_with_blend_keeps_the_extremes() {
        let base = TerminalBaseScheme::default();
        let sources = ["#89b4fa", "#e06c75", "#98c379", "#000000", "#ffffff", "#c678dd"];
        for mode in [Mode::Dark, Mode::Light] {
            let (darkest, brightest) = extreme_indices(base.slots(mode));
            for hex in sources {
                for scheme in SchemeKind::all() {
                    let palette = generate(
                        Color::from_hex(hex).unwrap(),
                        mode,
                        *scheme,
                        &HarmonyConfig::default(),
                        &base,
                        &TerminalOptions::new(1.0, true).unwrap(),
                    );
                    let slots = &palette.terminal;
                    let low = slots[darkest].relative_luminance();
                    let high = slots[brightest].relative_luminance();
                    for (index, slot) in slots.iter().enumerate() {
                        let luminance = slot.relative_luminance();
                        if index != brightest {
                            assert!(luminance < high, "{mode} {hex} {scheme}: term{index}");
                        }
                        if index != darkest {
                            assert!(luminance > low, "{mode} {hex} {scheme}: term{index}");
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn harmonized_slots_keep_base_order_up_to_rounding() {
        let base = TerminalBaseScheme::default();
        for mode in [Mode::Dark, Mode::Light] {
            let reference: Vec<f32> =
                base.slots(mode).iter().map(|c| c.relative_luminance()).collect();
            for hex in ["#89b4fa", "#e06c75", "#98c379", "#c678dd", "#e5c07b"] {
                for scheme in SchemeKind::all() {
                    let palette = generate(
                        Color::from_hex(hex).unwrap(),
                        mode,
                        *scheme,
                        &HarmonyConfig::default(),
                        &base,
                        &TerminalOptions::default(),
                    );
                    let actual: Vec<f32> =
                        palette.terminal.iter().map(|c| c.relative_luminance()).collect();
                    for a in 0..TERMINAL_SLOTS {
                        for b in 0..TERMINAL_SLOTS {
                            if reference[a] - reference[b] > 0.02 {
                                assert!(
                                    actual[a] > actual[b],
                                    "{mode} {hex} {scheme}: term{a} vs term{b}"
                                );
                            }
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn blend_background_follows_surface_roles() {
        let palette = generate(
            seed(),
            Mode::Dark,
            SchemeKind::TonalSpot,
            &HarmonyConfig::default(),
            &TerminalBaseScheme::default(),
            &TerminalOptions::new(0.0, true).unwrap(),
        );
        let low = Tonal::of(palette.role(Role::SurfaceContainerLow).unwrap());
        let term0 = Tonal::of(palette.terminal[0]);
        assert!((term0.tone - low.tone * 0.95).abs() < 1.5);
    }

    #[test]
    fn require_reports_missing_role() {
        let mut palette = build(SchemeKind::Neutral, Mode::Dark, HarmonyConfig::default());
        palette.material.remove(&Role::Outline);
        let err = palette.require("btop", "outline").unwrap_err();
        assert!(matches!(err, ThemeError::MissingRole { ref target, ref role }
            if target == "btop" && role == "outline"));
    }
}
