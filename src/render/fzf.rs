use crate::color::Color;
use crate::error::ThemeError;
use crate::scheme::Palette;

use super::{Accent, RenderOptions, Shade, Target, ThemeRenderer};

const BG_PLUS: Shade = Shade::new(0.0, 1.4, 55.0, 18.0, 85.0);
const FG_PLUS: Shade = Shade::new(0.0, 0.3, 20.0, 92.0, 20.0);
const BORDER: Shade = Shade::new(0.0, 0.7, f32::INFINITY, 45.0, 60.0);
const HEADER: Shade = Shade::new(5.0, 1.3, 70.0, 75.0, 40.0);
const PROMPT: Shade = Shade::new(0.0, 1.4, 80.0, 72.0, 42.0);
const POINTER: Shade = Shade::new(-5.0, 1.5, 85.0, 78.0, 38.0);
const MARKER: Shade = Shade::new(15.0, 1.3, 75.0, 70.0, 45.0);
const HL: Shade = Shade::new(10.0, 1.5, 85.0, 80.0, 35.0);
const HL_PLUS: Shade = Shade::new(12.0, 1.6, 90.0, 85.0, 30.0);
const SCROLLBAR: Shade = Shade::new(0.0, 0.5, f32::INFINITY, 35.0, 70.0);
const LABEL: Shade = Shade::new(-5.0, 1.2, 65.0, 68.0, 48.0);

const LAYOUT: &str = "--border=rounded --layout=reverse --info=inline --prompt='> ' --pointer='▶' --marker='✓'";

pub struct FzfRenderer;

impl ThemeRenderer for FzfRenderer {
    fn target(&self) -> Target {
        Target::Fzf
    }

    fn required_roles(&self) -> &'static [&'static str] {
        &[Accent::ROLE, "term0", "term4", "term5", "term7"]
    }

    fn render(&self, palette: &Palette, options: &RenderOptions) -> Result<String, ThemeError> {
        let accent = Accent::of(palette, "fzf")?;
        let term = |key: &str| palette.require("fzf", key);
        let s = |shade: Shade| accent.shade(shade);
        let foreground = term("term7")?;
        let border = s(BORDER);

        let colors: [(&str, Option<Color>); 18] = [
            ("bg", (!options.transparent).then_some(term("term0")?)),
            ("bg+", Some(s(BG_PLUS))),
            ("fg", Some(foreground)),
            ("fg+", Some(s(FG_PLUS))),
            ("border", Some(border)),
            ("separator", Some(border)),
            ("header", Some(s(HEADER))),
            ("info", Some(term("term4")?)),
            ("prompt", Some(s(PROMPT))),
            ("pointer", Some(s(POINTER))),
            ("marker", Some(s(MARKER))),
            ("spinner", Some(term("term5")?)),
            ("hl", Some(s(HL))),
            ("hl+", Some(s(HL_PLUS))),
            ("query", Some(foreground)),
            ("scrollbar", Some(s(SCROLLBAR))),
            ("label", Some(s(LABEL))),
            ("gutter", Some(s(BG_PLUS)).filter(|_| !options.transparent)),
        ];
        let spec = colors
            .iter()
            .map(|(key, color)| match color {
                Some(color) => format!("{key}:{color}"),
                None => format!("{key}:-1"),
            })
            .collect::<Vec<_>>()
            .join(",");

        Ok(format!(
            "# Generated by material-theme ({} mode)\nexport FZF_DEFAULT_OPTS=\"--color={spec} {LAYOUT}\"\n",
            palette.mode
        ))
    }
}
