use std::fmt::Write as _;

use crate::error::ThemeError;
use crate::scheme::Palette;

use super::{RenderOptions, Target, ThemeRenderer};

const BACKGROUND_OPACITY: &str = "0.85";

pub struct KittyRenderer;

impl ThemeRenderer for KittyRenderer {
    fn target(&self) -> Target {
        Target::Kitty
    }

    fn required_roles(&self) -> &'static [&'static str] {
        &[
            "surface",
            "onSurface",
            "primaryContainer",
            "surfaceContainerLow",
            "surfaceContainerHigh",
            "term0",
            "term1",
            "term2",
            "term3",
            "term4",
            "term5",
            "term6",
            "term7",
            "term8",
            "term9",
            "term10",
            "term11",
            "term12",
            "term13",
            "term14",
            "term15",
        ]
    }

    fn render(&self, palette: &Palette, options: &RenderOptions) -> Result<String, ThemeError> {
        let role = |key: &str| palette.require("kitty", key);
        let background = role("surface")?;
        let foreground = role("onSurface")?;

        let mut out = String::from("# Generated by material-theme\n\n");
        let _ = writeln!(out, "background {background}");
        let _ = writeln!(out, "foreground {foreground}");
        if options.transparent {
            let _ = writeln!(out, "background_opacity {BACKGROUND_OPACITY}");
        }

        let _ = writeln!(out, "\ncursor {foreground}");
        let _ = writeln!(out, "cursor_text_color {background}");
        let _ = writeln!(out, "selection_foreground {background}");
        let _ = writeln!(out, "selection_background {}", role("primaryContainer")?);
        let _ = writeln!(out, "url_color {}", role("term12")?);

        let _ = writeln!(out, "\nactive_tab_foreground {foreground}");
        let _ = writeln!(out, "active_tab_background {}", role("surfaceContainerHigh")?);
        let _ = writeln!(out, "inactive_tab_foreground {foreground}");
        let _ = writeln!(out, "inactive_tab_background {}", role("surfaceContainerLow")?);
        let _ = writeln!(out, "tab_bar_background {background}");

        out.push('\n');
        for (mark, slot) in [(1, "term12"), (2, "term13"), (3, "term14")] {
            let _ = writeln!(out, "mark{mark}_foreground {background}");
            let _ = writeln!(out, "mark{mark}_background {}", role(slot)?);
        }

        out.push('\n');
        for index in 0..16 {
            let _ = writeln!(out, "color{index} {}", role(&format!("term{index}"))?);
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheme::Mode;
    use crate::testsupport::sample_palette;

    #[test]
    fn writes_all_sixteen_colors_and_background() {
        let palette = sample_palette(Mode::Dark);
        let text = KittyRenderer
            .render(&palette, &RenderOptions::default())
            .unwrap();
        for index in 0..16 {
            let line = format!("color{index} {}", palette.terminal[index]);
            assert!(text.contains(&line), "missing `{line}`");
        }
        assert!(text.contains(&format!("background {}", palette.get("surface").unwrap())));
        assert!(!text.contains("background_opacity"));
    }

    #[test]
    fn transparency_adds_opacity() {
        let text = KittyRenderer
            .render(
                &sample_palette(Mode::Light),
                &RenderOptions { transparent: true },
            )
            .unwrap();
        assert!(text.contains("background_opacity 0.85"));
    }
}
