//! Lazygit `config.yml`: the `gui.theme` colors plus a delta pager.

use serde::Serialize;

use crate::color::{Color, Tonal};
use crate::error::ThemeError;
use crate::scheme::Palette;

use super::{Accent, RenderOptions, Shade, Target, ThemeRenderer};

const SELECTED_LINE_BG: Shade = Shade::new(0.0, 1.6, 65.0, 15.0, 88.0);
const SELECTED_RANGE_BG: Shade = Shade::new(0.0, 1.5, 60.0, 22.0, 82.0);
const INACTIVE_BORDER: Shade = Shade::new(0.0, 0.6, f32::INFINITY, 40.0, 55.0);
const ACTIVE_BORDER: Shade = Shade::new(0.0, 1.5, 85.0, 70.0, 45.0);
const OPTIONS_TEXT: Shade = Shade::new(5.0, 1.4, 75.0, 75.0, 40.0);
const DEFAULT_FG: Shade = Shade::new(0.0, 0.2, 18.0, 88.0, 25.0);
const CHERRY_PICKED_BG: Shade = Shade::new(-10.0, 1.4, 60.0, 32.0, 78.0);
const UNSTAGED: Shade = Shade::new(-12.0, 0.8, 45.0, 58.0, 52.0);
const STAGED: Shade = Shade::new(25.0, 0.9, 48.0, 62.0, 48.0);
const SEARCH_MATCHING: Shade = Shade::new(8.0, 1.2, 65.0, 72.0, 55.0);

/// Cherry-picked text keeps a fixed low chroma.
const CHERRY_PICKED_FG_CHROMA: f32 = 12.0;

#[derive(Serialize)]
struct LazygitConfig {
    gui: Gui,
    git: Git,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Gui {
    theme: GuiTheme,
    nerd_fonts_version: &'static str,
    show_file_tree: bool,
    show_random_tip: bool,
}

/// Each entry is a color followed by optional text attributes.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GuiTheme {
    active_border_color: Vec<String>,
    inactive_border_color: Vec<String>,
    options_text_color: Vec<String>,
    selected_line_bg_color: Vec<String>,
    selected_range_bg_color: Vec<String>,
    cherry_picked_commit_bg_color: Vec<String>,
    cherry_picked_commit_fg_color: Vec<String>,
    unstaged_changes_color: Vec<String>,
    default_fg_color: Vec<String>,
    searching_active_border_color: Vec<String>,
}

#[derive(Serialize)]
struct Git {
    paging: Paging,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Paging {
    color_arg: &'static str,
    use_config: bool,
    pager: String,
}

fn entry(color: Color) -> Vec<String> {
    vec![color.to_hex()]
}

fn delta_pager(dark: bool, unstaged: Color, staged: Color) -> String {
    let mode = if dark { "--dark" } else { "--light" };
    [
        format!("delta {mode} --paging=never --line-numbers"),
        format!("--minus-style='syntax \"{unstaged}\"'"),
        format!("--minus-emph-style='syntax \"{unstaged}\"'"),
        format!("--plus-style='syntax \"{staged}\"'"),
        format!("--plus-emph-style='syntax \"{staged}\"'"),
        "--hunk-header-style='file line-number syntax'".to_string(),
    ]
    .join(" ")
}

pub struct LazygitRenderer;

impl ThemeRenderer for LazygitRenderer {
    fn target(&self) -> Target {
        Target::Lazygit
    }

    fn required_roles(&self) -> &'static [&'static str] {
        &[Accent::ROLE]
    }

    fn render(&self, palette: &Palette, _options: &RenderOptions) -> Result<String, ThemeError> {
        let accent = Accent::of(palette, "lazygit")?;
        let s = |shade: Shade| accent.shade(shade);
        let cherry_fg = Tonal::new(
            accent.hue - 10.0,
            accent.chroma_unless_gray(CHERRY_PICKED_FG_CHROMA),
            if accent.mode.is_dark() { 90.0 } else { 20.0 },
        )
        .to_color();
        let unstaged = s(UNSTAGED);
        let staged = s(STAGED);

        let mut active_border = entry(s(ACTIVE_BORDER));
        active_border.push("bold".to_string());

        let config = LazygitConfig {
            gui: Gui {
                theme: GuiTheme {
                    active_border_color: active_border,
                    inactive_border_color: entry(s(INACTIVE_BORDER)),
                    options_text_color: entry(s(OPTIONS_TEXT)),
                    selected_line_bg_color: entry(s(SELECTED_LINE_BG)),
                    selected_range_bg_color: entry(s(SELECTED_RANGE_BG)),
                    cherry_picked_commit_bg_color: entry(s(CHERRY_PICKED_BG)),
                    cherry_picked_commit_fg_color: entry(cherry_fg),
                    unstaged_changes_color: entry(unstaged),
                    default_fg_color: entry(s(DEFAULT_FG)),
                    searching_active_border_color: entry(s(SEARCH_MATCHING)),
                },
                nerd_fonts_version: "3",
                show_file_tree: true,
                show_random_tip: false,
            },
            git: Git {
                paging: Paging {
                    color_arg: "always",
                    use_config: false,
                    pager: delta_pager(palette.mode.is_dark(), unstaged, staged),
                },
            },
        };

        let body = serde_yaml::to_string(&config)
            .map_err(|err| ThemeError::InvalidInput(format!("lazygit config: {err}")))?;
        Ok(format!(
            "# Generated by material-theme ({} mode)\n{body}",
            palette.mode
        ))
    }
}
