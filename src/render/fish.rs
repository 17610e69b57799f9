use std::fmt::Write as _;

use crate::error::ThemeError;
use crate::scheme::Palette;

use super::{Accent, RenderOptions, Shade, Target, ThemeRenderer};

const COMMAND: Shade = Shade::new(0.0, 1.4, 80.0, 75.0, 40.0);
const KEYWORD: Shade = Shade::new(-10.0, 1.5, 85.0, 78.0, 38.0);
const QUOTE: Shade = Shade::new(25.0, 1.2, 70.0, 72.0, 42.0);
const REDIRECTION: Shade = Shade::new(15.0, 1.3, 75.0, 70.0, 45.0);
const END: Shade = Shade::new(-5.0, 1.2, 70.0, 68.0, 47.0);
const ERROR: Shade = Shade::new(200.0, 1.4, 80.0, 72.0, 42.0);
const COMMENT: Shade = Shade::new(0.0, 0.5, f32::INFINITY, 50.0, 65.0);
const SELECTION_BG: Shade = Shade::new(0.0, 1.3, 60.0, 22.0, 82.0);
const OPERATOR: Shade = Shade::new(10.0, 1.3, 75.0, 73.0, 43.0);
const ESCAPE: Shade = Shade::new(140.0, 1.2, 70.0, 70.0, 45.0);
const AUTOSUGGESTION: Shade = Shade::new(0.0, 0.3, f32::INFINITY, 45.0, 70.0);
const VALID_PATH: Shade = Shade::new(5.0, 1.1, 65.0, 72.0, 43.0);
const SEARCH_MATCH: Shade = Shade::new(30.0, 1.4, 80.0, 75.0, 40.0);
const PAGER_PREFIX: Shade = Shade::new(0.0, 1.5, 85.0, 78.0, 38.0);
const PAGER_DESCRIPTION: Shade = Shade::new(0.0, 0.6, f32::INFINITY, 60.0, 55.0);
const PAGER_PROGRESS: Shade = Shade::new(20.0, 1.3, 75.0, 70.0, 45.0);

/// Bumped when the variable layout changes.
const FORMAT_VERSION: u32 = 1;

pub struct FishRenderer;

impl ThemeRenderer for FishRenderer {
    fn target(&self) -> Target {
        Target::Fish
    }

    fn required_roles(&self) -> &'static [&'static str] {
        &[Accent::ROLE, "term7"]
    }

    fn render(&self, palette: &Palette, _options: &RenderOptions) -> Result<String, ThemeError> {
        let accent = Accent::of(palette, "fish")?;
        let s = |shade: Shade| accent.shade(shade).to_bare_hex();
        let normal = palette.require("fish", "term7")?.to_bare_hex();
        let command = s(COMMAND);
        let error = s(ERROR);
        let quote = s(QUOTE);
        let selection = s(SELECTION_BG);
        let search_match = s(SEARCH_MATCH);

        let mut out = String::from("# Generated by material-theme, sourced by fish on startup\n");
        let _ = writeln!(out, "set -g material_theme_version {FORMAT_VERSION}");
        let _ = writeln!(out, "set -g material_theme_mode {}", palette.mode);
        let _ = writeln!(
            out,
            "set -g material_theme_source {}",
            palette.source.to_bare_hex()
        );

        out.push_str("\n# Syntax highlighting\n");
        let syntax = [
            ("normal", normal.clone()),
            ("command", command.clone()),
            ("keyword", s(KEYWORD)),
            ("quote", quote.clone()),
            ("redirection", s(REDIRECTION)),
            ("end", s(END)),
            ("error", error.clone()),
            ("param", normal.clone()),
            ("comment", s(COMMENT)),
            ("selection", format!("--background={selection}")),
            ("operator", s(OPERATOR)),
            ("escape", s(ESCAPE)),
            ("autosuggestion", s(AUTOSUGGESTION)),
            ("valid_path", format!("{} --underline", s(VALID_PATH))),
            ("search_match", format!("--background={search_match}")),
        ];
        for (name, value) in syntax {
            let _ = writeln!(out, "set -g fish_color_{name} {value}");
        }

        out.push_str("\n# Completion pager\n");
        let pager = [
            ("prefix", format!("{} --bold", s(PAGER_PREFIX))),
            ("completion", normal),
            ("description", s(PAGER_DESCRIPTION)),
            ("progress", s(PAGER_PROGRESS)),
            ("selected_background", format!("--background={selection}")),
        ];
        for (name, value) in pager {
            let _ = writeln!(out, "set -g fish_pager_color_{name} {value}");
        }

        out.push_str("\n# Prompt and misc\n");
        let extras = [
            ("cancel", error.clone()),
            ("cwd", command.clone()),
            ("cwd_root", error),
            ("history_current", format!("{search_match} --bold")),
            ("host", quote.clone()),
            ("host_remote", quote),
            ("match", search_match),
            ("user", command),
        ];
        for (name, value) in extras {
            let _ = writeln!(out, "set -g fish_color_{name} {value}");
        }
        Ok(out)
    }
}
