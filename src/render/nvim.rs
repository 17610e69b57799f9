//! Neovim colorscheme: a Lua color table built from palette roles, and a
//! fixed set of highlight groups that refer to it by name.

use std::fmt::Write as _;

use crate::error::ThemeError;
use crate::scheme::Palette;

use super::{RenderOptions, Target, ThemeRenderer};

const COLORSCHEME_NAME: &str = "material_you";

/// Lua color name and the palette key feeding it.
const COLORS: &[(&str, &str)] = &[
    ("base", "surface"),
    ("mantle", "surfaceContainerLow"),
    ("crust", "surfaceContainerLowest"),
    ("surface0", "surfaceContainer"),
    ("surface1", "surfaceContainerHigh"),
    ("surface2", "surfaceContainerHighest"),
    ("overlay0", "outlineVariant"),
    ("overlay1", "outline"),
    ("overlay2", "onSurfaceVariant"),
    ("text", "onSurface"),
    ("subtext1", "onSurfaceVariant"),
    ("subtext0", "outline"),
    ("selection", "primaryContainer"),
    ("mauve", "primary"),
    ("lavender", "tertiary"),
    ("rosewater", "secondary"),
    ("red", "term1"),
    ("green", "term2"),
    ("yellow", "term3"),
    ("blue", "term4"),
    ("pink", "term5"),
    ("teal", "term6"),
    ("maroon", "term9"),
    ("peach", "term11"),
    ("sapphire", "term12"),
    ("flamingo", "term13"),
    ("sky", "term14"),
    ("error", "error"),
    ("success", "success"),
];

/// Highlight attributes; colors are names from `COLORS` or `NONE`.
#[derive(Debug, Clone, Copy)]
struct Hl {
    fg: Option<&'static str>,
    bg: Option<&'static str>,
    sp: Option<&'static str>,
    style: Option<&'static str>,
}

const fn fg(name: &'static str) -> Hl {
    Hl {
        fg: Some(name),
        bg: None,
        sp: None,
        style: None,
    }
}

const fn bg(name: &'static str) -> Hl {
    Hl {
        fg: None,
        bg: Some(name),
        sp: None,
        style: None,
    }
}

const fn undercurl(name: &'static str) -> Hl {
    Hl {
        fg: None,
        bg: None,
        sp: Some(name),
        style: Some("undercurl"),
    }
}

impl Hl {
    const fn on(mut self, name: &'static str) -> Self {
        self.bg = Some(name);
        self
    }

    const fn style(mut self, style: &'static str) -> Self {
        self.style = Some(style);
        self
    }
}

const GROUPS: &[(&str, Hl)] = &[
    // Editor
    ("Normal", fg("text").on("base")),
    ("NormalNC", fg("text").on("base")),
    ("NormalFloat", fg("text").on("mantle")),
    ("FloatBorder", fg("lavender").on("NONE")),
    ("FloatTitle", fg("mauve").on("NONE").style("bold,italic")),
    ("Cursor", fg("base").on("text")),
    ("CursorLine", bg("surface0")),
    ("CursorLineNr", fg("lavender").style("bold")),
    ("LineNr", fg("overlay0")),
    ("SignColumn", bg("NONE")),
    ("ColorColumn", bg("surface0")),
    ("EndOfBuffer", fg("base")),
    ("NonText", fg("overlay0")),
    ("Folded", fg("overlay2").on("surface0")),
    ("FoldColumn", fg("overlay0")),
    ("StatusLine", fg("text").on("mantle")),
    ("StatusLineNC", fg("overlay1").on("mantle")),
    ("WinSeparator", fg("surface2").on("NONE")),
    ("Search", fg("base").on("peach")),
    ("IncSearch", fg("base").on("pink")),
    ("CurSearch", fg("base").on("red")),
    ("Visual", bg("selection")),
    ("MatchParen", fg("peach").style("bold")),
    ("Pmenu", fg("text").on("mantle")),
    ("PmenuSel", fg("NONE").on("surface1").style("bold")),
    ("PmenuSbar", bg("surface0")),
    ("PmenuThumb", bg("overlay0")),
    ("TabLine", fg("subtext0").on("mantle")),
    ("TabLineFill", bg("crust")),
    ("TabLineSel", fg("mauve").on("base").style("bold")),
    ("Title", fg("mauve").style("bold")),
    ("Directory", fg("blue")),
    ("ErrorMsg", fg("error").style("bold")),
    ("WarningMsg", fg("yellow")),
    ("MoreMsg", fg("blue")),
    ("Question", fg("blue")),
    // Classic syntax
    ("Comment", fg("overlay1").style("italic")),
    ("Constant", fg("peach")),
    ("String", fg("green")),
    ("Character", fg("teal")),
    ("Number", fg("peach")),
    ("Boolean", fg("peach")),
    ("Identifier", fg("flamingo")),
    ("Function", fg("blue")),
    ("Statement", fg("mauve")),
    ("Keyword", fg("mauve").style("bold")),
    ("Operator", fg("sky")),
    ("PreProc", fg("pink")),
    ("Type", fg("yellow")),
    ("Special", fg("pink")),
    ("Delimiter", fg("overlay2")),
    ("Todo", fg("base").on("yellow").style("bold")),
    ("Error", fg("error")),
    // Treesitter
    ("@variable", fg("text")),
    ("@variable.builtin", fg("red").style("italic")),
    ("@variable.parameter", fg("maroon").style("italic")),
    ("@variable.member", fg("teal")),
    ("@constant", fg("teal")),
    ("@constant.builtin", fg("red").style("italic")),
    ("@module", fg("sapphire").style("italic")),
    ("@string", fg("green")),
    ("@string.escape", fg("pink")),
    ("@string.regexp", fg("pink")),
    ("@number", fg("peach")),
    ("@boolean", fg("peach")),
    ("@function", fg("blue").style("bold")),
    ("@function.builtin", fg("blue").style("italic")),
    ("@function.method", fg("blue").style("bold")),
    ("@constructor", fg("sapphire")),
    ("@keyword", fg("mauve").style("bold")),
    ("@keyword.return", fg("mauve").style("bold")),
    ("@keyword.conditional", fg("mauve").style("bold,italic")),
    ("@type", fg("yellow")),
    ("@type.builtin", fg("yellow").style("italic")),
    ("@property", fg("teal")),
    ("@attribute", fg("yellow").style("italic")),
    ("@punctuation.delimiter", fg("overlay2")),
    ("@punctuation.bracket", fg("overlay2")),
    ("@comment", fg("overlay1").style("italic")),
    ("@tag", fg("mauve")),
    ("@tag.attribute", fg("teal").style("italic")),
    // LSP semantic tokens
    ("@lsp.type.parameter", fg("maroon").style("italic")),
    ("@lsp.type.property", fg("teal")),
    ("@lsp.type.function", fg("blue").style("bold")),
    ("@lsp.type.method", fg("sapphire").style("bold")),
    ("@lsp.type.class", fg("yellow").style("bold")),
    ("@lsp.type.interface", fg("yellow").style("italic")),
    ("@lsp.type.enum", fg("peach")),
    ("@lsp.type.enumMember", fg("teal")),
    ("@lsp.type.namespace", fg("sapphire").style("italic")),
    ("@lsp.type.macro", fg("sapphire")),
    ("@lsp.typemod.variable.readonly", fg("teal")),
    // Diagnostics
    ("DiagnosticError", fg("error")),
    ("DiagnosticWarn", fg("yellow")),
    ("DiagnosticInfo", fg("blue")),
    ("DiagnosticHint", fg("teal")),
    ("DiagnosticOk", fg("success")),
    ("DiagnosticUnderlineError", undercurl("error")),
    ("DiagnosticUnderlineWarn", undercurl("yellow")),
    ("DiagnosticUnderlineInfo", undercurl("blue")),
    ("DiagnosticUnderlineHint", undercurl("teal")),
    // Diff and git signs
    ("DiffAdd", fg("green").on("surface0")),
    ("DiffChange", fg("yellow").on("surface0")),
    ("DiffDelete", fg("red").on("surface0")),
    ("DiffText", fg("blue").on("surface1")),
    ("GitSignsAdd", fg("green")),
    ("GitSignsChange", fg("yellow")),
    ("GitSignsDelete", fg("red")),
];

/// Groups that simply follow another group.
const LINKS: &[(&str, &str)] = &[
    ("VertSplit", "WinSeparator"),
    ("CursorColumn", "CursorLine"),
    ("VisualNOS", "Visual"),
    ("PmenuBorder", "FloatBorder"),
    ("@function.call", "@function"),
    ("@function.method.call", "@function"),
    ("@lsp.type.variable", "@variable"),
    ("@lsp.type.keyword", "@keyword"),
    ("@lsp.type.type", "@type"),
];

const PRELUDE: &str = r#"local function hi(group, opts)
  vim.api.nvim_set_hl(0, group, opts)
end
"#;

pub struct NvimRenderer;

impl ThemeRenderer for NvimRenderer {
    fn target(&self) -> Target {
        Target::Nvim
    }

    fn required_roles(&self) -> &'static [&'static str] {
        &[
            "surface",
            "surfaceContainerLow",
            "surfaceContainerLowest",
            "surfaceContainer",
            "surfaceContainerHigh",
            "surfaceContainerHighest",
            "outlineVariant",
            "outline",
            "onSurfaceVariant",
            "onSurface",
            "primaryContainer",
            "primary",
            "tertiary",
            "secondary",
            "term1",
            "term2",
            "term3",
            "term4",
            "term5",
            "term6",
            "term9",
            "term11",
            "term12",
            "term13",
            "term14",
            "error",
            "success",
        ]
    }

    fn render(&self, palette: &Palette, options: &RenderOptions) -> Result<String, ThemeError> {
        let mut out = format!(
            "-- Generated by material-theme ({} mode, source {})\n\n",
            palette.mode, palette.source
        );
        out.push_str("vim.cmd(\"hi clear\")\n");
        out.push_str(
            "if vim.fn.exists(\"syntax_on\") == 1 then\n  vim.cmd(\"syntax reset\")\nend\n",
        );
        let _ = writeln!(out, "vim.o.termguicolors = true");
        let _ = writeln!(out, "vim.o.background = \"{}\"", palette.mode);
        let _ = writeln!(out, "vim.g.colors_name = \"{COLORSCHEME_NAME}\"\n");

        out.push_str("local colors = {\n");
        for (name, key) in COLORS {
            let value = if *name == "base" && options.transparent {
                "NONE".to_string()
            } else {
                palette.require("nvim", key)?.to_hex()
            };
            let _ = writeln!(out, "  {name} = \"{value}\",");
        }
        out.push_str("}\n\n");
        out.push_str(PRELUDE);
        out.push('\n');

        for (group, hl) in GROUPS {
            let _ = writeln!(out, "hi(\"{group}\", {})", lua_opts(hl));
        }
        out.push('\n');
        for (group, target) in LINKS {
            let _ = writeln!(out, "hi(\"{group}\", {{ link = \"{target}\" }})");
        }
        Ok(out)
    }
}

fn lua_color(name: &str) -> String {
    if name == "NONE" {
        "\"NONE\"".to_string()
    } else {
        format!("colors.{name}")
    }
}

/// `nvim_set_hl` options table for one group.
fn lua_opts(hl: &Hl) -> String {
    let mut fields = Vec::new();
    if let Some(name) = hl.fg {
        fields.push(format!("fg = {}", lua_color(name)));
    }
    if let Some(name) = hl.bg {
        fields.push(format!("bg = {}", lua_color(name)));
    }
    if let Some(name) = hl.sp {
        fields.push(format!("sp = {}", lua_color(name)));
    }
    if let Some(style) = hl.style {
        fields.extend(style.split(',').map(|attr| format!("{attr} = true")));
    }
    format!("{{ {} }}", fields.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheme::Mode;
    use crate::testsupport::sample_palette;

    #[test]
    fn every_group_references_a_defined_color() {
        let names: Vec<&str> = COLORS.iter().map(|(name, _)| *name).collect();
        for (group, hl) in GROUPS {
            for name in [hl.fg, hl.bg, hl.sp].into_iter().flatten() {
                assert!(name == "NONE" || names.contains(&name), "{group} uses {name}");
            }
        }
    }

    #[test]
    fn base_follows_surface_or_transparency() {
        let palette = sample_palette(Mode::Dark);
        let opaque = NvimRenderer
            .render(&palette, &RenderOptions::default())
            .unwrap();
        let surface = palette.get("surface").unwrap();
        assert!(opaque.contains(&format!("  base = \"{surface}\",")));
        assert!(opaque.contains("vim.o.background = \"dark\""));
        assert!(opaque.contains("hi(\"Normal\", { fg = colors.text, bg = colors.base })"));

        let clear = NvimRenderer
            .render(&palette, &RenderOptions { transparent: true })
            .unwrap();
        assert!(clear.contains("  base = \"NONE\","));
    }

    #[test]
    fn styles_become_boolean_attributes() {
        let hl = fg("mauve").on("NONE").style("bold,italic");
        assert_eq!(
            lua_opts(&hl),
            "{ fg = colors.mauve, bg = \"NONE\", bold = true, italic = true }"
        );
        assert_eq!(
            lua_opts(&undercurl("error")),
            "{ sp = colors.error, undercurl = true }"
        );
    }
}
