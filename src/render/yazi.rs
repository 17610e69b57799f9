//! Yazi file manager theme: file-type colors fanned out around the accent hue.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::color::{Color, Tonal};
use crate::error::ThemeError;
use crate::scheme::Palette;

use super::{Accent, RenderOptions, Target, ThemeRenderer};

const CODE_EXTENSIONS: &[&str] = &[
    "py", "js", "ts", "jsx", "tsx", "rs", "go", "c", "cpp", "h", "hpp", "java", "rb", "sh", "bash",
    "zsh", "vim", "lua", "css", "scss",
];
const DATA_EXTENSIONS: &[&str] = &["json", "yaml", "yml", "toml"];
const DOC_EXTENSIONS: &[&str] = &["html", "xml", "md"];
const ARCHIVE_MIMES: &[&str] = &[
    "application/*zip",
    "application/*tar",
    "application/*rar",
    "application/x-7z-compressed",
    "application/gzip",
];

/// File-type and chrome colors.
#[derive(Debug, Clone, Copy)]
struct YaziColors {
    dir: Color,
    code: Color,
    exec: Color,
    archive: Color,
    image: Color,
    audio: Color,
    doc: Color,
    video: Color,
    link: Color,
    special: Color,
    border: Color,
    selected_bg: Color,
    hovered_bg: Color,
}

impl YaziColors {
    fn derive(palette: &Palette) -> Result<Self, ThemeError> {
        let accent = Accent::of(palette, "yazi")?;
        let dark = accent.mode.is_dark();
        let (base_tone, (low, high), multiplier) = if dark {
            (78.0, (70.0, 85.0), 1.2)
        } else {
            (50.0, (40.0, 60.0), 1.0)
        };
        let floor = |chroma: f32| accent.chroma_unless_gray(chroma);
        let min_chroma = (accent.chroma * 0.9).max(floor(55.0));
        let max_chroma = (accent.chroma * multiplier).min(90.0);
        let at = |offset: f32, chroma: f32, tone: f32| {
            Tonal::new(accent.hue + offset, chroma, tone).to_color()
        };

        let primary = Tonal::of(palette.require("yazi", "primary")?);
        let outline = Tonal::of(palette.require("yazi", "outline")?);
        let container = Tonal::of(palette.require("yazi", "primaryContainer")?);
        let pick = |dark_tone: f32, light_tone: f32| if dark { dark_tone } else { light_tone };

        Ok(Self {
            dir: Tonal::new(primary.hue, primary.chroma.max(floor(65.0)), base_tone + 2.0)
                .to_color(),
            code: at(10.0, max_chroma.min(70.0), base_tone + 3.0),
            exec: at(30.0, max_chroma.min(75.0), high),
            archive: at(50.0, max_chroma.min(80.0), high - 2.0),
            image: at(-30.0, max_chroma.min(75.0), base_tone),
            audio: at(40.0, max_chroma.min(75.0), high),
            doc: at(-20.0, min_chroma.min(65.0), high + 2.0),
            video: at(140.0, max_chroma.min(70.0), high - 3.0),
            link: at(150.0, max_chroma.min(78.0), high + 3.0),
            special: at(200.0, max_chroma.min(75.0), low + 2.0),
            border: outline.with_tone(pick(65.0, 50.0)).to_color(),
            selected_bg: Tonal::new(
                container.hue,
                container.chroma.max(floor(40.0)),
                pick(25.0, 85.0),
            )
            .to_color(),
            hovered_bg: Tonal::new(
                container.hue,
                container.chroma.max(floor(35.0)),
                pick(20.0, 90.0),
            )
            .to_color(),
        })
    }
}

#[derive(Debug, Default, Serialize)]
struct Style {
    #[serde(skip_serializing_if = "Option::is_none")]
    fg: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    bg: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    bold: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    underline: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    reversed: Option<bool>,
}

impl Style {
    fn fg(color: Color) -> Self {
        Self {
            fg: Some(color.to_hex()),
            ..Self::default()
        }
    }

    fn on(fg: &str, bg: Color) -> Self {
        Self {
            fg: Some(fg.to_string()),
            bg: Some(bg.to_hex()),
            ..Self::default()
        }
    }

    fn bg(color: Color) -> Self {
        Self {
            bg: Some(color.to_hex()),
            ..Self::default()
        }
    }

    fn bold(mut self) -> Self {
        self.bold = Some(true);
        self
    }
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum Entry {
    Style(Style),
    Text(&'static str),
    Number(i64),
}

impl From<Style> for Entry {
    fn from(style: Style) -> Self {
        Self::Style(style)
    }
}

#[derive(Debug, Serialize)]
struct Rule {
    #[serde(skip_serializing_if = "Option::is_none")]
    mime: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    fg: String,
}

impl Rule {
    fn mime(mime: &'static str, color: Color) -> Self {
        Self {
            mime: Some(mime),
            name: None,
            fg: color.to_hex(),
        }
    }

    fn name(pattern: impl Into<String>, color: Color) -> Self {
        Self {
            mime: None,
            name: Some(pattern.into()),
            fg: color.to_hex(),
        }
    }
}

#[derive(Debug, Serialize)]
struct FileType {
    rules: Vec<Rule>,
}

type Section = BTreeMap<&'static str, Entry>;

#[derive(Debug, Serialize)]
struct YaziTheme {
    filetype: FileType,
    manager: Section,
    status: Section,
    input: Section,
    select: Section,
    tasks: Section,
    which: Section,
    help: Section,
    completion: Section,
}

fn section<const N: usize>(entries: [(&'static str, Entry); N]) -> Section {
    entries.into_iter().collect()
}

fn empty() -> Entry {
    Entry::Style(Style::default())
}

fn rules(c: &YaziColors) -> Vec<Rule> {
    let mut rules = vec![
        Rule::mime("image/*", c.image),
        Rule::mime("video/*", c.video),
        Rule::mime("audio/*", c.audio),
    ];
    rules.extend(ARCHIVE_MIMES.iter().map(|&mime| Rule::mime(mime, c.archive)));
    rules.push(Rule::mime("application/pdf", c.doc));
    rules.push(Rule::mime("text/*", c.doc));
    let by_extension = |extensions: &[&str], color: Color| -> Vec<Rule> {
        extensions
            .iter()
            .map(|ext| Rule::name(format!("*.{ext}"), color))
            .collect()
    };
    rules.extend(by_extension(CODE_EXTENSIONS, c.code));
    rules.extend(by_extension(DATA_EXTENSIONS, c.archive));
    rules.extend(by_extension(DOC_EXTENSIONS, c.doc));
    rules.push(Rule::mime("inode/symlink", c.link));
    rules.push(Rule::name("*", c.border));
    rules.push(Rule::name("*/", c.dir));
    rules
}

fn theme(c: &YaziColors) -> YaziTheme {
    let marker = |color: Color| Style {
        fg: Some(color.to_hex()),
        bg: Some(color.to_hex()),
        ..Style::default()
    };
    let reset_bg = |color: Color| Style {
        bg: Some("reset".to_string()),
        ..Style::fg(color)
    };

    YaziTheme {
        filetype: FileType { rules: rules(c) },
        manager: section([
            ("cwd", Style::fg(c.dir).into()),
            ("hovered", Style::on("black", c.dir).into()),
            (
                "preview_hovered",
                Style {
                    underline: Some(true),
                    ..Style::default()
                }
                .into(),
            ),
            ("find_keyword", Style::fg(c.archive).bold().into()),
            ("find_position", reset_bg(c.image).bold().into()),
            ("marker_selected", marker(c.dir).into()),
            ("marker_copied", marker(c.code).into()),
            ("marker_cut", marker(c.special).into()),
            ("tab_active", Style::on("black", c.dir).into()),
            ("tab_inactive", reset_bg(c.border).into()),
            ("tab_width", Entry::Number(1)),
            ("border_symbol", Entry::Text("│")),
            ("border_style", Style::fg(c.border).into()),
            ("syntect_theme", Entry::Text("")),
        ]),
        status: section([
            ("separator_open", Entry::Text("")),
            ("separator_close", Entry::Text("")),
            ("separator_style", marker(c.border).into()),
            ("mode_normal", Style::on("black", c.dir).bold().into()),
            ("mode_select", Style::on("black", c.code).bold().into()),
            ("mode_unset", Style::on("black", c.archive).bold().into()),
            ("progress_label", Style::fg(c.border).bold().into()),
            ("progress_normal", reset_bg(c.dir).into()),
            ("progress_error", reset_bg(c.special).into()),
            ("permissions_t", Style::fg(c.exec).into()),
            ("permissions_r", Style::fg(c.doc).into()),
            ("permissions_w", Style::fg(c.archive).into()),
            ("permissions_x", Style::fg(c.exec).into()),
            ("permissions_s", Style::fg(c.border).into()),
        ]),
        input: section([
            ("border", Style::fg(c.dir).into()),
            ("title", empty()),
            ("value", empty()),
            (
                "selected",
                Style {
                    reversed: Some(true),
                    ..Style::default()
                }
                .into(),
            ),
        ]),
        select: section([
            ("border", Style::fg(c.dir).into()),
            ("active", Style::fg(c.dir).into()),
            ("inactive", empty()),
        ]),
        tasks: section([
            ("border", Style::fg(c.dir).into()),
            ("title", empty()),
            (
                "hovered",
                Style {
                    underline: Some(true),
                    ..Style::default()
                }
                .into(),
            ),
        ]),
        which: section([
            (
                "mask",
                Style {
                    bg: Some("black".to_string()),
                    ..Style::default()
                }
                .into(),
            ),
            ("cand", Style::fg(c.code).into()),
            ("rest", Style::fg(c.border).into()),
            ("desc", Style::fg(c.doc).into()),
            ("separator", Entry::Text("  ")),
            ("separator_style", Style::fg(c.border).into()),
        ]),
        help: section([
            ("on", Style::fg(c.dir).into()),
            ("exec", Style::fg(c.exec).into()),
            ("desc", Style::fg(c.border).into()),
            ("hovered", Style::bg(c.hovered_bg).bold().into()),
            ("footer", Style::on("black", c.border).into()),
        ]),
        completion: section([
            ("border", Style::fg(c.dir).into()),
            ("active", Style::bg(c.selected_bg).into()),
            ("inactive", empty()),
        ]),
    }
}

pub struct YaziRenderer;

impl ThemeRenderer for YaziRenderer {
    fn target(&self) -> Target {
        Target::Yazi
    }

    fn required_roles(&self) -> &'static [&'static str] {
        &[Accent::ROLE, "primary", "outline", "primaryContainer"]
    }

    fn render(&self, palette: &Palette, _options: &RenderOptions) -> Result<String, ThemeError> {
        let colors = YaziColors::derive(palette)?;
        let body = toml::to_string(&theme(&colors))
            .map_err(|err| ThemeError::InvalidInput(format!("yazi theme: {err}")))?;
        Ok(format!(
            "# Generated by material-theme ({} mode)\n\n{body}",
            palette.mode
        ))
    }
}
