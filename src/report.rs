//! Human and machine output for CLI runs.
//!
//! stdout carries either SCSS variables for downstream scripts or, with
//! `--debug`, a swatch report. Render summaries and errors go to stderr.

use std::fmt::Write as _;

use crossterm::style::{self, Stylize};

use crate::color::Color;
use crate::pipeline::PipelineOutcome;
use crate::render::RenderSummary;
use crate::scheme::Palette;
use crate::state::ThemeStateRecord;

const SWATCH: &str = "      ";
const LABEL_OK: &str = "wrote";
const LABEL_FAILED: &str = "failed";

/// `$darkmode`, `$transparent`, then one variable per role and slot.
pub fn scss_variables(palette: &Palette, transparent: bool) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "$darkmode: {};", palette.mode.is_dark());
    let _ = writeln!(out, "$transparent: {transparent};");
    for (key, color) in palette.material_by_key() {
        let _ = writeln!(out, "${key}: {color};");
    }
    for (index, color) in palette.terminal.iter().enumerate() {
        let _ = writeln!(out, "$term{index}: {color};");
    }
    out
}

/// Formats reports with or without ANSI color.
#[derive(Debug, Clone, Copy)]
pub struct Reporter {
    color: bool,
}

impl Reporter {
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    /// Readable overview of a run with a swatch per color.
    pub fn debug_report(&self, outcome: &PipelineOutcome) -> String {
        let palette = &outcome.palette;
        let mut out = String::new();
        let _ = writeln!(out, "source      {}", self.swatch_row(palette.source));
        if let Some(extraction) = &outcome.extraction {
            let _ = writeln!(out, "colorfulness {:.1}", extraction.colorfulness);
        }
        let _ = writeln!(out, "mode        {}", palette.mode);
        let _ = writeln!(out, "scheme      {}", palette.scheme);
        let _ = writeln!(out, "transparent {}", outcome.record.transparent);
        let _ = writeln!(
            out,
            "harmony     strength {} max-shift {}",
            outcome.record.harmony.strength, outcome.record.harmony.max_hue_shift_degrees
        );
        out.push('\n');
        self.write_colors(&mut out, "material", palette.material_by_key());
        self.write_colors(
            &mut out,
            "terminal",
            palette
                .terminal
                .iter()
                .enumerate()
                .map(|(index, color)| (format!("term{index}"), *color)),
        );
        let _ = writeln!(out, "{}", self.terminal_strip(&palette.terminal));
        out
    }

    /// Summary of a saved state record for `show`.
    pub fn record_report(&self, record: &ThemeStateRecord) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "source      {}", self.swatch_row(record.source.color));
        if let Some(wallpaper) = &record.source.wallpaper {
            let _ = writeln!(out, "wallpaper   {}", wallpaper.display());
        }
        let _ = writeln!(out, "mode        {}", record.mode);
        let _ = writeln!(out, "scheme      {}", record.scheme);
        let _ = writeln!(out, "transparent {}", record.transparent);
        let _ = writeln!(out, "saved       {}", record.timestamp);
        for key in ["primary", "secondary", "tertiary", "surface", "onSurface"] {
            if let Some(color) = record.material.get(key) {
                let _ = writeln!(out, "{key:<11} {}", self.swatch_row(*color));
            }
        }
        let strip: Vec<Color> = (0..record.terminal.len())
            .filter_map(|index| record.terminal.get(&format!("term{index}")).copied())
            .collect();
        let _ = writeln!(out, "{}", self.terminal_strip(&strip));
        out
    }

    /// One line per target, successes first.
    pub fn summary_lines(&self, summary: &RenderSummary) -> Vec<String> {
        let mut lines = Vec::with_capacity(summary.succeeded.len() + summary.failed.len());
        for (target, path) in &summary.succeeded {
            let label = self.paint(LABEL_OK, style::Color::Green);
            lines.push(format!("{label} {target} -> {}", path.display()));
        }
        for (target, err) in &summary.failed {
            let label = self.paint(LABEL_FAILED, style::Color::Red);
            lines.push(format!("{label} render {target}: {err}"));
        }
        lines
    }

    fn write_colors(
        &self,
        out: &mut String,
        title: &str,
        colors: impl IntoIterator<Item = (String, Color)>,
    ) {
        let _ = writeln!(out, "{title}");
        for (key, color) in colors {
            let _ = writeln!(out, "  {key:<32} {}", self.swatch_row(color));
        }
        out.push('\n');
    }

    fn swatch_row(&self, color: Color) -> String {
        if self.color {
            format!("{} {color}", SWATCH.on(to_terminal(color)))
        } else {
            color.to_string()
        }
    }

    fn terminal_strip(&self, colors: &[Color]) -> String {
        if !self.color {
            return colors
                .iter()
                .map(|color| color.to_string())
                .collect::<Vec<_>>()
                .join(" ");
        }
        colors
            .iter()
            .map(|color| "   ".on(to_terminal(*color)).to_string())
            .collect()
    }

    fn paint(&self, text: &str, color: style::Color) -> String {
        if self.color {
            text.with(color).bold().to_string()
        } else {
            text.to_string()
        }
    }
}

fn to_terminal(color: Color) -> style::Color {
    style::Color::Rgb {
        r: color.r,
        g: color.g,
        b: color.b,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::HarmonyConfig;
    use crate::render::Target;
    use crate::scheme::Mode;
    use crate::testsupport::sample_palette;
    use std::path::PathBuf;

    fn outcome(mode: Mode) -> PipelineOutcome {
        let palette = sample_palette(mode);
        let record =
            ThemeStateRecord::from_palette(&palette, HarmonyConfig::default(), false, None);
        PipelineOutcome {
            palette,
            record,
            extraction: None,
            summary: RenderSummary::default(),
        }
    }

    #[test]
    fn scss_starts_with_mode_flags() {
        let palette = sample_palette(Mode::Dark);
        let text = scss_variables(&palette, false);
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("$darkmode: true;"));
        assert_eq!(lines.next(), Some("$transparent: false;"));
        let primary = palette.get("primary").unwrap();
        assert!(text.contains(&format!("$primary: {primary};")));
        assert!(text.contains("$term15: #"));
        assert!(text.lines().all(|line| line.starts_with('$') && line.ends_with(';')));
    }

    #[test]
    fn scss_light_transparent() {
        let text = scss_variables(&sample_palette(Mode::Light), true);
        assert!(text.starts_with("$darkmode: false;\n$transparent: true;\n"));
    }

    // Ensures plain mode never leaks escape sequences into piped output.
    #[test]
    fn plain_report_has_no_ansi() {
        let report = Reporter::new(false).debug_report(&outcome(Mode::Dark));
        assert!(!report.contains('\u{1b}'));
        assert!(report.contains("scheme      vibrant"));
        assert!(report.contains("primary"));
    }

    #[test]
    fn colored_report_uses_truecolor_swatches() {
        // crossterm drops escapes entirely under NO_COLOR.
        if std::env::var_os("NO_COLOR").is_some() {
            return;
        }
        let report = Reporter::new(true).debug_report(&outcome(Mode::Dark));
        assert!(report.contains("\u{1b}[48;2;"), "{report}");
    }

    #[test]
    fn summary_lists_successes_then_failures() {
        let summary = RenderSummary {
            succeeded: vec![(Target::Kitty, PathBuf::from("/cfg/kitty/current-theme.conf"))],
            failed: vec![(
                Target::Btop,
                crate::error::ThemeError::MissingRole {
                    target: "btop".into(),
                    role: "term0".into(),
                },
            )],
        };
        let lines = Reporter::new(false).summary_lines(&summary);
        assert_eq!(lines[0], "wrote kitty -> /cfg/kitty/current-theme.conf");
        assert!(lines[1].starts_with("failed render btop:"), "{}", lines[1]);
    }

    #[test]
    fn record_report_mentions_wallpaper() {
        let palette = sample_palette(Mode::Light);
        let record = ThemeStateRecord::from_palette(
            &palette,
            HarmonyConfig::default(),
            true,
            Some(PathBuf::from("/walls/dune.jpg")),
        );
        let text = Reporter::new(false).record_report(&record);
        assert!(text.contains("wallpaper   /walls/dune.jpg"));
        assert!(text.contains("mode        light"));
    }
}
