use std::fmt::Write as _;

use crate::color::Color;
use crate::error::ThemeError;
use crate::scheme::Palette;

use super::{Accent, RenderOptions, Shade, Target, ThemeRenderer};

const TITLE: Shade = Shade::new(0.0, 1.4, 80.0, 78.0, 38.0);
const HI_FG: Shade = Shade::new(5.0, 1.5, 85.0, 85.0, 30.0);
const INACTIVE_FG: Shade = Shade::new(0.0, 0.3, f32::INFINITY, 55.0, 60.0);
const PROC_MISC: Shade = Shade::new(-10.0, 1.2, 70.0, 70.0, 45.0);
const METER_BG: Shade = Shade::new(0.0, 0.4, f32::INFINITY, 20.0, 85.0);
const DIV_LINE: Shade = Shade::new(0.0, 0.6, f32::INFINITY, 35.0, 70.0);

const CPU_BOX: Shade = Shade::new(0.0, 1.3, 75.0, 65.0, 50.0);
const CPU_START: Shade = Shade::new(20.0, 1.1, 60.0, 68.0, 48.0);
const CPU_MID: Shade = Shade::new(0.0, 1.4, 75.0, 72.0, 42.0);
const CPU_END: Shade = Shade::new(-15.0, 1.5, 85.0, 75.0, 38.0);

const MEM_BOX: Shade = Shade::new(15.0, 1.2, 70.0, 65.0, 50.0);
const MEM_START: Shade = Shade::new(25.0, 1.0, 55.0, 65.0, 50.0);
const MEM_MID: Shade = Shade::new(15.0, 1.3, 70.0, 70.0, 45.0);
const MEM_END: Shade = Shade::new(5.0, 1.5, 80.0, 75.0, 40.0);

const NET_BOX: Shade = Shade::new(140.0, 1.2, 70.0, 65.0, 50.0);
const NET_DOWNLOAD: Shade = Shade::new(150.0, 1.3, 75.0, 72.0, 42.0);
const NET_UPLOAD: Shade = Shade::new(130.0, 1.3, 75.0, 70.0, 45.0);

const DISK_BOX: Shade = Shade::new(30.0, 1.2, 70.0, 65.0, 50.0);
const DISK_START: Shade = Shade::new(40.0, 1.1, 60.0, 65.0, 50.0);
const DISK_MID: Shade = Shade::new(30.0, 1.3, 70.0, 70.0, 45.0);
const DISK_END: Shade = Shade::new(20.0, 1.5, 80.0, 75.0, 40.0);

pub struct BtopRenderer;

impl ThemeRenderer for BtopRenderer {
    fn target(&self) -> Target {
        Target::Btop
    }

    fn required_roles(&self) -> &'static [&'static str] {
        &[Accent::ROLE, "term0", "term7"]
    }

    fn render(&self, palette: &Palette, options: &RenderOptions) -> Result<String, ThemeError> {
        let accent = Accent::of(palette, "btop")?;
        let background = palette.require("btop", "term0")?;
        let foreground = palette.require("btop", "term7")?;
        let s = |shade: Shade| accent.shade(shade);

        let gradient = |start: Shade, mid: Shade, end: Shade| [s(start), s(mid), s(end)];
        let cpu = gradient(CPU_START, CPU_MID, CPU_END);
        let mem = gradient(MEM_START, MEM_MID, MEM_END);
        let disk = gradient(DISK_START, DISK_MID, DISK_END);
        let download = s(NET_DOWNLOAD);
        let upload = s(NET_UPLOAD);
        let hi_fg = s(HI_FG);
        let cpu_box = s(CPU_BOX);

        let mut entries: Vec<(String, Option<Color>)> = [
            ("main_bg", (!options.transparent).then_some(background)),
            ("main_fg", Some(foreground)),
            ("title", Some(s(TITLE))),
            ("hi_fg", Some(hi_fg)),
            ("selected_bg", Some(cpu[0])),
            ("selected_fg", Some(hi_fg)),
            ("inactive_fg", Some(s(INACTIVE_FG))),
            ("graph_text", Some(foreground)),
            ("meter_bg", Some(s(METER_BG))),
            ("proc_misc", Some(s(PROC_MISC))),
            ("cpu_box", Some(cpu_box)),
            ("mem_box", Some(s(MEM_BOX))),
            ("net_box", Some(s(NET_BOX))),
            ("proc_box", Some(cpu_box)),
            ("div_line", Some(s(DIV_LINE))),
        ]
        .into_iter()
        .map(|(key, color)| (key.to_string(), color))
        .collect();
        for (prefix, stops) in [
            ("temp", cpu),
            ("cpu", cpu),
            ("free", mem),
            ("cached", mem),
            ("available", disk),
            ("used", cpu),
            ("download", [download; 3]),
            ("upload", [upload; 3]),
            ("process", cpu),
        ] {
            for (suffix, color) in ["start", "mid", "end"].into_iter().zip(stops) {
                entries.push((format!("{prefix}_{suffix}"), Some(color)));
            }
        }

        let mut out = format!(
            "# Generated by material-theme ({} mode)\n\n",
            palette.mode
        );
        for (key, color) in entries {
            let value = color.map(Color::to_hex).unwrap_or_default();
            let _ = writeln!(out, "theme[{key}]=\"{value}\"");
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheme::Mode;
    use crate::testsupport::sample_palette;

    fn value_of<'a>(text: &'a str, key: &str) -> &'a str {
        let prefix = format!("theme[{key}]=\"");
        text.lines()
            .find_map(|line| line.strip_prefix(prefix.as_str()))
            .and_then(|rest| rest.strip_suffix('"'))
            .unwrap_or_else(|| panic!("missing {key}"))
    }

    #[test]
    fn background_comes_from_term0_unless_transparent() {
        let palette = sample_palette(Mode::Dark);
        let opaque = BtopRenderer
            .render(&palette, &RenderOptions::default())
            .unwrap();
        assert_eq!(value_of(&opaque, "main_bg"), palette.terminal[0].to_hex());
        assert_eq!(value_of(&opaque, "main_fg"), palette.terminal[7].to_hex());

        let clear = BtopRenderer
            .render(&palette, &RenderOptions { transparent: true })
            .unwrap();
        assert_eq!(value_of(&clear, "main_bg"), "");
    }

    #[test]
    fn gradients_share_stops_and_selection_matches_cpu_start() {
        let text = BtopRenderer
            .render(&sample_palette(Mode::Light), &RenderOptions::default())
            .unwrap();
        assert_eq!(value_of(&text, "selected_bg"), value_of(&text, "cpu_start"));
        assert_eq!(value_of(&text, "temp_end"), value_of(&text, "cpu_end"));
        assert_eq!(value_of(&text, "cached_mid"), value_of(&text, "free_mid"));
        assert_eq!(value_of(&text, "download_start"), value_of(&text, "download_end"));
        assert_eq!(value_of(&text, "proc_box"), value_of(&text, "cpu_box"));
    }
}
