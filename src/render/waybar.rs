use std::fmt::Write as _;

use crate::color::Color;
use crate::error::ThemeError;
use crate::scheme::Palette;

use super::{RenderOptions, Target, ThemeRenderer};

/// Bar background alpha when transparency is on.
const TRANSLUCENT_ALPHA: f32 = 0.85;

pub struct WaybarRenderer;

impl ThemeRenderer for WaybarRenderer {
    fn target(&self) -> Target {
        Target::Waybar
    }

    fn required_roles(&self) -> &'static [&'static str] {
        &[
            "surface",
            "surfaceContainer",
            "onSurface",
            "onSurfaceVariant",
            "primary",
            "onPrimary",
            "tertiary",
            "error",
            "success",
            "term3",
        ]
    }

    fn render(&self, palette: &Palette, options: &RenderOptions) -> Result<String, ThemeError> {
        let role = |key: &str| palette.require("waybar", key);
        let surface = role("surface")?;
        let on_surface_variant = role("onSurfaceVariant")?;
        let primary = role("primary")?;
        let error = role("error")?;
        let rgba = |color: Color, alpha: f32| color.to_css_rgba(alpha);
        let bar_background = if options.transparent {
            rgba(surface, TRANSLUCENT_ALPHA)
        } else {
            "@surface".to_string()
        };
        let module_background = if options.transparent {
            rgba(surface, 0.5)
        } else {
            "@surfaceContainer".to_string()
        };

        let mut out = format!(
            "/* Generated by material-theme ({} mode, source {}) */\n\n",
            palette.mode, palette.source
        );
        for (key, color) in palette.material_by_key() {
            let _ = writeln!(out, "@define-color {key} {color};");
        }
        for (key, color) in palette.terminal_by_key() {
            let _ = writeln!(out, "@define-color {key} {color};");
        }

        let _ = write!(
            out,
            r#"
* {{
  font-family: "JetBrainsMono Nerd Font", monospace;
  font-size: 13px;
  border: none;
  border-radius: 0;
  min-height: 0;
}}

window#waybar {{
  background: {bar_background};
  color: @onSurface;
}}

#workspaces button {{
  padding: 1px 8px;
  margin: 2px 1px;
  color: {muted};
  background: transparent;
  border: 1px solid {faint};
}}

#workspaces button.active {{
  color: @primary;
  background: {module_background};
  border: 1px solid {primary_edge};
}}

#workspaces button.urgent {{
  color: @error;
  border: 1px solid {error_edge};
}}

#clock {{
  padding: 1px 12px;
  margin: 2px 4px;
  color: @primary;
  background: {module_background};
  border: 1px solid {primary_edge};
  font-weight: 600;
}}

#cpu,
#memory,
#temperature,
#disk,
#network,
#pulseaudio,
#backlight,
#battery {{
  padding: 1px 8px;
  margin: 2px 1px;
  color: @onSurfaceVariant;
  background: {module_background};
  border: 1px solid {faint};
}}

#battery.charging {{
  color: @success;
}}

#battery.warning:not(.charging),
#temperature.critical {{
  color: @term3;
}}

#battery.critical:not(.charging) {{
  color: @error;
}}

#tray {{
  padding: 0 6px;
}}

tooltip {{
  background: @surfaceContainer;
  color: @onSurface;
  border: 1px solid @tertiary;
}}
"#,
            muted = rgba(on_surface_variant, 0.6),
            faint = rgba(on_surface_variant, 0.3),
            primary_edge = rgba(primary, 0.6),
            error_edge = rgba(error, 0.6),
        );
        Ok(out)
    }
}
