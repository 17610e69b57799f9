//! material-theme: Material You palettes for terminal applications.
//!
//! A wallpaper (or seed color) is reduced to one source color, expanded into
//! Material roles plus a harmonized 16-color terminal palette, and written
//! into the config formats of kitty, btop, neovim, yazi, starship, fish, fzf,
//! lazygit and waybar. The last applied theme is recorded so it can be
//! toggled between dark and light.
//!
//! # Quick start
//!
//! ```no_run
//! use material_theme::color::{Color, HarmonyConfig};
//! use material_theme::render::{RenderOptions, Target, ThemeRenderer};
//! use material_theme::scheme::{generate, Mode, SchemeKind, TerminalBaseScheme, TerminalOptions};
//!
//! let source = Color::from_hex("#89b4fa").unwrap();
//! let palette = generate(
//!     source,
//!     Mode::Dark,
//!     SchemeKind::Vibrant,
//!     &HarmonyConfig::default(),
//!     &TerminalBaseScheme::default(),
//!     &TerminalOptions::default(),
//! );
//! let kitty = Target::Kitty
//!     .renderer()
//!     .render(&palette, &RenderOptions::default())
//!     .unwrap();
//! println!("{kitty}");
//! ```

pub mod build_info;
pub mod color;
pub mod config;
pub mod error;
pub mod extract;
pub mod pipeline;
pub mod render;
pub mod report;
pub mod scheme;
pub mod state;
#[cfg(test)]
pub mod testsupport;
