//! Theme renderers: palette -> application config text, plus atomic writes.
//!
//! Each target is a pure `ThemeRenderer`. The pipeline checks a renderer's
//! required roles, renders to a string, and replaces the output file via a
//! sibling temp file so a restarting application never reads half a theme.
//! Targets run one after another and a failure in one is recorded in the
//! `RenderSummary` without stopping the rest.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use tracing::{debug, warn};

use crate::error::ThemeError;
use crate::scheme::Palette;

mod btop;
mod fish;
mod fzf;
mod kitty;
mod lazygit;
mod nvim;
mod shade;
mod starship;
mod waybar;
mod yazi;

pub use shade::{Accent, Shade};

/// Application a theme file is generated for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Target {
    Kitty,
    Btop,
    Nvim,
    Yazi,
    Starship,
    Fish,
    Fzf,
    Lazygit,
    Waybar,
}

impl Target {
    /// Stable key used in config (`apps.<key>`), flags and summaries.
    pub fn key(self) -> &'static str {
        match self {
            Self::Kitty => "kitty",
            Self::Btop => "btop",
            Self::Nvim => "nvim",
            Self::Yazi => "yazi",
            Self::Starship => "starship",
            Self::Fish => "fish",
            Self::Fzf => "fzf",
            Self::Lazygit => "lazygit",
            Self::Waybar => "waybar",
        }
    }

    pub fn all() -> &'static [Target] {
        &[
            Self::Kitty,
            Self::Btop,
            Self::Nvim,
            Self::Yazi,
            Self::Starship,
            Self::Fish,
            Self::Fzf,
            Self::Lazygit,
            Self::Waybar,
        ]
    }

    /// Output path relative to the XDG config root.
    pub fn default_relative_path(self) -> &'static str {
        match self {
            Self::Kitty => "kitty/current-theme.conf",
            Self::Btop => "btop/themes/material-you.theme",
            Self::Nvim => "nvim/colors/material_you.lua",
            Self::Yazi => "yazi/theme.toml",
            Self::Starship => "starship.toml",
            Self::Fish => "fish/conf.d/material_you_colors.fish",
            Self::Fzf => "fzf/colors.sh",
            Self::Lazygit => "lazygit/config.yml",
            Self::Waybar => "waybar/colors.css",
        }
    }

    pub fn renderer(self) -> Box<dyn ThemeRenderer> {
        match self {
            Self::Kitty => Box::new(kitty::KittyRenderer),
            Self::Btop => Box::new(btop::BtopRenderer),
            Self::Nvim => Box::new(nvim::NvimRenderer),
            Self::Yazi => Box::new(yazi::YaziRenderer),
            Self::Starship => Box::new(starship::StarshipRenderer),
            Self::Fish => Box::new(fish::FishRenderer),
            Self::Fzf => Box::new(fzf::FzfRenderer),
            Self::Lazygit => Box::new(lazygit::LazygitRenderer),
            Self::Waybar => Box::new(waybar::WaybarRenderer),
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Target {
    type Err = ThemeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::all()
            .iter()
            .copied()
            .find(|target| target.key() == wanted)
            .ok_or_else(|| ThemeError::InvalidInput(format!("unknown render target `{s}`")))
    }
}

/// Render-time switches that are not part of the palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RenderOptions {
    pub transparent: bool,
}

/// Maps a palette to one application's config syntax.
pub trait ThemeRenderer {
    fn target(&self) -> Target;

    /// Role keys (`primary`, `term4`, ...) read by `render`.
    fn required_roles(&self) -> &'static [&'static str];

    fn render(&self, palette: &Palette, options: &RenderOptions) -> Result<String, ThemeError>;
}

/// Fail with `MissingRole` for the first required role the palette lacks.
pub fn check_roles(renderer: &dyn ThemeRenderer, palette: &Palette) -> Result<(), ThemeError> {
    for role in renderer.required_roles() {
        palette.require(renderer.target().key(), role)?;
    }
    Ok(())
}

/// Replace `path` with `contents` via a temp file in the same directory.
pub fn write_atomic(path: &Path, contents: &str) -> Result<(), ThemeError> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(parent).map_err(|err| ThemeError::io(parent, err))?;

    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .ok_or_else(|| {
            ThemeError::InvalidInput(format!("output path {} has no file name", path.display()))
        })?;
    let tmp_path = parent.join(format!(".{file_name}.tmp-{}", std::process::id()));

    let write = || -> std::io::Result<()> {
        let mut file = std::fs::File::create(&tmp_path)?;
        file.write_all(contents.as_bytes())?;
        file.sync_all()
    };
    if let Err(err) = write() {
        let _ = std::fs::remove_file(&tmp_path);
        return Err(ThemeError::io(&tmp_path, err));
    }
    std::fs::rename(&tmp_path, path).map_err(|err| {
        let _ = std::fs::remove_file(&tmp_path);
        ThemeError::io(path, err)
    })
}

/// Check, render and atomically write one target.
pub fn render_to(
    renderer: &dyn ThemeRenderer,
    palette: &Palette,
    options: &RenderOptions,
    path: &Path,
) -> Result<(), ThemeError> {
    check_roles(renderer, palette)?;
    let text = renderer.render(palette, options)?;
    write_atomic(path, &text)?;
    debug!(
        target_app = %renderer.target(),
        path = %path.display(),
        bytes = text.len(),
        "wrote theme"
    );
    Ok(())
}

/// Where each target is written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPaths {
    root: PathBuf,
    overrides: BTreeMap<Target, PathBuf>,
}

impl OutputPaths {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            overrides: BTreeMap::new(),
        }
    }

    pub fn with_override(mut self, target: Target, path: impl Into<PathBuf>) -> Self {
        self.overrides.insert(target, path.into());
        self
    }

    pub fn set_override(&mut self, target: Target, path: impl Into<PathBuf>) {
        self.overrides.insert(target, path.into());
    }

    pub fn path_for(&self, target: Target) -> PathBuf {
        self.overrides
            .get(&target)
            .cloned()
            .unwrap_or_else(|| self.root.join(target.default_relative_path()))
    }
}

/// Outcome of rendering a set of targets.
#[derive(Debug, Default)]
pub struct RenderSummary {
    pub succeeded: Vec<(Target, PathBuf)>,
    pub failed: Vec<(Target, ThemeError)>,
}

impl RenderSummary {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Render every enabled target; failures are collected, not propagated.
pub fn render_targets(
    targets: &BTreeSet<Target>,
    palette: &Palette,
    options: &RenderOptions,
    outputs: &OutputPaths,
) -> RenderSummary {
    let mut summary = RenderSummary::default();
    for target in targets {
        let path = outputs.path_for(*target);
        let renderer = target.renderer();
        match render_to(renderer.as_ref(), palette, options, &path) {
            Ok(()) => summary.succeeded.push((*target, path)),
            Err(err) => {
                warn!(target_app = %target, error = %err, "render failed");
                summary.failed.push((*target, err));
            }
        }
    }
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheme::{Mode, Role};
    use crate::testsupport::{sample_palette, TestTempDir};

    #[test]
    fn target_keys_parse_back() {
        for target in Target::all() {
            assert_eq!(target.key().parse::<Target>().unwrap(), *target);
            assert_eq!(target.renderer().target(), *target);
        }
        assert!("emacs".parse::<Target>().is_err());
    }

    #[test]
    fn every_renderer_is_satisfied_by_a_generated_palette() {
        let palette = sample_palette(Mode::Dark);
        for target in Target::all() {
            let renderer = target.renderer();
            check_roles(renderer.as_ref(), &palette).unwrap();
            let text = renderer.render(&palette, &RenderOptions::default()).unwrap();
            assert!(!text.trim().is_empty(), "{target} rendered nothing");
        }
    }

    #[test]
    fn missing_role_fails_before_any_write() {
        let tmp = TestTempDir::new("render-missing");
        let mut palette = sample_palette(Mode::Dark);
        palette.material.remove(&Role::PrimaryPaletteKeyColor);
        let path = tmp.child("btop/material-you.theme");
        let renderer = Target::Btop.renderer();
        let err = render_to(renderer.as_ref(), &palette, &RenderOptions::default(), &path)
            .unwrap_err();
        assert!(matches!(err, ThemeError::MissingRole { .. }), "{err}");
        assert!(!path.exists());
        assert!(!tmp.child("btop").exists());
    }

    #[test]
    fn write_atomic_creates_parents_and_replaces() {
        let tmp = TestTempDir::new("render-atomic");
        let path = tmp.child("a/b/theme.conf");
        write_atomic(&path, "one").unwrap();
        write_atomic(&path, "two").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "two");
        let leftovers: Vec<_> = std::fs::read_dir(tmp.child("a/b"))
            .unwrap()
            .filter_map(Result::ok)
            .filter(|entry| entry.file_name().to_string_lossy().contains(".tmp-"))
            .collect();
        assert!(leftovers.is_empty());
    }

    #[test]
    fn one_failing_target_does_not_stop_the_others() {
        let tmp = TestTempDir::new("render-partial");
        // A regular file where the kitty directory should be.
        tmp.write_text("kitty", "not a directory");
        let outputs = OutputPaths::new(tmp.path());
        let targets: BTreeSet<Target> = [Target::Kitty, Target::Btop, Target::Fzf].into();
        let summary = render_targets(
            &targets,
            &sample_palette(Mode::Dark),
            &RenderOptions::default(),
            &outputs,
        );
        assert!(!summary.is_success());
        assert_eq!(summary.failed.len(), 1);
        assert_eq!(summary.failed[0].0, Target::Kitty);
        assert_eq!(summary.succeeded.len(), 2);
        for (_, path) in &summary.succeeded {
            assert!(path.exists(), "{} missing", path.display());
        }
    }

    #[test]
    fn overrides_replace_default_paths() {
        let outputs =
            OutputPaths::new("/cfg").with_override(Target::Starship, "/elsewhere/starship.toml");
        assert_eq!(
            outputs.path_for(Target::Kitty),
            PathBuf::from("/cfg/kitty/current-theme.conf")
        );
        assert_eq!(
            outputs.path_for(Target::Starship),
            PathBuf::from("/elsewhere/starship.toml")
        );
    }
}
