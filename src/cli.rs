//! CLI argument parsing via clap.

use std::collections::BTreeSet;
use std::path::PathBuf;

use clap::{ArgGroup, Args as ClapArgs, Parser, Subcommand};
use material_theme::build_info;
use material_theme::color::Color;
use material_theme::config::{Config, Transparency};
use material_theme::error::ThemeError;
use material_theme::render::Target;
use material_theme::scheme::{Mode, SchemeKind};

/// Generate Material You themes for terminal apps from a wallpaper or a seed color.
#[derive(Debug, Parser)]
#[command(
    name = "material-theme",
    version,
    long_version = build_info::LONG_VERSION,
    after_help = build_info::HELP_BUILD_METADATA,
    subcommand_negates_reqs = true,
    group(ArgGroup::new("source").required(true).args(["path", "color"]))
)]
pub struct Args {
    /// Wallpaper image to extract the source color from.
    #[arg(long)]
    pub path: Option<PathBuf>,

    /// Seed color (`#RRGGBB`, `RRGGBB` or `#RGB`).
    #[arg(long)]
    pub color: Option<Color>,

    #[arg(long, value_enum)]
    pub mode: Option<Mode>,

    /// Scheme kind, e.g. `vibrant` or `scheme-tonal-spot`.
    #[arg(long)]
    pub scheme: Option<SchemeKind>,

    /// Pick the scheme from the wallpaper's colorfulness (needs `--path`).
    #[arg(long)]
    pub smart: bool,

    /// Harmonization strength, 0..1.
    #[arg(long)]
    pub harmony: Option<f32>,

    /// Maximum hue rotation in degrees, 0..180.
    #[arg(long = "harmonize_threshold")]
    pub harmonize_threshold: Option<f32>,

    #[arg(long, value_enum)]
    pub transparency: Option<Transparency>,

    /// Terminal base scheme JSON file.
    #[arg(long, global = true)]
    pub termscheme: Option<PathBuf>,

    /// Push term7/term15 toward the extreme tone, 0..1.
    #[arg(long = "term_fg_boost")]
    pub term_fg_boost: Option<f32>,

    /// Take term0/term15 from the surface roles.
    #[arg(long = "blend_bg_fg")]
    pub blend_bg_fg: bool,

    /// Bitmap size used for color extraction.
    #[arg(long = "size")]
    pub bitmap_size: Option<u32>,

    /// File that receives the source color.
    #[arg(long)]
    pub cache: Option<PathBuf>,

    #[command(flatten)]
    pub targets: TargetArgs,

    /// Config file (default: ~/.config/material-theme/config.json).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// State file (default: ~/.local/state/material-theme/colors.json).
    #[arg(long, global = true)]
    pub state: Option<PathBuf>,

    /// Verbose logs and a swatch report instead of SCSS output.
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Regenerate the last theme in the opposite mode.
    Toggle {
        #[command(flatten)]
        targets: TargetArgs,
    },
    /// Print the last applied theme.
    Show,
}

impl Command {
    fn name(&self) -> &'static str {
        match self {
            Command::Toggle { .. } => "toggle",
            Command::Show => "show",
        }
    }
}

/// Target selection and per-target output paths.
#[derive(Debug, Clone, Default, ClapArgs)]
pub struct TargetArgs {
    /// Write every target, ignoring `apps` in the config.
    #[arg(long = "generate-all")]
    pub all: bool,

    #[arg(long = "generate-kitty")]
    pub kitty: bool,
    #[arg(long = "generate-btop")]
    pub btop: bool,
    #[arg(long = "generate-nvim")]
    pub nvim: bool,
    #[arg(long = "generate-yazi")]
    pub yazi: bool,
    #[arg(long = "generate-starship")]
    pub starship: bool,
    #[arg(long = "generate-fish")]
    pub fish: bool,
    #[arg(long = "generate-fzf")]
    pub fzf: bool,
    #[arg(long = "generate-lazygit")]
    pub lazygit: bool,
    #[arg(long = "generate-waybar")]
    pub waybar: bool,

    #[arg(long = "kitty-output", value_name = "FILE")]
    pub kitty_output: Option<PathBuf>,
    #[arg(long = "btop-output", value_name = "FILE")]
    pub btop_output: Option<PathBuf>,
    #[arg(long = "nvim-output", value_name = "FILE")]
    pub nvim_output: Option<PathBuf>,
    #[arg(long = "yazi-output", value_name = "FILE")]
    pub yazi_output: Option<PathBuf>,
    #[arg(long = "starship-output", value_name = "FILE")]
    pub starship_output: Option<PathBuf>,
    #[arg(long = "fish-output", value_name = "FILE")]
    pub fish_output: Option<PathBuf>,
    #[arg(long = "fzf-output", value_name = "FILE")]
    pub fzf_output: Option<PathBuf>,
    #[arg(long = "lazygit-output", value_name = "FILE")]
    pub lazygit_output: Option<PathBuf>,
    #[arg(long = "waybar-output", value_name = "FILE")]
    pub waybar_output: Option<PathBuf>,
}

impl TargetArgs {
    /// Targets named on the command line; empty means "use the config".
    pub fn requested(&self) -> BTreeSet<Target> {
        if self.all {
            return Target::all().iter().copied().collect();
        }
        [
            (Target::Kitty, self.kitty),
            (Target::Btop, self.btop),
            (Target::Nvim, self.nvim),
            (Target::Yazi, self.yazi),
            (Target::Starship, self.starship),
            (Target::Fish, self.fish),
            (Target::Fzf, self.fzf),
            (Target::Lazygit, self.lazygit),
            (Target::Waybar, self.waybar),
        ]
        .into_iter()
        .filter_map(|(target, on)| on.then_some(target))
        .collect()
    }

    fn output_overrides(&self) -> impl Iterator<Item = (Target, &PathBuf)> {
        [
            (Target::Kitty, &self.kitty_output),
            (Target::Btop, &self.btop_output),
            (Target::Nvim, &self.nvim_output),
            (Target::Yazi, &self.yazi_output),
            (Target::Starship, &self.starship_output),
            (Target::Fish, &self.fish_output),
            (Target::Fzf, &self.fzf_output),
            (Target::Lazygit, &self.lazygit_output),
            (Target::Waybar, &self.waybar_output),
        ]
        .into_iter()
        .filter_map(|(target, path)| path.as_ref().map(|path| (target, path)))
    }

    /// Fold `--<target>-output` into `outputs.<target>`.
    pub fn apply_outputs(&self, config: &mut Config) {
        for (target, path) in self.output_overrides() {
            config.outputs.insert(target.key().to_string(), path.clone());
        }
    }
}

impl Args {
    /// Flag combinations clap cannot reject once a subcommand makes the
    /// source group optional.
    pub fn validate(&self) -> Result<(), ThemeError> {
        if let Some(command) = &self.command {
            // Toggle and show replay the recorded theme.
            let generation_only = [
                ("--path", self.path.is_some()),
                ("--color", self.color.is_some()),
                ("--mode", self.mode.is_some()),
                ("--scheme", self.scheme.is_some()),
                ("--smart", self.smart),
                ("--harmony", self.harmony.is_some()),
                ("--harmonize_threshold", self.harmonize_threshold.is_some()),
                ("--transparency", self.transparency.is_some()),
                ("--size", self.bitmap_size.is_some()),
                ("--cache", self.cache.is_some()),
            ];
            if let Some((flag, _)) = generation_only.iter().find(|(_, given)| *given) {
                return Err(ThemeError::InvalidInput(format!(
                    "{flag} cannot be used with `{}`",
                    command.name()
                )));
            }
        }
        if self.smart && self.path.is_none() {
            return Err(ThemeError::InvalidInput(
                "--smart needs a wallpaper given with --path".to_string(),
            ));
        }
        Ok(())
    }

    /// Overlay explicitly given flags on the loaded config.
    pub fn apply_overrides(&self, config: &mut Config) {
        if let Some(mode) = self.mode {
            config.mode = mode;
        }
        if let Some(scheme) = self.scheme {
            config.scheme = scheme;
        }
        if self.smart {
            config.smart = true;
        }
        if let Some(harmony) = self.harmony {
            config.harmony = harmony;
        }
        if let Some(threshold) = self.harmonize_threshold {
            config.harmonize_threshold = threshold;
        }
        if let Some(transparency) = self.transparency {
            config.transparency = transparency;
        }
        if let Some(path) = &self.termscheme {
            config.termscheme = Some(path.clone());
        }
        if let Some(boost) = self.term_fg_boost {
            config.term_fg_boost = boost;
        }
        if self.blend_bg_fg {
            config.blend_bg_fg = true;
        }
        if let Some(size) = self.bitmap_size {
            config.bitmap_size = size;
        }
        self.targets.apply_outputs(config);
    }
}
