//! End-to-end orchestration: source -> palette -> theme files -> state.
//!
//! Extraction and generation failures abort before anything is written.
//! Renderer failures are collected in the `RenderSummary`; the state record is
//! saved once rendering finishes so `toggle` always has something to flip.

use std::collections::BTreeSet;
use std::fmt;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::color::{Color, HarmonyConfig};
use crate::config::{self, Config};
use crate::error::{ConfigError, ThemeError};
use crate::extract::{self, Extraction};
use crate::render::{
    render_targets, write_atomic, OutputPaths, RenderOptions, RenderSummary, Target,
};
use crate::scheme::{generate, Mode, Palette, SchemeKind, TerminalBaseScheme, TerminalOptions};
use crate::state::{StateStore, ThemeStateRecord};

// ---------------------------------------------------------------------------
// Stage-tagged errors
// ---------------------------------------------------------------------------

/// Pipeline step a failure belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Config,
    Extract,
    Cache,
    State,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Config => "config",
            Self::Extract => "extract",
            Self::Cache => "cache",
            Self::State => "state",
        })
    }
}

/// A fatal failure, tagged with the stage that raised it.
#[derive(Debug)]
pub struct StageError {
    pub stage: Stage,
    pub error: ThemeError,
}

impl StageError {
    fn at(stage: Stage) -> impl FnOnce(ThemeError) -> Self {
        move |error| Self { stage, error }
    }
}

impl fmt::Display for StageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.error {
            ThemeError::Config(inner) => write!(f, "{}: {inner}", self.stage),
            error => write!(f, "{}: {error}", self.stage),
        }
    }
}

impl std::error::Error for StageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.error)
    }
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

/// Where the source color comes from.
#[derive(Debug, Clone, PartialEq)]
pub enum SourceInput {
    Wallpaper(PathBuf),
    Color(Color),
}

/// Generation settings resolved from config plus CLI flags.
#[derive(Debug, Clone, PartialEq)]
pub struct ThemeSettings {
    pub mode: Mode,
    pub scheme: SchemeKind,
    /// Pick the scheme from wallpaper colorfulness; ignored for seed colors.
    pub smart: bool,
    pub harmony: HarmonyConfig,
    pub terminal: TerminalOptions,
    pub transparent: bool,
    pub bitmap_size: u32,
    /// Terminal base scheme file; `None` uses the default location.
    pub termscheme: Option<PathBuf>,
}

impl ThemeSettings {
    pub fn from_config(config: &Config) -> Result<Self, StageError> {
        let invalid = |err: ConfigError| StageError::at(Stage::Config)(ThemeError::Config(err));
        Ok(Self {
            mode: config.mode,
            scheme: config.scheme,
            smart: config.smart,
            harmony: config.harmony_config().map_err(invalid)?,
            terminal: config.terminal_options().map_err(invalid)?,
            transparent: config.transparency.is_transparent(),
            bitmap_size: config.bitmap_size,
            termscheme: config.termscheme.clone(),
        })
    }
}

/// Everything `run_generate` needs.
#[derive(Debug, Clone)]
pub struct GenerateRequest {
    pub source: SourceInput,
    pub settings: ThemeSettings,
    pub targets: BTreeSet<Target>,
    pub outputs: OutputPaths,
    /// Optional file receiving the source color as `#RRGGBB`.
    pub cache: Option<PathBuf>,
    pub state: StateStore,
}

/// Everything `run_toggle` needs; the rest comes from the state record.
#[derive(Debug, Clone)]
pub struct ToggleRequest {
    pub terminal: TerminalOptions,
    pub termscheme: Option<PathBuf>,
    pub targets: BTreeSet<Target>,
    pub outputs: OutputPaths,
    pub state: StateStore,
}

/// Result of a generate or toggle run.
#[derive(Debug)]
pub struct PipelineOutcome {
    pub palette: Palette,
    pub record: ThemeStateRecord,
    pub extraction: Option<Extraction>,
    pub summary: RenderSummary,
}

impl PipelineOutcome {
    pub fn is_success(&self) -> bool {
        self.summary.is_success()
    }
}

// ---------------------------------------------------------------------------
// Operations
// ---------------------------------------------------------------------------

/// Extract (or take) the source color, generate, render, then save state.
pub fn run_generate(request: &GenerateRequest) -> Result<PipelineOutcome, StageError> {
    let settings = &request.settings;

    let (source, extraction, wallpaper) = match &request.source {
        SourceInput::Wallpaper(path) => {
            let extraction = extract::analyze(path, settings.bitmap_size)
                .map_err(StageError::at(Stage::Extract))?;
            (extraction.source, Some(extraction), Some(absolute(path)))
        }
        SourceInput::Color(color) => (*color, None, None),
    };

    let scheme = match extraction {
        Some(found) if settings.smart => {
            let picked = extract::smart_scheme(found.colorfulness, found.source);
            info!(colorfulness = found.colorfulness, scheme = %picked, "smart scheme selected");
            picked
        }
        None if settings.smart => {
            warn!(scheme = %settings.scheme, "smart scheme needs a wallpaper, keeping scheme");
            settings.scheme
        }
        _ => settings.scheme,
    };

    let base = load_terminal_base(settings.termscheme.as_deref())?;
    let palette = generate(
        source,
        settings.mode,
        scheme,
        &settings.harmony,
        &base,
        &settings.terminal,
    );

    if let Some(cache) = &request.cache {
        write_atomic(cache, &format!("{}\n", source.to_hex()))
            .map_err(StageError::at(Stage::Cache))?;
        debug!(path = %cache.display(), "cached source color");
    }

    let summary = render_targets(
        &request.targets,
        &palette,
        &RenderOptions {
            transparent: settings.transparent,
        },
        &request.outputs,
    );

    let record =
        ThemeStateRecord::from_palette(&palette, settings.harmony, settings.transparent, wallpaper);
    request
        .state
        .save(&record)
        .map_err(StageError::at(Stage::State))?;

    Ok(PipelineOutcome {
        palette,
        record,
        extraction,
        summary,
    })
}

/// Regenerate the recorded theme in the opposite mode.
pub fn run_toggle(request: &ToggleRequest) -> Result<PipelineOutcome, StageError> {
    let previous = request.state.load().map_err(StageError::at(Stage::State))?;
    let mode = previous.mode.toggled();
    debug!(from = %previous.mode, to = %mode, "toggling mode");

    let base = load_terminal_base(request.termscheme.as_deref())?;
    let palette = generate(
        previous.source.color,
        mode,
        previous.scheme,
        &previous.harmony,
        &base,
        &request.terminal,
    );

    let summary = render_targets(
        &request.targets,
        &palette,
        &RenderOptions {
            transparent: previous.transparent,
        },
        &request.outputs,
    );

    let record = ThemeStateRecord::from_palette(
        &palette,
        previous.harmony,
        previous.transparent,
        previous.source.wallpaper,
    );
    request
        .state
        .save(&record)
        .map_err(StageError::at(Stage::State))?;

    Ok(PipelineOutcome {
        palette,
        record,
        extraction: None,
        summary,
    })
}

/// Read the current state record.
pub fn show(state: &StateStore) -> Result<ThemeStateRecord, StageError> {
    state.load().map_err(StageError::at(Stage::State))
}

// ---------------------------------------------------------------------------
// Resolution helpers
// ---------------------------------------------------------------------------

/// Output paths rooted at `root`, with `outputs.<target>` overrides applied.
pub fn output_paths(config: &Config, root: impl Into<PathBuf>) -> OutputPaths {
    let mut outputs = OutputPaths::new(root);
    for target in Target::all() {
        if let Some(path) = config.output_override(*target) {
            outputs.set_override(*target, path);
        }
    }
    outputs
}

/// Output paths under the XDG config root.
pub fn default_output_paths(config: &Config) -> Result<OutputPaths, StageError> {
    let root = config::config_root_dir().ok_or_else(|| {
        StageError::at(Stage::Config)(ThemeError::InvalidInput(
            "cannot resolve a config directory for theme outputs".to_string(),
        ))
    })?;
    Ok(output_paths(config, root))
}

/// Explicitly requested targets win; otherwise the config's enabled set.
pub fn select_targets(config: &Config, requested: &BTreeSet<Target>) -> BTreeSet<Target> {
    if requested.is_empty() {
        config.enabled_targets()
    } else {
        requested.clone()
    }
}

fn load_terminal_base(path: Option<&Path>) -> Result<TerminalBaseScheme, StageError> {
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => match config::default_termscheme_path() {
            Some(path) => path,
            None => return Ok(TerminalBaseScheme::default()),
        },
    };
    TerminalBaseScheme::load_or_default(&path).map_err(StageError::at(Stage::Config))
}

fn absolute(path: &Path) -> PathBuf {
    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}
