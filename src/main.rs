//! CLI entry point for material-theme.

mod cli;

use std::io::IsTerminal;
use std::process::ExitCode;

use clap::Parser;
use material_theme::build_info;
use material_theme::config::{load_config, Config};
use material_theme::error::ThemeError;
use material_theme::pipeline::{
    self, GenerateRequest, PipelineOutcome, SourceInput, Stage, StageError, ThemeSettings,
    ToggleRequest,
};
use material_theme::report::{scss_variables, Reporter};
use material_theme::state::StateStore;
use tracing::debug;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let args = cli::Args::parse();
    init_logging(args.debug);
    debug!(version = %build_info::version_line(), "starting");

    match run(&args) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

/// `warn` by default, `debug` with `--debug`; `RUST_LOG` wins over both.
fn init_logging(debug: bool) {
    let fallback = if debug { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Returns whether every target was written.
fn run(args: &cli::Args) -> Result<bool, StageError> {
    args.validate().map_err(|error| StageError {
        stage: Stage::Config,
        error,
    })?;
    let mut config = load_config(args.config.as_deref()).map_err(config_error)?;
    args.apply_overrides(&mut config);

    let state = match &args.state {
        Some(path) => StateStore::new(path),
        None => StateStore::open_default().map_err(|error| StageError {
            stage: Stage::State,
            error,
        })?,
    };

    let outcome = match &args.command {
        Some(cli::Command::Show) => {
            let record = pipeline::show(&state)?;
            print!(
                "{}",
                Reporter::new(std::io::stdout().is_terminal()).record_report(&record)
            );
            return Ok(true);
        }
        Some(cli::Command::Toggle { targets }) => {
            targets.apply_outputs(&mut config);
            let settings = resolved_settings(&config)?;
            pipeline::run_toggle(&ToggleRequest {
                terminal: settings.terminal,
                termscheme: settings.termscheme,
                targets: pipeline::select_targets(&config, &targets.requested()),
                outputs: pipeline::default_output_paths(&config)?,
                state,
            })?
        }
        None => {
            let source = match (&args.path, args.color) {
                (Some(path), _) => SourceInput::Wallpaper(path.clone()),
                (None, Some(color)) => SourceInput::Color(color),
                (None, None) => {
                    return Err(StageError {
                        stage: Stage::Config,
                        error: ThemeError::InvalidInput(
                            "one of --path or --color is required".to_string(),
                        ),
                    })
                }
            };
            pipeline::run_generate(&GenerateRequest {
                source,
                settings: resolved_settings(&config)?,
                targets: pipeline::select_targets(&config, &args.targets.requested()),
                outputs: pipeline::default_output_paths(&config)?,
                cache: args.cache.clone(),
                state,
            })?
        }
    };

    report(&outcome, args.debug);
    Ok(outcome.is_success())
}

/// CLI values bypass the loader, so re-check ranges after overlaying them.
fn resolved_settings(config: &Config) -> Result<ThemeSettings, StageError> {
    config.validate().map_err(config_error)?;
    ThemeSettings::from_config(config)
}

fn report(outcome: &PipelineOutcome, debug: bool) {
    if debug {
        print!(
            "{}",
            Reporter::new(std::io::stdout().is_terminal()).debug_report(outcome)
        );
    } else {
        print!(
            "{}",
            scss_variables(&outcome.palette, outcome.record.transparent)
        );
    }
    for line in Reporter::new(std::io::stderr().is_terminal()).summary_lines(&outcome.summary) {
        eprintln!("{line}");
    }
}

fn config_error(err: material_theme::error::ConfigError) -> StageError {
    StageError {
        stage: Stage::Config,
        error: ThemeError::Config(err),
    }
}
