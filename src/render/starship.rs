//! Starship prompt config, serialized through `toml` so quoting is always valid.

use toml::{Table, Value};

use crate::error::ThemeError;
use crate::scheme::Palette;

use super::{Accent, RenderOptions, Shade, Target, ThemeRenderer};

const DIRECTORY: Shade = Shade::new(0.0, 1.4, 80.0, 75.0, 40.0);
const GIT_BRANCH: Shade = Shade::new(-10.0, 1.3, 75.0, 72.0, 42.0);
const GIT_ADDED: Shade = Shade::new(140.0, 1.3, 75.0, 70.0, 45.0);
const GIT_MODIFIED: Shade = Shade::new(30.0, 1.4, 80.0, 75.0, 40.0);
const GIT_DELETED: Shade = Shade::new(200.0, 1.3, 75.0, 70.0, 45.0);
const GIT_UNTRACKED: Shade = Shade::new(15.0, 1.2, 70.0, 68.0, 47.0);
const SUCCESS: Shade = Shade::new(140.0, 1.3, 75.0, 72.0, 42.0);
const ERROR: Shade = Shade::new(200.0, 1.4, 80.0, 72.0, 42.0);
const PYTHON: Shade = Shade::new(25.0, 1.3, 75.0, 70.0, 45.0);
const NODEJS: Shade = Shade::new(140.0, 1.2, 70.0, 68.0, 47.0);
const RUST: Shade = Shade::new(20.0, 1.4, 80.0, 73.0, 43.0);
const GOLANG: Shade = Shade::new(150.0, 1.3, 75.0, 70.0, 45.0);
const TIME: Shade = Shade::new(0.0, 0.6, f32::INFINITY, 60.0, 55.0);
const USERNAME: Shade = Shade::new(5.0, 1.3, 75.0, 73.0, 43.0);
const HOSTNAME: Shade = Shade::new(10.0, 1.2, 70.0, 70.0, 45.0);
const CHARACTER: Shade = Shade::new(0.0, 1.5, 85.0, 78.0, 38.0);
const DURATION: Shade = Shade::new(30.0, 1.2, 70.0, 68.0, 47.0);
const DOCKER: Shade = Shade::new(160.0, 1.3, 75.0, 70.0, 45.0);
const PACKAGE: Shade = Shade::new(-5.0, 1.2, 70.0, 68.0, 47.0);

pub struct StarshipRenderer;

impl ThemeRenderer for StarshipRenderer {
    fn target(&self) -> Target {
        Target::Starship
    }

    fn required_roles(&self) -> &'static [&'static str] {
        &[Accent::ROLE]
    }

    fn render(&self, palette: &Palette, _options: &RenderOptions) -> Result<String, ThemeError> {
        let accent = Accent::of(palette, "starship")?;
        let s = |shade: Shade| accent.shade(shade).to_hex();

        let directory = s(DIRECTORY);
        let branch = s(GIT_BRANCH);
        let username = s(USERNAME);
        let duration = s(DURATION);
        let error = s(ERROR);
        let character = s(CHARACTER);
        let badge = |color: &str| format!("bold bg:{color} fg:black");

        let mut root = Table::new();
        root.insert("add_newline".into(), Value::from(true));
        root.insert(
            "format".into(),
            Value::from(
                "$username$hostname$directory$git_branch$git_status$git_metrics\
                 $python$nodejs$rust$golang$docker_context$cmd_duration$line_break$character",
            ),
        );
        root.insert("right_format".into(), Value::from("$time"));

        root.insert(
            "character".into(),
            Value::Table(section([
                ("success_symbol", format!("[❯](bold {character})")),
                ("error_symbol", format!("[❯](bold {error})")),
            ])),
        );
        root.insert(
            "username".into(),
            Value::Table(section([
                ("style_user", badge(&username)),
                ("style_root", format!("bold {error}")),
                ("format", "[ $user ]($style)".to_string()),
            ])),
        );
        root.insert(
            "hostname".into(),
            Value::Table(section([
                ("style", badge(&s(HOSTNAME))),
                ("format", "[ $hostname ]($style) ".to_string()),
            ])),
        );
        root.insert(
            "directory".into(),
            Value::Table(section([
                ("style", badge(&directory)),
                ("read_only_style", format!("bold bg:{directory} fg:{error}")),
                ("format", "[ $path ]($style)[$read_only]($read_only_style) ".to_string()),
            ])),
        );
        root.insert(
            "git_branch".into(),
            Value::Table(section([
                ("style", badge(&branch)),
                ("format", "[ $symbol$branch(:$remote_branch) ]($style) ".to_string()),
            ])),
        );
        root.insert(
            "git_status".into(),
            Value::Table(section([
                ("style", format!("bold {}", s(GIT_MODIFIED))),
                ("untracked", format!("[?$count](bold {})", s(GIT_UNTRACKED))),
                ("deleted", format!("[✘$count](bold {})", s(GIT_DELETED))),
            ])),
        );
        let mut metrics = section([
            ("added_style", s(GIT_ADDED)),
            ("deleted_style", s(GIT_DELETED)),
            (
                "format",
                "([+$added]($added_style) )([-$deleted]($deleted_style) )".to_string(),
            ),
        ]);
        metrics.insert("disabled".into(), Value::from(false));
        root.insert("git_metrics".into(), Value::Table(metrics));
        root.insert(
            "cmd_duration".into(),
            Value::Table(section([
                ("style", badge(&duration)),
                ("format", "[ $duration ]($style) ".to_string()),
            ])),
        );
        let mut time = section([
            ("style", s(TIME)),
            ("format", "[$time]($style)".to_string()),
            ("time_format", "%T".to_string()),
        ]);
        time.insert("disabled".into(), Value::from(false));
        root.insert("time".into(), Value::Table(time));
        root.insert(
            "status".into(),
            Value::Table(section([
                ("success_style", format!("bold {}", s(SUCCESS))),
                ("style", format!("bold {error}")),
            ])),
        );
        root.insert(
            "package".into(),
            Value::Table(section([("style", format!("bold {}", s(PACKAGE)))])),
        );

        for (module, shade, format) in [
            ("python", PYTHON, "[ $symbol$version(\\($virtualenv\\)) ]($style)"),
            ("nodejs", NODEJS, "[ $symbol$version ]($style)"),
            ("rust", RUST, "[ $symbol$version ]($style)"),
            ("golang", GOLANG, "[ $symbol$version ]($style)"),
            ("docker_context", DOCKER, "[ $symbol$context ]($style)"),
        ] {
            root.insert(
                module.into(),
                Value::Table(section([
                    ("style", badge(&s(shade))),
                    ("format", format.to_string()),
                ])),
            );
        }

        let body = toml::to_string(&root)
            .map_err(|err| ThemeError::InvalidInput(format!("starship config: {err}")))?;
        Ok(format!(
            "# Generated by material-theme ({} mode)\n\n{body}",
            palette.mode
        ))
    }
}

fn section<const N: usize>(entries: [(&str, String); N]) -> Table {
    entries
        .into_iter()
        .map(|(key, value)| (key.to_string(), Value::from(value)))
        .collect()
}
