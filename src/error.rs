//! Unified error types for the theme pipeline.

use std::fmt;
use std::path::PathBuf;

// ---------------------------------------------------------------------------
// ConfigError
// ---------------------------------------------------------------------------

/// Errors when loading or parsing configuration.
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Invalid(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "io: {e}"),
            Self::Invalid(msg) => write!(f, "invalid config: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

// ---------------------------------------------------------------------------
// ThemeError
// ---------------------------------------------------------------------------

/// Top-level error type for extraction, generation, rendering and state.
#[derive(Debug)]
pub enum ThemeError {
    /// Bad or missing image, malformed hex color, out-of-range option.
    InvalidInput(String),
    /// Scheme identifier is not a known scheme kind.
    UnsupportedScheme(String),
    /// A renderer needs a palette role that is absent.
    MissingRole { target: String, role: String },
    /// No prior state record exists.
    NotFound(String),
    /// Write, rename or read failure on a specific path.
    Io { path: PathBuf, source: std::io::Error },
    Config(ConfigError),
}

impl ThemeError {
    /// Attach a path to an io error.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

impl fmt::Display for ThemeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidInput(msg) => write!(f, "invalid input: {msg}"),
            Self::UnsupportedScheme(name) => write!(f, "unsupported scheme `{name}`"),
            Self::MissingRole { target, role } => {
                write!(f, "{target}: palette is missing role `{role}`")
            }
            Self::NotFound(msg) => write!(f, "not found: {msg}"),
            Self::Io { path, source } => write!(f, "io: {}: {source}", path.display()),
            Self::Config(e) => write!(f, "config: {e}"),
        }
    }
}

impl std::error::Error for ThemeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Config(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ConfigError> for ThemeError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let e = ConfigError::from(io_err);
        let s = e.to_string();
        assert!(s.starts_with("io:"), "got: {s}");
        assert!(s.contains("file not found"));
    }

    #[test]
    fn config_error_from_json() {
        let json_err = serde_json::from_str::<serde_json::Value>("{unclosed").unwrap_err();
        let e = ConfigError::from(json_err);
        assert!(e.to_string().starts_with("json:"));
    }

    #[test]
    fn theme_error_display_variants() {
        assert_eq!(
            ThemeError::UnsupportedScheme("sepia".into()).to_string(),
            "unsupported scheme `sepia`"
        );
        assert_eq!(
            ThemeError::MissingRole {
                target: "kitty".into(),
                role: "term4".into()
            }
            .to_string(),
            "kitty: palette is missing role `term4`"
        );
        assert!(ThemeError::NotFound("no state".into())
            .to_string()
            .starts_with("not found:"));
    }

    #[test]
    fn theme_error_io_names_path() {
        let err = ThemeError::io(
            "/tmp/x/colors.json",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        let text = err.to_string();
        assert!(text.contains("/tmp/x/colors.json"), "got: {text}");
        assert!(text.contains("denied"));
    }

    #[test]
    fn theme_error_from_config_error() {
        let te = ThemeError::from(ConfigError::Invalid("harmony out of range".into()));
        assert!(te.to_string().starts_with("config:"), "got: {te}");
    }
}
