//! Compile-time build metadata exposed through `--version` and `--help`.

/// Semver package version from `Cargo.toml`.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// VCS commit hash captured at build time.
pub const GIT_COMMIT: &str = env!("MATERIAL_THEME_BUILD_GIT_HASH");

/// Build timestamp captured at compile time.
pub const BUILD_TIMESTAMP: &str = env!("MATERIAL_THEME_BUILD_TIMESTAMP");

/// Body of `material-theme --version` (clap prefixes the binary name).
pub const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    "\ncommit: ",
    env!("MATERIAL_THEME_BUILD_GIT_HASH"),
    "\nbuilt: ",
    env!("MATERIAL_THEME_BUILD_TIMESTAMP")
);

/// Help trailer block that surfaces build metadata in `material-theme --help`.
pub const HELP_BUILD_METADATA: &str = concat!(
    "Build metadata:\n  commit: ",
    env!("MATERIAL_THEME_BUILD_GIT_HASH"),
    "\n  built: ",
    env!("MATERIAL_THEME_BUILD_TIMESTAMP")
);

/// One-line version tag for debug reports.
pub fn version_line() -> String {
    format!("v{VERSION} ({GIT_COMMIT}, built {BUILD_TIMESTAMP})")
}
