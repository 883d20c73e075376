//! Operator-facing output configuration.
//!
//! Controls whether status lines use emoji or plain-text markers, honoring
//! the `--color` flag, the `NO_COLOR` convention (https://no-color.org/)
//! and terminal capability detection via the `console` crate.

use std::env;

/// Whether decorated output should be used on this run.
#[derive(Debug, Clone)]
pub struct OutputConfig {
    pub use_color: bool,
}

impl OutputConfig {
    /// Resolve the `--color` flag value ("always", "never", or "auto").
    pub fn from_flag(color_flag: &str) -> Self {
        let use_color = match color_flag.to_lowercase().as_str() {
            "always" => true,
            "never" => false,
            _ => Self::detect(),
        };
        Self { use_color }
    }

    fn detect() -> bool {
        // The presence of NO_COLOR (even empty) disables decoration
        if env::var_os("NO_COLOR").is_some() {
            return false;
        }
        if env::var("TERM").is_ok_and(|v| v == "dumb") {
            return false;
        }
        console::Term::stdout().features().colors_supported()
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self::from_flag("auto")
    }
}

/// Pick the emoji marker or its plain-text fallback.
pub fn status<'a>(config: &OutputConfig, emoji: &'a str, plain: &'a str) -> &'a str {
    if config.use_color {
        emoji
    } else {
        plain
    }
}
