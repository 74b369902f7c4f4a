//! # Output Configuration
//!
//! Controls whether CLI output is colored. The following are respected:
//! - `--color=never|always|auto` - CLI flag for color control
//! - `NO_COLOR` - Disables colors when set (per https://no-color.org/)
//! - `CLICOLOR=0` - Disables colors
//! - `CLICOLOR_FORCE=1` - Forces colors even in non-TTY
//! - `TERM=dumb` - Disables colors for dumb terminals
//!
//! ```rust,ignore
//! use svn_externals::output::{OutputConfig, status_label};
//!
//! let config = OutputConfig::from_env_and_flag("auto");
//! println!("{} lib", status_label(&config, ExternalStatus::Changed));
//! ```

use std::env;

use console::Style;

use crate::definition::ExternalStatus;

/// Width of the status column in tables.
pub const STATUS_WIDTH: usize = 7;

/// Output configuration for controlling colors.
#[derive(Debug, Clone)]
pub struct OutputConfig {
    /// Whether colors should be used in output.
    pub use_color: bool,
}

impl OutputConfig {
    /// Create an output configuration from environment and CLI flag.
    ///
    /// `--color=always` forces colors on (overriding `NO_COLOR`),
    /// `--color=never` forces them off, anything else detects support from
    /// the environment and the terminal.
    pub fn from_env_and_flag(color_flag: &str) -> Self {
        let use_color = match color_flag.to_lowercase().as_str() {
            "always" => true,
            "never" => false,
            _ => Self::detect_color_support(),
        };

        Self { use_color }
    }

    fn detect_color_support() -> bool {
        // The presence of the variable (even if empty) disables colors
        if env::var_os("NO_COLOR").is_some() {
            return false;
        }

        if env::var("CLICOLOR").is_ok_and(|v| v == "0") {
            return false;
        }

        if env::var("CLICOLOR_FORCE").is_ok_and(|v| v != "0" && !v.is_empty()) {
            return true;
        }

        if env::var("TERM").is_ok_and(|v| v == "dumb") {
            return false;
        }

        console::Term::stdout().features().colors_supported()
    }

    #[cfg(test)]
    pub fn with_color() -> Self {
        Self { use_color: true }
    }

    #[cfg(test)]
    pub fn without_color() -> Self {
        Self { use_color: false }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self::from_env_and_flag("auto")
    }
}

fn status_style(status: ExternalStatus) -> Style {
    match status {
        ExternalStatus::New => Style::new().green(),
        ExternalStatus::Changed => Style::new().yellow(),
        ExternalStatus::Missing => Style::new().red(),
        ExternalStatus::Error => Style::new().red().bold(),
        ExternalStatus::Clean | ExternalStatus::Unknown => Style::new().dim(),
    }
}

/// Status name padded to [`STATUS_WIDTH`], colored when enabled.
pub fn status_label(config: &OutputConfig, status: ExternalStatus) -> String {
    let padded = format!("{:<width$}", status.as_str(), width = STATUS_WIDTH);
    if config.use_color {
        status_style(status).force_styling(true).apply_to(padded).to_string()
    } else {
        padded
    }
}
