//! Harness configuration.
//!
//! Colors are on by default. They are turned off for the whole process when either
//! `IS_NOCOLOR` or `NO_COLOR` is set to a non-empty value; libtest owns the test binary's
//! command line, so the environment is the switch.

use std::sync::OnceLock;

use crate::output::Output;

/// Variables that disable colorized output when set to a non-empty value.
pub const NO_COLOR_VARS: [&str; 2] = ["IS_NOCOLOR", "NO_COLOR"];

/// Harness configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Wrap locations, types and comments in ANSI color escapes
    pub colorful: bool,
    /// Destination of failure messages
    pub output: Output,
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

impl Config {
    /// Create a new config with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults, with colors decided by the environment (read once per process).
    pub fn from_env() -> Self {
        static NO_COLOR: OnceLock<bool> = OnceLock::new();
        let no_color = *NO_COLOR.get_or_init(|| {
            NO_COLOR_VARS
                .iter()
                .any(|var| std::env::var_os(var).is_some_and(|value| !value.is_empty()))
        });
        Self {
            colorful: !no_color,
            output: Output::Stdout,
        }
    }

    /// Turn colors on or off
    pub fn with_colorful(mut self, colorful: bool) -> Self {
        self.colorful = colorful;
        self
    }

    /// Set the output sink
    pub fn with_output(mut self, output: impl Into<Output>) -> Self {
        self.output = output.into();
        self
    }
}
