//! Command execution context
//!
//! Loads the config file once and layers command line values on top, so
//! every command sees the same resolved settings.

use crate::cli::{GlobalOptions, OutputFormat};
use crate::config::{Config, Overrides};
use crate::error::Result;

/// Resolved settings for one command invocation
#[derive(Debug)]
pub struct CommandContext {
    /// Config file values with command line and environment overrides applied
    pub config: Config,
    /// Output format preference
    pub format: OutputFormat,
}

impl CommandContext {
    /// Load config from `--config` (or the default location) and apply `overrides`.
    ///
    /// # Errors
    /// Returns error if the config file exists but cannot be read or parsed.
    pub fn new(opts: &GlobalOptions, overrides: Overrides) -> Result<Self> {
        let mut config = Config::load_at(opts.config_ref())?;
        config.apply(overrides);

        Ok(Self {
            config,
            format: opts.format,
        })
    }
}
