//! Command execution context
//!
//! Loads configuration, configures the provider and hands back a ready
//! `linear_team_label` resource, so label handlers only deal with the
//! resource lifecycle.

use colored::Colorize;
use log::debug;

use crate::cli::{GlobalOptions, OutputFormat};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::provider::{
    ConfigureRequest, Diagnostics, LinearProvider, ResourceWithImportState, State, StringValue,
};

/// Full type name of the only resource the CLI drives
pub const TEAM_LABEL_TYPE: &str = "linear_team_label";

/// Context for command execution containing config, the configured resource
/// and runtime options.
pub struct CommandContext {
    /// Loaded configuration with CLI/env overrides applied
    pub config: Config,
    /// Configured team label resource
    pub resource: Box<dyn ResourceWithImportState>,
    /// Output format preference
    pub format: OutputFormat,
}

impl CommandContext {
    /// Create a new command context with full initialization.
    ///
    /// # Errors
    /// Returns error if config cannot be loaded, no token is available, or
    /// provider/resource configuration reports an error diagnostic.
    pub fn new(opts: &GlobalOptions) -> Result<Self> {
        let config = Config::load_at(opts.config_ref())?
            .with_overrides(opts.token_ref(), opts.api_url_ref());
        config.validate_auth()?;

        let format = resolve_format(opts, &config);

        let provider = LinearProvider::new(env!("CARGO_PKG_VERSION"));
        let provider_config = State::new()
            .with("token", StringValue::from(config.api_token.clone()))
            .with("api_url", StringValue::from(config.api_url.clone()));

        let configured = provider.configure(&provider_config);
        check(configured.diagnostics)?;

        let mut resource = provider.resource(TEAM_LABEL_TYPE).ok_or_else(|| {
            Error::Other(format!("provider does not implement {}", TEAM_LABEL_TYPE))
        })?;

        let resp = resource.configure(ConfigureRequest {
            provider_data: configured.provider_data,
        });
        check(resp.diagnostics)?;

        debug!("Configured {} against {}", TEAM_LABEL_TYPE, config.api_url());

        Ok(Self {
            config,
            resource,
            format,
        })
    }
}

/// Flag/env format, else the config preference, else table
pub fn resolve_format(opts: &GlobalOptions, config: &Config) -> OutputFormat {
    opts.format
        .or_else(|| {
            config
                .preferences
                .format
                .as_deref()
                .and_then(OutputFormat::from_name)
        })
        .unwrap_or_default()
}

/// Print warnings to stderr and turn error diagnostics into an error
pub fn check(diagnostics: Diagnostics) -> Result<()> {
    for warning in diagnostics.warnings() {
        eprintln!("{}", warning.to_string().yellow());
    }

    diagnostics
        .into_result()
        .map(|_| ())
        .map_err(Error::Diagnostics)
}
