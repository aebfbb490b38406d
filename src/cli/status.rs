//! Status command implementation

use colored::Colorize;

use crate::cli::GlobalOptions;
use crate::config::{Config, DEFAULT_API_URL};
use crate::error::Result;

/// Run the status command to display configuration status
pub fn run(opts: &GlobalOptions) -> Result<()> {
    println!("{}\n", "Linear Provider Configuration Status".bold());

    let config_path = Config::resolve_path(opts.config_ref())?;
    let file_exists = config_path.exists();

    if file_exists {
        println!("Config file: {}", config_path.display().to_string().cyan());
    } else {
        println!(
            "Config file: {} {}",
            config_path.display().to_string().cyan(),
            "(not found)".dimmed()
        );
    }
    println!();

    let file_config = Config::load_at(opts.config_ref())?;
    let config = file_config
        .clone()
        .with_overrides(opts.token_ref(), opts.api_url_ref());

    // Token status
    match (opts.token_ref(), file_config.api_token.as_deref()) {
        (Some(token), _) if !token.is_empty() => {
            println!("{} API token provided via --token or LINEAR_TOKEN", "✓".green());
        }
        (_, Some(token)) if !token.is_empty() => {
            println!("{} API token configured", "✓".green());
        }
        _ => {
            println!("{} API token not configured", "✗".red());
            println!("  → Run 'linear-provider init' or set LINEAR_TOKEN");
        }
    }

    // Endpoint status (only highlight if custom)
    if config.api_url() == DEFAULT_API_URL {
        println!("{} API endpoint: {}", "○".dimmed(), DEFAULT_API_URL);
    } else {
        println!(
            "{} Custom API endpoint: {}",
            "○".dimmed(),
            config.api_url().cyan()
        );
    }

    if let Some(format) = &config.preferences.format {
        println!("{} Default output format: {}", "○".dimmed(), format);
    }

    println!();
    Ok(())
}
