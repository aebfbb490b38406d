//! Init command implementation

use colored::Colorize;
use dialoguer::{Password, theme::ColorfulTheme};

use crate::cli::GlobalOptions;
use crate::client::{LinearApi, LinearClient};
use crate::config::Config;
use crate::error::Result;

/// Run the init command
///
/// Prompts for a personal API token, verifies it against the API and saves
/// it to the config file. An `--api-url` override is stored alongside it.
pub async fn run(opts: &GlobalOptions) -> Result<()> {
    println!("{}", "Welcome to the Linear provider!".bold().green());
    println!("Let's set up your Linear API token.\n");

    let token: String = Password::with_theme(&ColorfulTheme::default())
        .with_prompt("Enter your Linear personal API token")
        .interact()?;

    let config = Config::load_at(opts.config_ref())
        .unwrap_or_default()
        .with_overrides(Some(token.as_str()), opts.api_url_ref());

    println!("\n{}", "Verifying token...".cyan());
    let client = LinearClient::with_endpoint(token, config.api_url())?;
    let viewer = client.viewer().await?;

    match &viewer.email {
        Some(email) => println!(
            "{} Authenticated as {} <{}>",
            "✓".green(),
            viewer.name.bold(),
            email
        ),
        None => println!("{} Authenticated as {}", "✓".green(), viewer.name.bold()),
    }

    config.save_at(opts.config_ref())?;

    let config_path = Config::resolve_path(opts.config_ref())?;
    println!(
        "\n{} Configuration saved to: {}",
        "✓".green(),
        config_path.display()
    );

    println!("\n{}", "You're all set! Try running:".bold());
    println!("  {} - Show configuration status", "linear-provider status".cyan());
    println!(
        "  {} - Adopt an existing label",
        "linear-provider label import <name>:<team_key>".cyan()
    );

    Ok(())
}
