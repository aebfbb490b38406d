//! linear-provider - manage Linear team labels as infrastructure

use clap::Parser;
use log::LevelFilter;

mod cli;
mod client;
mod config;
mod error;
mod models;
mod output;
mod provider;
mod resources;

use cli::label::LabelChanges;
use cli::{Cli, Commands, GlobalOptions, LabelCommands};
use error::{Error, Result};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.debug);

    if let Err(err) = run(cli).await {
        match err {
            // Each diagnostic already carries its severity
            Error::Diagnostics(diagnostics) => eprintln!("{}", diagnostics),
            err => eprintln!("Error: {}", err),
        }
        std::process::exit(1);
    }
}

/// `RUST_LOG` wins; otherwise warnings only, or debug with `--debug`
fn init_logging(debug: bool) {
    let default_level = if debug {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };

    env_logger::Builder::new()
        .filter_level(default_level)
        .parse_default_env()
        .format_timestamp(None)
        .init();
}

async fn run(cli: Cli) -> Result<()> {
    let opts = GlobalOptions::from_cli(&cli);

    match cli.command {
        Commands::Init => cli::init::run(&opts).await,
        Commands::Status => cli::status::run(&opts),
        Commands::Version => {
            println!("linear-provider version {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        Commands::Schema => cli::schema::run(&opts),
        Commands::Completions { shell } => {
            cli::completions::run(shell);
            Ok(())
        }
        Commands::Label(label_cmd) => match label_cmd {
            LabelCommands::Create { fields, team_id } => {
                cli::label::create(&opts, &fields, &team_id).await
            }
            LabelCommands::Read { id } => cli::label::read(&opts, &id).await,
            LabelCommands::Update {
                id,
                name,
                description,
                clear_description,
                color,
                team_id,
            } => {
                let changes = LabelChanges {
                    name,
                    description,
                    clear_description,
                    color,
                    team_id,
                };
                cli::label::update(&opts, &id, &changes).await
            }
            LabelCommands::Delete { id, yes } => cli::label::delete(&opts, &id, yes).await,
            LabelCommands::Import { id } => cli::label::import(&opts, &id).await,
        },
    }
}
