//! CLI command definitions and handlers

use clap::{Args, Parser, Subcommand};
pub use clap_complete::Shell;

pub mod args;
pub mod completions;
pub mod context;
pub mod init;
pub mod label;
pub mod schema;
pub mod status;

pub use args::{GlobalOptions, OutputFormat};
pub use context::CommandContext;

/// Linear provider - manage Linear team labels as infrastructure
#[derive(Parser, Debug)]
#[command(name = "linear-provider")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (table, json)
    #[arg(
        long,
        global = true,
        env = "LINEAR_PROVIDER_FORMAT",
        hide_env = true,
        hide_possible_values = true
    )]
    pub format: Option<OutputFormat>,

    /// Override config file location
    #[arg(long, global = true, env = "LINEAR_PROVIDER_CONFIG", hide_env = true)]
    pub config: Option<String>,

    /// Linear API token
    #[arg(
        long,
        global = true,
        env = "LINEAR_TOKEN",
        hide_env = true,
        hide_env_values = true
    )]
    pub token: Option<String>,

    /// GraphQL endpoint override
    #[arg(long = "api-url", global = true, env = "LINEAR_API_URL", hide_env = true)]
    pub api_url: Option<String>,

    /// Enable debug logging
    #[arg(long, global = true, env = "LINEAR_PROVIDER_DEBUG", hide_env = true)]
    pub debug: bool,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Save and verify a Linear API token
    Init,

    /// Show authentication and configuration status
    Status,

    /// Display version information
    Version,

    /// Print the linear_team_label schema
    Schema,

    /// Manage team labels
    #[command(subcommand)]
    Label(LabelCommands),

    /// Generate shell completions
    #[command(after_help = "\
EXAMPLES:
  bash:   linear-provider completions bash > /etc/bash_completion.d/linear-provider
  zsh:    linear-provider completions zsh > \"${fpath[1]}/_linear-provider\"
  fish:   linear-provider completions fish > ~/.config/fish/completions/linear-provider.fish")]
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Team label subcommands
#[derive(Subcommand, Debug)]
pub enum LabelCommands {
    /// Create a team label
    #[command(after_help = "EXAMPLES:\n  \
            linear-provider label create --name Bug --team-id <uuid>\n  \
            linear-provider label create --name Bug --team-id <uuid> --color '#eb5757'")]
    Create {
        #[command(flatten)]
        fields: LabelFields,

        /// Owning team ID (UUID)
        #[arg(long = "team-id")]
        team_id: String,
    },

    /// Read a team label by ID
    #[command(visible_alias = "get")]
    Read {
        /// Label ID
        id: String,
    },

    /// Update a team label; changing the team replaces it
    #[command(after_help = "EXAMPLES:\n  \
            linear-provider label update <id> --name Defect\n  \
            linear-provider label update <id> --clear-description\n  \
            linear-provider label update <id> --team-id <uuid>   # delete + create")]
    Update {
        /// Label ID
        id: String,

        /// New label name
        #[arg(long)]
        name: Option<String>,

        /// New description
        #[arg(long, conflicts_with = "clear_description")]
        description: Option<String>,

        /// Remove the description
        #[arg(long)]
        clear_description: bool,

        /// New color as #rrggbb
        #[arg(long)]
        color: Option<String>,

        /// Move the label to another team (recreates it)
        #[arg(long = "team-id")]
        team_id: Option<String>,
    },

    /// Delete a team label
    Delete {
        /// Label ID
        id: String,

        /// Skip confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,
    },

    /// Adopt an existing label by name and team key
    #[command(after_help = "EXAMPLES:\n  \
            linear-provider label import Bug:ENG\n  \
            linear-provider label import 'Needs review:OPS' --format json")]
    Import {
        /// Identifier in the form label_name:team_key
        id: String,
    },
}

/// Label attributes accepted on create
#[derive(Debug, Clone, Args)]
pub struct LabelFields {
    /// Label name
    #[arg(long)]
    pub name: String,

    /// Label description
    #[arg(long)]
    pub description: Option<String>,

    /// Label color as #rrggbb; Linear picks one when omitted
    #[arg(long)]
    pub color: Option<String>,
}
