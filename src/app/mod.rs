//! CLI entry and dispatch.

use anyhow::{Context, Result};
use clap::Parser;

use crate::config;

mod commands;

#[derive(Parser)]
#[command(name = "lexbr")]
#[command(version)]
#[command(about = "Terminal legal research assistant")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Starts an interactive chat with the research agent
    Chat,

    /// Sends a single question and prints the structured answer
    Ask {
        /// The legal question to send
        question: String,

        /// Start a fresh conversation instead of using the active one
        #[arg(long)]
        new: bool,

        /// Print the full structured agent response as JSON
        #[arg(long)]
        json: bool,
    },

    /// Manage saved conversations
    Conversations {
        #[command(subcommand)]
        command: ConversationCommands,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(clap::Subcommand)]
enum ConversationCommands {
    /// Lists saved conversations
    List,
    /// Shows a conversation transcript
    Show {
        /// The id of the conversation to show
        #[arg(value_name = "ID")]
        id: String,
    },
    /// Starts a new conversation and makes it active
    New {
        /// Title for the new conversation (default: "Conversa {id}")
        #[arg(long)]
        title: Option<String>,
    },
    /// Renames a conversation
    Rename {
        /// The id of the conversation to rename
        #[arg(value_name = "ID")]
        id: String,
        /// The new title
        #[arg(value_name = "TITLE")]
        title: String,
    },
    /// Deletes a conversation
    Delete {
        /// The id of the conversation to delete
        #[arg(value_name = "ID")]
        id: String,
    },
}

#[derive(clap::Subcommand)]
enum ConfigCommands {
    /// Show the path to the config file
    Path,
    /// Initialize a default config file (if not present)
    Init,
    /// Set the agent model in the config file
    SetModel {
        /// The model name
        #[arg(value_name = "MODEL")]
        model: String,
    },
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    // one tokio runtime for everything
    let rt = tokio::runtime::Runtime::new().context("create tokio runtime")?;

    rt.block_on(async move { dispatch(cli).await })
}

async fn dispatch(cli: Cli) -> Result<()> {
    let config = config::Config::load().context("load config")?;

    // default to chat mode
    let Some(command) = cli.command else {
        return commands::chat::run(&config).await;
    };

    match command {
        Commands::Chat => commands::chat::run(&config).await,

        Commands::Ask { question, new, json } => {
            commands::ask::run(&config, &question, new, json).await
        }

        Commands::Conversations { command } => match command {
            ConversationCommands::List => commands::conversations::list(),
            ConversationCommands::Show { id } => commands::conversations::show(&id),
            ConversationCommands::New { title } => {
                commands::conversations::new(title.as_deref())
            }
            ConversationCommands::Rename { id, title } => {
                commands::conversations::rename(&id, &title)
            }
            ConversationCommands::Delete { id } => commands::conversations::delete(&id),
        },

        Commands::Config { command } => match command {
            ConfigCommands::Path => commands::config::path(),
            ConfigCommands::Init => commands::config::init(),
            ConfigCommands::SetModel { model } => commands::config::set_model(&model),
        },
    }
}
