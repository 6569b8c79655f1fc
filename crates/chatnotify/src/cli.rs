use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::config::Overrides;
use crate::status::Status;

/// chatnotify – post CI release outcomes to Google Chat
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Activate verbose output (-v, -vv, etc.)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Sets a custom config file
    #[arg(short, long, value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Notify a chat webhook about the release of the current tag
    Send(SendArgs),
    /// Print build information
    Version {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args, Debug)]
pub struct SendArgs {
    /// Display name of the build or module
    #[arg(short, long)]
    pub name: String,

    /// Chat webhook URL (not needed with --dry-run)
    #[arg(
        short,
        long,
        env = "CHAT_WEBHOOK_URL",
        hide_env_values = true,
        required_unless_present = "dry_run"
    )]
    pub webhook: Option<String>,

    /// Job outcome
    #[arg(short, long, value_enum)]
    pub status: Status,

    /// Print the card instead of posting it
    #[arg(long)]
    pub dry_run: bool,

    /// GitHub token used for the release lookup
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Website linked from the card
    #[arg(long, env = "WEBSITE")]
    pub website: Option<String>,

    /// GitHub REST API base URL
    #[arg(long, env = "GITHUB_API_URL")]
    pub api_url: Option<String>,

    /// GitHub web URL used for repository and checks links
    #[arg(long, env = "GITHUB_SERVER_URL")]
    pub server_url: Option<String>,
}

impl SendArgs {
    pub fn overrides(&self) -> Overrides {
        Overrides {
            token: self.token.clone(),
            website: self.website.clone(),
            api_url: self.api_url.clone(),
            server_url: self.server_url.clone(),
        }
    }
}
