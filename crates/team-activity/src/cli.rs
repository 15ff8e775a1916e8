use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "team-activity",
    version,
    about = "Answer chat questions about team GitHub and Jira activity"
)]
pub struct Cli {
    /// Output format
    #[arg(long, short = 'o', value_enum, global = true, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Path to a TOML config file
    #[arg(long, env = "TEAM_ACTIVITY_CONFIG", global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(ValueEnum, Clone, Debug, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the chat HTTP endpoint
    Serve {
        /// Listen address (overrides config file)
        #[arg(long, value_name = "ADDR")]
        bind: Option<String>,
    },
    /// Answer a single chat message
    Ask {
        /// The chat message
        message: String,

        /// Force an intent instead of classifying the message
        /// (JIRA_ONLY, GITHUB_COMMITS, GITHUB_PRS, GITHUB_REPOS, GITHUB_ONLY, BOTH)
        #[arg(long, value_name = "NAME")]
        intent: Option<String>,
    },
    /// Show how a message is parsed, without calling any backend
    Parse {
        /// The chat message
        message: String,
    },
    /// List the alias directory
    People,
}
