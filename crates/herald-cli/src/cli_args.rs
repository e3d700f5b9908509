use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(
    name = "herald",
    about = "Relay pipeline events to pull request statuses and chat rooms",
    version
)]
pub struct Cli {
    #[arg(
        long,
        env = "HERALD_CONFIG",
        global = true,
        help = "Path to the TOML service config (tagged by `provider`)"
    )]
    pub config: Option<PathBuf>,

    #[arg(
        long,
        global = true,
        default_value_t = false,
        help = "Pretty-print the outcome JSON"
    )]
    pub pretty: bool,

    #[command(subcommand)]
    pub command: HeraldCommand,
}

#[derive(Debug, Subcommand)]
pub enum HeraldCommand {
    /// Handle one event and print the outcome
    Receive {
        #[arg(long, help = "Path to the event JSON, or `-` for stdin")]
        event: PathBuf,
    },

    /// Check which actions the configured credentials permit
    Test {
        #[arg(long, help = "Path to a `test` event JSON, or `-` for stdin")]
        event: Option<PathBuf>,

        #[arg(long = "github-slug", help = "Repository slug, e.g. owner/name")]
        github_slug: Option<String>,

        #[arg(long = "git-url", help = "Repository clone URL")]
        git_url: Option<String>,

        #[arg(long = "repo-name", help = "Repository display name for chat relays")]
        repo_name: Option<String>,
    },
}
